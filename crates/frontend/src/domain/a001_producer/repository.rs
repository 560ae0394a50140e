//! Producer API access with a per-entity read cache
//!
//! Writes go straight to the API and invalidate the affected cache entries.

use chrono::{Duration, Utc};
use contracts::domain::a001_producer::aggregate::{Producer, ProducerDto};
use contracts::shared::pagination::{ListQuery, PaginatedResponse};
use leptos::prelude::*;

use crate::shared::config::config;
use crate::shared::http::ApiClient;
use crate::shared::query_cache::QueryCache;

fn base_path() -> String {
    format!("/{}", Producer::collection_name())
}

fn item_path(id: &str) -> String {
    format!("{}/{}", base_path(), urlencoding::encode(id))
}

#[derive(Clone, Copy)]
pub struct ProducerRepository {
    lists: StoredValue<QueryCache<ListQuery, PaginatedResponse<Producer>>>,
    items: StoredValue<QueryCache<String, Producer>>,
}

impl ProducerRepository {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            lists: StoredValue::new(QueryCache::new(stale_time)),
            items: StoredValue::new(QueryCache::new(stale_time)),
        }
    }

    pub async fn list(
        &self,
        client: &ApiClient,
        query: &ListQuery,
    ) -> Result<PaginatedResponse<Producer>, String> {
        if let Some(page) = self.lists.with_value(|c| c.get_fresh(query, Utc::now())) {
            log::debug!("Producers page {} served from cache", query.page);
            return Ok(page);
        }

        let page: PaginatedResponse<Producer> = client.get_page(&base_path(), query).await?;
        let now = Utc::now();
        self.lists.update_value(|c| {
            c.prune(now);
            c.insert(query.clone(), page.clone(), now);
        });
        self.items.update_value(|c| {
            for producer in &page.data {
                c.insert(producer.id.as_string(), producer.clone(), now);
            }
        });
        Ok(page)
    }

    pub async fn get(&self, client: &ApiClient, id: &str) -> Result<Producer, String> {
        let key = id.to_string();
        if let Some(producer) = self.items.with_value(|c| c.get_fresh(&key, Utc::now())) {
            return Ok(producer);
        }

        let producer: Producer = client.get(&item_path(id)).await?;
        self.items
            .update_value(|c| c.insert(key, producer.clone(), Utc::now()));
        Ok(producer)
    }

    /// Create or update depending on whether the DTO carries an id
    pub async fn save(&self, client: &ApiClient, dto: &ProducerDto) -> Result<Producer, String> {
        let prepared = dto.prepare_for_save()?;
        let saved: Producer = match &prepared.id {
            Some(id) => client.put(&item_path(id), &prepared).await?,
            None => client.post(&base_path(), &prepared).await?,
        };

        self.invalidate_list();
        self.items
            .update_value(|c| c.insert(saved.id.as_string(), saved.clone(), Utc::now()));
        Ok(saved)
    }

    pub async fn delete(&self, client: &ApiClient, id: &str) -> Result<(), String> {
        client.delete(&item_path(id)).await?;
        self.invalidate_item(id);
        self.invalidate_list();
        Ok(())
    }

    /// Drop every cached page
    pub fn invalidate_list(&self) {
        self.lists.update_value(|c| c.invalidate_all());
    }

    pub fn invalidate_item(&self, id: &str) {
        self.items.update_value(|c| {
            c.invalidate(&id.to_string());
        });
    }

    pub fn invalidate_all(&self) {
        self.invalidate_list();
        self.items.update_value(|c| c.invalidate_all());
    }
}

pub fn provide_producer_repository() {
    provide_context(ProducerRepository::new(config().cache.stale_time()));
}

pub fn use_producer_repository() -> ProducerRepository {
    use_context::<ProducerRepository>().expect("ProducerRepository not provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_is_encoded() {
        assert_eq!(item_path("42"), "/producers/42");
        assert_eq!(item_path("a b/c"), "/producers/a%20b%2Fc");
    }
}
