//! HTTP client for the admin API
//!
//! The session is injected by the caller; nothing here reads auth state.

use contracts::shared::pagination::{ListQuery, PaginatedResponse};
use contracts::system::auth::Session;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_utils::api_url;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiClient {
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(session: Option<Session>) -> Self {
        Self { session }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => builder.header("Authorization", &session.bearer()),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let response = self
            .authorize(Request::get(&api_url(path)))
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        parse_json(check_status("GET", path, response).await?).await
    }

    /// Fetch one page of a collection endpoint
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<PaginatedResponse<T>, String> {
        self.get(&list_path(path, query)?).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let response = self
            .authorize(Request::post(&api_url(path)))
            .json(body)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        parse_json(check_status("POST", path, response).await?).await
    }

    /// POST whose response body is ignored
    pub async fn post_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<(), String> {
        let response = self
            .authorize(Request::post(&api_url(path)))
            .json(body)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        check_status("POST", path, response).await?;
        Ok(())
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let response = self
            .authorize(Request::put(&api_url(path)))
            .json(body)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        parse_json(check_status("PUT", path, response).await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), String> {
        let response = self
            .authorize(Request::delete(&api_url(path)))
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        check_status("DELETE", path, response).await?;
        Ok(())
    }
}

async fn check_status(method: &str, path: &str, response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::warn!("{} {} failed with status {}", method, path, status);
    Err(error_message(method, path, status, &body))
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Path with the list query appended, e.g. `/producers?page=1&limit=20`
pub fn list_path(path: &str, query: &ListQuery) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    Ok(format!("{}?{}", path, qs))
}

fn error_message(method: &str, path: &str, status: u16, body: &str) -> String {
    // APIs answer errors either as `{"message": "..."}` or plain text
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        format!("{} {} failed: {}", method, path, status)
    } else {
        format!("{} {} failed: {} ({})", method, path, status, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path() {
        let query = ListQuery::default();
        assert_eq!(list_path("/producers", &query).unwrap(), "/producers?page=1&limit=20");

        let query = ListQuery::page(3).with_search("garlic");
        assert_eq!(
            list_path("/producers", &query).unwrap(),
            "/producers?page=3&limit=20&search=garlic"
        );
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        assert_eq!(
            error_message("POST", "/producers", 422, r#"{"message":"name is taken"}"#),
            "POST /producers failed: 422 (name is taken)"
        );
        assert_eq!(
            error_message("GET", "/producers/1", 404, "not found\n"),
            "GET /producers/1 failed: 404 (not found)"
        );
        assert_eq!(
            error_message("DELETE", "/producers/1", 500, ""),
            "DELETE /producers/1 failed: 500"
        );
    }

    #[test]
    fn test_session_is_injected() {
        let client = ApiClient::new(Some(Session::new("tok", "admin")));
        assert_eq!(client.session().map(|s| s.bearer()), Some("Bearer tok".to_string()));
        assert!(ApiClient::anonymous().session().is_none());
    }
}
