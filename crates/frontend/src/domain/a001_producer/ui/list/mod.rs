use contracts::domain::a001_producer::aggregate::Producer;
use contracts::shared::contact::PhonePayload;
use contracts::shared::pagination::{ListQuery, PaginatedResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_producer::repository::use_producer_repository;
use crate::shared::date_utils::format_datetime;
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, Searchable};
use crate::system::auth::context::use_session;
use crate::system::auth::guard::RequireAdmin;

impl Searchable for Producer {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.contact_person.as_str(),
            self.email.as_str(),
            self.address.city.as_str(),
            self.address.province.as_str(),
        ]
    }
}

/// Stored numbers shown in local form; unparsable ones as entered
fn display_phone(raw: &str) -> String {
    PhonePayload::parse(raw)
        .map(|phone| phone.display_local())
        .unwrap_or_else(|_| raw.to_string())
}

#[component]
pub fn ProducerList(
    /// Opens the details form: `None` for a new record
    on_open: Callback<Option<String>>,
) -> impl IntoView {
    let repo = use_producer_repository();
    let session = use_session();

    let query = RwSignal::new(ListQuery::default());
    let page = RwSignal::new(None::<PaginatedResponse<Producer>>);
    let error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(String::new());
    let reload = RwSignal::new(0u32);

    Effect::new(move |_| {
        let current = query.get();
        reload.track();
        let client = ApiClient::new(session.get_untracked());
        spawn_local(async move {
            match repo.list(&client, &current).await {
                Ok(result) => {
                    page.set(Some(result));
                    error.set(None);
                }
                Err(e) => error.set(Some(format!("Failed to load producers: {}", e))),
            }
        });
    });

    let rows = move || {
        page.with(|p| {
            p.as_ref()
                .map(|p| filter_list(&p.data, &filter.get()))
                .unwrap_or_default()
        })
    };

    let delete = move |id: String| {
        let client = ApiClient::new(session.get_untracked());
        spawn_local(async move {
            match repo.delete(&client, &id).await {
                Ok(()) => reload.update(|n| *n += 1),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let has_prev = move || page.with(|p| p.as_ref().and_then(|p| p.pagination).is_some_and(|pg| pg.has_prev()));
    let has_next = move || page.with(|p| p.as_ref().and_then(|p| p.pagination).is_some_and(|pg| pg.has_next()));
    let page_info = move || {
        page.with(|p| match p.as_ref().and_then(|p| p.pagination) {
            Some(pg) => format!("Page {} of {} ({} total)", pg.page, pg.total_pages.max(1), pg.total),
            None => String::new(),
        })
    };

    view! {
        <div class="list-container producer-list">
            <div class="list-header">
                <h3>{icon("producers")} " " {Producer::list_name()}</h3>
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search (min. 3 characters)..."
                    prop:value=move || filter.get()
                    on:input=move |ev| filter.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" on:click=move |_| on_open.run(None)>
                    {icon("plus")}
                    {"New"}
                </button>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <table class="table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Contact person"</th>
                        <th>"Mobile"</th>
                        <th>"Address"</th>
                        <th>"Updated"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|p| (p.id, p.updated_at)
                        children=move |p: Producer| {
                            let id = p.id.as_string();
                            let open_id = id.clone();
                            view! {
                                <tr on:dblclick=move |_| on_open.run(Some(open_id.clone()))>
                                    <td>{p.name.clone()}</td>
                                    <td>{p.contact_person.clone()}</td>
                                    <td>{display_phone(&p.phone)}</td>
                                    <td>{p.address.one_line()}</td>
                                    <td>{format_datetime(&p.updated_at)}</td>
                                    <td>
                                        <RequireAdmin>
                                            <button
                                                class="btn btn-danger btn-icon"
                                                title="Delete"
                                                on:click={
                                                    let id = id.clone();
                                                    move |_| delete(id.clone())
                                                }
                                            >
                                                {icon("trash")}
                                            </button>
                                        </RequireAdmin>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="pagination-controls">
                <button
                    class="pagination-btn"
                    disabled=move || !has_prev()
                    on:click=move |_| query.update(|q| q.page = q.page.saturating_sub(1).max(1))
                >
                    {icon("chevron-left")}
                </button>
                <span class="pagination-info">{page_info}</span>
                <button
                    class="pagination-btn"
                    disabled=move || !has_next()
                    on:click=move |_| query.update(|q| q.page += 1)
                >
                    {icon("chevron-right")}
                </button>
            </div>
        </div>
    }
}
