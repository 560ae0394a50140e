use crate::domain::a001_producer::repository::use_producer_repository;
use crate::domain::a001_producer::ui::details::ProducerDetails;
use crate::domain::a001_producer::ui::list::ProducerList;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Screen shown in the main area
#[derive(Clone, Debug, PartialEq)]
enum Screen {
    ProducerList,
    ProducerDetails(Option<String>),
}

#[component]
fn MainLayout() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let repo = use_producer_repository();
    let screen = RwSignal::new(Screen::ProducerList);

    let user_name = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| u.full_name.clone().unwrap_or_else(|| u.username.clone()))
                .unwrap_or_default()
        })
    };

    let on_open =
        Callback::new(move |id: Option<String>| screen.set(Screen::ProducerDetails(id)));
    let back_to_list = Callback::new(move |_: ()| screen.set(Screen::ProducerList));

    view! {
        <div class="app-shell">
            <header class="app-header">
                <span class="app-title">{icon("producers")} " Back Office"</span>
                <span class="app-user">{user_name}</span>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| {
                        // Cached pages belong to the signed-in user
                        repo.invalidate_all();
                        spawn_local(do_logout(set_auth_state));
                    }
                >
                    {icon("log-out")}
                    {"Sign out"}
                </button>
            </header>
            <main class="app-main">
                {move || match screen.get() {
                    Screen::ProducerList => view! { <ProducerList on_open=on_open /> }.into_any(),
                    Screen::ProducerDetails(id) => view! {
                        <ProducerDetails id=id on_saved=back_to_list on_cancel=back_to_list />
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <RequireAuth fallback=|| view! { <LoginPage /> }>
            <MainLayout />
        </RequireAuth>
    }
}
