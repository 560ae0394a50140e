use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only while a session exists
#[component]
pub fn RequireAuth(
    /// Shown when signed out (nothing by default)
    #[prop(optional, into)]
    fallback: ViewFn,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show when=move || auth_state.with(|s| s.session.is_some()) fallback=fallback>
            {children()}
        </Show>
    }
}

/// Renders children only for admin sessions
#[component]
pub fn RequireAdmin(
    #[prop(optional, into)]
    fallback: ViewFn,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show when=move || auth_state.with(|s| s.is_admin()) fallback=fallback>
            {children()}
        </Show>
    }
}
