use crate::domain::a001_producer::repository::provide_producer_repository;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_producer_repository();

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
