use contracts::system::auth::{Session, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::storage::{self, TokenKind};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn signed_in(access_token: String, user: UserInfo) -> Self {
        Self {
            session: Some(Session::for_user(access_token, &user)),
            user_info: Some(user),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_admin)
    }
}

/// Validate a stored token, refreshing it once if the API rejects it
async fn restore_session(access_token: String) -> Option<AuthState> {
    if let Ok(user) = api::get_current_user(&access_token).await {
        return Some(AuthState::signed_in(access_token, user));
    }

    let refresh_token = storage::load_token(TokenKind::Refresh)?;
    match api::refresh_token(refresh_token).await {
        Ok(response) => {
            storage::save_token(TokenKind::Access, &response.access_token);
            let user = api::get_current_user(&response.access_token).await.ok()?;
            Some(AuthState::signed_in(response.access_token, user))
        }
        Err(e) => {
            log::warn!("Session refresh failed: {}", e);
            None
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Try to restore session from localStorage on mount
    Effect::new(move |_| {
        spawn_local(async move {
            let Some(access_token) = storage::load_token(TokenKind::Access) else {
                return;
            };
            match restore_session(access_token).await {
                Some(state) => set_auth_state.set(state),
                None => storage::clear_tokens(),
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Current session as a signal, for handing to API clients
pub fn use_session() -> Signal<Option<Session>> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(|s| s.session.clone()))
}

/// Helper: Perform login
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), String> {
    let response = api::login(username, password).await?;

    storage::save_token(TokenKind::Access, &response.access_token);
    storage::save_token(TokenKind::Refresh, &response.refresh_token);

    log::info!("Signed in as {}", response.user.username);
    set_auth_state.set(AuthState::signed_in(response.access_token, response.user));

    Ok(())
}

/// Helper: Perform logout
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::load_token(TokenKind::Refresh) {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("{}", e);
        }
    }

    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_in_carries_role() {
        let user = UserInfo {
            id: "7".into(),
            username: "warehouse".into(),
            full_name: None,
            email: None,
            role: "staff".into(),
        };
        let state = AuthState::signed_in("tok".into(), user);
        let session = state.session.unwrap();
        assert_eq!(session.access_token, "tok");
        assert!(!session.is_admin());
        assert!(!AuthState::default().is_admin());
    }
}
