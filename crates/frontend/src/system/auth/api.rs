use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, Session, UserInfo,
};

use crate::shared::http::ApiClient;

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };
    ApiClient::anonymous()
        .post("/auth/login", &request)
        .await
        .map_err(|e| format!("Login failed: {}", e))
}

/// Refresh access token using refresh token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let request = RefreshRequest { refresh_token };
    ApiClient::anonymous()
        .post("/auth/refresh", &request)
        .await
        .map_err(|e| format!("Refresh failed: {}", e))
}

/// Logout (revoke refresh token)
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let request = RefreshRequest { refresh_token };
    ApiClient::anonymous()
        .post_no_content("/auth/logout", &request)
        .await
        .map_err(|e| format!("Logout failed: {}", e))
}

/// Get current user info for a bare access token
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    // Role is unknown until the API answers
    let session = Session::new(access_token, "");
    ApiClient::new(Some(session))
        .get("/auth/me")
        .await
        .map_err(|e| format!("Get current user failed: {}", e))
}
