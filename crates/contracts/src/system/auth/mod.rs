use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// Role flag as sent by the API ("admin", "super_admin", "staff", ...)
    pub role: String,
}

/// Credentials handed to whatever needs to call the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub role: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            role: role.into(),
        }
    }

    pub fn for_user(access_token: impl Into<String>, user: &UserInfo) -> Self {
        Self::new(access_token, user.role.clone())
    }

    /// Value of the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    pub fn is_admin(&self) -> bool {
        is_admin_role(&self.role)
    }
}

pub fn is_admin_role(role: &str) -> bool {
    role.eq_ignore_ascii_case("admin") || role.eq_ignore_ascii_case("super_admin")
}
