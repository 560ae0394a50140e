//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::config;

/// Get the base URL for API requests
///
/// Built from the current window location and the configured API port.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, config().api.port)
}

/// Build a full API URL from an endpoint path such as "/producers/42"
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), &config().api.prefix, path)
}

fn join_url(base: &str, prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}{}", base, prefix, path)
    } else {
        format!("{}{}/{}", base, prefix, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3000", "/api", "/producers"),
            "http://localhost:3000/api/producers"
        );
        assert_eq!(
            join_url("http://localhost:3000", "/api/", "producers/1"),
            "http://localhost:3000/api/producers/1"
        );
        assert_eq!(join_url("", "", "/auth/me"), "/auth/me");
    }
}
