//! Token persistence in localStorage

use web_sys::{window, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub const ALL: [TokenKind; 2] = [TokenKind::Access, TokenKind::Refresh];

    fn storage_key(self) -> &'static str {
        match self {
            TokenKind::Access => "auth_access_token",
            TokenKind::Refresh => "auth_refresh_token",
        }
    }
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

pub fn save_token(kind: TokenKind, token: &str) {
    let Some(storage) = local_storage() else {
        log::warn!("localStorage unavailable, {:?} token not persisted", kind);
        return;
    };
    if storage.set_item(kind.storage_key(), token).is_err() {
        log::warn!("Failed to persist {:?} token", kind);
    }
}

/// Stored token, `None` when absent or blank
pub fn load_token(kind: TokenKind) -> Option<String> {
    local_storage()?
        .get_item(kind.storage_key())
        .ok()?
        .filter(|t| !t.trim().is_empty())
}

pub fn clear_tokens() {
    if let Some(storage) = local_storage() {
        for kind in TokenKind::ALL {
            let _ = storage.remove_item(kind.storage_key());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_are_distinct() {
        assert_ne!(
            TokenKind::Access.storage_key(),
            TokenKind::Refresh.storage_key()
        );
    }
}
