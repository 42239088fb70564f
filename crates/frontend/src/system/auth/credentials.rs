//! Credential provider: the single place that knows where the access token lives.
//!
//! Lookup order is `sessionStorage` first, then `localStorage`.
//! Loaded once at startup into [`Credentials`], cleared on logout.
//! The token itself is written by the dashboard login page.

use leptos::prelude::*;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";

fn session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn read(storage: Option<web_sys::Storage>) -> Option<String> {
    storage?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.trim().is_empty())
}

/// Get access token: session-scoped first, then persistent
pub fn load_access_token() -> Option<String> {
    read(session_storage()).or_else(|| read(local_storage()))
}

/// Clear the token from both storages
fn clear_access_token() {
    for storage in [session_storage(), local_storage()].into_iter().flatten() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
    }
}

/// Access token held for the lifetime of the app
#[derive(Clone, Copy)]
pub struct Credentials {
    token: RwSignal<Option<String>>,
}

impl Credentials {
    /// Current token. Re-reads storage if nothing was loaded yet
    /// (the token may have been written by another page of the dashboard).
    pub fn access_token(&self) -> Option<String> {
        if let Some(token) = self.token.get_untracked() {
            return Some(token);
        }
        let token = load_access_token();
        if token.is_some() {
            self.token.set(token.clone());
        }
        token
    }

    /// Reactive: есть ли токен
    pub fn is_signed_in(&self) -> bool {
        self.token.with(Option::is_some)
    }

    pub fn logout(&self) {
        clear_access_token();
        self.token.set(None);
    }
}

/// Load credentials at startup and put them into context
pub fn provide_credentials() -> Credentials {
    let credentials = Credentials {
        token: RwSignal::new(load_access_token()),
    };
    provide_context(credentials);
    credentials
}

/// Hook to access credentials
pub fn use_credentials() -> Credentials {
    use_context::<Credentials>().expect("Credentials not provided in component tree")
}
