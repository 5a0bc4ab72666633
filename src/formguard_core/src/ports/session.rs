use crate::domain::{state::AuthenticationState, token::AuthToken};

/// Key/value session scoped to one client.
///
/// Implementations use interior mutability; serialising concurrent access to
/// one session is the caller's concern.
pub trait Session: Send + Sync {
    fn id(&self) -> String;

    fn get(&self, key: &str) -> Option<serde_json::Value>;

    fn set(&self, key: &str, value: serde_json::Value);

    fn remove(&self, key: &str) -> Option<serde_json::Value>;

    /// Move the data to a fresh session id.
    fn migrate(&self);
}

/// Holds the token of the current session.
pub trait TokenStorage: Send + Sync {
    fn token(&self) -> Option<AuthToken>;

    fn set_token(&self, token: Option<AuthToken>);

    fn state(&self) -> AuthenticationState {
        AuthenticationState::from(self.token())
    }
}
