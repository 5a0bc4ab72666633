use formguard_core::{AuthToken, ProviderKey, Session, TokenStorage, security::token_session_key};

/// Keeps the token of one provider in the client's session, as JSON.
pub struct SessionTokenStorage<'a, S: Session + ?Sized> {
    session: &'a S,
    key: String,
}

impl<'a, S: Session + ?Sized> SessionTokenStorage<'a, S> {
    pub fn new(session: &'a S, provider_key: &ProviderKey) -> Self {
        Self {
            session,
            key: token_session_key(provider_key.as_str()),
        }
    }
}

impl<S: Session + ?Sized> TokenStorage for SessionTokenStorage<'_, S> {
    fn token(&self) -> Option<AuthToken> {
        let value = self.session.get(&self.key)?;
        match serde_json::from_value(value) {
            Ok(token) => Some(token),
            Err(error) => {
                tracing::warn!(%error, key = %self.key, "Discarding undecodable session token");
                None
            }
        }
    }

    fn set_token(&self, token: Option<AuthToken>) {
        let Some(token) = token else {
            self.session.remove(&self.key);
            return;
        };

        match serde_json::to_value(&token) {
            Ok(value) => self.session.set(&self.key, value),
            Err(error) => {
                tracing::error!(%error, key = %self.key, "Failed to serialize token for session");
            }
        }
    }
}
