//! Hand-written doubles shared by the use case tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use formguard_core::{
    AuthToken, AuthenticationError, AuthenticationManager, Credentials, FormData, FormValue,
    LoginRequest, ProviderKey, Session, TokenStorage, TwoFactorToken, TwoFactorTokenFactory,
    UsernamePasswordToken,
};

pub fn provider_key() -> ProviderKey {
    ProviderKey::new("contao_frontend").unwrap()
}

pub fn pending_two_factor(username: &str, providers: &[&str]) -> TwoFactorToken {
    TwoFactorToken::new(
        UsernamePasswordToken::authenticated(username, provider_key(), vec!["ROLE_MEMBER".into()]),
        None,
        provider_key(),
        providers.iter().map(|p| p.to_string()).collect(),
    )
}

// ============================================================================
// Session and token storage
// ============================================================================

#[derive(Default)]
pub struct MockSession {
    id: Mutex<String>,
    values: Mutex<HashMap<String, serde_json::Value>>,
    migrations: Mutex<usize>,
}

impl MockSession {
    pub fn migrations(&self) -> usize {
        *self.migrations.lock().unwrap()
    }
}

impl Session for MockSession {
    fn id(&self) -> String {
        self.id.lock().unwrap().clone()
    }

    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: serde_json::Value) {
        self.values.lock().unwrap().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> Option<serde_json::Value> {
        self.values.lock().unwrap().remove(key)
    }

    fn migrate(&self) {
        *self.migrations.lock().unwrap() += 1;
        let mut id = self.id.lock().unwrap();
        *id = format!("{id}-migrated");
    }
}

#[derive(Default)]
pub struct MockTokenStorage {
    token: Mutex<Option<AuthToken>>,
}

impl MockTokenStorage {
    pub fn with_token(token: impl Into<AuthToken>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStorage for MockTokenStorage {
    fn token(&self) -> Option<AuthToken> {
        self.token.lock().unwrap().clone()
    }

    fn set_token(&self, token: Option<AuthToken>) {
        *self.token.lock().unwrap() = token;
    }
}

// ============================================================================
// Request
// ============================================================================

pub struct MockRequest {
    pub method: String,
    pub form: FormData,
    pub session: Option<Arc<MockSession>>,
}

impl MockRequest {
    pub fn post<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            method: "POST".to_string(),
            form: FormData::from_pairs(pairs),
            session: Some(Arc::new(MockSession::default())),
        }
    }

    pub fn session_value(&self, key: &str) -> Option<serde_json::Value> {
        self.session.as_ref().and_then(|session| session.get(key))
    }
}

impl LoginRequest for MockRequest {
    type Session = MockSession;

    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        "/login"
    }

    fn form_value(&self, name: &str) -> Option<&FormValue> {
        self.form.get(name)
    }

    fn session(&self) -> Option<&Self::Session> {
        self.session.as_deref()
    }
}

// ============================================================================
// Collaborators
// ============================================================================

/// Records every token it receives.
///
/// When accepting, a primary token for a username listed in
/// `two_factor_users` comes back as a pending challenge; every other primary
/// token comes back verified, and a two-factor token yields its wrapped
/// primary token.
#[derive(Clone, Default)]
pub struct MockAuthenticationManager {
    failure: Option<AuthenticationError>,
    two_factor_users: Vec<String>,
    received: Arc<Mutex<Vec<AuthToken>>>,
}

impl MockAuthenticationManager {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting(error: AuthenticationError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn requiring_two_factor_for(mut self, username: &str) -> Self {
        self.two_factor_users.push(username.to_string());
        self
    }

    pub fn received(&self) -> Vec<AuthToken> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AuthenticationManager for MockAuthenticationManager {
    async fn authenticate(&self, token: AuthToken) -> Result<AuthToken, AuthenticationError> {
        self.received.lock().unwrap().push(token.clone());

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        match token {
            AuthToken::UsernamePassword(attempt) => {
                let verified = UsernamePasswordToken::authenticated(
                    attempt.username(),
                    attempt.provider_key().clone(),
                    vec!["ROLE_MEMBER".to_string()],
                );

                if self.two_factor_users.iter().any(|u| u == attempt.username()) {
                    let provider_key = verified.provider_key().clone();
                    Ok(TwoFactorToken::new(verified, None, provider_key, vec!["totp".into()]).into())
                } else {
                    Ok(verified.into())
                }
            }
            AuthToken::TwoFactor(answer) => Ok(answer.into_authenticated_token().into()),
        }
    }
}

pub struct MockTwoFactorTokenFactory;

impl TwoFactorTokenFactory for MockTwoFactorTokenFactory {
    fn create(
        &self,
        authenticated_token: UsernamePasswordToken,
        code: Credentials,
        provider_key: &ProviderKey,
        two_factor_providers: Vec<String>,
    ) -> TwoFactorToken {
        TwoFactorToken::new(
            authenticated_token,
            Some(code),
            provider_key.clone(),
            two_factor_providers,
        )
    }
}
