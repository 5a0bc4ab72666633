use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{credentials::Credentials, provider_key::ProviderKey};

/// Free-form context carried by a token across authentication steps
/// (for example a "remember me" flag).
pub type Attributes = BTreeMap<String, serde_json::Value>;

// ============================================================================
// Primary credential token
// ============================================================================

/// Username/password attempt, or the verified principal once the
/// authentication manager has accepted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernamePasswordToken {
    username: String,
    #[serde(skip)]
    credentials: Option<Credentials>,
    provider_key: ProviderKey,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    attributes: Attributes,
    authenticated: bool,
}

impl UsernamePasswordToken {
    /// An unverified attempt, as built from a login form.
    pub fn new(
        username: impl Into<String>,
        credentials: Credentials,
        provider_key: ProviderKey,
    ) -> Self {
        Self {
            username: username.into(),
            credentials: Some(credentials),
            provider_key,
            roles: Vec::new(),
            attributes: Attributes::new(),
            authenticated: false,
        }
    }

    /// A verified principal. Authentication managers return these.
    pub fn authenticated(
        username: impl Into<String>,
        provider_key: ProviderKey,
        roles: Vec<String>,
    ) -> Self {
        Self {
            username: username.into(),
            credentials: None,
            provider_key,
            roles,
            attributes: Attributes::new(),
            authenticated: true,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn provider_key(&self) -> &ProviderKey {
        &self.provider_key
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.attributes.insert(name.into(), value);
    }

    pub fn erase_credentials(&mut self) {
        self.credentials = None;
    }
}

// ============================================================================
// Second factor token
// ============================================================================

/// A pending second-factor challenge, or an attempt to answer one.
///
/// Wraps the primary token that already passed verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoFactorToken {
    authenticated_token: UsernamePasswordToken,
    #[serde(skip)]
    code: Option<Credentials>,
    provider_key: ProviderKey,
    two_factor_providers: Vec<String>,
    #[serde(default)]
    attributes: Attributes,
}

impl TwoFactorToken {
    pub fn new(
        authenticated_token: UsernamePasswordToken,
        code: Option<Credentials>,
        provider_key: ProviderKey,
        two_factor_providers: Vec<String>,
    ) -> Self {
        Self {
            authenticated_token,
            code,
            provider_key,
            two_factor_providers,
            attributes: Attributes::new(),
        }
    }

    pub fn authenticated_token(&self) -> &UsernamePasswordToken {
        &self.authenticated_token
    }

    pub fn into_authenticated_token(self) -> UsernamePasswordToken {
        self.authenticated_token
    }

    /// The submitted one-time code, if any.
    pub fn code(&self) -> Option<&Credentials> {
        self.code.as_ref()
    }

    pub fn provider_key(&self) -> &ProviderKey {
        &self.provider_key
    }

    /// Identifiers of the second-factor providers the user may answer with.
    pub fn two_factor_providers(&self) -> &[String] {
        &self.two_factor_providers
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn set_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.attributes.insert(name.into(), value);
    }

    pub fn erase_credentials(&mut self) {
        self.code = None;
        self.authenticated_token.erase_credentials();
    }
}

// ============================================================================
// Token handed to and returned by the authentication manager
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthToken {
    UsernamePassword(UsernamePasswordToken),
    TwoFactor(TwoFactorToken),
}

impl AuthToken {
    /// Username of the principal behind the token.
    pub fn username(&self) -> &str {
        match self {
            AuthToken::UsernamePassword(token) => token.username(),
            AuthToken::TwoFactor(token) => token.authenticated_token().username(),
        }
    }

    pub fn provider_key(&self) -> &ProviderKey {
        match self {
            AuthToken::UsernamePassword(token) => token.provider_key(),
            AuthToken::TwoFactor(token) => token.provider_key(),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            AuthToken::UsernamePassword(token) => token.attributes(),
            AuthToken::TwoFactor(token) => token.attributes(),
        }
    }

    /// True once no further authentication step is outstanding.
    pub fn is_fully_authenticated(&self) -> bool {
        match self {
            AuthToken::UsernamePassword(token) => token.is_authenticated(),
            AuthToken::TwoFactor(_) => false,
        }
    }

    pub fn erase_credentials(&mut self) {
        match self {
            AuthToken::UsernamePassword(token) => token.erase_credentials(),
            AuthToken::TwoFactor(token) => token.erase_credentials(),
        }
    }
}

impl From<UsernamePasswordToken> for AuthToken {
    fn from(token: UsernamePasswordToken) -> Self {
        AuthToken::UsernamePassword(token)
    }
}

impl From<TwoFactorToken> for AuthToken {
    fn from(token: TwoFactorToken) -> Self {
        AuthToken::TwoFactor(token)
    }
}
