use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the firewall (login area) a token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderKey(String);

#[derive(Debug, Error, PartialEq)]
pub enum ProviderKeyError {
    #[error("Provider key must not be empty")]
    Empty,
}

impl ProviderKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ProviderKeyError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ProviderKeyError::Empty);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProviderKey {
    type Error = ProviderKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderKey> for String {
    fn from(key: ProviderKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ProviderKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
