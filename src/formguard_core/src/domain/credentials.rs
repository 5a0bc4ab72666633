use std::fmt;

use secrecy::{ExposeSecret, Secret};

/// A submitted secret: a password or a one-time code.
///
/// The value is zeroized on drop and redacted in `Debug` output.
pub struct Credentials(Secret<String>);

impl Credentials {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Secret::new(value.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl ExposeSecret<String> for Credentials {
    fn expose_secret(&self) -> &String {
        self.0.expose_secret()
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self::new(self.0.expose_secret().clone())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials([REDACTED])")
    }
}

impl From<Secret<String>> for Credentials {
    fn from(secret: Secret<String>) -> Self {
        Self(secret)
    }
}
