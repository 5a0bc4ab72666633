use thiserror::Error;

/// Failures of an authentication attempt.
///
/// These take the authentication-failure path (re-rendered login form) rather
/// than producing a server error. `Display` may carry details for logs; use
/// [`AuthenticationError::message_key`] for anything shown to the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthenticationError {
    #[error("Bad credentials: {0}")]
    BadCredentials(String),
    #[error("Invalid two-factor authentication code")]
    InvalidTwoFactorCode,
    #[error("Account status check failed: {0}")]
    AccountStatus(String),
    #[error("No authentication provider found to support the token")]
    ProviderNotFound,
    #[error("Authentication service error: {0}")]
    ServiceUnavailable(String),
}

impl AuthenticationError {
    /// Generic, non-revealing message for the login form.
    pub fn message_key(&self) -> &'static str {
        match self {
            AuthenticationError::BadCredentials(_) => "Invalid credentials.",
            AuthenticationError::InvalidTwoFactorCode => "Invalid two-factor authentication code.",
            AuthenticationError::AccountStatus(_) => "Account is disabled.",
            AuthenticationError::ProviderNotFound | AuthenticationError::ServiceUnavailable(_) => {
                "Authentication request could not be processed due to a system problem."
            }
        }
    }
}

/// Errors returned by the login firewall.
#[derive(Debug, Error, PartialEq)]
pub enum LoginError {
    /// Malformed client input, answered with a client error.
    #[error("{0}")]
    BadRequest(String),
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),
    #[error("This authentication method requires a session.")]
    MissingSession,
}
