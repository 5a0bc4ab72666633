//! Names and limits shared across the login firewall.
//!
//! The form field names are the contract with the HTML login form and must
//! match it exactly.

/// Upper bound for a submitted username, in bytes.
pub const MAX_USERNAME_LENGTH: usize = 4096;

/// Session key holding the username of the most recent login attempt.
pub const LAST_USERNAME: &str = "_security.last_username";

/// Session key holding the message of the most recent authentication failure.
pub const AUTHENTICATION_ERROR: &str = "_security.last_error";

/// Field identifying which form was submitted.
pub const FORM_SUBMIT_FIELD: &str = "FORM_SUBMIT";

/// Every login form's `FORM_SUBMIT` value starts with this prefix.
pub const LOGIN_FORM_PREFIX: &str = "tl_login";

pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";

/// Field carrying the one-time code of the second factor.
pub const VERIFY_FIELD: &str = "verify";

/// Session key under which the token of a provider is persisted.
pub fn token_session_key(provider_key: &str) -> String {
    format!("_security_{provider_key}")
}
