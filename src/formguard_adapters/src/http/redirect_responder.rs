use formguard_core::{
    AuthResponseBuilder, AuthResponseHelpers, AuthToken, AuthenticationError, LoginResponder,
};

use crate::config::LoginSettings;

// ============================================================================
// Redirect Responder
// ============================================================================

/// Answers submitted login forms with `303 See Other` redirects.
///
/// - a fully authenticated token leads to `default_target_path`
/// - a pending two-factor challenge leads to `two_factor_path`
/// - a rejected attempt leads back to `failure_path`, where the login page
///   reads the stored error and last username from the session
#[derive(Debug, Clone)]
pub struct RedirectResponder {
    default_target_path: String,
    failure_path: String,
    two_factor_path: String,
}

impl RedirectResponder {
    pub fn new(
        default_target_path: impl Into<String>,
        failure_path: impl Into<String>,
        two_factor_path: impl Into<String>,
    ) -> Self {
        Self {
            default_target_path: default_target_path.into(),
            failure_path: failure_path.into(),
            two_factor_path: two_factor_path.into(),
        }
    }

    pub fn from_settings(settings: &LoginSettings) -> Self {
        Self::new(
            settings.default_target_path.as_str(),
            settings.failure_path.as_str(),
            settings.two_factor_path.as_str(),
        )
    }
}

impl LoginResponder for RedirectResponder {
    fn create_success_response<B: AuthResponseBuilder>(
        &self,
        builder: B,
        token: &AuthToken,
    ) -> B::Response {
        if token.is_fully_authenticated() {
            builder.see_other(&self.default_target_path)
        } else {
            builder.see_other(&self.two_factor_path)
        }
    }

    fn create_failure_response<B: AuthResponseBuilder>(
        &self,
        builder: B,
        _error: &AuthenticationError,
    ) -> B::Response {
        builder.see_other(&self.failure_path)
    }
}
