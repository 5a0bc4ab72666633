use async_trait::async_trait;

use crate::domain::{
    credentials::Credentials,
    errors::AuthenticationError,
    provider_key::ProviderKey,
    token::{AuthToken, TwoFactorToken, UsernamePasswordToken},
};

/// Verifies authentication attempts.
///
/// Owns credential checking, second-factor validation and the decision to
/// demand a second factor. For a primary-credential token it returns either a
/// verified [`UsernamePasswordToken`] or, when a second factor is required, a
/// pending [`TwoFactorToken`]. For a two-factor token carrying a code it
/// returns the verified primary token on success.
#[async_trait]
pub trait AuthenticationManager: Send + Sync {
    async fn authenticate(&self, token: AuthToken) -> Result<AuthToken, AuthenticationError>;
}

/// Builds the token that answers a pending second-factor challenge.
pub trait TwoFactorTokenFactory: Send + Sync {
    fn create(
        &self,
        authenticated_token: UsernamePasswordToken,
        code: Credentials,
        provider_key: &ProviderKey,
        two_factor_providers: Vec<String>,
    ) -> TwoFactorToken;
}
