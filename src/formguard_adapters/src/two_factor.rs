use formguard_core::{
    Credentials, ProviderKey, TwoFactorToken, TwoFactorTokenFactory, UsernamePasswordToken,
};

/// Builds plain [`TwoFactorToken`]s carrying the submitted code.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTwoFactorTokenFactory;

impl TwoFactorTokenFactory for DefaultTwoFactorTokenFactory {
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
