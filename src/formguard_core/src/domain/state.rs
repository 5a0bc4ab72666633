use super::token::{AuthToken, TwoFactorToken, UsernamePasswordToken};

/// Authentication state of the current session.
#[derive(Debug, Clone, Default)]
pub enum AuthenticationState {
    /// Nobody is logged in.
    #[default]
    Absent,
    /// Primary credentials passed; a second factor is outstanding.
    PendingSecondFactor(TwoFactorToken),
    /// Fully authenticated.
    Authenticated(UsernamePasswordToken),
}

impl AuthenticationState {
    pub fn is_pending_second_factor(&self) -> bool {
        matches!(self, AuthenticationState::PendingSecondFactor(_))
    }
}

impl From<Option<AuthToken>> for AuthenticationState {
    fn from(token: Option<AuthToken>) -> Self {
        match token {
            None => AuthenticationState::Absent,
            Some(AuthToken::TwoFactor(token)) => AuthenticationState::PendingSecondFactor(token),
            Some(AuthToken::UsernamePassword(token)) if token.is_authenticated() => {
                AuthenticationState::Authenticated(token)
            }
            Some(AuthToken::UsernamePassword(_)) => AuthenticationState::Absent,
        }
    }
}
