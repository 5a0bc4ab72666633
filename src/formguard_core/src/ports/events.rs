use crate::domain::{errors::AuthenticationError, provider_key::ProviderKey};

#[derive(Debug, Clone, PartialEq)]
pub enum SecurityEvent {
    /// A login form submission was accepted.
    InteractiveLogin {
        username: String,
        provider_key: ProviderKey,
        fully_authenticated: bool,
    },
    /// A login form submission was rejected.
    LoginFailure {
        provider_key: ProviderKey,
        error: AuthenticationError,
    },
}

pub trait EventDispatcher: Send + Sync {
    fn dispatch(&self, event: &SecurityEvent);
}

/// Dispatcher used when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventDispatcher;

impl EventDispatcher for NoopEventDispatcher {
    fn dispatch(&self, _event: &SecurityEvent) {}
}
