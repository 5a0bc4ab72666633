use formguard_core::{EventDispatcher, SecurityEvent};

/// Reports security events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventDispatcher;

impl EventDispatcher for TracingEventDispatcher {
    fn dispatch(&self, event: &SecurityEvent) {
        match event {
            SecurityEvent::InteractiveLogin {
                username,
                provider_key,
                fully_authenticated,
            } => tracing::info!(
                target: "formguard::security",
                %provider_key,
                username = username.as_str(),
                fully_authenticated,
                "Interactive login"
            ),
            SecurityEvent::LoginFailure {
                provider_key,
                error,
            } => tracing::warn!(
                target: "formguard::security",
                %provider_key,
                reason = error.message_key(),
                "Login failure"
            ),
        }
    }
}
