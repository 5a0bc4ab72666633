use std::time::Duration;

use config::{Config, Environment, File, Source};
use formguard_application::{AuthenticationListener, LoginRequestClassifier, SessionStrategy};
use formguard_core::{AuthenticationManager, ProviderKey, security::MAX_USERNAME_LENGTH};
use serde::Deserialize;
use thiserror::Error;

use super::constants::{SETTINGS_FILE, defaults, env};
use crate::{
    events::TracingEventDispatcher, persistence::MemorySessionStore,
    two_factor::DefaultTwoFactorTokenFactory,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Config(#[from] config::ConfigError),
}

/// Settings of one login firewall.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginSettings {
    pub provider_key: ProviderKey,
    pub max_username_length: usize,
    pub default_target_path: String,
    pub failure_path: String,
    pub two_factor_path: String,
    pub session_cookie_name: String,
    pub body_limit_bytes: usize,
    pub migrate_session: bool,
    pub session_idle_timeout_secs: u64,
    pub max_sessions: usize,
}

impl LoginSettings {
    /// Load settings from `config/formguard.*` (optional) and `FORMGUARD__*`
    /// environment variables, after reading `.env` if present.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        Self::load_from(
            File::with_name(SETTINGS_FILE).required(false),
            Self::environment(),
        )
    }

    /// Layer `file` over the defaults, then `environment` over both.
    pub fn load_from<S>(file: S, environment: Environment) -> Result<Self, SettingsError>
    where
        S: Source + Send + Sync + 'static,
    {
        let config = Self::builder()?
            .add_source(file)
            .add_source(environment)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// The `FORMGUARD__*` environment source.
    pub fn environment() -> Environment {
        Environment::with_prefix(env::ENV_PREFIX)
            .prefix_separator(env::ENV_SEPARATOR)
            .separator(env::ENV_SEPARATOR)
            .try_parsing(true)
    }

    /// Builder pre-populated with the defaults.
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, SettingsError>
    {
        Ok(Config::builder()
            .set_default("provider_key", defaults::PROVIDER_KEY)?
            .set_default("max_username_length", MAX_USERNAME_LENGTH as u64)?
            .set_default("default_target_path", defaults::DEFAULT_TARGET_PATH)?
            .set_default("failure_path", defaults::FAILURE_PATH)?
            .set_default("two_factor_path", defaults::TWO_FACTOR_PATH)?
            .set_default("session_cookie_name", defaults::SESSION_COOKIE_NAME)?
            .set_default("body_limit_bytes", defaults::BODY_LIMIT_BYTES as u64)?
            .set_default("migrate_session", true)?
            .set_default(
                "session_idle_timeout_secs",
                defaults::SESSION_IDLE_TIMEOUT_SECS,
            )?
            .set_default("max_sessions", defaults::MAX_SESSIONS as u64)?)
    }

    /// Empty session store with the configured expiry and capacity.
    pub fn session_store(&self) -> MemorySessionStore {
        MemorySessionStore::with_limits(
            Duration::from_secs(self.session_idle_timeout_secs),
            self.max_sessions,
        )
    }

    pub fn session_strategy(&self) -> SessionStrategy {
        if self.migrate_session {
            SessionStrategy::Migrate
        } else {
            SessionStrategy::None
        }
    }

    /// Assemble the listener these settings describe around an
    /// authentication manager.
    pub fn build_listener<M>(
        &self,
        authentication_manager: M,
    ) -> AuthenticationListener<M, DefaultTwoFactorTokenFactory, TracingEventDispatcher>
    where
        M: AuthenticationManager,
    {
        let classifier = LoginRequestClassifier::new(
            authentication_manager,
            DefaultTwoFactorTokenFactory,
            self.provider_key.clone(),
        )
        .with_max_username_length(self.max_username_length);

        AuthenticationListener::new(classifier)
            .with_session_strategy(self.session_strategy())
            .with_dispatcher(TracingEventDispatcher)
    }
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            provider_key: ProviderKey::new(defaults::PROVIDER_KEY)
                .unwrap_or_else(|_| unreachable!("default provider key is not empty")),
            max_username_length: MAX_USERNAME_LENGTH,
            default_target_path: defaults::DEFAULT_TARGET_PATH.to_string(),
            failure_path: defaults::FAILURE_PATH.to_string(),
            two_factor_path: defaults::TWO_FACTOR_PATH.to_string(),
            session_cookie_name: defaults::SESSION_COOKIE_NAME.to_string(),
            body_limit_bytes: defaults::BODY_LIMIT_BYTES,
            migrate_session: true,
            session_idle_timeout_secs: defaults::SESSION_IDLE_TIMEOUT_SECS,
            max_sessions: defaults::MAX_SESSIONS,
        }
    }
}
