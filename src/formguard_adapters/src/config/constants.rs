pub mod env {
    /// Prefix of the environment variables overriding [`LoginSettings`](super::LoginSettings),
    /// e.g. `FORMGUARD__PROVIDER_KEY`.
    pub const ENV_PREFIX: &str = "FORMGUARD";
    pub const ENV_SEPARATOR: &str = "__";
}

/// Optional settings file, looked up relative to the working directory.
pub const SETTINGS_FILE: &str = "config/formguard";

pub mod defaults {
    pub const PROVIDER_KEY: &str = "contao_frontend";
    pub const DEFAULT_TARGET_PATH: &str = "/";
    pub const FAILURE_PATH: &str = "/login";
    pub const TWO_FACTOR_PATH: &str = "/login";
    pub const SESSION_COOKIE_NAME: &str = "formguard_session";
    pub const BODY_LIMIT_BYTES: usize = 64 * 1024;
    pub const SESSION_IDLE_TIMEOUT_SECS: u64 = 30 * 60;
    pub const MAX_SESSIONS: usize = 10_000;
}
