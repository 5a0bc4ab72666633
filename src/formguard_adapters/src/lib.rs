//! Infrastructure adapters for the login firewall: session storage, token
//! persistence, response rendering, configuration and telemetry.

pub mod config;
pub mod events;
pub mod http;
pub mod persistence;
pub mod telemetry;
pub mod two_factor;

pub use crate::config::{LoginSettings, SettingsError};
pub use events::TracingEventDispatcher;
pub use http::RedirectResponder;
pub use persistence::{MemorySession, MemorySessionStore, SessionTokenStorage};
pub use telemetry::init_tracing;
pub use two_factor::DefaultTwoFactorTokenFactory;
