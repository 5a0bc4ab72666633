//! # formguard - Form Login Firewall
//!
//! This is a facade crate that re-exports all public APIs from the formguard components.
//! Use this crate to get access to the whole login firewall in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! formguard = { path = "../formguard" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `AuthToken`, `Credentials`, `ProviderKey`, etc.
//! - **Ports**: `AuthenticationManager`, `Session`, `TokenStorage`, etc.
//! - **Use cases**: `LoginRequestClassifier`, `AuthenticationListener`
//! - **Adapters**: `MemorySessionStore`, `RedirectResponder`, `LoginSettings`, etc.
//! - **Service**: `LoginService` - wraps an application router with the firewall

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use formguard_core::*;
}

// Re-export most commonly used core types at the root level
pub use formguard_core::{
    Attributes, AuthToken, AuthenticationError, AuthenticationState, Credentials, FormData,
    FormValue, LoginError, ProviderKey, ProviderKeyError, TwoFactorToken, UsernamePasswordToken,
    security,
};

// ============================================================================
// Ports
// ============================================================================

/// Collaborator traits implemented outside the firewall
pub mod ports {
    pub use formguard_core::{
        AuthResponseBuilder, AuthResponseHelpers, AuthenticationManager, EventDispatcher,
        LoginRequest, LoginResponder, NoopEventDispatcher, SecurityEvent, Session, TokenStorage,
        TwoFactorTokenFactory,
    };
}

// Re-export ports at root level
pub use ports::{
    AuthenticationManager, EventDispatcher, LoginRequest, LoginResponder, SecurityEvent, Session,
    TokenStorage, TwoFactorTokenFactory,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use formguard_application::*;
}

// Re-export use cases at root level
pub use formguard_application::{
    AuthenticationListener, LoginFlowOutcome, LoginRequestClassifier, SessionStrategy,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Response rendering
    pub mod http {
        pub use formguard_adapters::http::*;
    }

    /// Session storage
    pub mod persistence {
        pub use formguard_adapters::persistence::*;
    }

    /// Configuration
    pub mod config {
        pub use formguard_adapters::config::*;
    }

    /// Axum integration
    pub mod axum {
        pub use formguard_axum::*;
    }
}

// Re-export commonly used adapters at root level
pub use formguard_adapters::{
    DefaultTwoFactorTokenFactory, LoginSettings, MemorySession, MemorySessionStore,
    RedirectResponder, SessionTokenStorage, SettingsError, TracingEventDispatcher, init_tracing,
};
pub use formguard_axum::{FirewallError, LoginFirewall, login_firewall};

// ============================================================================
// Login Service (Main Entry Point)
// ============================================================================

/// Main login service
pub use formguard_service::LoginService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing `AuthenticationManager`
pub use async_trait::async_trait;

/// Re-export secrecy for reading submitted credentials
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
pub use http;
