//! Axum integration for the formguard login firewall.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  formguard_core: HTTP trait definitions  │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  formguard_axum: Axum implementations    │
//! │  - AxumLoginRequest newtype              │
//! │  - AxumResponseBuilder                   │
//! │  - login_firewall middleware             │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use axum::middleware::from_fn_with_state;
//! use formguard_axum::{LoginFirewall, login_firewall};
//!
//! let firewall = Arc::new(LoginFirewall::from_settings(&settings, manager));
//!
//! let app = Router::new()
//!     .route("/login", get(login_page))
//!     .layer(from_fn_with_state(firewall, login_firewall::<M, F, D, P>));
//! ```

pub mod adapters;
pub mod error;
pub mod firewall;

// Re-export for convenience
pub use adapters::{AxumLoginRequest, AxumResponseBuilder, response_builder};
pub use error::FirewallError;
pub use firewall::{LoginFirewall, login_firewall};
