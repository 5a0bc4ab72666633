pub mod domain;
pub mod http_abstraction;
pub mod http_login_responder;
pub mod ports;
pub mod security;

// Re-export commonly used types for convenience
pub use domain::{
    credentials::Credentials,
    errors::{AuthenticationError, LoginError},
    provider_key::{ProviderKey, ProviderKeyError},
    state::AuthenticationState,
    token::{Attributes, AuthToken, TwoFactorToken, UsernamePasswordToken},
};

pub use ports::{
    events::{EventDispatcher, NoopEventDispatcher, SecurityEvent},
    services::{AuthenticationManager, TwoFactorTokenFactory},
    session::{Session, TokenStorage},
};

pub use http_abstraction::{
    AuthResponseBuilder, AuthResponseHelpers, FormData, FormValue, LoginRequest,
};
pub use http_login_responder::LoginResponder;
