pub mod use_cases;

// Re-export use cases for convenience
pub use use_cases::{
    authentication_listener::{AuthenticationListener, LoginFlowOutcome, SessionStrategy},
    login_request_classifier::LoginRequestClassifier,
};
