pub mod redirect_responder;

// Re-export HTTP traits from formguard_core for convenience
pub use formguard_core::{AuthResponseBuilder, AuthResponseHelpers, LoginResponder};
pub use redirect_responder::RedirectResponder;
