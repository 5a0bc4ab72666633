//! HTTP-level delivery of login outcomes.
//!
//! Bridges the outcome of an authentication attempt with how the client is
//! answered. A classic form login redirects; an API-style login could answer
//! with JSON instead. The listener stays independent of that choice.

use crate::domain::{errors::AuthenticationError, token::AuthToken};
use crate::http_abstraction::{AuthResponseBuilder, AuthResponseHelpers};

/// Framework-agnostic rendering of login outcomes.
///
/// Uses the zero-cost `AuthResponseBuilder` abstraction, so any web framework
/// with a builder newtype can reuse an implementation.
///
/// # Example
///
/// ```ignore
/// impl LoginResponder for JsonResponder {
///     fn create_success_response<B: AuthResponseBuilder>(&self, builder: B, token: &AuthToken) -> B::Response {
///         builder.status(200).json_body(json!({ "username": token.username() })).build()
///     }
///
///     fn create_failure_response<B: AuthResponseBuilder>(&self, builder: B, error: &AuthenticationError) -> B::Response {
///         builder.unauthorized(error.message_key())
///     }
/// }
/// ```
pub trait LoginResponder: Send + Sync + 'static {
    /// Answer an accepted attempt.
    ///
    /// The token is either fully authenticated or a pending two-factor
    /// challenge; implementations decide where each one leads.
    fn create_success_response<B: AuthResponseBuilder>(
        &self,
        builder: B,
        token: &AuthToken,
    ) -> B::Response;

    /// Answer a rejected attempt. Must not reveal why it was rejected.
    fn create_failure_response<B: AuthResponseBuilder>(
        &self,
        builder: B,
        error: &AuthenticationError,
    ) -> B::Response;

    /// Answer malformed input.
    fn create_bad_request_response<B: AuthResponseBuilder>(
        &self,
        builder: B,
        message: &str,
    ) -> B::Response {
        builder.bad_request(message)
    }
}
