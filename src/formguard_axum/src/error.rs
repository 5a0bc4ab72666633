use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use formguard_core::LoginError;
use thiserror::Error;

/// Errors raised while the firewall handles a login submission.
#[derive(Debug, Error)]
pub enum FirewallError {
    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error(transparent)]
    Login(#[from] LoginError),
}

impl IntoResponse for FirewallError {
    fn into_response(self) -> Response {
        let status = match &self {
            FirewallError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            FirewallError::Login(LoginError::BadRequest(_)) => StatusCode::BAD_REQUEST,
            FirewallError::Login(LoginError::Authentication(_)) => StatusCode::UNAUTHORIZED,
            FirewallError::Login(LoginError::MissingSession) => {
                tracing::error!(error = %self, "Login firewall misconfigured");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
