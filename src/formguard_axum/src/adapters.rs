//! Axum framework adapters for the zero-cost HTTP abstraction.
//!
//! `LoginRequest` and `AuthResponseBuilder` are defined in `formguard_core`;
//! they are implemented here on wrappers to avoid the orphan rule.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Response, StatusCode, request::Parts};
use axum::response::IntoResponse;
use formguard_adapters::MemorySession;
use formguard_core::{AuthResponseBuilder, FormData, FormValue, LoginRequest};

/// A buffered login submission.
///
/// Holds the request head, the decoded form and, once the firewall has
/// resolved it, the client's session. The body itself is kept by the
/// firewall so the request can be handed on untouched.
pub struct AxumLoginRequest {
    parts: Parts,
    form: FormData,
    session: Option<Arc<MemorySession>>,
}

impl AxumLoginRequest {
    pub fn new(parts: Parts, form: FormData) -> Self {
        Self {
            parts,
            form,
            session: None,
        }
    }

    pub fn attach_session(&mut self, session: Arc<MemorySession>) {
        self.session = Some(session);
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    pub fn into_parts(self) -> Parts {
        self.parts
    }
}

impl LoginRequest for AxumLoginRequest {
    type Session = MemorySession;

    fn method(&self) -> &str {
        self.parts.method.as_str()
    }

    fn path(&self) -> &str {
        self.parts.uri.path()
    }

    fn form_value(&self, name: &str) -> Option<&FormValue> {
        self.form.get(name)
    }

    fn session(&self) -> Option<&Self::Session> {
        self.session.as_deref()
    }
}

/// Newtype wrapper around Axum's response builder.
pub struct AxumResponseBuilder {
    builder: axum::http::response::Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthResponseBuilder for AxumResponseBuilder {
    type Response = Response<Body>;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn json_body(mut self, body: serde_json::Value) -> Self {
        self.builder = self.builder.header("content-type", "application/json");
        self.body = Some(body.to_string());
        self
    }

    fn build(self) -> Self::Response {
        let body = self.body.unwrap_or_default();
        match self.builder.body(Body::from(body)) {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(%error, "Failed to build response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Helper function to create an Axum response builder
///
/// ```ignore
/// let response = responder.create_success_response(response_builder(), &token);
/// ```
pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}
