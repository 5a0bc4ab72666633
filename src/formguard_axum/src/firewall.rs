//! Login firewall middleware.
//!
//! Watches url-encoded POSTs for a login form submission. Matching requests
//! are answered here; everything else reaches the wrapped router with its
//! body intact. Only url-encoded bodies are buffered, so uploads and API
//! calls stream through untouched.

use std::sync::Arc;

use axum::{
    Form,
    body::{Body, Bytes, to_bytes},
    extract::{FromRequest, Request, State},
    http::{HeaderMap, Method, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use formguard_adapters::{
    DefaultTwoFactorTokenFactory, LoginSettings, MemorySessionStore, RedirectResponder,
    SessionTokenStorage, TracingEventDispatcher,
    config::defaults::{BODY_LIMIT_BYTES, SESSION_COOKIE_NAME},
};
use formguard_application::{AuthenticationListener, LoginFlowOutcome};
use formguard_core::{
    AuthenticationManager, EventDispatcher, FormData, LoginError, LoginResponder, Session,
    TwoFactorTokenFactory,
};

use crate::{adapters::AxumLoginRequest, error::FirewallError, response_builder};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Shared state of the [`login_firewall`] middleware.
pub struct LoginFirewall<M, F, D, P>
where
    M: AuthenticationManager,
    F: TwoFactorTokenFactory,
    D: EventDispatcher,
    P: LoginResponder,
{
    listener: AuthenticationListener<M, F, D>,
    responder: P,
    sessions: MemorySessionStore,
    cookie_name: String,
    body_limit: usize,
}

impl<M, F, D, P> LoginFirewall<M, F, D, P>
where
    M: AuthenticationManager,
    F: TwoFactorTokenFactory,
    D: EventDispatcher,
    P: LoginResponder,
{
    pub fn new(
        listener: AuthenticationListener<M, F, D>,
        responder: P,
        sessions: MemorySessionStore,
    ) -> Self {
        Self {
            listener,
            responder,
            sessions,
            cookie_name: SESSION_COOKIE_NAME.to_string(),
            body_limit: BODY_LIMIT_BYTES,
        }
    }

    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = cookie_name.into();
        self
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    pub fn sessions(&self) -> &MemorySessionStore {
        &self.sessions
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    fn session_cookie(&self, id: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }
}

impl<M>
    LoginFirewall<M, DefaultTwoFactorTokenFactory, TracingEventDispatcher, RedirectResponder>
where
    M: AuthenticationManager,
{
    /// Firewall with a fresh session store, configured from settings.
    pub fn from_settings(settings: &LoginSettings, authentication_manager: M) -> Self {
        Self::new(
            settings.build_listener(authentication_manager),
            RedirectResponder::from_settings(settings),
            settings.session_store(),
        )
        .with_cookie_name(settings.session_cookie_name.as_str())
        .with_body_limit(settings.body_limit_bytes)
    }
}

/// Axum middleware running the login firewall in front of a router.
///
/// Use with `axum::middleware::from_fn_with_state` and an
/// `Arc<LoginFirewall<..>>` state.
#[tracing::instrument(name = "LoginFirewall", skip_all, fields(path = %request.uri().path()))]
pub async fn login_firewall<M, F, D, P>(
    State(firewall): State<Arc<LoginFirewall<M, F, D, P>>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response
where
    M: AuthenticationManager + 'static,
    F: TwoFactorTokenFactory + 'static,
    D: EventDispatcher + 'static,
    P: LoginResponder,
{
    if request.method() != Method::POST || !is_form_body(request.headers()) {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, firewall.body_limit).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(%error, limit = firewall.body_limit, "Rejecting unreadable form body");
            return FirewallError::PayloadTooLarge(firewall.body_limit).into_response();
        }
    };

    let Some(form) = decode_form(&bytes).await else {
        tracing::debug!("Passing on undecodable form body");
        return next.run(Request::from_parts(parts, Body::from(bytes))).await;
    };

    let mut login_request = AxumLoginRequest::new(parts, form);
    if !firewall.listener.requires_authentication(&login_request) {
        let request = Request::from_parts(login_request.into_parts(), Body::from(bytes));
        return next.run(request).await;
    }

    let presented_id = jar
        .get(&firewall.cookie_name)
        .map(|cookie| cookie.value().to_string());
    let session = firewall.sessions.load_or_create(presented_id.as_deref());
    let loaded_id = session.id();
    login_request.attach_session(Arc::clone(&session));

    let token_storage =
        SessionTokenStorage::new(session.as_ref(), firewall.listener.classifier().provider_key());
    let outcome = firewall
        .listener
        .handle(&login_request, &token_storage)
        .await;

    let persisted = firewall.sessions.save(&loaded_id, &session);

    let builder = response_builder();
    let response = match outcome {
        Ok(Some(LoginFlowOutcome::Success(token))) => {
            firewall.responder.create_success_response(builder, &token)
        }
        Ok(Some(LoginFlowOutcome::Failure(error)))
        | Err(LoginError::Authentication(error)) => {
            firewall.responder.create_failure_response(builder, &error)
        }
        Err(LoginError::BadRequest(message)) => {
            firewall
                .responder
                .create_bad_request_response(builder, &message)
        }
        Err(error) => FirewallError::from(error).into_response(),
        Ok(None) => {
            tracing::error!("Listener declined a request its gate accepted");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    };

    let current_id = session.id();
    if !persisted || presented_id.as_deref() == Some(current_id.as_str()) {
        response
    } else {
        (jar.add(firewall.session_cookie(current_id)), response).into_response()
    }
}

/// Only url-encoded bodies can carry a login form.
fn is_form_body(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

/// Decode a buffered url-encoded body. `None` when it is not valid.
async fn decode_form(bytes: &Bytes) -> Option<FormData> {
    let request = Request::builder()
        .method(Method::POST)
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(Body::from(bytes.clone()))
        .ok()?;

    match Form::<Vec<(String, String)>>::from_request(request, &()).await {
        Ok(Form(pairs)) => Some(FormData::from_pairs(pairs)),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Form body rejected");
            None
        }
    }
}
