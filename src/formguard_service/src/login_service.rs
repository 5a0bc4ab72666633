use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state};
use formguard_adapters::{LoginSettings, MemorySessionStore};
use formguard_axum::{LoginFirewall, login_firewall};
use formguard_core::{
    AuthenticationManager, EventDispatcher, LoginResponder, TwoFactorTokenFactory,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// An application router guarded by a login firewall.
///
/// Login form submissions are answered by the firewall; every other request
/// reaches the application unchanged.
pub struct LoginService {
    router: Router,
    sessions: MemorySessionStore,
}

impl LoginService {
    /// Wrap `app` with the given firewall.
    ///
    /// # Arguments
    /// * `app` - The application router, state already applied
    /// * `firewall` - Firewall answering login submissions
    pub fn new<M, F, D, P>(app: Router, firewall: LoginFirewall<M, F, D, P>) -> Self
    where
        M: AuthenticationManager + 'static,
        F: TwoFactorTokenFactory + 'static,
        D: EventDispatcher + 'static,
        P: LoginResponder,
    {
        let sessions = firewall.sessions().clone();
        let router = app.layer(from_fn_with_state(
            Arc::new(firewall),
            login_firewall::<M, F, D, P>,
        ));

        Self { router, sessions }
    }

    /// Wrap `app` with a firewall configured from settings.
    pub fn from_settings<M>(app: Router, settings: &LoginSettings, authentication_manager: M) -> Self
    where
        M: AuthenticationManager + 'static,
    {
        Self::new(app, LoginFirewall::from_settings(settings, authentication_manager))
    }

    /// Sessions opened by the firewall, shared with the application.
    pub fn sessions(&self) -> &MemorySessionStore {
        &self.sessions
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router
    pub fn as_nested_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.as_nested_router();

        tracing::info!("Login service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
