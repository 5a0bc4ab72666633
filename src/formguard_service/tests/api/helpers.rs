use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use formguard_adapters::{LoginSettings, MemorySessionStore, RedirectResponder};
use formguard_axum::LoginFirewall;
use formguard_core::{
    AuthToken, AuthenticationError, AuthenticationManager, Session, TwoFactorToken,
    UsernamePasswordToken,
    security::{AUTHENTICATION_ERROR, LAST_USERNAME},
};
use formguard_service::LoginService;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;

pub const SESSION_COOKIE: &str = "formguard_session";

pub const MAX_SESSIONS: usize = 50;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub sessions: MemorySessionStore,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let settings = LoginSettings {
            default_target_path: "/members".into(),
            two_factor_path: "/login/2fa".into(),
            max_sessions: MAX_SESSIONS,
            ..LoginSettings::default()
        };

        let sessions = settings.session_store();
        let firewall = LoginFirewall::new(
            settings.build_listener(StubAuthenticationManager::new()),
            RedirectResponder::from_settings(&settings),
            sessions.clone(),
        )
        .with_cookie_name(SESSION_COOKIE)
        .with_body_limit(1024);

        let app = Router::new()
            .route("/login", get(login_page).post(login_page))
            .route("/contact", post(echo_body))
            .route("/upload", post(upload))
            .with_state(sessions.clone());

        let router = LoginService::new(app, firewall).as_nested_router();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Failed to run test server");
        });

        let http_client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            sessions,
        }
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login(&self, form: &[(&str, &str)]) -> reqwest::Response {
        self.post_form("/login", form).await
    }

    /// Login submission from a client that never keeps cookies.
    pub async fn post_login_without_cookies(&self, form: &[(&str, &str)]) -> reqwest::Response {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
            .post(format!("{}/login", self.address))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_login_page(&self) -> serde_json::Value {
        self.http_client
            .get(format!("{}/login", self.address))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Login page did not answer with JSON")
    }
}

pub fn location(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}

pub fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Stands in for the page rendering the login form: reports what the
/// firewall left in the session.
async fn login_page(
    State(sessions): State<MemorySessionStore>,
    jar: CookieJar,
) -> Json<serde_json::Value> {
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| sessions.find(cookie.value()));

    let read = |key: &str| {
        session
            .as_ref()
            .and_then(|session| session.get(key))
            .unwrap_or(serde_json::Value::Null)
    };

    Json(serde_json::json!({
        "last_username": read(LAST_USERNAME),
        "error": read(AUTHENTICATION_ERROR),
    }))
}

async fn echo_body(body: String) -> String {
    body
}

async fn upload(body: axum::body::Bytes) -> String {
    body.len().to_string()
}

/// Accepts `alice`/`secret`; `bob`/`secret` must also answer a second
/// factor with `123456`.
pub struct StubAuthenticationManager {
    passwords: HashMap<&'static str, &'static str>,
    two_factor_codes: HashMap<&'static str, &'static str>,
}

impl StubAuthenticationManager {
    pub fn new() -> Self {
        Self {
            passwords: HashMap::from([("alice", "secret"), ("bob", "secret")]),
            two_factor_codes: HashMap::from([("bob", "123456")]),
        }
    }
}

#[async_trait]
impl AuthenticationManager for StubAuthenticationManager {
    async fn authenticate(&self, token: AuthToken) -> Result<AuthToken, AuthenticationError> {
        match token {
            AuthToken::UsernamePassword(attempt) => {
                let password = attempt
                    .credentials()
                    .map(|credentials| credentials.expose_secret().as_str());
                if self.passwords.get(attempt.username()).copied() != password {
                    return Err(AuthenticationError::BadCredentials(
                        "Bad credentials.".into(),
                    ));
                }

                let verified = UsernamePasswordToken::authenticated(
                    attempt.username(),
                    attempt.provider_key().clone(),
                    vec!["ROLE_MEMBER".into()],
                );

                if self.two_factor_codes.contains_key(attempt.username()) {
                    let provider_key = verified.provider_key().clone();
                    Ok(TwoFactorToken::new(verified, None, provider_key, vec!["totp".into()]).into())
                } else {
                    Ok(verified.into())
                }
            }
            AuthToken::TwoFactor(answer) => {
                let expected = self
                    .two_factor_codes
                    .get(answer.authenticated_token().username())
                    .copied();
                let submitted = answer.code().map(|code| code.expose_secret().as_str());

                if expected.is_some() && expected == submitted {
                    Ok(answer.into_authenticated_token().into())
                } else {
                    Err(AuthenticationError::InvalidTwoFactorCode)
                }
            }
        }
    }
}
