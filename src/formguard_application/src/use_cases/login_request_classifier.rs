use formguard_core::{
    AuthToken, AuthenticationError, AuthenticationManager, AuthenticationState, Credentials,
    FormValue, LoginError, LoginRequest, ProviderKey, Session, TwoFactorToken,
    TwoFactorTokenFactory, UsernamePasswordToken,
    security::{
        FORM_SUBMIT_FIELD, LAST_USERNAME, LOGIN_FORM_PREFIX, MAX_USERNAME_LENGTH, PASSWORD_FIELD,
        USERNAME_FIELD, VERIFY_FIELD,
    },
};

/// Recognises login form submissions and turns them into authentication
/// attempts.
///
/// Holds no mutable state, so one instance serves concurrent requests.
pub struct LoginRequestClassifier<M, F>
where
    M: AuthenticationManager,
    F: TwoFactorTokenFactory,
{
    authentication_manager: M,
    two_factor_token_factory: F,
    provider_key: ProviderKey,
    max_username_length: usize,
}

impl<M, F> LoginRequestClassifier<M, F>
where
    M: AuthenticationManager,
    F: TwoFactorTokenFactory,
{
    pub fn new(
        authentication_manager: M,
        two_factor_token_factory: F,
        provider_key: ProviderKey,
    ) -> Self {
        Self {
            authentication_manager,
            two_factor_token_factory,
            provider_key,
            max_username_length: MAX_USERNAME_LENGTH,
        }
    }

    pub fn with_max_username_length(mut self, max_username_length: usize) -> Self {
        self.max_username_length = max_username_length;
        self
    }

    pub fn provider_key(&self) -> &ProviderKey {
        &self.provider_key
    }

    /// Whether the request is a login form submission.
    ///
    /// True for POST requests whose `FORM_SUBMIT` field is a string starting
    /// with `tl_login`. Missing or array-valued fields never match.
    pub fn requires_authentication<R>(&self, request: &R) -> bool
    where
        R: LoginRequest + ?Sized,
    {
        request.is_method("POST")
            && request
                .form_value(FORM_SUBMIT_FIELD)
                .and_then(FormValue::as_text)
                .is_some_and(|form| form.starts_with(LOGIN_FORM_PREFIX))
    }

    /// Build the authentication attempt for a login submission and let the
    /// authentication manager verify it.
    ///
    /// A pending second-factor challenge in `current_state` turns the request
    /// into an answer to that challenge; anything else is a fresh
    /// username/password attempt. The manager's result or failure is returned
    /// unmodified.
    ///
    /// # Errors
    ///
    /// - `BadRequest` when `username` is missing or not a string
    /// - `Authentication(BadCredentials)` when the trimmed username is too long
    /// - `MissingSession` when the request carries no session
    ///
    /// All three are raised before the manager is called or the session is
    /// written.
    #[tracing::instrument(
        name = "LoginRequestClassifier::attempt_authentication",
        skip_all,
        fields(provider_key = %self.provider_key, path = request.path())
    )]
    pub async fn attempt_authentication<R>(
        &self,
        request: &R,
        current_state: &AuthenticationState,
    ) -> Result<AuthToken, LoginError>
    where
        R: LoginRequest + Sync + ?Sized,
    {
        match current_state {
            AuthenticationState::PendingSecondFactor(pending) => {
                self.attempt_second_factor(request, pending).await
            }
            _ => self.attempt_primary_credentials(request).await,
        }
    }

    async fn attempt_second_factor<R>(
        &self,
        request: &R,
        pending: &TwoFactorToken,
    ) -> Result<AuthToken, LoginError>
    where
        R: LoginRequest + Sync + ?Sized,
    {
        // A missing code is left for the manager to reject.
        let code = request
            .form_value(VERIFY_FIELD)
            .and_then(FormValue::as_text)
            .unwrap_or_default();

        let mut token = self.two_factor_token_factory.create(
            pending.authenticated_token().clone(),
            Credentials::new(code),
            &self.provider_key,
            pending.two_factor_providers().to_vec(),
        );
        token.set_attributes(pending.attributes().clone());

        tracing::debug!(
            providers = ?pending.two_factor_providers(),
            "Verifying second authentication factor"
        );

        Ok(self
            .authentication_manager
            .authenticate(AuthToken::TwoFactor(token))
            .await?)
    }

    async fn attempt_primary_credentials<R>(&self, request: &R) -> Result<AuthToken, LoginError>
    where
        R: LoginRequest + Sync + ?Sized,
    {
        let submitted = request.form_value(USERNAME_FIELD);
        let Some(username) = submitted.and_then(FormValue::as_text) else {
            return Err(LoginError::BadRequest(format!(
                "The key \"{USERNAME_FIELD}\" must be a string, \"{}\" given.",
                FormValue::describe(submitted)
            )));
        };

        let username = trim_username(username);

        if username.len() > self.max_username_length {
            tracing::warn!(
                length = username.len(),
                max = self.max_username_length,
                "Rejected oversized username"
            );
            return Err(
                AuthenticationError::BadCredentials("Invalid username.".to_string()).into(),
            );
        }

        let session = request.session().ok_or(LoginError::MissingSession)?;
        session.set(LAST_USERNAME, serde_json::Value::from(username));

        let password = request
            .form_value(PASSWORD_FIELD)
            .and_then(FormValue::as_text)
            .unwrap_or_default();

        tracing::debug!(username, "Verifying primary credentials");

        let token = UsernamePasswordToken::new(
            username,
            Credentials::new(password),
            self.provider_key.clone(),
        );

        Ok(self
            .authentication_manager
            .authenticate(AuthToken::UsernamePassword(token))
            .await?)
    }
}

/// Strip the characters form inputs tend to pick up around a username:
/// spaces, tabs, line breaks, NUL and vertical tab.
fn trim_username(username: &str) -> &str {
    username.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}
