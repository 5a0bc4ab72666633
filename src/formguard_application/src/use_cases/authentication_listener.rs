use formguard_core::{
    AuthToken, AuthenticationError, AuthenticationManager, EventDispatcher, LoginError,
    LoginRequest, NoopEventDispatcher, SecurityEvent, Session, TokenStorage,
    TwoFactorTokenFactory,
    security::{AUTHENTICATION_ERROR, LAST_USERNAME},
};

use super::login_request_classifier::LoginRequestClassifier;

/// What happens to the session id when a login succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStrategy {
    /// Keep the session id.
    None,
    /// Move the session data to a fresh id.
    #[default]
    Migrate,
}

/// Result of a handled login submission.
#[derive(Debug, Clone)]
pub enum LoginFlowOutcome {
    /// The manager accepted the attempt. The token is either fully
    /// authenticated or a pending second-factor challenge.
    Success(AuthToken),
    /// The attempt was rejected.
    Failure(AuthenticationError),
}

/// Runs login submissions through the classifier and settles the session.
///
/// Requests the classifier does not recognise are left alone (`Ok(None)`).
pub struct AuthenticationListener<M, F, D = NoopEventDispatcher>
where
    M: AuthenticationManager,
    F: TwoFactorTokenFactory,
    D: EventDispatcher,
{
    classifier: LoginRequestClassifier<M, F>,
    session_strategy: SessionStrategy,
    dispatcher: D,
}

impl<M, F> AuthenticationListener<M, F>
where
    M: AuthenticationManager,
    F: TwoFactorTokenFactory,
{
    pub fn new(classifier: LoginRequestClassifier<M, F>) -> Self {
        Self {
            classifier,
            session_strategy: SessionStrategy::default(),
            dispatcher: NoopEventDispatcher,
        }
    }
}

impl<M, F, D> AuthenticationListener<M, F, D>
where
    M: AuthenticationManager,
    F: TwoFactorTokenFactory,
    D: EventDispatcher,
{
    pub fn with_session_strategy(mut self, session_strategy: SessionStrategy) -> Self {
        self.session_strategy = session_strategy;
        self
    }

    pub fn with_dispatcher<E>(self, dispatcher: E) -> AuthenticationListener<M, F, E>
    where
        E: EventDispatcher,
    {
        AuthenticationListener {
            classifier: self.classifier,
            session_strategy: self.session_strategy,
            dispatcher,
        }
    }

    pub fn classifier(&self) -> &LoginRequestClassifier<M, F> {
        &self.classifier
    }

    pub fn requires_authentication<R>(&self, request: &R) -> bool
    where
        R: LoginRequest + ?Sized,
    {
        self.classifier.requires_authentication(request)
    }

    /// Handle one request.
    ///
    /// # Errors
    ///
    /// `BadRequest` and `MissingSession` are returned as errors. Rejected
    /// credentials are not errors here: they come back as
    /// [`LoginFlowOutcome::Failure`] after the failure bookkeeping is done.
    #[tracing::instrument(
        name = "AuthenticationListener::handle",
        skip_all,
        fields(provider_key = %self.classifier.provider_key())
    )]
    pub async fn handle<R, T>(
        &self,
        request: &R,
        token_storage: &T,
    ) -> Result<Option<LoginFlowOutcome>, LoginError>
    where
        R: LoginRequest + Sync + ?Sized,
        T: TokenStorage + ?Sized,
    {
        if !self.classifier.requires_authentication(request) {
            return Ok(None);
        }

        let session = request.session().ok_or(LoginError::MissingSession)?;
        let current_state = token_storage.state();

        match self
            .classifier
            .attempt_authentication(request, &current_state)
            .await
        {
            Ok(token) => Ok(Some(self.on_success(session, token_storage, token))),
            Err(LoginError::Authentication(error)) => {
                Ok(Some(self.on_failure(session, token_storage, error)))
            }
            Err(error) => Err(error),
        }
    }

    fn on_success<S, T>(
        &self,
        session: &S,
        token_storage: &T,
        mut token: AuthToken,
    ) -> LoginFlowOutcome
    where
        S: Session + ?Sized,
        T: TokenStorage + ?Sized,
    {
        if self.session_strategy == SessionStrategy::Migrate {
            session.migrate();
        }

        token.erase_credentials();

        tracing::info!(
            username = token.username(),
            fully_authenticated = token.is_fully_authenticated(),
            "User has been authenticated successfully"
        );

        token_storage.set_token(Some(token.clone()));
        session.remove(AUTHENTICATION_ERROR);
        session.remove(LAST_USERNAME);

        self.dispatcher.dispatch(&SecurityEvent::InteractiveLogin {
            username: token.username().to_string(),
            provider_key: token.provider_key().clone(),
            fully_authenticated: token.is_fully_authenticated(),
        });

        LoginFlowOutcome::Success(token)
    }

    fn on_failure<S, T>(
        &self,
        session: &S,
        token_storage: &T,
        error: AuthenticationError,
    ) -> LoginFlowOutcome
    where
        S: Session + ?Sized,
        T: TokenStorage + ?Sized,
    {
        tracing::info!(error = %error, "Authentication request failed");

        // A pending second-factor challenge survives a wrong code.
        if let Some(AuthToken::UsernamePassword(current)) = token_storage.token() {
            if current.provider_key() == self.classifier.provider_key() {
                token_storage.set_token(None);
            }
        }

        session.set(
            AUTHENTICATION_ERROR,
            serde_json::Value::from(error.message_key()),
        );

        self.dispatcher.dispatch(&SecurityEvent::LoginFailure {
            provider_key: self.classifier.provider_key().clone(),
            error: error.clone(),
        });

        LoginFlowOutcome::Failure(error)
    }
}
