//! Login and signup use case.
//!
//! `AuthFlow` backs both authentication screens: it holds the role toggle
//! and form fields, sends exactly one request per submit, and commits the
//! session only for an authenticated reply.

use shopfront_core::Notifier;
use shopfront_core::api::{ApiError, LoginRequest, ShopApi, SignupRequest};
use shopfront_core::auth::{
    AuthAction, AuthOutcome, ReplySource, Route, interpret_login_failure, interpret_login_reply,
    interpret_signup_failure, interpret_signup_reply, notice,
};
use shopfront_core::session::{Role, SessionManager};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Why a submit did not navigate anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("a request is already in progress")]
    Busy,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account already exists")]
    AccountExists,

    #[error("{0}")]
    Unknown(String),
}

/// Raw form input shared by the login and signup screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sets the loading flag for its lifetime.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct AuthFlow {
    api: Arc<dyn ShopApi>,
    sessions: SessionManager,
    notifier: Arc<dyn Notifier>,
    role: Role,
    form: AuthForm,
    loading: AtomicBool,
}

impl AuthFlow {
    /// New flow with the customer role selected and an empty form.
    pub fn new(
        api: Arc<dyn ShopApi>,
        sessions: SessionManager,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            sessions,
            notifier,
            role: Role::default(),
            form: AuthForm::default(),
            loading: AtomicBool::new(false),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Flips between customer and seller.
    pub fn toggle_role(&mut self) -> Role {
        self.role = self.role.toggle();
        self.role
    }

    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    /// True while a submit is waiting on the backend.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Logs in with the current email and password.
    ///
    /// Returns the dashboard route for the selected role on success.
    pub async fn submit_login(&self) -> Result<Route, AuthFailure> {
        require("email", &self.form.email)?;
        require("password", &self.form.password)?;
        let _loading = LoadingGuard::acquire(&self.loading).ok_or(AuthFailure::Busy)?;

        let role = self.role;
        let request = LoginRequest {
            email: self.form.email.clone(),
            password: self.form.password.clone(),
        };
        tracing::info!("[Auth] Logging in as {} ({})", request.email, role);

        let reply = self.api.login(role, &request).await;
        let (outcome, source) = classify(
            reply,
            |body| interpret_login_reply(role, body),
            interpret_login_failure,
        );
        self.finish(AuthAction::Login, role, outcome, source).await
    }

    /// Registers with the current name, email and password.
    pub async fn submit_signup(&self) -> Result<Route, AuthFailure> {
        require("name", &self.form.name)?;
        require("email", &self.form.email)?;
        require("password", &self.form.password)?;
        let _loading = LoadingGuard::acquire(&self.loading).ok_or(AuthFailure::Busy)?;

        let role = self.role;
        let request = SignupRequest {
            name: self.form.name.clone(),
            email: self.form.email.clone(),
            password: self.form.password.clone(),
        };
        tracing::info!("[Auth] Signing up {} ({})", request.email, role);

        let reply = self.api.signup(role, &request).await;
        let (outcome, source) = classify(
            reply,
            |body| interpret_signup_reply(role, body),
            interpret_signup_failure,
        );
        self.finish(AuthAction::Signup, role, outcome, source).await
    }

    async fn finish(
        &self,
        action: AuthAction,
        role: Role,
        outcome: AuthOutcome,
        source: ReplySource,
    ) -> Result<Route, AuthFailure> {
        let failure = match &outcome {
            AuthOutcome::Authenticated(session) => {
                return match self.sessions.save(session).await {
                    Ok(()) => {
                        tracing::info!("[Auth] {} authenticated as {}", session.username, role);
                        Ok(role.home())
                    }
                    Err(e) => {
                        let detail = format!("could not store session: {e}");
                        self.report(action, &AuthOutcome::Unknown(detail.clone()), source);
                        Err(AuthFailure::Unknown(detail))
                    }
                };
            }
            AuthOutcome::InvalidCredentials => AuthFailure::InvalidCredentials,
            AuthOutcome::AccountExists => AuthFailure::AccountExists,
            AuthOutcome::Unknown(detail) => AuthFailure::Unknown(detail.clone()),
        };

        self.report(action, &outcome, source);
        Err(failure)
    }

    fn report(&self, action: AuthAction, outcome: &AuthOutcome, source: ReplySource) {
        if let Some(message) = notice(action, outcome, source) {
            tracing::warn!("[Auth] {:?} rejected: {}", action, message);
            self.notifier.alert(&message);
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), AuthFailure> {
    if value.trim().is_empty() {
        Err(AuthFailure::MissingField(field))
    } else {
        Ok(())
    }
}

fn classify<B, E>(
    reply: Result<Value, ApiError>,
    on_body: B,
    on_error: E,
) -> (AuthOutcome, ReplySource)
where
    B: FnOnce(&Value) -> AuthOutcome,
    E: FnOnce(&ApiError) -> AuthOutcome,
{
    match reply {
        Ok(body) => (on_body(&body), ReplySource::Body),
        Err(err) => (on_error(&err), ReplySource::Error),
    }
}
