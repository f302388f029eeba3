//! Current-user state and the authentication operations that change it.
//!
//! STATE
//! =====
//! One `SessionState` per manager: the user record, a shared `loading` flag,
//! the last surfaced error and the one-way `initialized` flag. All operations
//! share the same `loading`/`error` pair; concurrent calls race unless the
//! manager was built with `serialize_operations`.
//!
//! LOCKING
//! =======
//! The state mutex is only held for short, synchronous updates and never
//! across an `.await`. `loading` is reset by a drop guard, so it is released
//! on success, on failure and when the operation future is dropped.

#[cfg(test)]
#[path = "session_manager_test.rs"]
mod session_manager_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Mutex as AsyncMutex;

use super::backend::AuthBackend;
use super::classify::{classify, SessionError};
use super::messages::Messages;
use super::models::{
    Acknowledgement, AuthResponse, LoginCredentials, ProfileUpdate, RegistrationData,
    ResetPasswordData, User,
};
use super::validation;

/// Where the session stands with respect to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// No check has completed yet.
    Unknown,
    /// The initial profile fetch is in flight.
    Checking,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CheckAuth,
    Login,
    Register,
    Logout,
    ForgotPassword,
    ResetPassword,
    UpdateProfile,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CheckAuth => "check_auth",
            Operation::Login => "login",
            Operation::Register => "register",
            Operation::Logout => "logout",
            Operation::ForgotPassword => "forgot_password",
            Operation::ResetPassword => "reset_password",
            Operation::UpdateProfile => "update_profile",
        }
    }

    fn default_message(&self, messages: &Messages) -> &'static str {
        match self {
            Operation::CheckAuth => messages.check_auth_failed,
            Operation::Login => messages.login_failed,
            Operation::Register => messages.register_failed,
            Operation::Logout => messages.logout_failed,
            Operation::ForgotPassword => messages.forgot_password_failed,
            Operation::ResetPassword => messages.reset_password_failed,
            Operation::UpdateProfile => messages.update_profile_failed,
        }
    }
}

/// Snapshot of everything a consumer renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub initialized: bool,
    checking: bool,
}

impl SessionState {
    pub fn status(&self) -> AuthStatus {
        if self.checking {
            AuthStatus::Checking
        } else if self.user.is_some() {
            AuthStatus::Authenticated
        } else if self.initialized {
            AuthStatus::Unauthenticated
        } else {
            AuthStatus::Unknown
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

pub struct SessionManager<B> {
    backend: B,
    messages: &'static Messages,
    state: Mutex<SessionState>,
    serial: Option<AsyncMutex<()>>,
}

/// Ends an operation: clears `loading` (and `checking`) whatever the outcome.
struct OperationGuard<'a> {
    state: &'a Mutex<SessionState>,
    marks_initialized: bool,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.loading = false;
        if self.marks_initialized {
            state.checking = false;
            state.initialized = true;
        }
    }
}

impl<B: AuthBackend> SessionManager<B> {
    pub fn new(backend: B, messages: &'static Messages) -> Self {
        Self {
            backend,
            messages,
            state: Mutex::new(SessionState::default()),
            serial: None,
        }
    }

    /// Run at most one operation at a time on this manager.
    ///
    /// Later calls wait for the running one instead of racing it for
    /// `loading`/`error`.
    pub fn with_serialized_operations(mut self, enabled: bool) -> Self {
        self.serial = enabled.then(|| AsyncMutex::new(()));
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    pub fn status(&self) -> AuthStatus {
        self.lock().status()
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    /// Fetch the current profile to find out whether a session already exists.
    ///
    /// Failures only clear the session; they are never surfaced as an error.
    pub async fn check_auth(&self) -> Option<User> {
        let _serial = self.serialize().await;
        let _guard = self.begin(Operation::CheckAuth);

        match self.backend.get_profile().await {
            Ok(response) => {
                log::info!(
                    "Existing session found{}",
                    response
                        .user
                        .as_ref()
                        .map(|u| format!(" for user: {}", u.display_name()))
                        .unwrap_or_default()
                );
                let user = response.user;
                self.lock().user = user.clone();
                user
            }
            Err(e) => {
                log::debug!("No existing session: {}", e);
                self.lock().user = None;
                None
            }
        }
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, SessionError> {
        let _serial = self.serialize().await;
        let _guard = self.begin(Operation::Login);

        let result = match validation::check_login(credentials, self.messages) {
            Err(message) => Err(SessionError::local(message)),
            Ok(()) => self.call(Operation::Login, self.backend.login(credentials)).await,
        };
        self.settle(Operation::Login, result, |state, response| {
            state.user = response.user.clone();
        })
    }

    pub async fn register(&self, data: &RegistrationData) -> Result<AuthResponse, SessionError> {
        let _serial = self.serialize().await;
        let _guard = self.begin(Operation::Register);

        let result = match validation::check_registration(data, self.messages) {
            Err(message) => Err(SessionError::local(message)),
            Ok(()) => self.call(Operation::Register, self.backend.register(data)).await,
        };
        self.settle(Operation::Register, result, |state, response| {
            state.user = response.user.clone();
        })
    }

    /// End the session. The local session is cleared even if the backend
    /// call fails; that failure is logged and otherwise ignored.
    pub async fn logout(&self) {
        let _serial = self.serialize().await;
        let _guard = self.begin(Operation::Logout);

        if let Err(e) = self.backend.logout().await {
            log::error!("Logout error: {}", e);
        }
        self.lock().user = None;
        log::info!("Session cleared");
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Acknowledgement, SessionError> {
        let _serial = self.serialize().await;
        let _guard = self.begin(Operation::ForgotPassword);

        let result = match validation::check_forgot_password(email, self.messages) {
            Err(message) => Err(SessionError::local(message)),
            Ok(()) => {
                self.call(Operation::ForgotPassword, self.backend.forgot_password(email))
                    .await
            }
        };
        self.settle(Operation::ForgotPassword, result, |_, _| {})
    }

    pub async fn reset_password(
        &self,
        data: &ResetPasswordData,
    ) -> Result<Acknowledgement, SessionError> {
        let _serial = self.serialize().await;
        let _guard = self.begin(Operation::ResetPassword);

        let result = match validation::check_reset_password(data, self.messages) {
            Err(message) => Err(SessionError::local(message)),
            Ok(()) => {
                self.call(Operation::ResetPassword, self.backend.reset_password(data))
                    .await
            }
        };
        self.settle(Operation::ResetPassword, result, |_, _| {})
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<AuthResponse, SessionError> {
        let _serial = self.serialize().await;
        let _guard = self.begin(Operation::UpdateProfile);

        let result = self
            .call(Operation::UpdateProfile, self.backend.update_profile(update))
            .await;
        self.settle(Operation::UpdateProfile, result, |state, response| {
            state.user = response.user.clone();
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn serialize(&self) -> Option<tokio::sync::MutexGuard<'_, ()>> {
        match &self.serial {
            Some(serial) => Some(serial.lock().await),
            None => None,
        }
    }

    fn begin(&self, op: Operation) -> OperationGuard<'_> {
        log::debug!("Starting {}", op.name());
        let mut state = self.lock();
        state.error = None;
        state.loading = true;
        let marks_initialized = op == Operation::CheckAuth;
        if marks_initialized {
            state.checking = true;
        }
        OperationGuard {
            state: &self.state,
            marks_initialized,
        }
    }

    async fn call<T>(
        &self,
        op: Operation,
        request: impl std::future::Future<Output = Result<T, crate::api::ApiError>>,
    ) -> Result<T, SessionError> {
        request.await.map_err(|e| {
            log::debug!("{} request failed: {}", op.name(), e);
            classify(&e, op.default_message(self.messages), self.messages)
        })
    }

    fn settle<T>(
        &self,
        op: Operation,
        result: Result<T, SessionError>,
        on_success: impl FnOnce(&mut SessionState, &T),
    ) -> Result<T, SessionError> {
        let mut state = self.lock();
        match &result {
            Ok(value) => {
                on_success(&mut state, value);
                log::info!("{} succeeded", op.name());
            }
            Err(e) => {
                log::warn!("{} failed ({:?}): {}", op.name(), e.kind, e.message);
                state.error = Some(e.message.clone());
            }
        }
        result
    }
}
