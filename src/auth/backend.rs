use async_trait::async_trait;

use super::models::{
    Acknowledgement, AuthResponse, LoginCredentials, ProfileUpdate, RegistrationData,
    ResetPasswordData,
};
use crate::api::ApiError;

/// The authentication endpoints the session manager depends on.
///
/// `HttpBackend` is the production implementation; tests substitute a
/// scripted one.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `POST /auth/register`
    async fn register(&self, data: &RegistrationData) -> Result<AuthResponse, ApiError>;

    /// `POST /auth/login`
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError>;

    /// `POST /auth/logout`
    async fn logout(&self) -> Result<Acknowledgement, ApiError>;

    /// `GET /auth/profile`
    async fn get_profile(&self) -> Result<AuthResponse, ApiError>;

    /// `PUT /auth/profile`
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<AuthResponse, ApiError>;

    /// `POST /auth/forgot-password`
    async fn forgot_password(&self, email: &str) -> Result<Acknowledgement, ApiError>;

    /// `POST /auth/reset-password`
    async fn reset_password(&self, data: &ResetPasswordData) -> Result<Acknowledgement, ApiError>;
}

#[async_trait]
impl<T: AuthBackend + ?Sized> AuthBackend for std::sync::Arc<T> {
    async fn register(&self, data: &RegistrationData) -> Result<AuthResponse, ApiError> {
        (**self).register(data).await
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        (**self).login(credentials).await
    }

    async fn logout(&self) -> Result<Acknowledgement, ApiError> {
        (**self).logout().await
    }

    async fn get_profile(&self) -> Result<AuthResponse, ApiError> {
        (**self).get_profile().await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<AuthResponse, ApiError> {
        (**self).update_profile(update).await
    }

    async fn forgot_password(&self, email: &str) -> Result<Acknowledgement, ApiError> {
        (**self).forgot_password(email).await
    }

    async fn reset_password(&self, data: &ResetPasswordData) -> Result<Acknowledgement, ApiError> {
        (**self).reset_password(data).await
    }
}
