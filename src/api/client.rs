use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::error::{extract_error_text, ApiError};
use crate::auth::models::ForgotPasswordRequest;
use crate::auth::{
    Acknowledgement, AuthBackend, AuthResponse, LoginCredentials, ProfileUpdate,
    RegistrationData, ResetPasswordData,
};

/// HTTP transport to the POS backend.
///
/// The backend authenticates with a session cookie, so every clone shares
/// one cookie jar for the lifetime of the client.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| ApiError::Request(format!("invalid base URL {}: {}", trimmed, e)))?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            jar,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Cookie header the jar would send with a profile request, if any.
    pub fn session_cookie(&self) -> Option<String> {
        let url = Url::parse(&self.url("/auth/profile")).ok()?;
        self.jar
            .cookies(&url)
            .and_then(|value| value.to_str().ok().map(ToString::to_string))
    }

    /// Put a previously saved cookie header back into the jar.
    ///
    /// Restored cookies are scoped to the whole host since the original
    /// `Path` attribute is not part of the header.
    pub fn restore_session_cookie(&self, cookie: &str) {
        for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar
                .add_cookie_str(&format!("{}; Path=/", pair), &self.base_url);
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url(), endpoint)
    }

    pub(crate) async fn get<T>(&self, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.send(self.client.get(self.url(endpoint)), "GET", endpoint).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.client.get(self.url(endpoint)).query(query), "GET", endpoint)
            .await
    }

    pub(crate) async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.client.post(self.url(endpoint)).json(body), "POST", endpoint)
            .await
    }

    pub(crate) async fn post_empty<T>(&self, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.send(self.client.post(self.url(endpoint)), "POST", endpoint).await
    }

    pub(crate) async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.client.put(self.url(endpoint)).json(body), "PUT", endpoint)
            .await
    }

    pub(crate) async fn delete<T>(&self, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.send(self.client.delete(self.url(endpoint)), "DELETE", endpoint)
            .await
    }

    async fn send<T>(&self, request: RequestBuilder, method: &str, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        log::debug!("{} {}", method, endpoint);
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            // Acknowledgement endpoints may answer with an empty body.
            let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
            serde_json::from_str(body).map_err(|e| {
                log::warn!("Undecodable response for {} {}: {}", method, endpoint, e);
                ApiError::Decode(e.to_string())
            })
        } else {
            log::debug!("{} {} failed with {}", method, endpoint, status);
            Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_error_text(&body),
            })
        }
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn register(&self, data: &RegistrationData) -> Result<AuthResponse, ApiError> {
        self.post("/auth/register", data).await
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        self.post("/auth/login", credentials).await
    }

    async fn logout(&self) -> Result<Acknowledgement, ApiError> {
        self.post_empty("/auth/logout").await
    }

    async fn get_profile(&self) -> Result<AuthResponse, ApiError> {
        self.get("/auth/profile").await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<AuthResponse, ApiError> {
        self.put("/auth/profile", update).await
    }

    async fn forgot_password(&self, email: &str) -> Result<Acknowledgement, ApiError> {
        self.post("/auth/forgot-password", &ForgotPasswordRequest { email })
            .await
    }

    async fn reset_password(&self, data: &ResetPasswordData) -> Result<Acknowledgement, ApiError> {
        self.post("/auth/reset-password", data).await
    }
}
