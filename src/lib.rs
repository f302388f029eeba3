pub mod api;
pub mod auth;
pub mod config;

// Re-export the types most callers need.
pub use api::{ApiError, DashboardData, HttpBackend, Package, Store, Subscription, SubscriptionStatus};
pub use auth::{
    AuthBackend, AuthStatus, ErrorKind, Locale, Messages, SessionError, SessionManager,
    SessionState, SessionStorage, StoredSession, User,
};
pub use config::{AppSettings, SettingsManager};
