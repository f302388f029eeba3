pub mod backend;
pub mod classify;
pub mod messages;
pub mod models;
pub mod session_manager;
pub mod session_storage;
pub mod validation;

pub use backend::AuthBackend;
pub use classify::{classify, ErrorKind, SessionError};
pub use messages::{Locale, Messages};
pub use models::*;
pub use session_manager::{AuthStatus, Operation, SessionManager, SessionState};
pub use session_storage::{SessionStorage, StoredSession};
pub use validation::FieldErrors;
