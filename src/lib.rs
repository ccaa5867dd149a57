#![doc = include_str!("../README.md")]

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod session;
pub mod store;
pub mod types;

// Re-exports for convenient access
pub use api::BackendClient;
pub use config::ApiConfig;
pub use error::Error;
pub use flow::{AuthFlow, Outcome};
pub use session::{Confirmation, Session, SessionManager};
#[cfg(feature = "file-store")]
pub use store::JsonFileStore;
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use types::{AuthToken, ClientId, ClientProfile, ConfirmationCode, Credentials, VerificationId};
