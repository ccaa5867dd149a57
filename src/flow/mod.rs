//! Rider authentication flow controller.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rider_auth::flow::{AuthFlow, ConnectivityFlag, Destination, TracingFeedback};
//! use rider_auth::{ApiConfig, BackendClient, JsonFileStore, SessionManager};
//!
//! // 1. Load the persisted session
//! let session = SessionManager::load(JsonFileStore::new("prefs.json")).await?;
//!
//! // 2. Wire collaborators
//! let flow = AuthFlow::new(
//!     BackendClient::new(ApiConfig::from_env()?),
//!     session,
//!     ConnectivityFlag::default(),
//!     TracingFeedback,
//! );
//!
//! // 3. Gate screens and validate on resume
//! if flow.gate(Destination::Protected).await.redirect_target().is_none() {
//!     flow.check().await;
//! }
//! ```

mod connectivity;
mod controller;
mod feedback;
mod gate;
mod inflight;
mod outcome;

pub use connectivity::{Connectivity, ConnectivityFlag};
pub use controller::AuthFlow;
pub use feedback::{Feedback, Level, Notice, TracingFeedback};
pub use gate::{Destination, GateDecision, Route};
pub use inflight::Operation;
pub use outcome::Outcome;
