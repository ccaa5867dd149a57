//! Rider session state and its persisted mirror.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::error::Error;
use crate::store::KeyValueStore;
use crate::types::{AuthToken, ClientId, VerificationId};

/// Persisted-store keys.
pub mod keys {
    pub const CLIENT_ID: &str = "clientOneId";
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const CONFIRMATION: &str = "confirmation";
    pub const VERIFICATION_ID: &str = "oneId";

    pub const ALL: [&str; 4] = [CLIENT_ID, AUTH_TOKEN, CONFIRMATION, VERIFICATION_ID];
}

/// Where the rider is in the confirmation-code step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Confirmation {
    NotStarted,
    Pending,
    Done,
}

impl Confirmation {
    /// Value stored under [`keys::CONFIRMATION`], if any.
    fn persisted(self) -> Option<&'static str> {
        match self {
            Self::NotStarted => None,
            Self::Pending => Some("false"),
            Self::Done => Some("true"),
        }
    }
}

/// Rider authentication state.
///
/// Token and client id only ever exist together, and a pending
/// verification id only exists without them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Empty,
    Pending {
        verification_id: VerificationId,
    },
    Authenticated {
        client_id: ClientId,
        token: AuthToken,
    },
}

impl Session {
    #[must_use]
    pub fn client_id(&self) -> Option<&ClientId> {
        match self {
            Self::Authenticated { client_id, .. } => Some(client_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn auth_token(&self) -> Option<&AuthToken> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    #[must_use]
    pub fn pending_verification_id(&self) -> Option<&VerificationId> {
        match self {
            Self::Pending { verification_id } => Some(verification_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn confirmation(&self) -> Confirmation {
        match self {
            Self::Empty => Confirmation::NotStarted,
            Self::Pending { .. } => Confirmation::Pending,
            Self::Authenticated { .. } => Confirmation::Done,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Rebuild a session from raw persisted values.
    ///
    /// Blank values count as absent. A complete credential pair wins over a
    /// leftover verification id.
    #[must_use]
    pub fn from_persisted(
        client_id: Option<String>,
        token: Option<String>,
        verification_id: Option<String>,
    ) -> Self {
        match (present(client_id), present(token), present(verification_id)) {
            (Some(client_id), Some(token), _) => Self::Authenticated {
                client_id: ClientId(client_id),
                token: AuthToken(token),
            },
            (_, _, Some(id)) => Self::Pending {
                verification_id: VerificationId(id),
            },
            _ => Self::Empty,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Owns the in-memory [`Session`] and keeps the persisted store in step.
///
/// Created once per process with [`load`](Self::load) and shared by
/// reference. Write failures in the store are logged and do not block the
/// in-memory transition; the next [`load`](Self::load) reconciles.
pub struct SessionManager<S> {
    store: S,
    state: Mutex<Session>,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Read the persisted keys and build the initial session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the store cannot be read.
    pub async fn load(store: S) -> Result<Self, Error> {
        let session = read_session(&store).await?;
        tracing::debug!(confirmation = ?session.confirmation(), "Session loaded");
        Ok(Self {
            store,
            state: Mutex::new(session),
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    /// Re-read the store, replacing the in-memory session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the store cannot be read.
    pub async fn reload(&self) -> Result<Session, Error> {
        let session = read_session(&self.store).await?;
        *self.lock() = session.clone();
        Ok(session)
    }

    /// A confirmation code was issued: `[empty] -> [pending]`.
    pub async fn begin_confirmation(&self, verification_id: VerificationId) {
        self.write(keys::VERIFICATION_ID, Some(verification_id.0.as_str())).await;
        self.write(keys::CONFIRMATION, Confirmation::Pending.persisted())
            .await;
        self.write(keys::AUTH_TOKEN, None).await;
        self.write(keys::CLIENT_ID, None).await;

        *self.lock() = Session::Pending { verification_id };
    }

    /// Login or confirmation completed: `-> [authenticated]`.
    pub async fn establish(&self, client_id: ClientId, token: AuthToken) {
        self.write(keys::CLIENT_ID, Some(client_id.0.as_str())).await;
        self.write(keys::AUTH_TOKEN, Some(token.as_str())).await;
        self.write(keys::CONFIRMATION, Confirmation::Done.persisted())
            .await;
        self.write(keys::VERIFICATION_ID, None).await;

        *self.lock() = Session::Authenticated { client_id, token };
    }

    /// Session check succeeded; store the possibly rotated credentials.
    pub async fn refresh(&self, client_id: ClientId, token: AuthToken) {
        self.write(keys::AUTH_TOKEN, Some(token.as_str())).await;
        self.write(keys::CLIENT_ID, Some(client_id.0.as_str())).await;

        *self.lock() = Session::Authenticated { client_id, token };
    }

    /// Remove leftover credential keys that do not form a full session.
    ///
    /// Leaves a pending verification id in place.
    pub async fn discard_stale_credentials(&self) {
        self.write(keys::CLIENT_ID, None).await;
        self.write(keys::AUTH_TOKEN, None).await;
    }

    /// Drop everything, in memory and in the store.
    pub async fn clear(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::warn!(error = %e, "Store clear failed, removing session keys individually");
            for key in keys::ALL {
                self.write(key, None).await;
            }
        }
        *self.lock() = Session::Empty;
    }

    async fn write(&self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(v) => self.store.set(key, v).await,
            None => self.store.remove(key).await,
        };
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "Session store write failed");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // Assignments are whole-value; a poisoned lock still holds a valid session.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn read_session<S: KeyValueStore>(store: &S) -> Result<Session, Error> {
    let client_id = store.get(keys::CLIENT_ID).await.map_err(Error::Store)?;
    let token = store.get(keys::AUTH_TOKEN).await.map_err(Error::Store)?;
    let verification_id = store
        .get(keys::VERIFICATION_ID)
        .await
        .map_err(Error::Store)?;
    Ok(Session::from_persisted(client_id, token, verification_id))
}
