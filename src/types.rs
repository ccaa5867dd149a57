use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Backend-issued client identifier (`client.oneId` in replies).
///
/// Opaque. Persisted under `clientOneId` and used as the path segment of
/// the session check endpoint.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr, From, Into,
)]
#[serde(transparent)]
pub struct ClientId(pub String);

/// Temporary identifier issued while a confirmation code is outstanding.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr, From, Into,
)]
#[serde(transparent)]
pub struct VerificationId(pub String);

/// Bearer credential issued by the backend.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, From, Into)]
#[serde(transparent)]
pub struct AuthToken(pub String);

impl AuthToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Minimum accepted length of a confirmation code.
pub const MIN_CODE_LENGTH: usize = 6;

/// Confirmation code typed by the rider.
///
/// Valid by construction: non-empty and at least [`MIN_CODE_LENGTH`]
/// characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ConfirmationCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for ConfirmationCode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidCode("code is empty".into()));
        }
        if trimmed.chars().count() < MIN_CODE_LENGTH {
            return Err(Error::InvalidCode(format!(
                "expected at least {MIN_CODE_LENGTH} characters"
            )));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Login form input.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub phone: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
        }
    }

    /// Phone is non-blank and password non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.phone.trim().is_empty() && !self.password.is_empty()
    }
}

/// Registration form input. Transient: read at submission, never persisted.
#[derive(Debug, Clone, Default)]
pub struct ClientProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
    pub email: Option<String>,
}

impl ClientProfile {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.phone.trim().is_empty()
            && !self.password.is_empty()
    }
}
