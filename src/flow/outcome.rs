use serde::Serialize;

/// Result tag handed back to the UI for every controller operation.
///
/// Serializes as `{"status": "<tag>"}`, plus `message` for warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Outcome {
    /// Local input was incomplete; the backend was not contacted.
    ValidationWarning,
    /// No connectivity; the backend was not contacted.
    NetworkError,
    /// Transport failure, unexpected HTTP status or unrecognized reply.
    UnknownError,
    /// A confirmation code was issued. The UI moves to the code screen.
    ConfirmationCodeSent,
    LoginDone,
    RegisterDone,
    ConfirmationDone,
    CodeResent,
    CheckDone,
    /// Server-reported warning (wrong password, wrong code, ...).
    Warning { message: String },
    Banned,
    ClientNotFound,
    TokenNotFound,
    TokenNotValid,
    /// Nothing to continue from locally; go back to login.
    LoginRequired,
    /// The same operation is already running; this call did nothing.
    InFlight,
}

impl Outcome {
    /// Tag string as it appears on the wire.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ValidationWarning => "validation-warning",
            Self::NetworkError => "network-error",
            Self::UnknownError => "unknown-error",
            Self::ConfirmationCodeSent => "confirmation-code-sent",
            Self::LoginDone => "login-done",
            Self::RegisterDone => "register-done",
            Self::ConfirmationDone => "confirmation-done",
            Self::CodeResent => "code-resent",
            Self::CheckDone => "check-done",
            Self::Warning { .. } => "warning",
            Self::Banned => "banned",
            Self::ClientNotFound => "client-not-found",
            Self::TokenNotFound => "token-not-found",
            Self::TokenNotValid => "token-not-valid",
            Self::LoginRequired => "login-required",
            Self::InFlight => "in-flight",
        }
    }

    /// The session was wiped and the UI must return to the login screen.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::Banned
                | Self::ClientNotFound
                | Self::TokenNotFound
                | Self::TokenNotValid
                | Self::LoginRequired
        )
    }

    /// The rider ends up with a usable session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(
            self,
            Self::LoginDone | Self::RegisterDone | Self::ConfirmationDone | Self::CheckDone
        )
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
