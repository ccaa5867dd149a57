use super::connectivity::Connectivity;
use super::feedback::{Feedback, Level, LoadingGuard, Notice};
use super::gate::{self, Destination, GateDecision};
use super::inflight::{InFlight, Operation};
use super::outcome::Outcome;
use crate::api::{
    BackendClient, CheckReply, ClientStatus, ConfirmReply, LoginReply, RegisterReply, ResendReply,
};
use crate::error::Error;
use crate::session::{Session, SessionManager};
use crate::store::KeyValueStore;
use crate::types::{ClientProfile, ConfirmationCode, Credentials, MIN_CODE_LENGTH};

const FILL_ALL_FIELDS: &str = "Please fill in all fields.";
const NO_CONNECTION: &str = "No connection to the server.";
const RE_REGISTER: &str = "Insufficient data, please register again.";
const CHECK_INPUT: &str = "Please check the entered data.";
const BANNED: &str = "Your account has been blocked.";
const SESSION_ENDED: &str = "Your session has ended, please log in again.";
const TIMED_OUT: &str = "The server took too long to respond, please try again.";
const UNREACHABLE: &str = "Could not reach the server, check your connection and try again.";
const SERVER_ERROR: &str = "Server error, please try again later.";
const UNKNOWN: &str = "Something went wrong, please try again.";

/// Drives the rider through login, confirmation and session checks.
///
/// One instance per app, shared by reference. Every operation resolves to
/// an [`Outcome`]; nothing is returned as an error. Each operation runs at
/// most once at a time: a call made while the same operation is still
/// running returns [`Outcome::InFlight`] without side effects.
///
/// ```rust,ignore
/// let session = SessionManager::load(store).await?;
/// let flow = AuthFlow::new(BackendClient::new(ApiConfig::from_env()?), session, network, ui);
///
/// match flow.login(&Credentials::new(phone, password)).await {
///     Outcome::ConfirmationCodeSent => show_code_screen(),
///     Outcome::LoginDone => show_home(),
///     _ => {}
/// }
/// ```
pub struct AuthFlow<S, N, F> {
    api: BackendClient,
    session: SessionManager<S>,
    connectivity: N,
    feedback: F,
    inflight: InFlight,
}

impl<S, N, F> AuthFlow<S, N, F>
where
    S: KeyValueStore,
    N: Connectivity,
    F: Feedback,
{
    #[must_use]
    pub fn new(api: BackendClient, session: SessionManager<S>, connectivity: N, feedback: F) -> Self {
        Self {
            api,
            session,
            connectivity,
            feedback,
            inflight: InFlight::default(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    /// Whether `op` is currently running (e.g. to disable a button).
    #[must_use]
    pub fn is_running(&self, op: Operation) -> bool {
        self.inflight.is_running(op)
    }

    // ── Login ──────────────────────────────────────────────────────────

    pub async fn login(&self, credentials: &Credentials) -> Outcome {
        let Some(_running) = self.inflight.try_begin(Operation::Login) else {
            return Outcome::InFlight;
        };
        let _loading = LoadingGuard::start(&self.feedback);

        if !credentials.is_complete() {
            self.notice(Level::Warning, FILL_ALL_FIELDS);
            return Outcome::ValidationWarning;
        }
        if !self.connectivity.is_connected().await {
            return self.offline();
        }

        let reply = match self.api.login(credentials).await {
            Ok(reply) => reply,
            Err(e) => return self.fail(&e),
        };

        match reply {
            LoginReply::ConfirmationCodeSent {
                client_status: ClientStatus::Confirming,
                verification_id,
                msg,
            } => {
                tracing::info!(verification_id = %verification_id, "Confirmation code issued");
                self.session.begin_confirmation(verification_id).await;
                self.relay(Level::Info, msg);
                Outcome::ConfirmationCodeSent
            }
            LoginReply::LoginDone { token, client, msg } => {
                tracing::info!(client_id = %client.one_id, "Login completed");
                self.session.establish(client.one_id, token).await;
                self.relay(Level::Success, msg);
                Outcome::LoginDone
            }
            LoginReply::Banned { msg } => {
                self.end_session(Outcome::Banned, msg, BANNED).await
            }
            LoginReply::Warning { msg } => self.server_warning(msg),
            LoginReply::ConfirmationCodeSent { .. } | LoginReply::Unrecognized => {
                self.fail(&Error::UnexpectedReply { operation: "login" })
            }
        }
    }

    // ── Register ───────────────────────────────────────────────────────

    pub async fn register(&self, profile: &ClientProfile) -> Outcome {
        let Some(_running) = self.inflight.try_begin(Operation::Register) else {
            return Outcome::InFlight;
        };
        let _loading = LoadingGuard::start(&self.feedback);

        if !profile.is_complete() {
            self.notice(Level::Warning, FILL_ALL_FIELDS);
            return Outcome::ValidationWarning;
        }
        if !self.connectivity.is_connected().await {
            return self.offline();
        }

        let reply = match self.api.register(profile).await {
            Ok(reply) => reply,
            Err(e) => return self.fail(&e),
        };

        match reply {
            RegisterReply::ConfirmationCodeSent {
                client_status: ClientStatus::Confirming,
                verification_id,
                msg,
            } => {
                tracing::info!(verification_id = %verification_id, "Confirmation code issued");
                self.session.begin_confirmation(verification_id).await;
                self.relay(Level::Info, msg);
                Outcome::ConfirmationCodeSent
            }
            RegisterReply::RegisterDone { token, client, msg } => {
                tracing::info!(client_id = %client.one_id, "Registration completed");
                self.session.establish(client.one_id, token).await;
                self.relay(Level::Success, msg);
                Outcome::RegisterDone
            }
            RegisterReply::Banned { msg } => {
                self.end_session(Outcome::Banned, msg, BANNED).await
            }
            RegisterReply::Warning { msg } => self.server_warning(msg),
            RegisterReply::ConfirmationCodeSent { .. } | RegisterReply::Unrecognized => {
                self.fail(&Error::UnexpectedReply {
                    operation: "register",
                })
            }
        }
    }

    // ── Confirmation ───────────────────────────────────────────────────

    pub async fn confirm_account(&self, code: &str) -> Outcome {
        let Some(_running) = self.inflight.try_begin(Operation::Confirm) else {
            return Outcome::InFlight;
        };
        let _loading = LoadingGuard::start(&self.feedback);

        let code: ConfirmationCode = match code.parse() {
            Ok(code) => code,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected confirmation code");
                self.notice(
                    Level::Warning,
                    format!("Please enter the {MIN_CODE_LENGTH}-digit confirmation code."),
                );
                return Outcome::ValidationWarning;
            }
        };

        let Some(verification_id) = self.session.snapshot().pending_verification_id().cloned()
        else {
            self.notice(Level::Warning, RE_REGISTER);
            return Outcome::Warning {
                message: RE_REGISTER.into(),
            };
        };

        if !self.connectivity.is_connected().await {
            return self.offline();
        }

        let reply = match self.api.confirm(&verification_id, &code).await {
            Ok(reply) => reply,
            Err(e) => return self.fail(&e),
        };

        match reply {
            ConfirmReply::ConfirmationDone { token, client, msg } => {
                tracing::info!(client_id = %client.one_id, "Account confirmed");
                self.session.establish(client.one_id, token).await;
                self.relay(Level::Success, msg);
                Outcome::ConfirmationDone
            }
            ConfirmReply::ClientNotFound { msg } => {
                self.end_session(Outcome::ClientNotFound, msg, RE_REGISTER)
                    .await
            }
            ConfirmReply::Warning { msg } => self.server_warning(msg),
            ConfirmReply::Unrecognized => self.fail(&Error::UnexpectedReply {
                operation: "confirm",
            }),
        }
    }

    pub async fn resend_confirmation_code(&self) -> Outcome {
        let Some(_running) = self.inflight.try_begin(Operation::ResendCode) else {
            return Outcome::InFlight;
        };
        let _loading = LoadingGuard::start(&self.feedback);

        let Some(verification_id) = self.session.snapshot().pending_verification_id().cloned()
        else {
            tracing::warn!("Code resend requested without a pending confirmation");
            self.session.clear().await;
            self.notice(Level::Warning, RE_REGISTER);
            return Outcome::LoginRequired;
        };

        if !self.connectivity.is_connected().await {
            return self.offline();
        }

        let reply = match self.api.resend_code(&verification_id).await {
            Ok(reply) => reply,
            Err(e) => return self.fail(&e),
        };

        match reply {
            ResendReply::ConfirmationCodeSent { msg } => {
                tracing::info!(verification_id = %verification_id, "Confirmation code resent");
                self.relay(Level::Info, msg);
                Outcome::CodeResent
            }
            ResendReply::ClientNotFound { msg } => {
                self.end_session(Outcome::ClientNotFound, msg, RE_REGISTER)
                    .await
            }
            ResendReply::Warning { msg } => self.server_warning(msg),
            ResendReply::Unrecognized => self.fail(&Error::UnexpectedReply {
                operation: "send code again",
            }),
        }
    }

    // ── Session check ──────────────────────────────────────────────────

    pub async fn check(&self) -> Outcome {
        let Some(_running) = self.inflight.try_begin(Operation::Check) else {
            return Outcome::InFlight;
        };

        if !self.connectivity.is_connected().await {
            return self.offline();
        }

        // A pending confirmation survives; only half-written credentials go.
        let Session::Authenticated { client_id, token } = self.session.snapshot() else {
            tracing::info!("Session check without credentials");
            self.session.discard_stale_credentials().await;
            self.notice(Level::Error, SESSION_ENDED);
            return Outcome::TokenNotFound;
        };

        let reply = match self.api.check(&client_id, &token).await {
            Ok(reply) => reply,
            Err(e) => return self.fail(&e),
        };

        match reply {
            CheckReply::CheckDone { token, client, .. } => {
                tracing::debug!(client_id = %client.one_id, "Session check passed");
                self.session.refresh(client.one_id, token).await;
                Outcome::CheckDone
            }
            CheckReply::TokenNotFound { msg } => {
                self.end_session(Outcome::TokenNotFound, msg, SESSION_ENDED)
                    .await
            }
            CheckReply::ClientNotFound { msg } => {
                self.end_session(Outcome::ClientNotFound, msg, SESSION_ENDED)
                    .await
            }
            CheckReply::TokenNotValid { msg } => {
                self.end_session(Outcome::TokenNotValid, msg, SESSION_ENDED)
                    .await
            }
            CheckReply::Banned { msg } => {
                self.end_session(Outcome::Banned, msg, BANNED).await
            }
            CheckReply::Unrecognized => self.fail(&Error::UnexpectedReply {
                operation: "session check",
            }),
        }
    }

    // ── Logout / gate ──────────────────────────────────────────────────

    /// Forget the session locally. No backend call.
    pub async fn logout(&self) {
        self.session.clear().await;
        tracing::info!("Logged out");
    }

    /// Decide whether the UI may enter `destination`, based on what is
    /// persisted right now.
    pub async fn gate(&self, destination: Destination) -> GateDecision {
        let session = match self.session.reload().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Session reload failed, using in-memory state");
                self.session.snapshot()
            }
        };

        let decision = gate::decide(&session, destination);
        if destination == Destination::Protected && !session.is_authenticated() {
            self.session.discard_stale_credentials().await;
        }
        tracing::debug!(?destination, ?decision, "Gate");
        decision
    }

    // ── Helpers ────────────────────────────────────────────────────────

    fn notice(&self, level: Level, text: impl Into<String>) {
        self.feedback.notify(Notice::new(level, text));
    }

    fn relay(&self, level: Level, msg: Option<String>) {
        if let Some(msg) = msg.filter(|m| !m.trim().is_empty()) {
            self.notice(level, msg);
        }
    }

    fn offline(&self) -> Outcome {
        self.notice(Level::Error, NO_CONNECTION);
        Outcome::NetworkError
    }

    fn server_warning(&self, msg: Option<String>) -> Outcome {
        let message = msg
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| CHECK_INPUT.to_owned());
        tracing::warn!(message = %message, "Server warning");
        self.notice(Level::Warning, message.clone());
        Outcome::Warning { message }
    }

    /// Wipe the session and report why.
    async fn end_session(&self, outcome: Outcome, msg: Option<String>, fallback: &str) -> Outcome {
        tracing::warn!(reason = outcome.tag(), "Session cleared");
        self.session.clear().await;
        let text = msg
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_owned());
        self.notice(Level::Error, text);
        outcome
    }

    /// Every backend failure ends here: logged, reported, session untouched.
    fn fail(&self, error: &Error) -> Outcome {
        tracing::error!(error = %error, "Backend call failed");
        self.notice(Level::Error, user_message(error));
        Outcome::UnknownError
    }
}

fn user_message(error: &Error) -> &'static str {
    match error {
        Error::Http(e) if e.is_timeout() => TIMED_OUT,
        Error::Http(_) => UNREACHABLE,
        Error::Status { status, .. } if *status >= 500 => SERVER_ERROR,
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages() {
        let status = Error::Status {
            operation: "login",
            status: 502,
            detail: String::new(),
        };
        assert_eq!(user_message(&status), SERVER_ERROR);

        let status = Error::Status {
            operation: "login",
            status: 404,
            detail: String::new(),
        };
        assert_eq!(user_message(&status), UNKNOWN);

        let unexpected = Error::UnexpectedReply { operation: "check" };
        assert_eq!(user_message(&unexpected), UNKNOWN);
    }
}
