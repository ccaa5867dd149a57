//! HTTP boundary to the rider backend.
//!
//! Every reply is a JSON object carrying a `status` discriminator. Each
//! endpoint gets its own tagged enum so that a known status with a missing
//! field fails as [`Error::Malformed`] instead of surfacing half-filled data.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ApiConfig;
use crate::error::Error;
use crate::types::{
    AuthToken, ClientId, ClientProfile, ConfirmationCode, Credentials, VerificationId,
};

/// `client` object embedded in successful replies.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct ClientRef {
    #[serde(rename = "oneId")]
    pub one_id: ClientId,
}

/// Account state reported alongside `confirmation-code-sent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientStatus {
    Confirming,
    #[serde(other)]
    Other,
}

/// Reply to `POST /auth/login`.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum LoginReply {
    ConfirmationCodeSent {
        #[serde(rename = "clientStatus")]
        client_status: ClientStatus,
        #[serde(rename = "oneId")]
        verification_id: VerificationId,
        #[serde(default)]
        msg: Option<String>,
    },
    LoginDone {
        token: AuthToken,
        client: ClientRef,
        #[serde(default)]
        msg: Option<String>,
    },
    Banned {
        #[serde(default)]
        msg: Option<String>,
    },
    Warning {
        #[serde(default)]
        msg: Option<String>,
    },
    #[serde(other)]
    Unrecognized,
}

/// Reply to `POST /auth/register`.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum RegisterReply {
    ConfirmationCodeSent {
        #[serde(rename = "clientStatus")]
        client_status: ClientStatus,
        #[serde(rename = "oneId")]
        verification_id: VerificationId,
        #[serde(default)]
        msg: Option<String>,
    },
    RegisterDone {
        token: AuthToken,
        client: ClientRef,
        #[serde(default)]
        msg: Option<String>,
    },
    Banned {
        #[serde(default)]
        msg: Option<String>,
    },
    Warning {
        #[serde(default)]
        msg: Option<String>,
    },
    #[serde(other)]
    Unrecognized,
}

/// Reply to `PUT /auth/confirm/{id}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ConfirmReply {
    ConfirmationDone {
        token: AuthToken,
        client: ClientRef,
        #[serde(default)]
        msg: Option<String>,
    },
    ClientNotFound {
        #[serde(default)]
        msg: Option<String>,
    },
    Warning {
        #[serde(default)]
        msg: Option<String>,
    },
    #[serde(other)]
    Unrecognized,
}

/// Reply to `PUT /auth/send-code-again/{id}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ResendReply {
    ConfirmationCodeSent {
        #[serde(default)]
        msg: Option<String>,
    },
    ClientNotFound {
        #[serde(default)]
        msg: Option<String>,
    },
    Warning {
        #[serde(default)]
        msg: Option<String>,
    },
    #[serde(other)]
    Unrecognized,
}

/// Reply to `GET /auth/check/{clientId}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum CheckReply {
    CheckDone {
        token: AuthToken,
        client: ClientRef,
        #[serde(default)]
        msg: Option<String>,
    },
    TokenNotFound {
        #[serde(default)]
        msg: Option<String>,
    },
    ClientNotFound {
        #[serde(default)]
        msg: Option<String>,
    },
    TokenNotValid {
        #[serde(default)]
        msg: Option<String>,
    },
    Banned {
        #[serde(default)]
        msg: Option<String>,
    },
    #[serde(other)]
    Unrecognized,
}

#[derive(Serialize)]
struct ClientEnvelope<T> {
    client: T,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    phone: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginBody<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            phone: credentials.phone.trim(),
            password: &credentials.password,
        }
    }
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    firstname: &'a str,
    lastname: &'a str,
    fullname: String,
    phone: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

#[derive(Serialize)]
struct ConfirmBody<'a> {
    code: &'a ConfirmationCode,
}

/// Backend client for the auth endpoints.
pub struct BackendClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl BackendClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on transport failure, [`Error::Status`] on a
    /// non-success status, or [`Error::Malformed`] if the body does not match
    /// a known reply shape.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginReply, Error> {
        let url = self.endpoint(&["login"])?;
        let body = ClientEnvelope {
            client: LoginBody::from(credentials),
        };
        self.send(self.http.post(url).json(&body), "login").await
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    pub async fn register(&self, profile: &ClientProfile) -> Result<RegisterReply, Error> {
        let url = self.endpoint(&["register"])?;
        let body = ClientEnvelope {
            client: RegisterBody {
                firstname: profile.first_name.trim(),
                lastname: profile.last_name.trim(),
                fullname: profile.full_name(),
                phone: profile.phone.trim(),
                password: &profile.password,
                email: profile.email.as_deref().filter(|e| !e.trim().is_empty()),
            },
        };
        self.send(self.http.post(url).json(&body), "register").await
    }

    /// `PUT /auth/confirm/{verification_id}`.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    pub async fn confirm(
        &self,
        verification_id: &VerificationId,
        code: &ConfirmationCode,
    ) -> Result<ConfirmReply, Error> {
        let url = self.endpoint(&["confirm", &verification_id.0])?;
        self.send(self.http.put(url).json(&ConfirmBody { code }), "confirm")
            .await
    }

    /// `PUT /auth/send-code-again/{verification_id}`.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    pub async fn resend_code(&self, verification_id: &VerificationId) -> Result<ResendReply, Error> {
        let url = self.endpoint(&["send-code-again", &verification_id.0])?;
        self.send(self.http.put(url), "send code again").await
    }

    /// `GET /auth/check/{client_id}` with the bearer token.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    pub async fn check(&self, client_id: &ClientId, token: &AuthToken) -> Result<CheckReply, Error> {
        let url = self.endpoint(&["check", &client_id.0])?;
        self.send(self.http.get(url).bearer_auth(token.as_str()), "session check")
            .await
    }

    /// `{base_url}/{auth_path}/{segments..}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Url(format!("{} cannot be a base", self.config.base_url)))?
            .pop_if_empty()
            .extend(self.config.auth_path.split('/').filter(|s| !s.is_empty()))
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<T, Error> {
        let response = request.timeout(self.config.timeout).send().await?;
        let response = Self::ensure_success(response, operation).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| Error::Malformed { operation, source })
    }

    /// Checks HTTP response status; returns the response on success or an error with details.
    async fn ensure_success(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let detail = response.text().await.unwrap_or_default();
        Err(Error::Status {
            operation,
            status,
            detail,
        })
    }
}
