use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::Principal;
use crate::config::IdentityConfig;

/// Errors surfaced by identity endpoint calls.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("credential missing or expired")]
    NotAuthenticated,
    #[error("identity endpoint rejected the request: {0}")]
    Rejected(String),
    #[error("identity endpoint unreachable: {0}")]
    Transport(String),
    #[error("identity payload malformed: {0}")]
    Malformed(String),
}

/// Credentials for the login proxy call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sign-up payload forwarded to the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Boundary to the external identity service.
///
/// `current` backs the session resolver; the mutation calls back the auth
/// router's login/register/logout proxies.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn current(&self) -> Result<Principal, IdentityError>;
    async fn login(&self, request: LoginRequest) -> Result<Principal, IdentityError>;
    async fn register(&self, request: RegisterRequest) -> Result<Principal, IdentityError>;
    async fn logout(&self) -> Result<(), IdentityError>;
}

/// Envelope the identity endpoints wrap principals in.
#[derive(Debug, Deserialize)]
struct PrincipalEnvelope {
    user: Principal,
}

/// `IdentityClient` over HTTP, carrying the ambient credential configured at
/// construction.
pub struct HttpIdentityClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpIdentityClient {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| IdentityError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_credential(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn principal_from(response: reqwest::Response) -> Result<Principal, IdentityError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(IdentityError::NotAuthenticated);
        }
        if status.is_client_error() {
            let detail = response.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected(format!("{status}: {detail}")));
        }
        if !status.is_success() {
            return Err(IdentityError::Transport(format!(
                "identity endpoint returned {status}"
            )));
        }

        let envelope: PrincipalEnvelope = response
            .json()
            .await
            .map_err(|err| IdentityError::Malformed(err.to_string()))?;
        Ok(envelope.user)
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn current(&self) -> Result<Principal, IdentityError> {
        let response = self
            .with_credential(self.http.get(self.endpoint("/auth/me")))
            .send()
            .await
            .map_err(|err| IdentityError::Transport(err.to_string()))?;

        Self::principal_from(response).await
    }

    async fn login(&self, request: LoginRequest) -> Result<Principal, IdentityError> {
        let response = self
            .with_credential(self.http.post(self.endpoint("/auth/login")))
            .json(&request)
            .send()
            .await
            .map_err(|err| IdentityError::Transport(err.to_string()))?;

        Self::principal_from(response).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<Principal, IdentityError> {
        let response = self
            .with_credential(self.http.post(self.endpoint("/auth/register")))
            .json(&request)
            .send()
            .await
            .map_err(|err| IdentityError::Transport(err.to_string()))?;

        Self::principal_from(response).await
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        let response = self
            .with_credential(self.http.post(self.endpoint("/auth/logout")))
            .send()
            .await
            .map_err(|err| IdentityError::Transport(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(IdentityError::NotAuthenticated);
        }
        if !status.is_success() {
            return Err(IdentityError::Transport(format!(
                "identity endpoint returned {status}"
            )));
        }
        Ok(())
    }
}
