//! Login exchange against a Trilium server's sender API.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::util::{compact_text, is_http_url};

pub const LOGIN_PATH: &str = "/api/sender/login";

/// The form field a login problem should be shown next to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Address,
    Username,
    Password,
}

/// Problems with the login form detected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Server address is required")]
    MissingAddress,
    #[error("Server address is not a valid http(s) URL: {0}")]
    InvalidAddress(String),
    #[error("Username is required")]
    MissingUsername,
    #[error("Password is required")]
    MissingPassword,
}

impl ValidationError {
    pub const fn field(&self) -> LoginField {
        match self {
            Self::MissingAddress | Self::InvalidAddress(_) => LoginField::Address,
            Self::MissingUsername => LoginField::Username,
            Self::MissingPassword => LoginField::Password,
        }
    }
}

/// Why a login request that was sent did not produce a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginFailure {
    #[error("Can't connect to the Trilium server")]
    NetworkError,
    #[error("Incorrect username or password")]
    IncorrectCredentials,
    #[error("Unexpected response from the Trilium server")]
    UnexpectedResponse,
}

impl LoginFailure {
    /// Connection and server problems are reported against the address.
    pub const fn field(self) -> LoginField {
        match self {
            Self::NetworkError | Self::UnexpectedResponse => LoginField::Address,
            Self::IncorrectCredentials => LoginField::Password,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum LoginResult {
    Success { token: String },
    Failure { kind: LoginFailure },
}

impl std::fmt::Debug for LoginResult {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success { .. } => formatter
                .debug_struct("Success")
                .field("token", &"[REDACTED]")
                .finish(),
            Self::Failure { kind } => formatter
                .debug_struct("Failure")
                .field("kind", kind)
                .finish(),
        }
    }
}

impl LoginResult {
    const fn failure(kind: LoginFailure) -> Self {
        Self::Failure { kind }
    }
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
}

impl AuthClient {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Exchanges credentials for an API token.
    ///
    /// The token is returned, not persisted; the caller stores it together
    /// with the address.
    pub async fn login(
        &self,
        address: &str,
        username: &str,
        password: &str,
    ) -> Result<LoginResult, ValidationError> {
        let login_url = validate_login(address, username, password)?;

        let payload = LoginRequest { username, password };
        let response = match self.client.post(login_url).json(&payload).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!("Can't connect to Trilium server: {}", error);
                return Ok(LoginResult::failure(LoginFailure::NetworkError));
            }
        };

        let status = response.status();
        tracing::info!("Login response code: {}", status.as_u16());

        if status == StatusCode::UNAUTHORIZED {
            return Ok(LoginResult::failure(LoginFailure::IncorrectCredentials));
        }
        if status != StatusCode::OK {
            return Ok(LoginResult::failure(LoginFailure::UnexpectedResponse));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => {
                tracing::error!("Failed to read login response: {}", error);
                return Ok(LoginResult::failure(LoginFailure::NetworkError));
            }
        };

        Ok(match parse_token(&body) {
            Some(token) => LoginResult::Success { token },
            None => {
                tracing::warn!("Login response had no token: {}", compact_text(&body));
                LoginResult::failure(LoginFailure::UnexpectedResponse)
            }
        })
    }
}

/// Checks the login form and returns the login endpoint URL.
pub fn validate_login(
    address: &str,
    username: &str,
    password: &str,
) -> Result<Url, ValidationError> {
    if address.is_empty() {
        return Err(ValidationError::MissingAddress);
    }
    let login_url = endpoint_url(address, LOGIN_PATH)
        .ok_or_else(|| ValidationError::InvalidAddress(address.to_string()))?;
    if username.is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(login_url)
}

/// Joins a server address and an API path, rejecting anything that is not an
/// absolute http(s) URL.
pub fn endpoint_url(address: &str, path: &str) -> Option<Url> {
    let base = address.trim_end_matches('/');
    if !is_http_url(base) {
        return None;
    }
    let url = Url::parse(&format!("{base}{path}")).ok()?;
    url.host_str().is_some().then_some(url)
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

fn parse_token(body: &str) -> Option<String> {
    serde_json::from_str::<LoginResponse>(body)
        .ok()
        .map(|response| response.token)
        .filter(|token| !token.is_empty())
}
