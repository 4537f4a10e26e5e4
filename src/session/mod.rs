//! Per-user identity and authentication state.
//!
//! A [`Session`] is created once per virtual user and logged in once. The token
//! is never refreshed; an expired token surfaces as a failed call downstream.

pub mod error;

pub use error::*;

use crate::clients::{AuthClient, ClientError};
use crate::model::{Credentials, LoginData, LoginRequest};
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Verification code the login endpoint accepts from load scripts.
pub const DEFAULT_VERIFICATION_CODE: &str = "1234";

#[derive(Debug, Clone, PartialEq)]
struct AuthState {
    token: String,
    account_id: String,
}

/// Identity plus whatever login handed back.
#[derive(Clone)]
pub struct Session {
    credentials: Credentials,
    auth: AuthClient,
    state: Option<AuthState>,
}

impl Session {
    pub fn new(credentials: Credentials, auth: AuthClient) -> Self {
        Self {
            credentials,
            auth,
            state: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_some()
    }

    /// Authenticates and stores the token and account id.
    ///
    /// On any failure the session is left exactly as it was.
    #[instrument(skip(self, verification_code), fields(username = %self.credentials.username))]
    pub async fn login(&mut self, verification_code: &str) -> Result<(), SessionError> {
        let request = LoginRequest {
            username: self.credentials.username.clone(),
            password: self.credentials.password.clone(),
            verification_code: verification_code.to_string(),
        };
        let envelope = self.auth.login(&request).await?;

        let data = match envelope.data {
            Some(data) if !data.is_null() => data,
            _ => {
                let msg = envelope.msg.unwrap_or_default();
                warn!(%msg, "Login rejected");
                return Err(SessionError::LoginRejected {
                    username: self.credentials.username.clone(),
                    msg,
                });
            }
        };

        let login: LoginData = decode_login(data)?;
        if login.token.trim().is_empty() || login.user_id.trim().is_empty() {
            warn!("Login returned a blank token or user id");
            return Err(ClientError::Incomplete("login").into());
        }
        info!(account_id = %login.user_id, "Logged in");
        self.state = Some(AuthState {
            token: login.token,
            account_id: login.user_id,
        });
        Ok(())
    }

    /// The bearer token. Fails before login.
    pub fn token(&self) -> Result<&str, SessionError> {
        self.state
            .as_ref()
            .map(|s| s.token.as_str())
            .ok_or_else(|| SessionError::NotAuthenticated(self.credentials.username.clone()))
    }

    pub fn account_id(&self) -> Result<&str, SessionError> {
        self.state
            .as_ref()
            .map(|s| s.account_id.as_str())
            .ok_or_else(|| SessionError::NotAuthenticated(self.credentials.username.clone()))
    }
}

fn decode_login(data: Value) -> Result<LoginData, ClientError> {
    serde_json::from_value(data).map_err(|e| ClientError::Decode {
        service: crate::directory::UI_DASHBOARD.to_string(),
        path: crate::clients::LOGIN_PATH.to_string(),
        message: e.to_string(),
    })
}
