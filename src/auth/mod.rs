//! Client for the remote auth endpoint.
//!
//! One HTTP POST of `{email, password}`; a 2xx response carrying a `token`
//! field is the only success shape. No retry, no refresh.

use crate::errors::AppError;
use crate::models::{LoginRequest, TokenResponse};

/// Thin wrapper over the login endpoint.
pub struct AuthClient {
    http: reqwest::Client,
    login_url: String,
}

impl AuthClient {
    pub fn new(login_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            login_url,
        }
    }

    /// Exchange credentials for an opaque session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&self.login_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Auth(format!(
                "Login rejected with status {}",
                status
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Auth response missing token: {}", e)))?;

        Ok(body.token)
    }
}
