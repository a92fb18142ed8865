//! Session API endpoints: login, logout, and the startup session check.

use axum::extract::State;

use super::{success, ApiResult, Json};
use crate::errors::AppError;
use crate::models::{LoginRequest, SessionInfo};
use crate::AppState;

/// POST /api/login - Exchange credentials for a session.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<SessionInfo> {
    // Validate the form the way the login screen does before posting
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    if !is_valid_email(&request.email) {
        return Err(AppError::Validation(
            "Please enter a valid email".to_string(),
        ));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    if request.password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let token = state.auth.login(&request.email, &request.password).await?;
    state.gate.store_token(&token).await?;

    tracing::info!("Logged in");
    success(SessionInfo {
        authenticated: true,
    })
}

/// POST /api/logout - Drop the stored session.
pub async fn logout(State(state): State<AppState>) -> ApiResult<SessionInfo> {
    state.gate.clear_token().await?;

    tracing::info!("Logged out");
    success(SessionInfo {
        authenticated: false,
    })
}

/// GET /api/session - The splash-screen check: is a token stored?
pub async fn get_session(State(state): State<AppState>) -> ApiResult<SessionInfo> {
    let authenticated = state.gate.is_authenticated().await?;
    success(SessionInfo { authenticated })
}

/// Shape check matching the login form's email validation.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
