use axum::{extract::State, Extension};
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, verify_admin_password, Claims, ADMIN_SUBJECT};
use crate::middleware::{AdminUser, ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: u64,
}

/// POST /auth/admin - exchange the admin password for a token
pub async fn admin_login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let security = &state.config.security;

    if let Err(e) = verify_admin_password(security, &body.password) {
        tracing::warn!("Rejected admin login: {}", e);
        return Err(e.into());
    }

    let token = generate_jwt(security, &Claims::admin(security.jwt_expiry_hours))?;
    tracing::info!("Admin logged in");

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: security.jwt_expiry_hours * 3600,
    }))
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub subject: &'static str,
    pub issued_at: i64,
}

/// GET /api/admin/session - lets the admin panel check its stored token
pub async fn admin_session(Extension(admin): Extension<AdminUser>) -> ApiResult<SessionInfo> {
    Ok(ApiResponse::success(SessionInfo {
        subject: ADMIN_SUBJECT,
        issued_at: admin.issued_at,
    }))
}
