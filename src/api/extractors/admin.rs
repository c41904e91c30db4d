use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use std::sync::Arc;

use crate::state::AppState;

/// Super-admin guard: the `X-Admin-Token` header must match the
/// configured platform token.
pub struct AdminAuth;

impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("X-Admin-Token")
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        if token != state.config.admin_api_token {
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(AdminAuth)
    }
}
