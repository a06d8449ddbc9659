use crate::{
    error::{AppError, Result},
    models::IdentityClaims,
    AppState,
};
use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::Serialize;

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /jwt - Sign the caller's identity claims
pub async fn issue_token_handler(
    State(state): State<AppState>,
    WithRejection(Json(claims), _): WithRejection<Json<IdentityClaims>, AppError>,
) -> Result<Json<TokenResponse>> {
    let token = state.token_service.issue(&claims)?;
    tracing::debug!(email = %claims.email, "issued access token");
    Ok(Json(TokenResponse { token }))
}
