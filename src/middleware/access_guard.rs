use crate::{
    error::AppError,
    models::VerifiedIdentity,
    services::TokenError,
    AppState,
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

/// Extract the credential from an `Authorization` header value.
///
/// The token is whatever follows the first space, so `Bearer <token>` and
/// any other `<scheme> <token>` form are accepted alike.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized)?;

    match value.split_once(' ') {
        Some((_, token)) if !token.is_empty() => Ok(token),
        _ => Err(AppError::Unauthorized),
    }
}

/// Access guard for protected routes.
///
/// Requires a valid access token and stores the decoded identity in the
/// request extensions as [`VerifiedIdentity`]. Every failure is reported
/// to the client as 401; the specific reason is only logged.
pub async fn require_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match extract_bearer_token(&headers) {
        Ok(token) => token,
        Err(err) => {
            tracing::debug!(
                path = %request.uri().path(),
                "missing or malformed authorization header"
            );
            return Err(err);
        }
    };

    let claims = match state.token_service.verify(token) {
        Ok(claims) => claims,
        Err(TokenError::MissingSecret) => {
            tracing::error!("cannot verify access token: ACCESS_TOKEN_SECRET not set");
            return Err(AppError::Unauthorized);
        }
        Err(err) => {
            tracing::debug!(reason = %err, "access token rejected");
            return Err(AppError::Unauthorized);
        }
    };

    request.extensions_mut().insert(VerifiedIdentity(claims));

    Ok(next.run(request).await)
}
