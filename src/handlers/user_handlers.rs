use crate::{
    error::{AppError, Result},
    models::{NewUser, RegisterOutcome, Role, UpdateResult, User, VerifiedIdentity},
    AppState,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AdminFlag {
    pub admin: bool,
}

#[derive(Debug, Serialize)]
pub struct HrFlag {
    pub hr: bool,
}

/// GET /users
pub async fn list_users_handler(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.user_service.list_users().await?))
}

/// POST /users - Register a user unless the email is already known
pub async fn register_user_handler(
    State(state): State<AppState>,
    WithRejection(Json(new_user), _): WithRejection<Json<NewUser>, AppError>,
) -> Result<Json<RegisterOutcome>> {
    Ok(Json(state.user_service.register(new_user).await?))
}

/// GET /users/admin/{email}
pub async fn check_admin_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(email): Path<String>,
) -> Result<Json<AdminFlag>> {
    let admin = state
        .role_service
        .has_role(&email, &identity, Role::Admin)
        .await?;
    Ok(Json(AdminFlag { admin }))
}

/// GET /users/hr/{email}
pub async fn check_hr_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(email): Path<String>,
) -> Result<Json<HrFlag>> {
    let hr = state
        .role_service
        .has_role(&email, &identity, Role::Hr)
        .await?;
    Ok(Json(HrFlag { hr }))
}

/// PATCH /users/verify/{id}
pub async fn verify_user_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResult>> {
    state.role_service.require_admin(&identity).await?;
    Ok(Json(state.user_service.set_verified(&id, true).await?))
}

/// PATCH /users/unVerify/{id}
pub async fn unverify_user_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResult>> {
    state.role_service.require_admin(&identity).await?;
    Ok(Json(state.user_service.set_verified(&id, false).await?))
}

/// PATCH /users/hr/{id}
pub async fn promote_to_hr_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResult>> {
    state.role_service.require_admin(&identity).await?;
    Ok(Json(state.user_service.set_role(&id, Role::Hr).await?))
}

/// PATCH /users/em/{id}
pub async fn assign_employee_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResult>> {
    state.role_service.require_admin(&identity).await?;
    Ok(Json(state.user_service.set_role(&id, Role::Employee).await?))
}
