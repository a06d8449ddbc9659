use crate::{
    error::{AppError, Result},
    models::{Collection, Document, InsertResult},
    AppState,
};
use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde_json::{Map, Value};

/// GET /services
pub async fn list_services_handler(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    Ok(Json(state.document_service.list(Collection::Services).await?))
}

/// GET /testimonials
pub async fn list_testimonials_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>> {
    Ok(Json(
        state.document_service.list(Collection::Testimonials).await?,
    ))
}

/// GET /work-sheet
pub async fn list_worksheets_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>> {
    Ok(Json(
        state.document_service.list(Collection::Worksheets).await?,
    ))
}

/// POST /work-sheet
pub async fn create_worksheet_handler(
    State(state): State<AppState>,
    WithRejection(Json(sheet), _): WithRejection<Json<Map<String, Value>>, AppError>,
) -> Result<Json<InsertResult>> {
    Ok(Json(
        state
            .document_service
            .insert(Collection::Worksheets, sheet)
            .await?,
    ))
}
