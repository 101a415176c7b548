//! Curriculum REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::CurriculumResponse;
use crate::application::CurriculumService;
use crate::domain::DomainError;
use crate::interfaces::http::common::ApiResponse;

/// State for the curriculum read route
#[derive(Clone)]
pub struct CurriculumAppState {
    pub service: Arc<CurriculumService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/curriculum",
    tag = "Curriculum",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assembled curriculum (possibly empty)", body = ApiResponse<CurriculumResponse>),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Aggregation failed")
    )
)]
pub async fn get_curriculum(
    State(state): State<CurriculumAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CurriculumResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.aggregate(&id).await {
        Ok(aggregate) => Ok(Json(ApiResponse::success(aggregate.into()))),
        Err(e @ DomainError::NotFound { .. }) => {
            Err((StatusCode::NOT_FOUND, Json(ApiResponse::error(e.to_string()))))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!(
                "Failed to load curriculum: {}",
                e
            ))),
        )),
    }
}
