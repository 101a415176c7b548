//! Course REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use super::dto::{CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::domain::{Course, CourseLevel, RepositoryProvider};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

/// State for course CRUD routes
#[derive(Clone)]
pub struct CoursesState {
    pub repos: Arc<dyn RepositoryProvider>,
}

fn parse_level(s: &str) -> CourseLevel {
    match s {
        "Intermediate" => CourseLevel::Intermediate,
        "Advanced" => CourseLevel::Advanced,
        _ => CourseLevel::Beginner,
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/courses",
    tag = "Courses",
    responses(
        (status = 200, description = "Course list", body = ApiResponse<Vec<CourseResponse>>)
    )
)]
pub async fn list_courses(
    State(state): State<CoursesState>,
) -> Result<Json<ApiResponse<Vec<CourseResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.courses().find_all().await {
        Ok(courses) => {
            let responses: Vec<CourseResponse> = courses.into_iter().map(Into::into).collect();
            Ok(Json(ApiResponse::success(responses)))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to list courses: {}", e))),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    tag = "Courses",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = ApiResponse<CourseResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_course(
    State(state): State<CoursesState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CourseResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.courses().find_by_id(&id).await {
        Ok(Some(course)) => Ok(Json(ApiResponse::success(course.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Course {} not found", id))),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to get course: {}", e))),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/courses",
    tag = "Courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<CourseResponse>),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_course(
    State(state): State<CoursesState>,
    ValidatedJson(req): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CourseResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let now = Utc::now();
    let course = Course {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        subtitle: req.subtitle,
        short_description: req.short_description,
        level: req.level.as_deref().map(parse_level).unwrap_or_default(),
        duration_hours: req.duration_hours.unwrap_or(0),
        is_published: req.is_published.unwrap_or(false),
        created_at: now,
        updated_at: now,
    };

    match state.repos.courses().save(course).await {
        Ok(saved) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(saved.into())),
        )),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Failed to create course: {}", e))),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    tag = "Courses",
    params(("id" = String, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<CourseResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_course(
    State(state): State<CoursesState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateCourseRequest>,
) -> Result<Json<ApiResponse<CourseResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let existing = match state.repos.courses().find_by_id(&id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("Course {} not found", id))),
            ));
        }
        Err(e) => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Failed to get course: {}", e))),
            ));
        }
    };

    let updated = Course {
        id: existing.id,
        title: req.title.unwrap_or(existing.title),
        subtitle: req.subtitle.or(existing.subtitle),
        short_description: req.short_description.or(existing.short_description),
        level: req
            .level
            .as_deref()
            .map(parse_level)
            .unwrap_or(existing.level),
        duration_hours: req.duration_hours.unwrap_or(existing.duration_hours),
        is_published: req.is_published.unwrap_or(existing.is_published),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    match state.repos.courses().update(updated.clone()).await {
        Ok(()) => Ok(Json(ApiResponse::success(updated.into()))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to update course: {}", e))),
        )),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    tag = "Courses",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_course(
    State(state): State<CoursesState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.courses().delete(&id).await {
        Ok(()) => Ok(Json(ApiResponse::success("Course deleted".to_string()))),
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Failed to delete course: {}", e))),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_defaults_to_beginner() {
        assert_eq!(parse_level("Expert"), CourseLevel::Beginner);
        assert_eq!(parse_level("Advanced"), CourseLevel::Advanced);
    }
}
