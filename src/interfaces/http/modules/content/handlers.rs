//! Authoring REST API handlers: modules, lessons, quizzes, attachments

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use super::dto::{
    AttachItemRequest, CreateLessonRequest, CreateModuleRequest, CreateQuizRequest,
    ItemRefResponse, LessonResponse, ModuleResponse, QuizResponse, UpdateLessonRequest,
    UpdateModuleRequest, UpdateQuizRequest,
};
use crate::domain::{
    ContentItemRef, ContentKind, Lesson, Module, Quiz, RepositoryProvider,
};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

/// State for authoring routes
#[derive(Clone)]
pub struct ContentState {
    pub repos: Arc<dyn RepositoryProvider>,
}

fn parse_kind(s: &str) -> Option<ContentKind> {
    match s {
        "Lesson" => Some(ContentKind::Lesson),
        "Quiz" => Some(ContentKind::Quiz),
        _ => None,
    }
}

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn internal(msg: impl Into<String>) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(msg.into())),
    )
}

fn not_found(msg: impl Into<String>) -> HandlerError {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error(msg.into())))
}

// ── Modules ─────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/modules",
    tag = "Authoring",
    params(("course_id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "All modules of the course, authoring view", body = ApiResponse<Vec<ModuleResponse>>)
    )
)]
pub async fn list_modules(
    State(state): State<ContentState>,
    Path(course_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ModuleResponse>>>, HandlerError> {
    match state.repos.modules().list_by_course(&course_id).await {
        Ok(modules) => Ok(Json(ApiResponse::success(
            modules.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(internal(format!("Failed to list modules: {}", e))),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/{course_id}/modules",
    tag = "Authoring",
    params(("course_id" = String, Path, description = "Course ID")),
    request_body = CreateModuleRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ModuleResponse>),
        (status = 404, description = "Course not found")
    )
)]
pub async fn create_module(
    State(state): State<ContentState>,
    Path(course_id): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateModuleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ModuleResponse>>), HandlerError> {
    match state.repos.courses().find_by_id(&course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found(format!("Course {} not found", course_id))),
        Err(e) => return Err(internal(format!("Failed to get course: {}", e))),
    }

    let now = Utc::now();
    let module = Module {
        id: Uuid::new_v4().to_string(),
        course_id,
        title: req.title,
        description: req.description,
        position: req.position,
        is_published: req.is_published.unwrap_or(false),
        created_at: now,
        updated_at: now,
    };

    match state.repos.modules().save(module).await {
        Ok(saved) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(saved.into())),
        )),
        Err(e) => Err(internal(format!("Failed to create module: {}", e))),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/modules/{id}",
    tag = "Authoring",
    params(("id" = String, Path, description = "Module ID")),
    request_body = UpdateModuleRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ModuleResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_module(
    State(state): State<ContentState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateModuleRequest>,
) -> Result<Json<ApiResponse<ModuleResponse>>, HandlerError> {
    let existing = match state.repos.modules().find_by_id(&id).await {
        Ok(Some(m)) => m,
        Ok(None) => return Err(not_found(format!("Module {} not found", id))),
        Err(e) => return Err(internal(format!("Failed to get module: {}", e))),
    };

    let updated = Module {
        id: existing.id,
        course_id: existing.course_id,
        title: req.title.unwrap_or(existing.title),
        description: req.description.or(existing.description),
        position: req.position.unwrap_or(existing.position),
        is_published: req.is_published.unwrap_or(existing.is_published),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    match state.repos.modules().update(updated.clone()).await {
        Ok(()) => Ok(Json(ApiResponse::success(updated.into()))),
        Err(e) => Err(internal(format!("Failed to update module: {}", e))),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/modules/{id}",
    tag = "Authoring",
    params(("id" = String, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_module(
    State(state): State<ContentState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, HandlerError> {
    match state.repos.modules().delete(&id).await {
        Ok(()) => Ok(Json(ApiResponse::success("Module deleted".to_string()))),
        Err(e) => Err(not_found(format!("Failed to delete module: {}", e))),
    }
}

// ── Lessons ─────────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/v1/lessons",
    tag = "Authoring",
    request_body = CreateLessonRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<LessonResponse>),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_lesson(
    State(state): State<ContentState>,
    ValidatedJson(req): ValidatedJson<CreateLessonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LessonResponse>>), HandlerError> {
    let lesson = Lesson {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        description: req.description,
        estimated_duration_minutes: req.estimated_duration_minutes,
        is_published: req.is_published.unwrap_or(false),
    };

    match state.repos.content().save_lesson(lesson).await {
        Ok(saved) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(saved.into())),
        )),
        Err(e) => Err(internal(format!("Failed to create lesson: {}", e))),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/lessons/{id}",
    tag = "Authoring",
    params(("id" = String, Path, description = "Lesson ID")),
    request_body = UpdateLessonRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<LessonResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_lesson(
    State(state): State<ContentState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateLessonRequest>,
) -> Result<Json<ApiResponse<LessonResponse>>, HandlerError> {
    let existing = match state.repos.content().find_lesson(&id).await {
        Ok(Some(l)) => l,
        Ok(None) => return Err(not_found(format!("Lesson {} not found", id))),
        Err(e) => return Err(internal(format!("Failed to get lesson: {}", e))),
    };

    let updated = Lesson {
        id: existing.id,
        title: req.title.unwrap_or(existing.title),
        description: req.description.or(existing.description),
        estimated_duration_minutes: req
            .estimated_duration_minutes
            .or(existing.estimated_duration_minutes),
        is_published: req.is_published.unwrap_or(existing.is_published),
    };

    match state.repos.content().update_lesson(updated.clone()).await {
        Ok(()) => Ok(Json(ApiResponse::success(updated.into()))),
        Err(e) => Err(internal(format!("Failed to update lesson: {}", e))),
    }
}

// ── Quizzes ─────────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/api/v1/quizzes",
    tag = "Authoring",
    request_body = CreateQuizRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<QuizResponse>),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_quiz(
    State(state): State<ContentState>,
    ValidatedJson(req): ValidatedJson<CreateQuizRequest>,
) -> Result<(StatusCode, Json<ApiResponse<QuizResponse>>), HandlerError> {
    let quiz = Quiz {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        description: req.description,
        passing_score: req.passing_score.unwrap_or(70),
        time_limit_minutes: req.time_limit_minutes,
        is_published: req.is_published.unwrap_or(false),
    };

    match state.repos.content().save_quiz(quiz).await {
        Ok(saved) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(saved.into())),
        )),
        Err(e) => Err(internal(format!("Failed to create quiz: {}", e))),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/quizzes/{id}",
    tag = "Authoring",
    params(("id" = String, Path, description = "Quiz ID")),
    request_body = UpdateQuizRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<QuizResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_quiz(
    State(state): State<ContentState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateQuizRequest>,
) -> Result<Json<ApiResponse<QuizResponse>>, HandlerError> {
    let existing = match state.repos.content().find_quiz(&id).await {
        Ok(Some(q)) => q,
        Ok(None) => return Err(not_found(format!("Quiz {} not found", id))),
        Err(e) => return Err(internal(format!("Failed to get quiz: {}", e))),
    };

    let updated = Quiz {
        id: existing.id,
        title: req.title.unwrap_or(existing.title),
        description: req.description.or(existing.description),
        passing_score: req.passing_score.unwrap_or(existing.passing_score),
        time_limit_minutes: req.time_limit_minutes.or(existing.time_limit_minutes),
        is_published: req.is_published.unwrap_or(existing.is_published),
    };

    match state.repos.content().update_quiz(updated.clone()).await {
        Ok(()) => Ok(Json(ApiResponse::success(updated.into()))),
        Err(e) => Err(internal(format!("Failed to update quiz: {}", e))),
    }
}

// ── Attachments ─────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/modules/{module_id}/items",
    tag = "Authoring",
    params(("module_id" = String, Path, description = "Module ID")),
    responses(
        (status = 200, description = "All item refs of the module, authoring view", body = ApiResponse<Vec<ItemRefResponse>>)
    )
)]
pub async fn list_items(
    State(state): State<ContentState>,
    Path(module_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ItemRefResponse>>>, HandlerError> {
    match state.repos.content().list_items_for_module(&module_id).await {
        Ok(refs) => Ok(Json(ApiResponse::success(
            refs.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err(internal(format!("Failed to list items: {}", e))),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/modules/{module_id}/items",
    tag = "Authoring",
    params(("module_id" = String, Path, description = "Module ID")),
    request_body = AttachItemRequest,
    responses(
        (status = 201, description = "Attached", body = ApiResponse<ItemRefResponse>),
        (status = 400, description = "Unknown content kind"),
        (status = 404, description = "Module not found")
    )
)]
pub async fn attach_item(
    State(state): State<ContentState>,
    Path(module_id): Path<String>,
    ValidatedJson(req): ValidatedJson<AttachItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ItemRefResponse>>), HandlerError> {
    let Some(kind) = parse_kind(&req.kind) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown content kind: {}",
                req.kind
            ))),
        ));
    };

    match state.repos.modules().find_by_id(&module_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found(format!("Module {} not found", module_id))),
        Err(e) => return Err(internal(format!("Failed to get module: {}", e))),
    }

    // Refs to nonexistent content would be silently dropped on every read,
    // so reject them at write time instead.
    let detail_exists = match kind {
        ContentKind::Lesson => state
            .repos
            .content()
            .find_lesson(&req.content_id)
            .await
            .map(|l| l.is_some()),
        ContentKind::Quiz => state
            .repos
            .content()
            .find_quiz(&req.content_id)
            .await
            .map(|q| q.is_some()),
    };
    match detail_exists {
        Ok(true) => {}
        Ok(false) => {
            return Err(not_found(format!("{} {} not found", kind, req.content_id)));
        }
        Err(e) => return Err(internal(format!("Failed to get content: {}", e))),
    }

    let item_ref = ContentItemRef {
        id: Uuid::new_v4().to_string(),
        module_id,
        content_id: req.content_id,
        kind,
        position: req.position,
        is_published: req.is_published.unwrap_or(false),
    };

    match state.repos.content().attach_item(item_ref).await {
        Ok(saved) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(saved.into())),
        )),
        Err(e) => Err(internal(format!("Failed to attach item: {}", e))),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/modules/{module_id}/items/{ref_id}",
    tag = "Authoring",
    params(
        ("module_id" = String, Path, description = "Module ID"),
        ("ref_id" = String, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Detached"),
        (status = 404, description = "Not found")
    )
)]
pub async fn detach_item(
    State(state): State<ContentState>,
    Path((module_id, ref_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<String>>, HandlerError> {
    // The ref must belong to the addressed module; a matching ref id under
    // a different module is still a 404.
    match state.repos.content().find_item(&ref_id).await {
        Ok(Some(r)) if r.module_id == module_id => {}
        Ok(_) => {
            return Err(not_found(format!(
                "Item {} not found in module {}",
                ref_id, module_id
            )));
        }
        Err(e) => return Err(internal(format!("Failed to get item: {}", e))),
    }

    match state.repos.content().detach_item(&ref_id).await {
        Ok(()) => Ok(Json(ApiResponse::success("Item detached".to_string()))),
        Err(e) => Err(internal(format!("Failed to detach item: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{delete, post};
    use axum::Router;
    use chrono::Utc;
    use tower::Service;

    use super::*;
    use crate::domain::ContentRepository;
    use crate::infrastructure::storage::InMemoryStore;

    #[test]
    fn kind_parsing_rejects_unknown_discriminators() {
        assert_eq!(parse_kind("Lesson"), Some(ContentKind::Lesson));
        assert_eq!(parse_kind("Quiz"), Some(ContentKind::Quiz));
        assert_eq!(parse_kind("Video"), None);
    }

    fn app(store: Arc<InMemoryStore>) -> Router {
        Router::new()
            .route("/modules/{module_id}/items", post(attach_item))
            .route("/modules/{module_id}/items/{ref_id}", delete(detach_item))
            .with_state(ContentState { repos: store })
    }

    async fn send(router: Router, method: &str, uri: &str, body: &str) -> StatusCode {
        let mut svc = router.into_service();
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        svc.call(req).await.unwrap().status()
    }

    fn seeded_store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        let now = Utc::now();
        store.insert_module(Module {
            id: "M1".to_string(),
            course_id: "C1".to_string(),
            title: "Week 1".to_string(),
            description: None,
            position: 1,
            is_published: true,
            created_at: now,
            updated_at: now,
        });
        store.insert_lesson(Lesson {
            id: "L1".to_string(),
            title: "Intro".to_string(),
            description: None,
            estimated_duration_minutes: Some(10),
            is_published: true,
        });
        store
    }

    #[tokio::test]
    async fn attach_rejects_nonexistent_content() {
        let store = seeded_store();
        let status = send(
            app(Arc::clone(&store)),
            "POST",
            "/modules/M1/items",
            r#"{"content_id":"GHOST","kind":"Lesson","position":1}"#,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(store.list_items_for_module("M1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn attach_accepts_existing_content() {
        let store = seeded_store();
        let status = send(
            app(Arc::clone(&store)),
            "POST",
            "/modules/M1/items",
            r#"{"content_id":"L1","kind":"Lesson","position":1}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(store.list_items_for_module("M1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn detach_requires_the_ref_to_belong_to_the_addressed_module() {
        let store = seeded_store();
        store.insert_ref(ContentItemRef {
            id: "R1".to_string(),
            module_id: "M1".to_string(),
            content_id: "L1".to_string(),
            kind: ContentKind::Lesson,
            position: 1,
            is_published: true,
        });

        let status = send(
            app(Arc::clone(&store)),
            "DELETE",
            "/modules/OTHER/items/R1",
            "",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(store.list_items_for_module("M1").await.unwrap().len(), 1);

        let status = send(app(Arc::clone(&store)), "DELETE", "/modules/M1/items/R1", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(store.list_items_for_module("M1").await.unwrap().is_empty());
    }
}
