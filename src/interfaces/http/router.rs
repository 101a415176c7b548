//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::CurriculumService;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::{
    content::{self, ContentState},
    courses::{self, CoursesState},
    curriculum::{self, CurriculumAppState},
    health::{self, HealthState},
};

/// Unified state for all course catalog routes (course CRUD + authoring +
/// curriculum reads). Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct CatalogUnifiedState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub curriculum_service: Arc<CurriculumService>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<CatalogUnifiedState> for CoursesState {
    fn from_ref(s: &CatalogUnifiedState) -> Self {
        CoursesState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<CatalogUnifiedState> for ContentState {
    fn from_ref(s: &CatalogUnifiedState) -> Self {
        ContentState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<CatalogUnifiedState> for CurriculumAppState {
    fn from_ref(s: &CatalogUnifiedState) -> Self {
        CurriculumAppState {
            service: Arc::clone(&s.curriculum_service),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Courses
        courses::handlers::list_courses,
        courses::handlers::get_course,
        courses::handlers::create_course,
        courses::handlers::update_course,
        courses::handlers::delete_course,
        // Curriculum
        curriculum::handlers::get_curriculum,
        // Authoring
        content::handlers::list_modules,
        content::handlers::create_module,
        content::handlers::update_module,
        content::handlers::delete_module,
        content::handlers::create_lesson,
        content::handlers::update_lesson,
        content::handlers::create_quiz,
        content::handlers::update_quiz,
        content::handlers::list_items,
        content::handlers::attach_item,
        content::handlers::detach_item,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
            // Courses
            courses::dto::CourseResponse,
            courses::dto::CreateCourseRequest,
            courses::dto::UpdateCourseRequest,
            // Curriculum
            curriculum::dto::CurriculumResponse,
            curriculum::dto::CurriculumModuleResponse,
            curriculum::dto::ContentItemResponse,
            // Authoring
            content::dto::ModuleResponse,
            content::dto::CreateModuleRequest,
            content::dto::UpdateModuleRequest,
            content::dto::LessonResponse,
            content::dto::CreateLessonRequest,
            content::dto::UpdateLessonRequest,
            content::dto::QuizResponse,
            content::dto::CreateQuizRequest,
            content::dto::UpdateQuizRequest,
            content::dto::ItemRefResponse,
            content::dto::AttachItemRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Courses", description = "Course CRUD operations"),
        (name = "Curriculum", description = "Assembled curriculum reads for the course detail page"),
        (name = "Authoring", description = "Module, lesson, quiz and attachment authoring"),
    ),
    info(
        title = "EduTrack LMS API",
        version = "1.0.0",
        description = "REST API for the EduTrack learning management backend",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    curriculum_service: Arc<CurriculumService>,
    db: DatabaseConnection,
) -> Router {
    // ── Unified state for all catalog routes ───────────────────
    let catalog = CatalogUnifiedState {
        repos,
        curriculum_service,
    };

    // A SINGLE router for every /api/v1/courses/* route.
    let course_routes = Router::new()
        // --- Course CRUD (uses State<CoursesState> via FromRef) ---
        .route(
            "/",
            get(courses::handlers::list_courses).post(courses::handlers::create_course),
        )
        .route(
            "/{id}",
            get(courses::handlers::get_course)
                .put(courses::handlers::update_course)
                .delete(courses::handlers::delete_course),
        )
        // --- Curriculum read (uses State<CurriculumAppState> via FromRef) ---
        .route("/{id}/curriculum", get(curriculum::handlers::get_curriculum))
        // --- Module authoring (uses State<ContentState> via FromRef) ---
        .route(
            "/{course_id}/modules",
            get(content::handlers::list_modules).post(content::handlers::create_module),
        )
        .with_state(catalog.clone());

    // Module / attachment routes addressed by module id
    let module_routes = Router::new()
        .route(
            "/{id}",
            put(content::handlers::update_module).delete(content::handlers::delete_module),
        )
        .route(
            "/{module_id}/items",
            get(content::handlers::list_items).post(content::handlers::attach_item),
        )
        .route(
            "/{module_id}/items/{ref_id}",
            axum::routing::delete(content::handlers::detach_item),
        )
        .with_state(catalog.clone());

    // Lesson / quiz authoring routes
    let lesson_routes = Router::new()
        .route("/", post(content::handlers::create_lesson))
        .route("/{id}", put(content::handlers::update_lesson))
        .with_state(catalog.clone());

    let quiz_routes = Router::new()
        .route("/", post(content::handlers::create_quiz))
        .route("/{id}", put(content::handlers::update_quiz))
        .with_state(catalog);

    let health_state = HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::handlers::health_check))
        .with_state(health_state)
        // Courses (CRUD + curriculum + module authoring)
        .nest("/api/v1/courses", course_routes)
        // Modules (update/delete + attachments)
        .nest("/api/v1/modules", module_routes)
        // Lessons
        .nest("/api/v1/lessons", lesson_routes)
        // Quizzes
        .nest("/api/v1/quizzes", quiz_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
