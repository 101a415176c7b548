//! Authoring DTOs for modules, lessons, quizzes and attachments

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{ContentItemRef, Lesson, Module, Quiz};

// ── Modules ─────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleResponse {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub is_published: bool,
}

impl From<Module> for ModuleResponse {
    fn from(m: Module) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            title: m.title,
            description: m.description,
            position: m.position,
            is_published: m.is_published,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateModuleRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateModuleRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
    pub is_published: Option<bool>,
}

// ── Lessons ─────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub is_published: bool,
}

impl From<Lesson> for LessonResponse {
    fn from(l: Lesson) -> Self {
        Self {
            id: l.id,
            title: l.title,
            description: l.description,
            estimated_duration_minutes: l.estimated_duration_minutes,
            is_published: l.is_published,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLessonRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub estimated_duration_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub estimated_duration_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

// ── Quizzes ─────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct QuizResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub passing_score: i32,
    pub time_limit_minutes: Option<i32>,
    pub is_published: bool,
}

impl From<Quiz> for QuizResponse {
    fn from(q: Quiz) -> Self {
        Self {
            id: q.id,
            title: q.title,
            description: q.description,
            passing_score: q.passing_score,
            time_limit_minutes: q.time_limit_minutes,
            is_published: q.is_published,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub passing_score: Option<i32>,
    #[validate(range(min = 0))]
    pub time_limit_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub passing_score: Option<i32>,
    #[validate(range(min = 0))]
    pub time_limit_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

// ── Attachments ─────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemRefResponse {
    pub id: String,
    pub module_id: String,
    pub content_id: String,
    pub kind: String,
    pub position: i32,
    pub is_published: bool,
}

impl From<ContentItemRef> for ItemRefResponse {
    fn from(r: ContentItemRef) -> Self {
        Self {
            id: r.id,
            module_id: r.module_id,
            content_id: r.content_id,
            kind: r.kind.to_string(),
            position: r.position,
            is_published: r.is_published,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AttachItemRequest {
    #[validate(length(min = 1))]
    pub content_id: String,
    /// "Lesson" | "Quiz"
    pub kind: String,
    pub position: i32,
    pub is_published: Option<bool>,
}
