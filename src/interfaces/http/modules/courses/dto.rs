//! Course DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Course;

/// Course representation returned by the API
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub short_description: Option<String>,
    pub level: String,
    pub duration_hours: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            title: c.title,
            subtitle: c.subtitle,
            short_description: c.short_description,
            level: c.level.to_string(),
            duration_hours: c.duration_hours,
            is_published: c.is_published,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub subtitle: Option<String>,
    pub short_description: Option<String>,
    /// "Beginner" | "Intermediate" | "Advanced" (defaults to Beginner)
    pub level: Option<String>,
    #[validate(range(min = 0))]
    pub duration_hours: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub short_description: Option<String>,
    pub level: Option<String>,
    #[validate(range(min = 0))]
    pub duration_hours: Option<i32>,
    pub is_published: Option<bool>,
}
