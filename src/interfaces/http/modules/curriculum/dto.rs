//! Curriculum aggregate DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ContentItem, CurriculumAggregate, CurriculumModule};
use crate::interfaces::http::modules::courses::dto::CourseResponse;

/// One lesson or quiz inside a module, flattened for the wire
#[derive(Debug, Serialize, ToSchema)]
pub struct ContentItemResponse {
    pub id: String,
    /// "Lesson" | "Quiz"
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    /// Lesson estimate or quiz time limit; 0 when unset
    pub duration_minutes: i32,
    /// Quiz only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passing_score: Option<i32>,
}

impl From<ContentItem> for ContentItemResponse {
    fn from(item: ContentItem) -> Self {
        let kind = item.kind().to_string();
        let duration_minutes = item.duration_minutes();
        match item {
            ContentItem::Lesson(l) => Self {
                id: l.id,
                kind,
                title: l.title,
                description: l.description,
                duration_minutes,
                passing_score: None,
            },
            ContentItem::Quiz(q) => Self {
                id: q.id,
                kind,
                title: q.title,
                description: q.description,
                duration_minutes,
                passing_score: Some(q.passing_score),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurriculumModuleResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub items: Vec<ContentItemResponse>,
}

impl From<CurriculumModule> for CurriculumModuleResponse {
    fn from(cm: CurriculumModule) -> Self {
        Self {
            id: cm.module.id,
            title: cm.module.title,
            description: cm.module.description,
            position: cm.module.position,
            items: cm.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// The assembled curriculum for one course
#[derive(Debug, Serialize, ToSchema)]
pub struct CurriculumResponse {
    pub course: CourseResponse,
    pub modules: Vec<CurriculumModuleResponse>,
    pub total_lessons: u32,
    pub total_quizzes: u32,
    pub total_duration_minutes: i32,
}

impl From<CurriculumAggregate> for CurriculumResponse {
    fn from(agg: CurriculumAggregate) -> Self {
        Self {
            course: agg.course.into(),
            modules: agg.modules.into_iter().map(Into::into).collect(),
            total_lessons: agg.total_lessons,
            total_quizzes: agg.total_quizzes,
            total_duration_minutes: agg.total_duration_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lesson, Quiz};

    #[test]
    fn lesson_wire_shape_has_no_passing_score() {
        let item: ContentItemResponse = ContentItem::Lesson(Lesson {
            id: "L1".to_string(),
            title: "Intro".to_string(),
            description: None,
            estimated_duration_minutes: Some(10),
            is_published: true,
        })
        .into();

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "Lesson");
        assert_eq!(json["duration_minutes"], 10);
        assert!(json.get("passing_score").is_none());
    }

    #[test]
    fn quiz_wire_shape_carries_passing_score_and_limit() {
        let item: ContentItemResponse = ContentItem::Quiz(Quiz {
            id: "Q1".to_string(),
            title: "Checkpoint".to_string(),
            description: None,
            passing_score: 80,
            time_limit_minutes: None,
            is_published: true,
        })
        .into();

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "Quiz");
        assert_eq!(json["passing_score"], 80);
        assert_eq!(json["duration_minutes"], 0);
    }
}
