//! Curriculum domain entities
//!
//! A curriculum is an ordered tree: course -> modules -> content items.
//! Content items are a sum type over lessons and quizzes; storage keeps a
//! string discriminator, the domain resolves it once into [`ContentItem`].

use chrono::{DateTime, Utc};

use crate::domain::course::Course;

/// An ordered grouping of learning content within a course (a week or unit)
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Ascending ordering within the course. Ties are a don't-care and keep
    /// fetch order.
    pub position: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Discriminator for the two content variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Lesson,
    Quiz,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lesson => write!(f, "Lesson"),
            Self::Quiz => write!(f, "Quiz"),
        }
    }
}

/// Module -> content join row; owns the ordering position and the per-module
/// publication flag of the attachment itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItemRef {
    pub id: String,
    pub module_id: String,
    pub content_id: String,
    pub kind: ContentKind,
    pub position: i32,
    pub is_published: bool,
}

/// Instructional content
#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub is_published: bool,
}

/// Assessment content
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Minimum score (percent) to pass
    pub passing_score: i32,
    pub time_limit_minutes: Option<i32>,
    pub is_published: bool,
}

/// A single unit of curriculum content, resolved to its concrete variant
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Lesson(Lesson),
    Quiz(Quiz),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Lesson(_) => ContentKind::Lesson,
            Self::Quiz(_) => ContentKind::Quiz,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Lesson(l) => &l.id,
            Self::Quiz(q) => &q.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Lesson(l) => &l.title,
            Self::Quiz(q) => &q.title,
        }
    }

    /// Contribution to the aggregate duration total. Lessons count their
    /// estimated duration, quizzes their time limit; missing values are 0.
    pub fn duration_minutes(&self) -> i32 {
        match self {
            Self::Lesson(l) => l.estimated_duration_minutes.unwrap_or(0),
            Self::Quiz(q) => q.time_limit_minutes.unwrap_or(0),
        }
    }
}

/// A module together with its included (published) items, in position order
#[derive(Debug, Clone, PartialEq)]
pub struct CurriculumModule {
    pub module: Module,
    pub items: Vec<ContentItem>,
}

/// The fully assembled, nested curriculum view for one course.
///
/// Built fresh per request; never persisted. Totals cover included items
/// only; unpublished modules and items are excluded entirely, not flagged.
#[derive(Debug, Clone, PartialEq)]
pub struct CurriculumAggregate {
    pub course: Course,
    pub modules: Vec<CurriculumModule>,
    pub total_lessons: u32,
    pub total_quizzes: u32,
    pub total_duration_minutes: i32,
}

/// Lifecycle of one aggregation request: idle -> loading -> {ready | error}
#[derive(Debug, Clone, PartialEq)]
pub enum CurriculumState {
    Idle,
    Loading,
    Ready(CurriculumAggregate),
    Error(String),
}

impl CurriculumState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(duration: Option<i32>) -> ContentItem {
        ContentItem::Lesson(Lesson {
            id: "L1".to_string(),
            title: "Intro".to_string(),
            description: None,
            estimated_duration_minutes: duration,
            is_published: true,
        })
    }

    fn quiz(limit: Option<i32>) -> ContentItem {
        ContentItem::Quiz(Quiz {
            id: "Q1".to_string(),
            title: "Checkpoint".to_string(),
            description: None,
            passing_score: 70,
            time_limit_minutes: limit,
            is_published: true,
        })
    }

    #[test]
    fn duration_uses_lesson_estimate_and_quiz_limit() {
        assert_eq!(lesson(Some(10)).duration_minutes(), 10);
        assert_eq!(quiz(Some(20)).duration_minutes(), 20);
    }

    #[test]
    fn missing_duration_counts_as_zero() {
        assert_eq!(lesson(None).duration_minutes(), 0);
        assert_eq!(quiz(None).duration_minutes(), 0);
    }

    #[test]
    fn kind_resolves_variant() {
        assert_eq!(lesson(None).kind(), ContentKind::Lesson);
        assert_eq!(quiz(None).kind(), ContentKind::Quiz);
    }
}
