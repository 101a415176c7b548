//! Course domain entity

use chrono::{DateTime, Utc};

/// Difficulty level of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for CourseLevel {
    fn default() -> Self {
        Self::Beginner
    }
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
        }
    }
}

/// A course as seen by the catalog and the curriculum aggregator.
///
/// The aggregator treats courses as read-only; authoring endpoints own the
/// mutable lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub short_description: Option<String>,
    pub level: CourseLevel,
    /// Advertised total effort in hours (catalog display only)
    pub duration_hours: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_display_matches_stored_discriminator() {
        assert_eq!(CourseLevel::Beginner.to_string(), "Beginner");
        assert_eq!(CourseLevel::Intermediate.to_string(), "Intermediate");
        assert_eq!(CourseLevel::Advanced.to_string(), "Advanced");
    }

    #[test]
    fn default_level_is_beginner() {
        assert_eq!(CourseLevel::default(), CourseLevel::Beginner);
    }
}
