//! Curriculum repository interfaces
//!
//! `CurriculumRepository` is the read capability the aggregator is built
//! against: exactly the four filtered, ordered reads it needs. Authoring
//! goes through `ModuleRepository` / `ContentRepository`.

use async_trait::async_trait;

use super::model::{ContentItem, ContentItemRef, ContentKind, Lesson, Module, Quiz};
use crate::domain::course::Course;
use crate::domain::DomainResult;

/// Read-only, published-filtered view of the curriculum store.
///
/// Implementations must return modules and item refs in ascending position
/// order and must exclude unpublished rows.
#[async_trait]
pub trait CurriculumRepository: Send + Sync {
    async fn find_course(&self, course_id: &str) -> DomainResult<Option<Course>>;

    /// Published modules of a course, ordered ascending by position
    async fn list_published_modules(&self, course_id: &str) -> DomainResult<Vec<Module>>;

    /// Published content refs of a module, ordered ascending by position
    async fn list_published_item_refs(&self, module_id: &str)
        -> DomainResult<Vec<ContentItemRef>>;

    /// Detail lookup by kind; returns `None` for missing or unpublished rows
    async fn find_published_detail(
        &self,
        kind: ContentKind,
        content_id: &str,
    ) -> DomainResult<Option<ContentItem>>;
}

#[async_trait]
pub trait ModuleRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Module>>;
    /// All modules of a course (published or not), ordered by position
    async fn list_by_course(&self, course_id: &str) -> DomainResult<Vec<Module>>;
    async fn save(&self, module: Module) -> DomainResult<Module>;
    async fn update(&self, module: Module) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn find_lesson(&self, id: &str) -> DomainResult<Option<Lesson>>;
    async fn save_lesson(&self, lesson: Lesson) -> DomainResult<Lesson>;
    async fn update_lesson(&self, lesson: Lesson) -> DomainResult<()>;

    async fn find_quiz(&self, id: &str) -> DomainResult<Option<Quiz>>;
    async fn save_quiz(&self, quiz: Quiz) -> DomainResult<Quiz>;
    async fn update_quiz(&self, quiz: Quiz) -> DomainResult<()>;

    /// Attach a lesson/quiz to a module (creates the join row)
    async fn attach_item(&self, item_ref: ContentItemRef) -> DomainResult<ContentItemRef>;
    async fn find_item(&self, ref_id: &str) -> DomainResult<Option<ContentItemRef>>;
    async fn detach_item(&self, ref_id: &str) -> DomainResult<()>;
    /// All refs of a module (published or not), ordered by position
    async fn list_items_for_module(&self, module_id: &str) -> DomainResult<Vec<ContentItemRef>>;
}
