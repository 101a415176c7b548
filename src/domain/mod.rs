//! Domain layer: entities, repository interfaces and errors

pub mod course;
pub mod curriculum;
pub mod error;
pub mod repositories;

pub use course::{Course, CourseLevel, CourseRepository};
pub use curriculum::{
    ContentItem, ContentItemRef, ContentKind, ContentRepository, CurriculumAggregate,
    CurriculumModule, CurriculumRepository, CurriculumState, Lesson, Module, ModuleRepository,
    Quiz,
};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
