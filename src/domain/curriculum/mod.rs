//! Curriculum aggregate: models and repository interfaces

pub mod model;
pub mod repository;

pub use model::{
    ContentItem, ContentItemRef, ContentKind, CurriculumAggregate, CurriculumModule,
    CurriculumState, Lesson, Module, Quiz,
};
pub use repository::{ContentRepository, CurriculumRepository, ModuleRepository};
