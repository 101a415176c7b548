//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod content_repository;
pub mod course_repository;
pub mod curriculum_repository;
pub mod module_repository;
pub mod repository_provider;

pub use curriculum_repository::SeaOrmCurriculumRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
