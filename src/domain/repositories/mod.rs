//! Unified repository access

use crate::domain::course::CourseRepository;
use crate::domain::curriculum::{ContentRepository, CurriculumRepository, ModuleRepository};

/// Aggregated access to all repositories.
///
/// Handlers and services depend on this trait instead of concrete storage,
/// so the whole stack can run against SeaORM or the in-memory store.
pub trait RepositoryProvider: Send + Sync {
    fn courses(&self) -> &dyn CourseRepository;
    fn modules(&self) -> &dyn ModuleRepository;
    fn content(&self) -> &dyn ContentRepository;
    fn curriculum(&self) -> &dyn CurriculumRepository;
}
