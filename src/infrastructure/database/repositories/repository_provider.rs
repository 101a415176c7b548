//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::course::CourseRepository;
use crate::domain::curriculum::{ContentRepository, CurriculumRepository, ModuleRepository};
use crate::domain::repositories::RepositoryProvider;

use super::content_repository::SeaOrmContentRepository;
use super::course_repository::SeaOrmCourseRepository;
use super::curriculum_repository::SeaOrmCurriculumRepository;
use super::module_repository::SeaOrmModuleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let course = repos.courses().find_by_id("c-1").await?;
/// let modules = repos.curriculum().list_published_modules("c-1").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    courses: SeaOrmCourseRepository,
    modules: SeaOrmModuleRepository,
    content: SeaOrmContentRepository,
    curriculum: SeaOrmCurriculumRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            courses: SeaOrmCourseRepository::new(db.clone()),
            modules: SeaOrmModuleRepository::new(db.clone()),
            content: SeaOrmContentRepository::new(db.clone()),
            curriculum: SeaOrmCurriculumRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn courses(&self) -> &dyn CourseRepository {
        &self.courses
    }

    fn modules(&self) -> &dyn ModuleRepository {
        &self.modules
    }

    fn content(&self) -> &dyn ContentRepository {
        &self.content
    }

    fn curriculum(&self) -> &dyn CurriculumRepository {
        &self.curriculum
    }
}
