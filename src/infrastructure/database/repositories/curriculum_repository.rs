//! SeaORM implementation of CurriculumRepository
//!
//! The published/ordered filtering the aggregator relies on is pushed into
//! the queries here, so the service never sees excluded rows.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::course::Course;
use crate::domain::curriculum::{
    ContentItem, ContentItemRef, ContentKind, CurriculumRepository, Module,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{course, course_module, lesson, module_item, quiz};

use super::content_repository::{lesson_to_domain, quiz_to_domain, ref_to_domain};
use super::course_repository::{db_err, entity_to_domain as course_to_domain};
use super::module_repository::entity_to_domain as module_to_domain;

pub struct SeaOrmCurriculumRepository {
    db: DatabaseConnection,
}

impl SeaOrmCurriculumRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CurriculumRepository for SeaOrmCurriculumRepository {
    async fn find_course(&self, course_id: &str) -> DomainResult<Option<Course>> {
        let model = course::Entity::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(course_to_domain))
    }

    async fn list_published_modules(&self, course_id: &str) -> DomainResult<Vec<Module>> {
        let models = course_module::Entity::find()
            .filter(course_module::Column::CourseId.eq(course_id))
            .filter(course_module::Column::IsPublished.eq(true))
            .order_by_asc(course_module::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(module_to_domain).collect())
    }

    async fn list_published_item_refs(
        &self,
        module_id: &str,
    ) -> DomainResult<Vec<ContentItemRef>> {
        let models = module_item::Entity::find()
            .filter(module_item::Column::ModuleId.eq(module_id))
            .filter(module_item::Column::IsPublished.eq(true))
            .order_by_asc(module_item::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(ref_to_domain).collect())
    }

    async fn find_published_detail(
        &self,
        kind: ContentKind,
        content_id: &str,
    ) -> DomainResult<Option<ContentItem>> {
        match kind {
            ContentKind::Lesson => {
                let model = lesson::Entity::find_by_id(content_id)
                    .filter(lesson::Column::IsPublished.eq(true))
                    .one(&self.db)
                    .await
                    .map_err(db_err)?;
                Ok(model.map(|l| ContentItem::Lesson(lesson_to_domain(l))))
            }
            ContentKind::Quiz => {
                let model = quiz::Entity::find_by_id(content_id)
                    .filter(quiz::Column::IsPublished.eq(true))
                    .one(&self.db)
                    .await
                    .map_err(db_err)?;
                Ok(model.map(|q| ContentItem::Quiz(quiz_to_domain(q))))
            }
        }
    }
}
