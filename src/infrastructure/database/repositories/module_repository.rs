//! SeaORM implementation of ModuleRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::domain::curriculum::{Module, ModuleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::course_module;

use super::course_repository::db_err;

pub(crate) fn entity_to_domain(m: course_module::Model) -> Module {
    Module {
        id: m.id,
        course_id: m.course_id,
        title: m.title,
        description: m.description,
        position: m.position,
        is_published: m.is_published,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(m: Module) -> course_module::ActiveModel {
    course_module::ActiveModel {
        id: Set(m.id),
        course_id: Set(m.course_id),
        title: Set(m.title),
        description: Set(m.description),
        position: Set(m.position),
        is_published: Set(m.is_published),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    }
}

pub struct SeaOrmModuleRepository {
    db: DatabaseConnection,
}

impl SeaOrmModuleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ModuleRepository for SeaOrmModuleRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Module>> {
        let model = course_module::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn list_by_course(&self, course_id: &str) -> DomainResult<Vec<Module>> {
        let models = course_module::Entity::find()
            .filter(course_module::Column::CourseId.eq(course_id))
            .order_by_asc(course_module::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, mut m: Module) -> DomainResult<Module> {
        let now = Utc::now();
        m.created_at = now;
        m.updated_at = now;
        let result = domain_to_active(m)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        info!("Module saved: {} ({})", result.title, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, mut m: Module) -> DomainResult<()> {
        let existing = course_module::Entity::find_by_id(&m.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Module",
                field: "id",
                value: m.id,
            });
        };

        m.created_at = existing.created_at;
        m.updated_at = Utc::now();
        domain_to_active(m).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = course_module::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Module",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
