//! SeaORM implementation of CourseRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tracing::info;

use crate::domain::course::{Course, CourseLevel, CourseRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::course;

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

pub(crate) fn level_to_domain(level: course::CourseLevel) -> CourseLevel {
    match level {
        course::CourseLevel::Beginner => CourseLevel::Beginner,
        course::CourseLevel::Intermediate => CourseLevel::Intermediate,
        course::CourseLevel::Advanced => CourseLevel::Advanced,
    }
}

fn level_to_entity(level: CourseLevel) -> course::CourseLevel {
    match level {
        CourseLevel::Beginner => course::CourseLevel::Beginner,
        CourseLevel::Intermediate => course::CourseLevel::Intermediate,
        CourseLevel::Advanced => course::CourseLevel::Advanced,
    }
}

pub(crate) fn entity_to_domain(c: course::Model) -> Course {
    Course {
        id: c.id,
        title: c.title,
        subtitle: c.subtitle,
        short_description: c.short_description,
        level: level_to_domain(c.level),
        duration_hours: c.duration_hours,
        is_published: c.is_published,
        created_at: c.created_at,
        updated_at: c.updated_at,
    }
}

fn domain_to_active(c: Course) -> course::ActiveModel {
    course::ActiveModel {
        id: Set(c.id),
        title: Set(c.title),
        subtitle: Set(c.subtitle),
        short_description: Set(c.short_description),
        level: Set(level_to_entity(c.level)),
        duration_hours: Set(c.duration_hours),
        is_published: Set(c.is_published),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

// ── SeaOrmCourseRepository ──────────────────────────────────────

pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Course>> {
        let model = course::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Course>> {
        let models = course::Entity::find()
            .order_by_asc(course::Column::Title)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, mut c: Course) -> DomainResult<Course> {
        let now = Utc::now();
        c.created_at = now;
        c.updated_at = now;
        let result = domain_to_active(c)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        info!("Course saved: {} ({})", result.title, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, mut c: Course) -> DomainResult<()> {
        let existing = course::Entity::find_by_id(&c.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Course",
                field: "id",
                value: c.id,
            });
        };

        c.created_at = existing.created_at;
        c.updated_at = Utc::now();
        domain_to_active(c).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = course::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Course",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
