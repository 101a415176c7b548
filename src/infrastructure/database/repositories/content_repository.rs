//! SeaORM implementation of ContentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::domain::curriculum::{ContentItemRef, ContentKind, ContentRepository, Lesson, Quiz};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{lesson, module_item, quiz};

use super::course_repository::db_err;

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn kind_to_domain(k: module_item::ContentKind) -> ContentKind {
    match k {
        module_item::ContentKind::Lesson => ContentKind::Lesson,
        module_item::ContentKind::Quiz => ContentKind::Quiz,
    }
}

fn kind_to_entity(k: ContentKind) -> module_item::ContentKind {
    match k {
        ContentKind::Lesson => module_item::ContentKind::Lesson,
        ContentKind::Quiz => module_item::ContentKind::Quiz,
    }
}

pub(crate) fn lesson_to_domain(l: lesson::Model) -> Lesson {
    Lesson {
        id: l.id,
        title: l.title,
        description: l.description,
        estimated_duration_minutes: l.estimated_duration_minutes,
        is_published: l.is_published,
    }
}

pub(crate) fn quiz_to_domain(q: quiz::Model) -> Quiz {
    Quiz {
        id: q.id,
        title: q.title,
        description: q.description,
        passing_score: q.passing_score,
        time_limit_minutes: q.time_limit_minutes,
        is_published: q.is_published,
    }
}

pub(crate) fn ref_to_domain(r: module_item::Model) -> ContentItemRef {
    ContentItemRef {
        id: r.id,
        module_id: r.module_id,
        content_id: r.content_id,
        kind: kind_to_domain(r.kind),
        position: r.position,
        is_published: r.is_published,
    }
}

pub struct SeaOrmContentRepository {
    db: DatabaseConnection,
}

impl SeaOrmContentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository for SeaOrmContentRepository {
    async fn find_lesson(&self, id: &str) -> DomainResult<Option<Lesson>> {
        let model = lesson::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(lesson_to_domain))
    }

    async fn save_lesson(&self, l: Lesson) -> DomainResult<Lesson> {
        let now = Utc::now();
        let model = lesson::ActiveModel {
            id: Set(l.id),
            title: Set(l.title),
            description: Set(l.description),
            estimated_duration_minutes: Set(l.estimated_duration_minutes),
            is_published: Set(l.is_published),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Lesson saved: {} ({})", result.title, result.id);
        Ok(lesson_to_domain(result))
    }

    async fn update_lesson(&self, l: Lesson) -> DomainResult<()> {
        let existing = lesson::Entity::find_by_id(&l.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Lesson",
                field: "id",
                value: l.id,
            });
        };

        let model = lesson::ActiveModel {
            id: Set(l.id),
            title: Set(l.title),
            description: Set(l.description),
            estimated_duration_minutes: Set(l.estimated_duration_minutes),
            is_published: Set(l.is_published),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_quiz(&self, id: &str) -> DomainResult<Option<Quiz>> {
        let model = quiz::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(quiz_to_domain))
    }

    async fn save_quiz(&self, q: Quiz) -> DomainResult<Quiz> {
        let now = Utc::now();
        let model = quiz::ActiveModel {
            id: Set(q.id),
            title: Set(q.title),
            description: Set(q.description),
            passing_score: Set(q.passing_score),
            time_limit_minutes: Set(q.time_limit_minutes),
            is_published: Set(q.is_published),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Quiz saved: {} ({})", result.title, result.id);
        Ok(quiz_to_domain(result))
    }

    async fn update_quiz(&self, q: Quiz) -> DomainResult<()> {
        let existing = quiz::Entity::find_by_id(&q.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Quiz",
                field: "id",
                value: q.id,
            });
        };

        let model = quiz::ActiveModel {
            id: Set(q.id),
            title: Set(q.title),
            description: Set(q.description),
            passing_score: Set(q.passing_score),
            time_limit_minutes: Set(q.time_limit_minutes),
            is_published: Set(q.is_published),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn attach_item(&self, r: ContentItemRef) -> DomainResult<ContentItemRef> {
        let model = module_item::ActiveModel {
            id: Set(r.id),
            module_id: Set(r.module_id),
            content_id: Set(r.content_id),
            kind: Set(kind_to_entity(r.kind)),
            position: Set(r.position),
            is_published: Set(r.is_published),
            created_at: Set(Utc::now()),
        };
        let result = ref_to_domain(model.insert(&self.db).await.map_err(db_err)?);
        info!(
            "Content attached: {} {} -> module {}",
            result.kind, result.content_id, result.module_id
        );
        Ok(result)
    }

    async fn find_item(&self, ref_id: &str) -> DomainResult<Option<ContentItemRef>> {
        let model = module_item::Entity::find_by_id(ref_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(ref_to_domain))
    }

    async fn detach_item(&self, ref_id: &str) -> DomainResult<()> {
        let result = module_item::Entity::delete_by_id(ref_id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "ModuleItem",
                field: "id",
                value: ref_id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_items_for_module(&self, module_id: &str) -> DomainResult<Vec<ContentItemRef>> {
        let models = module_item::Entity::find()
            .filter(module_item::Column::ModuleId.eq(module_id))
            .order_by_asc(module_item::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(ref_to_domain).collect())
    }
}
