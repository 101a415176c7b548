//! Course repository interface

use async_trait::async_trait;

use super::model::Course;
use crate::domain::DomainResult;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Course>>;
    async fn find_all(&self) -> DomainResult<Vec<Course>>;
    async fn save(&self, course: Course) -> DomainResult<Course>;
    async fn update(&self, course: Course) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
