//! In-memory storage implementation
//!
//! Backs tests and local development without a database. Implements every
//! repository trait over `DashMap`s and offers fault injection so the
//! aggregator's degradation paths can be exercised deterministically.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{DashMap, DashSet};

use crate::domain::course::{Course, CourseRepository};
use crate::domain::curriculum::{
    ContentItem, ContentItemRef, ContentKind, ContentRepository, CurriculumRepository, Lesson,
    Module, ModuleRepository, Quiz,
};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};

/// In-memory store for development and testing
#[derive(Default)]
pub struct InMemoryStore {
    courses: DashMap<String, Course>,
    modules: DashMap<String, Module>,
    lessons: DashMap<String, Lesson>,
    quizzes: DashMap<String, Quiz>,
    item_refs: DashMap<String, ContentItemRef>,
    // Fault injection: content ids whose detail lookup errors, module ids
    // whose ref listing errors.
    failing_details: DashSet<String>,
    failing_refs: DashSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_course(&self, course: Course) {
        self.courses.insert(course.id.clone(), course);
    }

    pub fn insert_module(&self, module: Module) {
        self.modules.insert(module.id.clone(), module);
    }

    pub fn insert_lesson(&self, lesson: Lesson) {
        self.lessons.insert(lesson.id.clone(), lesson);
    }

    pub fn insert_quiz(&self, quiz: Quiz) {
        self.quizzes.insert(quiz.id.clone(), quiz);
    }

    pub fn insert_ref(&self, item_ref: ContentItemRef) {
        self.item_refs.insert(item_ref.id.clone(), item_ref);
    }

    /// Make detail lookups for `content_id` fail
    pub fn fail_detail(&self, content_id: &str) {
        self.failing_details.insert(content_id.to_string());
    }

    /// Make ref listings for `module_id` fail
    pub fn fail_refs(&self, module_id: &str) {
        self.failing_refs.insert(module_id.to_string());
    }
}

#[async_trait]
impl CurriculumRepository for InMemoryStore {
    async fn find_course(&self, course_id: &str) -> DomainResult<Option<Course>> {
        Ok(self.courses.get(course_id).map(|c| c.clone()))
    }

    async fn list_published_modules(&self, course_id: &str) -> DomainResult<Vec<Module>> {
        let mut modules: Vec<Module> = self
            .modules
            .iter()
            .filter(|m| m.course_id == course_id && m.is_published)
            .map(|m| m.clone())
            .collect();
        modules.sort_by_key(|m| m.position);
        Ok(modules)
    }

    async fn list_published_item_refs(
        &self,
        module_id: &str,
    ) -> DomainResult<Vec<ContentItemRef>> {
        if self.failing_refs.contains(module_id) {
            return Err(DomainError::Storage(format!(
                "simulated ref failure for module {}",
                module_id
            )));
        }
        let mut refs: Vec<ContentItemRef> = self
            .item_refs
            .iter()
            .filter(|r| r.module_id == module_id && r.is_published)
            .map(|r| r.clone())
            .collect();
        refs.sort_by_key(|r| r.position);
        Ok(refs)
    }

    async fn find_published_detail(
        &self,
        kind: ContentKind,
        content_id: &str,
    ) -> DomainResult<Option<ContentItem>> {
        if self.failing_details.contains(content_id) {
            return Err(DomainError::Storage(format!(
                "simulated detail failure for {}",
                content_id
            )));
        }
        let item = match kind {
            ContentKind::Lesson => self
                .lessons
                .get(content_id)
                .filter(|l| l.is_published)
                .map(|l| ContentItem::Lesson(l.clone())),
            ContentKind::Quiz => self
                .quizzes
                .get(content_id)
                .filter(|q| q.is_published)
                .map(|q| ContentItem::Quiz(q.clone())),
        };
        Ok(item)
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Course>> {
        Ok(self.courses.get(id).map(|c| c.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Course>> {
        let mut courses: Vec<Course> = self.courses.iter().map(|c| c.clone()).collect();
        courses.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(courses)
    }

    async fn save(&self, mut course: Course) -> DomainResult<Course> {
        if self.courses.contains_key(&course.id) {
            return Err(DomainError::Conflict(format!("Course {}", course.id)));
        }
        let now = Utc::now();
        course.created_at = now;
        course.updated_at = now;
        self.courses.insert(course.id.clone(), course.clone());
        Ok(course)
    }

    async fn update(&self, course: Course) -> DomainResult<()> {
        if !self.courses.contains_key(&course.id) {
            return Err(DomainError::NotFound {
                entity: "Course",
                field: "id",
                value: course.id,
            });
        }
        self.courses.insert(course.id.clone(), course);
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.courses.remove(id).ok_or_else(|| DomainError::NotFound {
            entity: "Course",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

#[async_trait]
impl ModuleRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Module>> {
        Ok(self.modules.get(id).map(|m| m.clone()))
    }

    async fn list_by_course(&self, course_id: &str) -> DomainResult<Vec<Module>> {
        let mut modules: Vec<Module> = self
            .modules
            .iter()
            .filter(|m| m.course_id == course_id)
            .map(|m| m.clone())
            .collect();
        modules.sort_by_key(|m| m.position);
        Ok(modules)
    }

    async fn save(&self, module: Module) -> DomainResult<Module> {
        if self.modules.contains_key(&module.id) {
            return Err(DomainError::Conflict(format!("Module {}", module.id)));
        }
        self.modules.insert(module.id.clone(), module.clone());
        Ok(module)
    }

    async fn update(&self, module: Module) -> DomainResult<()> {
        if !self.modules.contains_key(&module.id) {
            return Err(DomainError::NotFound {
                entity: "Module",
                field: "id",
                value: module.id,
            });
        }
        self.modules.insert(module.id.clone(), module);
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.modules.remove(id).ok_or_else(|| DomainError::NotFound {
            entity: "Module",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for InMemoryStore {
    async fn find_lesson(&self, id: &str) -> DomainResult<Option<Lesson>> {
        Ok(self.lessons.get(id).map(|l| l.clone()))
    }

    async fn save_lesson(&self, lesson: Lesson) -> DomainResult<Lesson> {
        self.lessons.insert(lesson.id.clone(), lesson.clone());
        Ok(lesson)
    }

    async fn update_lesson(&self, lesson: Lesson) -> DomainResult<()> {
        if !self.lessons.contains_key(&lesson.id) {
            return Err(DomainError::NotFound {
                entity: "Lesson",
                field: "id",
                value: lesson.id,
            });
        }
        self.lessons.insert(lesson.id.clone(), lesson);
        Ok(())
    }

    async fn find_quiz(&self, id: &str) -> DomainResult<Option<Quiz>> {
        Ok(self.quizzes.get(id).map(|q| q.clone()))
    }

    async fn save_quiz(&self, quiz: Quiz) -> DomainResult<Quiz> {
        self.quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn update_quiz(&self, quiz: Quiz) -> DomainResult<()> {
        if !self.quizzes.contains_key(&quiz.id) {
            return Err(DomainError::NotFound {
                entity: "Quiz",
                field: "id",
                value: quiz.id,
            });
        }
        self.quizzes.insert(quiz.id.clone(), quiz);
        Ok(())
    }

    async fn attach_item(&self, item_ref: ContentItemRef) -> DomainResult<ContentItemRef> {
        self.item_refs.insert(item_ref.id.clone(), item_ref.clone());
        Ok(item_ref)
    }

    async fn find_item(&self, ref_id: &str) -> DomainResult<Option<ContentItemRef>> {
        Ok(self.item_refs.get(ref_id).map(|r| r.clone()))
    }

    async fn detach_item(&self, ref_id: &str) -> DomainResult<()> {
        self.item_refs
            .remove(ref_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "ModuleItem",
                field: "id",
                value: ref_id.to_string(),
            })?;
        Ok(())
    }

    async fn list_items_for_module(&self, module_id: &str) -> DomainResult<Vec<ContentItemRef>> {
        let mut refs: Vec<ContentItemRef> = self
            .item_refs
            .iter()
            .filter(|r| r.module_id == module_id)
            .map(|r| r.clone())
            .collect();
        refs.sort_by_key(|r| r.position);
        Ok(refs)
    }
}

impl RepositoryProvider for InMemoryStore {
    fn courses(&self) -> &dyn CourseRepository {
        self
    }

    fn modules(&self) -> &dyn ModuleRepository {
        self
    }

    fn content(&self) -> &dyn ContentRepository {
        self
    }

    fn curriculum(&self) -> &dyn CurriculumRepository {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(id: &str, course_id: &str, position: i32, published: bool) -> Module {
        Module {
            id: id.to_string(),
            course_id: course_id.to_string(),
            title: id.to_string(),
            description: None,
            position,
            is_published: published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn published_modules_are_filtered_and_ordered() {
        let store = InMemoryStore::new();
        store.insert_module(module("M3", "C1", 3, true));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_module(module("M2", "C1", 2, false));
        store.insert_module(module("MX", "C2", 1, true));

        let modules = store.list_published_modules("C1").await.unwrap();
        let ids: Vec<&str> = modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["M1", "M3"]);
    }

    #[tokio::test]
    async fn unpublished_detail_lookup_returns_none() {
        let store = InMemoryStore::new();
        store.insert_lesson(Lesson {
            id: "L1".to_string(),
            title: "Hidden".to_string(),
            description: None,
            estimated_duration_minutes: Some(10),
            is_published: false,
        });

        let found = store
            .find_published_detail(ContentKind::Lesson, "L1")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fault_injection_errors_surface_as_storage_errors() {
        let store = InMemoryStore::new();
        store.fail_detail("L1");
        let err = store
            .find_published_detail(ContentKind::Lesson, "L1")
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }
}
