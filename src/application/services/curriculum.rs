//! Curriculum aggregation service
//!
//! Assembles the nested module -> lesson/quiz tree for one course out of
//! four flat reads, filtering by publication state and computing totals.
//!
//! Failure policy: a failed course lookup is fatal to the request; every
//! other failure degrades by omission so one bad row never blocks the rest
//! of the curriculum.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::{
    ContentItem, CurriculumAggregate, CurriculumModule, CurriculumRepository, CurriculumState,
    DomainError, DomainResult,
};

/// Shown when an aggregation error carries no message of its own
const GENERIC_LOAD_ERROR: &str = "Failed to load curriculum";

pub struct CurriculumService {
    store: Arc<dyn CurriculumRepository>,
}

impl CurriculumService {
    pub fn new(store: Arc<dyn CurriculumRepository>) -> Self {
        Self { store }
    }

    /// Build the curriculum aggregate for one course.
    ///
    /// Modules are processed in position order. Within a module the detail
    /// lookups run concurrently; the ref list dictates final item order.
    pub async fn aggregate(&self, course_id: &str) -> DomainResult<CurriculumAggregate> {
        let course = self
            .store
            .find_course(course_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Course",
                field: "id",
                value: course_id.to_string(),
            })?;

        let modules = self.store.list_published_modules(course_id).await?;

        let mut assembled = Vec::with_capacity(modules.len());
        let mut total_lessons: u32 = 0;
        let mut total_quizzes: u32 = 0;
        let mut total_duration_minutes: i32 = 0;

        for module in modules {
            // A failed ref fetch degrades this module to an empty item list;
            // the module itself stays in the aggregate.
            let refs = match self.store.list_published_item_refs(&module.id).await {
                Ok(refs) => refs,
                Err(e) => {
                    warn!(
                        module_id = %module.id,
                        error = %e,
                        "content refs unavailable, rendering module empty"
                    );
                    Vec::new()
                }
            };

            let lookups = refs
                .iter()
                .map(|r| self.store.find_published_detail(r.kind, &r.content_id));
            let details = join_all(lookups).await;

            let mut items = Vec::with_capacity(refs.len());
            for (item_ref, detail) in refs.iter().zip(details) {
                match detail {
                    Ok(Some(item)) => items.push(item),
                    Ok(None) => {
                        debug!(
                            module_id = %module.id,
                            content_id = %item_ref.content_id,
                            kind = %item_ref.kind,
                            "detail missing or unpublished, omitting item"
                        );
                    }
                    Err(e) => {
                        warn!(
                            module_id = %module.id,
                            content_id = %item_ref.content_id,
                            error = %e,
                            "detail fetch failed, omitting item"
                        );
                    }
                }
            }

            for item in &items {
                match item {
                    ContentItem::Lesson(_) => total_lessons += 1,
                    ContentItem::Quiz(_) => total_quizzes += 1,
                }
                total_duration_minutes += item.duration_minutes();
            }

            assembled.push(CurriculumModule { module, items });
        }

        Ok(CurriculumAggregate {
            course,
            modules: assembled,
            total_lessons,
            total_quizzes,
            total_duration_minutes,
        })
    }
}

/// Tracks one consumer's view of the curriculum across input changes.
///
/// State machine: idle -> loading -> {ready | error}. Every load takes a
/// fresh sequence number; a completion whose number is no longer current is
/// discarded, so a superseded in-flight request cannot overwrite the state
/// produced by a newer one.
pub struct CurriculumWatcher {
    service: Arc<CurriculumService>,
    state: RwLock<CurriculumState>,
    seq: AtomicU64,
}

impl CurriculumWatcher {
    pub fn new(service: Arc<CurriculumService>) -> Self {
        Self {
            service,
            state: RwLock::new(CurriculumState::Idle),
            seq: AtomicU64::new(0),
        }
    }

    pub async fn state(&self) -> CurriculumState {
        self.state.read().await.clone()
    }

    /// Load the curriculum for `course_id`, or reset to idle when absent.
    pub async fn load(&self, course_id: Option<&str>) {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(course_id) = course_id else {
            let mut guard = self.state.write().await;
            if self.seq.load(Ordering::SeqCst) == ticket {
                *guard = CurriculumState::Idle;
            }
            return;
        };

        // Every state write checks the ticket, including this one: a load
        // that lost the race before getting here must not clobber a newer
        // request's published result with a stray Loading.
        {
            let mut guard = self.state.write().await;
            if self.seq.load(Ordering::SeqCst) != ticket {
                debug!(course_id, "superseded before starting, skipping");
                return;
            }
            *guard = CurriculumState::Loading;
        }

        let result = self.service.aggregate(course_id).await;

        let mut guard = self.state.write().await;
        if self.seq.load(Ordering::SeqCst) != ticket {
            debug!(course_id, "discarding superseded aggregation result");
            return;
        }
        *guard = match result {
            Ok(aggregate) => CurriculumState::Ready(aggregate),
            Err(e) => {
                let message = e.to_string();
                if message.is_empty() {
                    CurriculumState::Error(GENERIC_LOAD_ERROR.to_string())
                } else {
                    CurriculumState::Error(message)
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::domain::{
        ContentItemRef, ContentKind, Course, CourseLevel, CurriculumRepository, Lesson, Module,
        Quiz,
    };
    use crate::infrastructure::storage::InMemoryStore;

    fn course(id: &str, title: &str) -> Course {
        Course {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: None,
            short_description: None,
            level: CourseLevel::Beginner,
            duration_hours: 4,
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn module(id: &str, course_id: &str, position: i32, published: bool) -> Module {
        Module {
            id: id.to_string(),
            course_id: course_id.to_string(),
            title: format!("Module {}", id),
            description: None,
            position,
            is_published: published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn lesson(id: &str, duration: Option<i32>, published: bool) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: format!("Lesson {}", id),
            description: None,
            estimated_duration_minutes: duration,
            is_published: published,
        }
    }

    fn quiz(id: &str, limit: Option<i32>, published: bool) -> Quiz {
        Quiz {
            id: id.to_string(),
            title: format!("Quiz {}", id),
            description: None,
            passing_score: 70,
            time_limit_minutes: limit,
            is_published: published,
        }
    }

    fn item_ref(
        id: &str,
        module_id: &str,
        content_id: &str,
        kind: ContentKind,
        position: i32,
    ) -> ContentItemRef {
        ContentItemRef {
            id: id.to_string(),
            module_id: module_id.to_string(),
            content_id: content_id.to_string(),
            kind,
            position,
            is_published: true,
        }
    }

    fn service(store: Arc<InMemoryStore>) -> CurriculumService {
        CurriculumService::new(store)
    }

    #[tokio::test]
    async fn unknown_course_is_fatal() {
        let store = Arc::new(InMemoryStore::new());
        let err = service(store)
            .aggregate("missing")
            .await
            .expect_err("lookup should fail");
        assert!(!err.to_string().is_empty());
        assert!(matches!(err, DomainError::NotFound { entity: "Course", .. }));
    }

    #[tokio::test]
    async fn course_without_modules_is_ready_and_zeroed() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));

        let agg = service(store).aggregate("C1").await.unwrap();
        assert!(agg.modules.is_empty());
        assert_eq!(agg.total_lessons, 0);
        assert_eq!(agg.total_quizzes, 0);
        assert_eq!(agg.total_duration_minutes, 0);
    }

    #[tokio::test]
    async fn unpublished_modules_are_excluded() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_module(module("M2", "C1", 2, false));

        let agg = service(store).aggregate("C1").await.unwrap();
        assert_eq!(agg.modules.len(), 1);
        assert_eq!(agg.modules[0].module.id, "M1");
    }

    #[tokio::test]
    async fn module_with_no_published_items_stays_with_empty_list() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_lesson(lesson("L1", Some(10), false));
        store.insert_ref(item_ref("R1", "M1", "L1", ContentKind::Lesson, 1));

        let agg = service(store).aggregate("C1").await.unwrap();
        assert_eq!(agg.modules.len(), 1);
        assert!(agg.modules[0].items.is_empty());
        assert_eq!(agg.total_lessons, 0);
    }

    #[tokio::test]
    async fn items_follow_ref_position_order() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_lesson(lesson("L1", Some(5), true));
        store.insert_lesson(lesson("L2", Some(5), true));
        store.insert_quiz(quiz("Q1", Some(15), true));
        // Inserted out of order on purpose
        store.insert_ref(item_ref("R3", "M1", "Q1", ContentKind::Quiz, 3));
        store.insert_ref(item_ref("R1", "M1", "L1", ContentKind::Lesson, 1));
        store.insert_ref(item_ref("R2", "M1", "L2", ContentKind::Lesson, 2));

        let agg = service(store).aggregate("C1").await.unwrap();
        let ids: Vec<&str> = agg.modules[0].items.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["L1", "L2", "Q1"]);
    }

    #[tokio::test]
    async fn missing_or_unpublished_details_are_omitted() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_lesson(lesson("L1", Some(10), true));
        store.insert_quiz(quiz("Q1", Some(20), false));
        store.insert_ref(item_ref("R1", "M1", "L1", ContentKind::Lesson, 1));
        store.insert_ref(item_ref("R2", "M1", "Q1", ContentKind::Quiz, 2));
        // Ref pointing to a detail row that does not exist at all
        store.insert_ref(item_ref("R3", "M1", "GHOST", ContentKind::Lesson, 3));

        let agg = service(store).aggregate("C1").await.unwrap();
        assert_eq!(agg.modules[0].items.len(), 1);
        assert_eq!(agg.modules[0].items[0].id(), "L1");
        assert_eq!(agg.total_lessons, 1);
        assert_eq!(agg.total_quizzes, 0);
    }

    #[tokio::test]
    async fn failing_detail_fetch_omits_only_that_item() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_lesson(lesson("L1", Some(10), true));
        store.insert_lesson(lesson("L2", Some(25), true));
        store.insert_ref(item_ref("R1", "M1", "L1", ContentKind::Lesson, 1));
        store.insert_ref(item_ref("R2", "M1", "L2", ContentKind::Lesson, 2));
        store.fail_detail("L1");

        let agg = service(store).aggregate("C1").await.unwrap();
        assert_eq!(agg.modules[0].items.len(), 1);
        assert_eq!(agg.modules[0].items[0].id(), "L2");
        assert_eq!(agg.total_duration_minutes, 25);
    }

    #[tokio::test]
    async fn failing_ref_fetch_degrades_module_to_empty() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_module(module("M2", "C1", 2, true));
        store.insert_lesson(lesson("L1", Some(10), true));
        store.insert_ref(item_ref("R1", "M1", "L1", ContentKind::Lesson, 1));
        store.insert_lesson(lesson("L2", Some(10), true));
        store.insert_ref(item_ref("R2", "M2", "L2", ContentKind::Lesson, 1));
        store.fail_refs("M1");

        let agg = service(store).aggregate("C1").await.unwrap();
        assert_eq!(agg.modules.len(), 2);
        assert!(agg.modules[0].items.is_empty());
        assert_eq!(agg.modules[1].items.len(), 1);
    }

    #[tokio::test]
    async fn duration_sums_lessons_and_quiz_limits_with_missing_as_zero() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_lesson(lesson("L1", Some(10), true));
        store.insert_lesson(lesson("L2", None, true));
        store.insert_quiz(quiz("Q1", Some(20), true));
        store.insert_quiz(quiz("Q2", None, true));
        store.insert_ref(item_ref("R1", "M1", "L1", ContentKind::Lesson, 1));
        store.insert_ref(item_ref("R2", "M1", "L2", ContentKind::Lesson, 2));
        store.insert_ref(item_ref("R3", "M1", "Q1", ContentKind::Quiz, 3));
        store.insert_ref(item_ref("R4", "M1", "Q2", ContentKind::Quiz, 4));

        let agg = service(store).aggregate("C1").await.unwrap();
        assert_eq!(agg.total_lessons, 2);
        assert_eq!(agg.total_quizzes, 2);
        assert_eq!(agg.total_duration_minutes, 30);
    }

    #[tokio::test]
    async fn two_module_end_to_end_scenario() {
        // C1: M1 (pos 1, published lesson L1 d=10, unpublished quiz),
        //     M2 (pos 2, published quiz Q1 limit=20)
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        store.insert_module(module("M2", "C1", 2, true));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_lesson(lesson("L1", Some(10), true));
        store.insert_quiz(quiz("QX", Some(45), false));
        store.insert_quiz(quiz("Q1", Some(20), true));
        store.insert_ref(item_ref("R1", "M1", "L1", ContentKind::Lesson, 1));
        store.insert_ref(item_ref("R2", "M1", "QX", ContentKind::Quiz, 2));
        store.insert_ref(item_ref("R3", "M2", "Q1", ContentKind::Quiz, 1));

        let agg = service(store).aggregate("C1").await.unwrap();
        assert_eq!(agg.modules.len(), 2);
        assert_eq!(agg.modules[0].module.id, "M1");
        assert_eq!(agg.modules[0].items.len(), 1);
        assert_eq!(agg.modules[0].items[0].id(), "L1");
        assert_eq!(agg.modules[1].module.id, "M2");
        assert_eq!(agg.modules[1].items[0].id(), "Q1");
        assert_eq!(agg.total_lessons, 1);
        assert_eq!(agg.total_quizzes, 1);
        assert_eq!(agg.total_duration_minutes, 30);
    }

    #[tokio::test]
    async fn repeated_aggregation_is_idempotent() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        store.insert_module(module("M1", "C1", 1, true));
        store.insert_lesson(lesson("L1", Some(10), true));
        store.insert_ref(item_ref("R1", "M1", "L1", ContentKind::Lesson, 1));

        let svc = service(store);
        let first = svc.aggregate("C1").await.unwrap();
        let second = svc.aggregate("C1").await.unwrap();
        assert_eq!(first, second);
    }

    // ── Watcher ─────────────────────────────────────────────────

    /// Store wrapper that delays course lookups for one course id, to make
    /// request-supersession deterministic in tests.
    struct SlowStore {
        inner: Arc<InMemoryStore>,
        slow_course: String,
        delay: Duration,
    }

    #[async_trait]
    impl CurriculumRepository for SlowStore {
        async fn find_course(&self, course_id: &str) -> DomainResult<Option<Course>> {
            if course_id == self.slow_course {
                tokio::time::sleep(self.delay).await;
            }
            self.inner.find_course(course_id).await
        }

        async fn list_published_modules(&self, course_id: &str) -> DomainResult<Vec<Module>> {
            self.inner.list_published_modules(course_id).await
        }

        async fn list_published_item_refs(
            &self,
            module_id: &str,
        ) -> DomainResult<Vec<ContentItemRef>> {
            self.inner.list_published_item_refs(module_id).await
        }

        async fn find_published_detail(
            &self,
            kind: ContentKind,
            content_id: &str,
        ) -> DomainResult<Option<ContentItem>> {
            self.inner.find_published_detail(kind, content_id).await
        }
    }

    #[tokio::test]
    async fn watcher_starts_idle_and_resets_on_absent_input() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("C1", "Rust 101"));
        let watcher = CurriculumWatcher::new(Arc::new(service(store)));
        assert_eq!(watcher.state().await, CurriculumState::Idle);

        watcher.load(Some("C1")).await;
        assert!(watcher.state().await.is_ready());

        watcher.load(None).await;
        assert_eq!(watcher.state().await, CurriculumState::Idle);
    }

    #[tokio::test]
    async fn watcher_reports_error_for_unknown_course() {
        let store = Arc::new(InMemoryStore::new());
        let watcher = CurriculumWatcher::new(Arc::new(service(store)));
        watcher.load(Some("missing")).await;
        match watcher.state().await {
            CurriculumState::Error(msg) => assert!(!msg.is_empty()),
            other => panic!("expected error state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn stale_result_does_not_overwrite_newer_one() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_course(course("SLOW", "Old"));
        store.insert_course(course("FAST", "New"));

        let slow = Arc::new(CurriculumService::new(Arc::new(SlowStore {
            inner: store,
            slow_course: "SLOW".to_string(),
            delay: Duration::from_millis(50),
        })));
        let watcher = CurriculumWatcher::new(slow);

        // First request stalls in flight; the second supersedes it and
        // completes first. The stale completion must be discarded.
        tokio::join!(watcher.load(Some("SLOW")), watcher.load(Some("FAST")));

        match watcher.state().await {
            CurriculumState::Ready(agg) => assert_eq!(agg.course.id, "FAST"),
            other => panic!("expected ready state, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_loads_never_leave_a_stray_loading_state() {
        // Two loads racing on separate workers: whichever one loses the
        // ticket race must not write Loading over the winner's Ready.
        for _ in 0..500 {
            let store = Arc::new(InMemoryStore::new());
            store.insert_course(course("C1", "Rust 101"));
            let watcher = Arc::new(CurriculumWatcher::new(Arc::new(service(store))));

            let a = {
                let w = Arc::clone(&watcher);
                tokio::spawn(async move { w.load(Some("C1")).await })
            };
            let b = {
                let w = Arc::clone(&watcher);
                tokio::spawn(async move { w.load(Some("C1")).await })
            };
            a.await.unwrap();
            b.await.unwrap();

            assert!(
                watcher.state().await.is_ready(),
                "state stuck after both loads finished"
            );
        }
    }
}
