//! Database entities module

pub mod course;
pub mod course_module;
pub mod lesson;
pub mod module_item;
pub mod quiz;

pub use course::Entity as Course;
pub use course_module::Entity as CourseModule;
pub use lesson::Entity as Lesson;
pub use module_item::Entity as ModuleItem;
pub use quiz::Entity as Quiz;
