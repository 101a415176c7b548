//! Course aggregate: model and repository interface

pub mod model;
pub mod repository;

pub use model::{Course, CourseLevel};
pub use repository::CourseRepository;
