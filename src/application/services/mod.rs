//! Application services

pub mod curriculum;

pub use curriculum::{CurriculumService, CurriculumWatcher};
