//! Application layer: use cases built on domain repositories

pub mod services;

pub use services::{CurriculumService, CurriculumWatcher};
