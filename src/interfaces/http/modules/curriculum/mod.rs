//! Curriculum read endpoint

pub mod dto;
pub mod handlers;

pub use handlers::CurriculumAppState;
