//! Course CRUD endpoints

pub mod dto;
pub mod handlers;

pub use handlers::CoursesState;
