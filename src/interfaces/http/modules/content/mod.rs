//! Authoring endpoints for modules, lessons, quizzes and attachments

pub mod dto;
pub mod handlers;

pub use handlers::ContentState;
