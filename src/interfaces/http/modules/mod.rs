pub mod content;
pub mod courses;
pub mod curriculum;
pub mod health;
