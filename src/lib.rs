//! # EduTrack LMS Service
//!
//! Course catalog and curriculum backend for the EduTrack learning
//! management system.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Curriculum aggregation and load-state tracking
//! - **infrastructure**: External concerns (database, in-memory storage)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStore};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

// Re-export the API router and core services
pub use application::{CurriculumService, CurriculumWatcher};
pub use interfaces::http::create_api_router;
