//!
//! EduTrack LMS backend: course catalog, authoring and curriculum API.
//! Reads configuration from TOML file (~/.config/edutrack-lms/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use edutrack_lms::application::CurriculumService;
use edutrack_lms::config::AppConfig;
use edutrack_lms::domain::CurriculumRepository;
use edutrack_lms::infrastructure::database::migrator::Migrator;
use edutrack_lms::infrastructure::database::repositories::SeaOrmCurriculumRepository;
use edutrack_lms::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use edutrack_lms::{
    create_api_router, default_config_path, init_database, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("LMS_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting EduTrack LMS service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Seed a demo course so a fresh install has something to render
    seed_demo_course(&db).await;

    // ── Repositories and services ──────────────────────────────
    let repos: Arc<dyn edutrack_lms::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let curriculum_store: Arc<dyn CurriculumRepository> =
        Arc::new(SeaOrmCurriculumRepository::new(db.clone()));
    let curriculum_service = Arc::new(CurriculumService::new(curriculum_store));

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownSignal::new();
    {
        let signal = shutdown.clone();
        tokio::spawn(async move {
            listen_for_shutdown_signals(signal).await;
        });
    }

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(repos, curriculum_service, db.clone());

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await?;

    // Perform final cleanup
    info!("🧹 Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 EduTrack LMS service shutdown complete");
    Ok(())
}

/// Create a demo course if the catalog is empty
async fn seed_demo_course(db: &sea_orm::DatabaseConnection) {
    use edutrack_lms::infrastructure::database::entities::course::{self, CourseLevel};
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

    let course_count = course::Entity::find().count(db).await.unwrap_or(0);

    if course_count == 0 {
        info!("Seeding demo course...");

        let now = chrono::Utc::now();
        let demo = course::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set("Getting Started with EduTrack".to_string()),
            subtitle: Set(Some("A short orientation course".to_string())),
            short_description: Set(Some(
                "Shows authors how courses, modules and lessons fit together.".to_string(),
            )),
            level: Set(CourseLevel::Beginner),
            duration_hours: Set(1),
            is_published: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match demo.insert(db).await {
            Ok(created) => {
                info!("Demo course created: {}", created.id);
            }
            Err(e) => {
                error!("Failed to seed demo course: {}", e);
            }
        }
    }
}
