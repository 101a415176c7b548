//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_courses;
mod m20250301_000002_create_modules;
mod m20250301_000003_create_lessons;
mod m20250301_000004_create_quizzes;
mod m20250301_000005_create_module_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_courses::Migration),
            Box::new(m20250301_000002_create_modules::Migration),
            Box::new(m20250301_000003_create_lessons::Migration),
            Box::new(m20250301_000004_create_quizzes::Migration),
            Box::new(m20250301_000005_create_module_items::Migration),
        ]
    }
}
