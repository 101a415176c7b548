//! Module item entity - module -> content join rows
//!
//! Carries the within-module ordering position and the publication flag of
//! the attachment. The `kind` discriminator selects the detail table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Content variant discriminator
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ContentKind {
    #[sea_orm(string_value = "Lesson")]
    Lesson,
    #[sea_orm(string_value = "Quiz")]
    Quiz,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "module_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub module_id: String,

    /// Id of the referenced lesson or quiz
    pub content_id: String,

    pub kind: ContentKind,

    /// Ascending ordering within the module
    pub position: i32,

    pub is_published: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
