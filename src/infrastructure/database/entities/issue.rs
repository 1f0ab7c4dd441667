//! Issue entity

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Issue status
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum IssueStatus {
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "inProgress")]
    InProgress,
    #[sea_orm(string_value = "canceled")]
    Canceled,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Tags, stored as a JSON array
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Tags(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,
    pub status: IssueStatus,

    #[sea_orm(nullable, column_type = "Text")]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    #[sea_orm(column_type = "Double")]
    pub latitude: f64,

    #[sea_orm(column_type = "Double")]
    pub longitude: f64,

    #[sea_orm(column_type = "Json")]
    pub tags: Tags,

    /// Reporting user. Not a foreign key: deleting a user keeps their issues.
    pub created_by: String,

    pub created_at: DateTimeUtc,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub updated_by: Option<String>,

    pub revision: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
