use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "shortcuts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub creator_id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub link: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Whitespace-joined tag list
    #[sea_orm(column_type = "Text")]
    pub tag: String,
    pub visibility: String,
    /// OpenGraph override serialized as JSON
    #[sea_orm(column_type = "Text")]
    pub og_metadata: String,
    pub row_status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
