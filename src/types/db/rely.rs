use sea_orm::entity::prelude::*;

/// Directed "depends on" edge between two scenarios: the relier depends on
/// the relied. Both directions are queried through the same edge set rather
/// than through object-graph traversal.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "relies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub relier_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub relied_id: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scenario::Entity",
        from = "Column::RelierId",
        to = "super::scenario::Column::Id"
    )]
    Relier,
    #[sea_orm(
        belongs_to = "super::scenario::Entity",
        from = "Column::ReliedId",
        to = "super::scenario::Column::Id"
    )]
    Relied,
}

// No Related impl: both ends point at scenarios, so joins pick a
// direction explicitly via Relation::Relier / Relation::Relied.

impl ActiveModelBehavior for ActiveModel {}
