use sea_orm::entity::prelude::*;

use crate::services::crypto;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub role_id: i32,
    pub password_hash: String,
    pub confirmed: bool,

    // Unix timestamps
    pub member_since: i64,
    pub last_seen: i64,
    pub last_informed: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
    #[sea_orm(has_many = "super::follow::Entity")]
    Follow,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::follow::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Follow.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// One-way comparison against the stored hash. The plaintext is never
    /// persisted or readable.
    pub fn verify_password(&self, plaintext: &str) -> bool {
        crypto::verify_password(plaintext, &self.password_hash)
    }
}
