use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait,
};

use crate::errors::InternalError;
use crate::types::db::role;
use crate::types::permission::{Permission, Permissions};

pub const ADMINISTRATOR_ROLE: &str = "Administrator";
pub const ASSISTANT_ROLE: &str = "Assistant";
pub const DEFAULT_ROLE: &str = "User";

/// The fixed seed table. Each tier's capabilities are a superset of the
/// previous one.
const ROLE_TABLE: [(&str, &[Permission]); 3] = [
    (DEFAULT_ROLE, &[Permission::Follow, Permission::Edit]),
    (
        ASSISTANT_ROLE,
        &[Permission::Follow, Permission::Edit, Permission::DeleteCase],
    ),
    (
        ADMINISTRATOR_ROLE,
        &[
            Permission::Follow,
            Permission::Edit,
            Permission::DeleteCase,
            Permission::DeleteScenario,
        ],
    ),
];

/// Manages the role table: seeding and bitmask mutation.
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upsert the fixed role table in one transaction. Idempotent: each run
    /// looks roles up by name, resets their bits, re-adds the seeded ones
    /// and re-marks the single default, so repeated runs converge to the
    /// same end state.
    pub async fn seed_roles(&self) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::db("seed_roles", e))?;

        for (name, perms) in ROLE_TABLE {
            let mut bits = Permissions::empty();
            for perm in perms {
                bits.insert(*perm);
            }
            let is_default = name == DEFAULT_ROLE;

            let existing = role::Entity::find()
                .filter(role::Column::Name.eq(name))
                .one(&txn)
                .await
                .map_err(|e| InternalError::db("seed_roles", e))?;

            match existing {
                Some(model) => {
                    let mut active: role::ActiveModel = model.into();
                    active.permissions = Set(bits.bits());
                    active.is_default = Set(is_default);
                    active
                        .update(&txn)
                        .await
                        .map_err(|e| InternalError::db("seed_roles", e))?;
                }
                None => {
                    role::ActiveModel {
                        id: NotSet,
                        name: Set(name.to_string()),
                        is_default: Set(is_default),
                        permissions: Set(bits.bits()),
                    }
                    .insert(&txn)
                    .await
                    .map_err(|e| InternalError::db("seed_roles", e))?;
                }
            }
        }

        txn.commit()
            .await
            .map_err(|e| InternalError::db("seed_roles", e))?;
        tracing::info!("seeded {} roles", ROLE_TABLE.len());
        Ok(())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<role::Model>, InternalError> {
        role::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("find_role_by_id", e))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<role::Model>, InternalError> {
        role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("find_role_by_name", e))
    }

    /// The single role flagged default, assigned to new users that do not
    /// match the administrator email.
    pub async fn default_role(&self) -> Result<Option<role::Model>, InternalError> {
        role::Entity::find()
            .filter(role::Column::IsDefault.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("default_role", e))
    }

    pub async fn add_permission(&self, role_id: i32, perm: Permission) -> Result<(), InternalError> {
        self.mutate_permissions(role_id, |bits| bits.insert(perm))
            .await
    }

    pub async fn remove_permission(
        &self,
        role_id: i32,
        perm: Permission,
    ) -> Result<(), InternalError> {
        self.mutate_permissions(role_id, |bits| bits.remove(perm))
            .await
    }

    pub async fn reset_permissions(&self, role_id: i32) -> Result<(), InternalError> {
        self.mutate_permissions(role_id, Permissions::clear).await
    }

    async fn mutate_permissions(
        &self,
        role_id: i32,
        mutate: impl FnOnce(&mut Permissions),
    ) -> Result<(), InternalError> {
        let Some(model) = self.find_by_id(role_id).await? else {
            return Ok(());
        };

        let mut bits = model.permissions();
        mutate(&mut bits);
        if bits.bits() == model.permissions {
            return Ok(());
        }

        let mut active: role::ActiveModel = model.into();
        active.permissions = Set(bits.bits());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::db("mutate_permissions", e))?;
        Ok(())
    }
}
