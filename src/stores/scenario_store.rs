use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, NotSet,
    QueryFilter, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::errors::InternalError;
use crate::types::db::{case, follow, rely, scenario};

/// Scenarios, their cases, and the directed "depends on" edges between
/// scenarios. Rely edges mirror follow edges: existence-checked inserts,
/// idempotent removes, composite primary key as the concurrency backstop.
pub struct ScenarioStore {
    db: DatabaseConnection,
}

impl ScenarioStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_scenario(
        &self,
        name: &str,
        content: Option<String>,
        remark: Option<String>,
        editor_id: i32,
    ) -> Result<scenario::Model, InternalError> {
        let taken = self.find_by_name(name).await?;
        if taken.is_some() {
            return Err(InternalError::Uniqueness { entity: "scenarios" });
        }

        scenario::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            content: Set(content),
            remark: Set(remark),
            created_at: Set(Utc::now().timestamp()),
            editor_id: Set(editor_id),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::from_insert("scenarios", "create_scenario", e))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<scenario::Model>, InternalError> {
        scenario::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("find_scenario_by_id", e))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<scenario::Model>, InternalError> {
        scenario::Entity::find()
            .filter(scenario::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("find_scenario_by_name", e))
    }

    /// Delete a scenario and everything hanging off it, atomically: rely
    /// edges in both directions, follow edges, owned cases, then the row
    /// itself. The migration's cascading foreign keys are the schema-level
    /// backstop for the same policy.
    pub async fn delete_scenario(&self, id: i32) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::db("delete_scenario", e))?;

        rely::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(rely::Column::RelierId.eq(id))
                    .add(rely::Column::ReliedId.eq(id)),
            )
            .exec(&txn)
            .await
            .map_err(|e| InternalError::db("delete_scenario", e))?;

        follow::Entity::delete_many()
            .filter(follow::Column::ScenarioId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::db("delete_scenario", e))?;

        case::Entity::delete_many()
            .filter(case::Column::ScenarioId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::db("delete_scenario", e))?;

        scenario::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::db("delete_scenario", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::db("delete_scenario", e))?;
        tracing::info!(scenario_id = id, "deleted scenario and its dependents");
        Ok(())
    }

    // ---- cases --------------------------------------------------------

    pub async fn create_case(
        &self,
        scenario_id: i32,
        content: Option<String>,
        remark: Option<String>,
        editor_id: i32,
    ) -> Result<case::Model, InternalError> {
        case::ActiveModel {
            id: NotSet,
            content: Set(content),
            remark: Set(remark),
            created_at: Set(Utc::now().timestamp()),
            scenario_id: Set(scenario_id),
            editor_id: Set(editor_id),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::db("create_case", e))
    }

    /// Deleting an already-deleted case is a no-op.
    pub async fn delete_case(&self, case_id: i32) -> Result<(), InternalError> {
        case::Entity::delete_by_id(case_id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::db("delete_case", e))?;
        Ok(())
    }

    pub async fn cases_of(&self, scenario_id: i32) -> Result<Vec<case::Model>, InternalError> {
        case::Entity::find()
            .filter(case::Column::ScenarioId.eq(scenario_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::db("cases_of", e))
    }

    // ---- rely edges ----------------------------------------------------

    /// Record that `relier_id` depends on `relied_id`. Re-adding an
    /// existing edge is a silent no-op. Self-loops are rejected as no-ops:
    /// a scenario depending on itself carries no information. Longer
    /// cycles are permitted.
    pub async fn rely(&self, relier_id: i32, relied_id: i32) -> Result<(), InternalError> {
        if relier_id == relied_id {
            tracing::debug!(scenario_id = relier_id, "ignoring self-dependency");
            return Ok(());
        }
        if self.is_relying(relier_id, relied_id).await? {
            return Ok(());
        }

        let insert = rely::ActiveModel {
            relier_id: Set(relier_id),
            relied_id: Set(relied_id),
            created_at: Set(Utc::now().timestamp()),
        }
        .insert(&self.db)
        .await;

        match insert {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("UNIQUE") => Ok(()),
            Err(e) => Err(InternalError::db("rely", e)),
        }
    }

    /// Remove the dependency if present; removing a non-existent edge is a
    /// silent no-op.
    pub async fn unrely(&self, relier_id: i32, relied_id: i32) -> Result<(), InternalError> {
        rely::Entity::delete_many()
            .filter(rely::Column::RelierId.eq(relier_id))
            .filter(rely::Column::ReliedId.eq(relied_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::db("unrely", e))?;
        Ok(())
    }

    /// Does `relier_id` depend on `relied_id`?
    pub async fn is_relying(&self, relier_id: i32, relied_id: i32) -> Result<bool, InternalError> {
        let edge = rely::Entity::find_by_id((relier_id, relied_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("is_relying", e))?;
        Ok(edge.is_some())
    }

    /// Inverse direction: is `scenario_id` depended upon by `by_id`?
    pub async fn is_relied_by(&self, scenario_id: i32, by_id: i32) -> Result<bool, InternalError> {
        self.is_relying(by_id, scenario_id).await
    }

    /// Scenarios this one depends on (outgoing edges).
    pub async fn relied_scenarios(&self, id: i32) -> Result<Vec<scenario::Model>, InternalError> {
        scenario::Entity::find()
            .join_rev(JoinType::InnerJoin, rely::Relation::Relied.def())
            .filter(rely::Column::RelierId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::db("relied_scenarios", e))
    }

    /// Scenarios that depend on this one (incoming edges).
    pub async fn relier_scenarios(&self, id: i32) -> Result<Vec<scenario::Model>, InternalError> {
        scenario::Entity::find()
            .join_rev(JoinType::InnerJoin, rely::Relation::Relier.def())
            .filter(rely::Column::ReliedId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::db("relier_scenarios", e))
    }
}
