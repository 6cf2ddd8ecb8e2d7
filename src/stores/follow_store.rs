use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set,
};

use crate::errors::InternalError;
use crate::types::db::{follow, scenario};

/// "User follows scenario" edges. Adds and removes are idempotent: the
/// method checks existence first, and the composite primary key catches
/// whatever two racing requests slip past the check.
pub struct FollowStore {
    db: DatabaseConnection,
}

impl FollowStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Subscribe `user_id` to `scenario_id`. Re-following is a silent no-op.
    pub async fn follow(&self, user_id: i32, scenario_id: i32) -> Result<(), InternalError> {
        if self.is_following(user_id, scenario_id).await? {
            return Ok(());
        }

        let insert = follow::ActiveModel {
            user_id: Set(user_id),
            scenario_id: Set(scenario_id),
            created_at: Set(Utc::now().timestamp()),
        }
        .insert(&self.db)
        .await;

        match insert {
            Ok(_) => Ok(()),
            // Lost the race against a concurrent follow; the edge exists.
            Err(e) if e.to_string().contains("UNIQUE") => Ok(()),
            Err(e) => Err(InternalError::db("follow", e)),
        }
    }

    /// Remove the edge if present. Unfollowing a never-followed pair is a
    /// silent no-op.
    pub async fn unfollow(&self, user_id: i32, scenario_id: i32) -> Result<(), InternalError> {
        follow::Entity::delete_many()
            .filter(follow::Column::UserId.eq(user_id))
            .filter(follow::Column::ScenarioId.eq(scenario_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::db("unfollow", e))?;
        Ok(())
    }

    pub async fn is_following(
        &self,
        user_id: i32,
        scenario_id: i32,
    ) -> Result<bool, InternalError> {
        let edge = follow::Entity::find_by_id((user_id, scenario_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("is_following", e))?;
        Ok(edge.is_some())
    }

    /// Scenarios followed by a user, as a join against the edge set. Each
    /// call re-issues the query; nothing is cached.
    pub async fn followed_scenarios(
        &self,
        user_id: i32,
    ) -> Result<Vec<scenario::Model>, InternalError> {
        scenario::Entity::find()
            .join_rev(JoinType::InnerJoin, follow::Relation::Scenario.def())
            .filter(follow::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::db("followed_scenarios", e))
    }
}
