use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    Set, TransactionTrait,
};

use crate::config::Settings;
use crate::errors::InternalError;
use crate::services::crypto;
use crate::services::token_service::{TokenService, DEFAULT_TOKEN_TTL_SECS};
use crate::stores::role_store::ADMINISTRATOR_ROLE;
use crate::types::db::{role, user};
use crate::types::internal::{Identity, TokenPurpose};

/// Account lifecycle: creation with role resolution, credential handling,
/// and the token-mediated flows (confirmation, password reset, email
/// change, bearer auth).
///
/// Token-consuming methods return `Ok(false)` / `Ok(None)` for any token
/// problem — invalid, expired, malformed, wrong purpose, wrong subject.
/// The caller never learns which, and nothing raises past this boundary.
pub struct UserStore {
    db: DatabaseConnection,
    tokens: Arc<TokenService>,
    admin_email: String,
}

impl UserStore {
    pub fn new(db: DatabaseConnection, tokens: Arc<TokenService>, settings: &Settings) -> Self {
        Self {
            db,
            tokens,
            admin_email: settings.admin_email.clone(),
        }
    }

    /// Create a user, resolving the role at creation time: the configured
    /// administrator email gets the administrator role, everyone else the
    /// single default role. Missing default role is a configuration error.
    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let taken = user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(email))
                    .add(user::Column::Username.eq(username)),
            )
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("create_user", e))?;
        if taken.is_some() {
            return Err(InternalError::Uniqueness { entity: "users" });
        }

        let role = self.resolve_role(email).await?;
        let password_hash = crypto::hash_password(password)?;
        let now = Utc::now().timestamp();

        let created = user::ActiveModel {
            id: NotSet,
            email: Set(email.to_string()),
            username: Set(username.to_string()),
            role_id: Set(role.id),
            password_hash: Set(password_hash),
            confirmed: Set(false),
            member_since: Set(now),
            last_seen: Set(now),
            last_informed: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::from_insert("users", "create_user", e))?;

        tracing::info!(username, role = %role.name, "created user");
        Ok(created)
    }

    async fn resolve_role(&self, email: &str) -> Result<role::Model, InternalError> {
        if email == self.admin_email {
            let admin = role::Entity::find()
                .filter(role::Column::Name.eq(ADMINISTRATOR_ROLE))
                .one(&self.db)
                .await
                .map_err(|e| InternalError::db("resolve_role", e))?;
            if let Some(role) = admin {
                return Ok(role);
            }
        }
        role::Entity::find()
            .filter(role::Column::IsDefault.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("resolve_role", e))?
            .ok_or(InternalError::MissingDefaultRole)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("find_user_by_id", e))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("find_user_by_email", e))
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("find_user_by_username", e))
    }

    /// Load the authorization view for a user id. Unknown ids resolve to
    /// `Identity::Anonymous`, which denies every permission.
    pub async fn load_identity(&self, user_id: i32) -> Result<Identity, InternalError> {
        let Some(user) = self.find_by_id(user_id).await? else {
            return Ok(Identity::Anonymous);
        };
        let role = role::Entity::find_by_id(user.role_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::db("load_identity", e))?;
        Ok(Identity::Known { user, role })
    }

    /// Update `last_seen` to now, committed immediately rather than batched
    /// with other pending changes.
    pub async fn ping(&self, user_id: i32) -> Result<(), InternalError> {
        let Some(model) = self.find_by_id(user_id).await? else {
            return Ok(());
        };
        let mut active: user::ActiveModel = model.into();
        active.last_seen = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::db("ping", e))?;
        Ok(())
    }

    // ---- confirmation -------------------------------------------------

    pub fn generate_confirmation_token(&self, user: &user::Model) -> Result<String, InternalError> {
        self.tokens
            .issue(user.id, TokenPurpose::Confirm, None, DEFAULT_TOKEN_TTL_SECS)
    }

    /// Confirm the account. The token must carry the `confirm` purpose and
    /// must have been minted for the presenting user.
    pub async fn confirm(&self, user: &user::Model, token: &str) -> Result<bool, InternalError> {
        let Ok(claims) = self.tokens.verify(token) else {
            return Ok(false);
        };
        if claims.purpose != TokenPurpose::Confirm || claims.sub != user.id {
            return Ok(false);
        }

        let mut active: user::ActiveModel = user.clone().into();
        active.confirmed = Set(true);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::db("confirm", e))?;
        tracing::debug!(user_id = user.id, "account confirmed");
        Ok(true)
    }

    // ---- password reset -----------------------------------------------

    pub fn generate_reset_token(&self, user: &user::Model) -> Result<String, InternalError> {
        self.tokens
            .issue(user.id, TokenPurpose::Reset, None, DEFAULT_TOKEN_TTL_SECS)
    }

    /// Set a new password for whichever user the token references. Not
    /// bound to a loaded instance: the subject is resolved from the token
    /// itself and may no longer exist.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<bool, InternalError> {
        let Ok(claims) = self.tokens.verify(token) else {
            return Ok(false);
        };
        if claims.purpose != TokenPurpose::Reset {
            return Ok(false);
        }
        let Some(user) = self.find_by_id(claims.sub).await? else {
            return Ok(false);
        };

        let password_hash = crypto::hash_password(new_password)?;
        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::db("reset_password", e))?;
        tracing::debug!(user_id = claims.sub, "password reset");
        Ok(true)
    }

    // ---- email change -------------------------------------------------

    pub fn generate_email_change_token(
        &self,
        user: &user::Model,
        new_email: &str,
    ) -> Result<String, InternalError> {
        self.tokens.issue(
            user.id,
            TokenPurpose::ChangeEmail,
            Some(new_email.to_string()),
            DEFAULT_TOKEN_TTL_SECS,
        )
    }

    /// Apply an email change. Uniqueness of the target address is
    /// re-checked inside the updating transaction: the address may have
    /// been claimed by another account after the token was minted.
    pub async fn change_email(
        &self,
        user: &user::Model,
        token: &str,
    ) -> Result<bool, InternalError> {
        let Ok(claims) = self.tokens.verify(token) else {
            return Ok(false);
        };
        if claims.purpose != TokenPurpose::ChangeEmail || claims.sub != user.id {
            return Ok(false);
        }
        let Some(new_email) = claims.new_email else {
            return Ok(false);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::db("change_email", e))?;

        let claimed_by_other = user::Entity::find()
            .filter(user::Column::Email.eq(&new_email))
            .one(&txn)
            .await
            .map_err(|e| InternalError::db("change_email", e))?
            .is_some_and(|other| other.id != user.id);
        if claimed_by_other {
            tracing::debug!(user_id = user.id, "email change target already registered");
            return Ok(false);
        }

        let mut active: user::ActiveModel = user.clone().into();
        active.email = Set(new_email);
        active
            .update(&txn)
            .await
            .map_err(|e| InternalError::db("change_email", e))?;
        txn.commit()
            .await
            .map_err(|e| InternalError::db("change_email", e))?;
        Ok(true)
    }

    // ---- bearer auth --------------------------------------------------

    pub fn generate_auth_token(
        &self,
        user: &user::Model,
        ttl_seconds: i64,
    ) -> Result<String, InternalError> {
        self.tokens
            .issue(user.id, TokenPurpose::Auth, None, ttl_seconds)
    }

    /// Stateless bearer auth: resolve the user carried by the token with
    /// no other context. Any token problem yields `None`.
    pub async fn verify_auth_token(
        &self,
        token: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        let Ok(claims) = self.tokens.verify(token) else {
            return Ok(None);
        };
        if claims.purpose != TokenPurpose::Auth {
            return Ok(None);
        }
        self.find_by_id(claims.sub).await
    }
}
