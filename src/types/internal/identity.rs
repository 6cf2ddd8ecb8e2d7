use crate::types::db::{role, user};
use crate::types::permission::Permission;

/// The authorization view of a caller: either a loaded user with their role,
/// or nobody. Permission checks on `Anonymous` (and on a user whose role
/// could not be resolved) always deny.
#[derive(Debug, Clone)]
pub enum Identity {
    Anonymous,
    Known {
        user: user::Model,
        role: Option<role::Model>,
    },
}

impl Identity {
    pub fn can(&self, perm: Permission) -> bool {
        match self {
            Identity::Anonymous => false,
            Identity::Known { role, .. } => {
                role.as_ref().is_some_and(|r| r.has_permission(perm))
            }
        }
    }

    pub fn is_administrator(&self) -> bool {
        self.can(Permission::DeleteScenario)
    }

    /// Assistants may delete cases but not scenarios. This is a tier
    /// distinction derived from the bitmask, not a separate flag.
    pub fn is_assistant(&self) -> bool {
        self.can(Permission::DeleteCase) && !self.can(Permission::DeleteScenario)
    }

    pub fn user(&self) -> Option<&user::Model> {
        match self {
            Identity::Anonymous => None,
            Identity::Known { user, .. } => Some(user),
        }
    }
}
