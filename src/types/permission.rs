//! Permission flags and the bitmask wrapper they are stored through.
//!
//! A role's granted capabilities are persisted as a single integer column;
//! each named capability occupies one bit.

use std::fmt;

/// A single named capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Permission {
    /// Subscribe to a scenario's changes.
    Follow = 0x01,
    /// Author and edit scenarios and cases.
    Edit = 0x02,
    /// Delete cases.
    DeleteCase = 0x04,
    /// Delete scenarios (and everything hanging off them).
    DeleteScenario = 0x08,
}

impl Permission {
    pub const fn bit(self) -> i32 {
        self as i32
    }
}

/// A set of granted permissions backed by the raw bitmask column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions(i32);

impl Permissions {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Wrap a raw bitmask loaded from storage.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> i32 {
        self.0
    }

    pub const fn contains(self, perm: Permission) -> bool {
        self.0 & perm.bit() == perm.bit()
    }

    /// Grant a permission. Granting an already-held permission is a no-op.
    pub fn insert(&mut self, perm: Permission) {
        if !self.contains(perm) {
            self.0 += perm.bit();
        }
    }

    /// Revoke a permission. Revoking an absent permission is a no-op.
    pub fn remove(&mut self, perm: Permission) {
        if self.contains(perm) {
            self.0 -= perm.bit();
        }
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_contains() {
        let mut perms = Permissions::empty();
        perms.insert(Permission::Follow);
        assert!(perms.contains(Permission::Follow));
        assert!(!perms.contains(Permission::Edit));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut perms = Permissions::empty();
        perms.insert(Permission::Edit);
        perms.insert(Permission::Edit);
        assert_eq!(perms.bits(), Permission::Edit.bit());
    }

    #[test]
    fn remove_clears_only_the_named_bit() {
        let mut perms = Permissions::empty();
        perms.insert(Permission::Follow);
        perms.insert(Permission::DeleteCase);
        perms.remove(Permission::Follow);
        assert!(!perms.contains(Permission::Follow));
        assert!(perms.contains(Permission::DeleteCase));
    }

    #[test]
    fn remove_of_absent_bit_is_noop() {
        let mut perms = Permissions::from_bits(Permission::Edit.bit());
        perms.remove(Permission::DeleteScenario);
        assert_eq!(perms.bits(), Permission::Edit.bit());
    }

    #[test]
    fn clear_resets_to_zero() {
        let mut perms = Permissions::from_bits(0x0F);
        perms.clear();
        assert_eq!(perms, Permissions::empty());
    }

    #[test]
    fn contains_requires_all_bits_of_the_flag() {
        let perms = Permissions::from_bits(Permission::Follow.bit() | Permission::Edit.bit());
        assert!(perms.contains(Permission::Follow));
        assert!(perms.contains(Permission::Edit));
        assert!(!perms.contains(Permission::DeleteCase));
    }
}
