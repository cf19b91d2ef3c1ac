//! Role capabilities.
//!
//! A user may hold any combination of the three roles. They are persisted as
//! independent boolean columns (`is_learner`, `is_instructor`, `is_admin`) and
//! surfaced here as a [`RoleSet`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_LEARNER: &str = "learner";
pub const ROLE_INSTRUCTOR: &str = "instructor";
pub const ROLE_ADMIN: &str = "admin";

/// A single capability a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Learner,
    Instructor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Learner, Role::Instructor, Role::Admin];

    /// Parse from the canonical lowercase name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_LEARNER => Ok(Self::Learner),
            ROLE_INSTRUCTOR => Ok(Self::Instructor),
            ROLE_ADMIN => Ok(Self::Admin),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Learner => ROLE_LEARNER,
            Self::Instructor => ROLE_INSTRUCTOR,
            Self::Admin => ROLE_ADMIN,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Learner => 0b001,
            Self::Instructor => 0b010,
            Self::Admin => 0b100,
        }
    }
}

/// A set of roles. Roles are not mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet {
    bits: u8,
}

impl RoleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from the three persisted flag columns.
    pub fn from_flags(is_learner: bool, is_instructor: bool, is_admin: bool) -> Self {
        let mut set = Self::empty();
        if is_learner {
            set.insert(Role::Learner);
        }
        if is_instructor {
            set.insert(Role::Instructor);
        }
        if is_admin {
            set.insert(Role::Admin);
        }
        set
    }

    /// Split back into `(is_learner, is_instructor, is_admin)`.
    pub fn to_flags(self) -> (bool, bool, bool) {
        (
            self.contains(Role::Learner),
            self.contains(Role::Instructor),
            self.contains(Role::Admin),
        )
    }

    pub fn contains(self, role: Role) -> bool {
        self.bits & role.bit() != 0
    }

    /// Add a role. Returns `true` if it was not already present.
    pub fn insert(&mut self, role: Role) -> bool {
        let added = !self.contains(role);
        self.bits |= role.bit();
        added
    }

    /// Remove a role. Returns `true` if it was present.
    pub fn remove(&mut self, role: Role) -> bool {
        let present = self.contains(role);
        self.bits &= !role.bit();
        present
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Roles in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }

    /// Role names in declaration order, e.g. `["learner", "admin"]`.
    pub fn names(self) -> Vec<&'static str> {
        self.iter().map(Role::name).collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = Self::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let roles = Vec::<Role>::deserialize(deserializer)?;
        Ok(roles.into_iter().collect())
    }
}
