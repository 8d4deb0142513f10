// crates/noticeboard-core/src/core/role.rs
// ============================================================================
// Module: Noticeboard Roles
// Description: Fixed role enumeration for authenticated identities.
// Purpose: Provide the closed role set used by scope and permission rules.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Roles form a fixed, closed enumeration. Every authenticated identity
//! holds exactly one role per request. Admin and Principal are the
//! privileged roles; all authorization shortcuts reduce to that pair.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Role Enumeration
// ============================================================================

/// Identity role within a tenant.
///
/// # Invariants
/// - Variants are stable for serialization and audit labeling.
/// - Exactly one role is held per authenticated context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Tenant administrator.
    Admin,
    /// School principal.
    Principal,
    /// Teaching staff with class assignments.
    Teacher,
    /// Enrolled student.
    Student,
    /// Parent or guardian of a student.
    Guardian,
    /// Non-teaching staff.
    Staff,
    /// Accounting staff.
    Accountant,
}

/// All roles in declaration order, for validation and test matrices.
pub const ALL_ROLES: &[Role] = &[
    Role::Admin,
    Role::Principal,
    Role::Teacher,
    Role::Student,
    Role::Guardian,
    Role::Staff,
    Role::Accountant,
];

impl Role {
    /// Returns a stable label for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Principal => "principal",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Guardian => "guardian",
            Self::Staff => "staff",
            Self::Accountant => "accountant",
        }
    }

    /// Returns true for roles with tenant-wide authority (Admin, Principal).
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Principal)
    }

    /// Returns true for roles that hold class assignments.
    #[must_use]
    pub const fn is_teaching(self) -> bool {
        matches!(self, Self::Teacher)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
