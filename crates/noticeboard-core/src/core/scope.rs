// crates/noticeboard-core/src/core/scope.rs
// ============================================================================
// Module: Noticeboard Visibility Scope
// Description: Visibility scope model for tenant-shared records.
// Purpose: Encode scope/target invariants structurally in one tagged enum.
// Dependencies: crate::core::{identifiers, role}, serde
// ============================================================================

//! ## Overview
//! A record's visibility scope is one of organization-wide, group-targeted,
//! or role-targeted. The target payload lives inside the variant, so a
//! group scope without a group id (or a role scope without a target role)
//! is unrepresentable. Scope is immutable after record creation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::GroupId;
use crate::core::role::Role;

// ============================================================================
// SECTION: Visibility Scope
// ============================================================================

/// Visibility scope of a shared record.
///
/// # Invariants
/// - Group scope always carries its target group; role scope always carries
///   its target role; organization scope carries neither.
/// - Immutable once a record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visibility {
    /// Visible across the whole tenant.
    Organization,
    /// Visible to one sub-group, such as a class.
    Group {
        /// Target group identifier.
        group_id: GroupId,
    },
    /// Visible to all identities holding one role.
    Role {
        /// Target role.
        target_role: Role,
    },
}

impl Visibility {
    /// Returns the field-less kind of this visibility scope.
    #[must_use]
    pub const fn kind(&self) -> VisibilityKind {
        match self {
            Self::Organization => VisibilityKind::Organization,
            Self::Group {
                ..
            } => VisibilityKind::Group,
            Self::Role {
                ..
            } => VisibilityKind::Role,
        }
    }

    /// Returns the target group identifier for group-scoped visibility.
    #[must_use]
    pub const fn group_id(&self) -> Option<&GroupId> {
        match self {
            Self::Group {
                group_id,
            } => Some(group_id),
            Self::Organization
            | Self::Role {
                ..
            } => None,
        }
    }
}

// ============================================================================
// SECTION: Visibility Kind
// ============================================================================

/// Field-less mirror of [`Visibility`] for filters and audit labels.
///
/// # Invariants
/// - Variants are stable for serialization and audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityKind {
    /// Organization-wide scope.
    Organization,
    /// Group-targeted scope.
    Group,
    /// Role-targeted scope.
    Role,
}

impl VisibilityKind {
    /// Returns a stable label for the scope kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Group => "group",
            Self::Role => "role",
        }
    }
}

impl fmt::Display for VisibilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
