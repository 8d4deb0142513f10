// crates/noticeboard-core/src/core/decision.rs
// ============================================================================
// Module: Noticeboard Permission Decisions
// Description: Actions, denial reasons, and the allow/deny decision value.
// Purpose: Provide the typed verdict surface produced by the permission engine.
// Dependencies: crate::runtime::scope, serde
// ============================================================================

//! ## Overview
//! A permission decision is the transient verdict for one action against
//! one record or requested scope. Denials carry a typed reason; the
//! tenant-mismatch reason is deliberately [`DenialReason::NotFound`] so a
//! cross-tenant probe is indistinguishable from a missing record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::runtime::scope::ScopeError;

// ============================================================================
// SECTION: Actions
// ============================================================================

/// Action evaluated by the permission engine.
///
/// # Invariants
/// - Variants are stable for serialization and audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new record.
    Create,
    /// Read a single record.
    Read,
    /// Update a record's mutable fields.
    Update,
    /// Delete a record.
    Delete,
    /// Change a record's published flag.
    Publish,
}

impl Action {
    /// Returns a stable label for the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Denial Reasons
// ============================================================================

/// Typed reason attached to a denied decision.
///
/// # Invariants
/// - Variants are stable for programmatic handling and audit labeling.
/// - `NotFound` covers both absent records and tenant mismatches; the two
///   are never distinguishable to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// Record absent or outside the caller's tenant.
    NotFound,
    /// Requested authoring scope is not permitted for this identity.
    ScopeDenied(ScopeError),
    /// Read denied for an existing in-tenant record.
    UnauthorizedRead,
    /// Mutation denied for an existing in-tenant record.
    UnauthorizedWrite,
}

impl DenialReason {
    /// Returns a stable label for audit sinks.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::ScopeDenied(_) => "scope_denied",
            Self::UnauthorizedRead => "unauthorized_read",
            Self::UnauthorizedWrite => "unauthorized_write",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("record not found"),
            Self::ScopeDenied(err) => err.fmt(f),
            Self::UnauthorizedRead => f.write_str("not authorized to view this record"),
            Self::UnauthorizedWrite => f.write_str("not authorized to modify this record"),
        }
    }
}

// ============================================================================
// SECTION: Permission Decision
// ============================================================================

/// Allow/deny verdict for one authorization check.
///
/// # Invariants
/// - `reason` is present exactly when `allowed` is false.
/// - Decisions are transient values and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDecision {
    /// Whether the action is allowed.
    pub allowed: bool,
    /// Denial reason when the action is not allowed.
    pub reason: Option<DenialReason>,
}

impl PermissionDecision {
    /// Creates an allow decision.
    #[must_use]
    pub const fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// Creates a deny decision with the given reason.
    #[must_use]
    pub const fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Returns true when the decision allows the action.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        self.allowed
    }
}
