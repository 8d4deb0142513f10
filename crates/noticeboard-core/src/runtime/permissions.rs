// crates/noticeboard-core/src/runtime/permissions.rs
// ============================================================================
// Module: Noticeboard Permission Engine
// Description: Allow/deny evaluation for actions against tenant-scoped records.
// Purpose: Compose tenant isolation, scope rules, and ownership into one verdict.
// Dependencies: crate::core, crate::runtime::scope
// ============================================================================

//! ## Overview
//! The permission engine evaluates one access request against one identity
//! and returns a typed [`PermissionDecision`]. Rules apply in a fixed
//! order and the first matching rule wins:
//!
//! 1. A record outside the caller's tenant denies as not-found, so a
//!    cross-tenant probe is indistinguishable from a missing record.
//! 2. Create delegates to the scope validator.
//! 3. Read allows published records, privileged roles, and owners.
//! 4. Mutations allow privileged roles, or owners whose group membership
//!    still holds at mutation time.
//!
//! ## Invariants
//! - Pure decision function; loading the record is the caller's job, and
//!   an absent record must short-circuit to not-found before this engine.
//! - No mutable state; safe to call concurrently from any request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::auth::AuthContext;
use crate::core::decision::Action;
use crate::core::decision::DenialReason;
use crate::core::decision::PermissionDecision;
use crate::core::record::Record;
use crate::core::scope::Visibility;
use crate::runtime::scope::validate_author_scope;

// ============================================================================
// SECTION: Access Requests
// ============================================================================

/// One access request evaluated by the permission engine.
///
/// # Invariants
/// - Record-bearing variants reference a record already loaded under the
///   caller's tenant filter; the engine re-checks the tenant anyway.
#[derive(Debug, Clone, Copy)]
pub enum AccessRequest<'a> {
    /// Author a new record at the requested scope.
    Create {
        /// Requested visibility scope.
        visibility: &'a Visibility,
    },
    /// Read a single existing record.
    Read {
        /// Target record.
        record: &'a Record,
    },
    /// Update an existing record's mutable fields.
    Update {
        /// Target record.
        record: &'a Record,
    },
    /// Delete an existing record.
    Delete {
        /// Target record.
        record: &'a Record,
    },
    /// Change an existing record's published flag.
    Publish {
        /// Target record.
        record: &'a Record,
    },
}

impl AccessRequest<'_> {
    /// Returns the action label for this request.
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Create {
                ..
            } => Action::Create,
            Self::Read {
                ..
            } => Action::Read,
            Self::Update {
                ..
            } => Action::Update,
            Self::Delete {
                ..
            } => Action::Delete,
            Self::Publish {
                ..
            } => Action::Publish,
        }
    }

    /// Returns the record this request targets, when one exists.
    const fn record(&self) -> Option<&Record> {
        match self {
            Self::Create {
                ..
            } => None,
            Self::Read {
                record,
            }
            | Self::Update {
                record,
            }
            | Self::Delete {
                record,
            }
            | Self::Publish {
                record,
            } => Some(record),
        }
    }
}

// ============================================================================
// SECTION: Decision Evaluation
// ============================================================================

/// Evaluates an access request and returns the allow/deny verdict.
#[must_use]
pub fn check(ctx: &AuthContext, request: &AccessRequest<'_>) -> PermissionDecision {
    if let Some(record) = request.record()
        && record.tenant_id != ctx.tenant_id
    {
        return PermissionDecision::deny(DenialReason::NotFound);
    }
    match request {
        AccessRequest::Create {
            visibility,
        } => match validate_author_scope(ctx, visibility) {
            Ok(()) => PermissionDecision::allow(),
            Err(err) => PermissionDecision::deny(DenialReason::ScopeDenied(err)),
        },
        AccessRequest::Read {
            record,
        } => check_read(ctx, record),
        AccessRequest::Update {
            record,
        }
        | AccessRequest::Delete {
            record,
        }
        | AccessRequest::Publish {
            record,
        } => check_mutate(ctx, record),
    }
}

/// Evaluates read visibility for an in-tenant record.
fn check_read(ctx: &AuthContext, record: &Record) -> PermissionDecision {
    if record.published || ctx.is_privileged() || record.is_owned_by(&ctx.user_id) {
        PermissionDecision::allow()
    } else {
        PermissionDecision::deny(DenialReason::UnauthorizedRead)
    }
}

/// Evaluates mutation rights for an in-tenant record.
///
/// Group membership is re-checked at mutation time: a teacher reassigned
/// off a class loses edit rights even on records they authored.
fn check_mutate(ctx: &AuthContext, record: &Record) -> PermissionDecision {
    if ctx.is_privileged() {
        return PermissionDecision::allow();
    }
    if !record.is_owned_by(&ctx.user_id) {
        return PermissionDecision::deny(DenialReason::UnauthorizedWrite);
    }
    if let Some(group_id) = record.visibility.group_id()
        && !ctx.teaches(group_id)
    {
        return PermissionDecision::deny(DenialReason::UnauthorizedWrite);
    }
    PermissionDecision::allow()
}
