// crates/noticeboard-core/src/core/auth.rs
// ============================================================================
// Module: Noticeboard Identity Resolution
// Description: Session claims and per-request authentication context.
// Purpose: Normalize opaque sessions into a fail-closed AuthContext.
// Dependencies: crate::core::{identifiers, role}, serde, thiserror
// ============================================================================

//! ## Overview
//! The identity resolver turns a session claim set into an [`AuthContext`],
//! the per-request answer to "who is asking". Resolution fails closed: a
//! missing session, a missing role claim, or empty identifier claims all
//! yield [`AuthError::NotAuthenticated`] and never default to a permissive
//! role. Contexts live for one request and are never cached or shared.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::GroupId;
use crate::core::identifiers::TenantId;
use crate::core::identifiers::UserId;
use crate::core::role::Role;

// ============================================================================
// SECTION: Session Claims
// ============================================================================

/// Claim set carried by a resolved session.
///
/// # Invariants
/// - This is a pure claim container handed over by the session framework;
///   values are validated by [`AuthContext::from_session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// User identifier claim.
    pub user_id: UserId,
    /// Role claim; absent when the session predates role assignment.
    pub role: Option<Role>,
    /// Tenant membership claim.
    pub tenant_id: TenantId,
    /// Class identifiers the identity teaches; empty for non-teaching roles.
    pub taught_class_ids: BTreeSet<GroupId>,
}

// ============================================================================
// SECTION: Authentication Errors
// ============================================================================

/// Identity resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages never reveal whether a resource exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No valid identity could be resolved from the session.
    #[error("not authenticated")]
    NotAuthenticated,
}

// ============================================================================
// SECTION: Auth Context
// ============================================================================

/// Normalized per-request authentication context.
///
/// # Invariants
/// - Constructed once per inbound request and discarded at request end.
/// - `user_id` and `tenant_id` are non-empty.
/// - `taught_class_ids` is empty for non-teaching roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user identifier.
    pub user_id: UserId,
    /// Role held by the identity for this request.
    pub role: Role,
    /// Tenant the identity belongs to.
    pub tenant_id: TenantId,
    /// Class identifiers the identity may act on at group scope.
    pub taught_class_ids: BTreeSet<GroupId>,
}

impl AuthContext {
    /// Resolves a session claim set into an authentication context.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when the session is absent,
    /// carries no role claim, or carries empty identifier claims.
    pub fn from_session(session: Option<&SessionToken>) -> Result<Self, AuthError> {
        let session = session.ok_or(AuthError::NotAuthenticated)?;
        let role = session.role.ok_or(AuthError::NotAuthenticated)?;
        if session.user_id.as_str().is_empty() || session.tenant_id.as_str().is_empty() {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(Self {
            user_id: session.user_id.clone(),
            role,
            tenant_id: session.tenant_id.clone(),
            taught_class_ids: session.taught_class_ids.clone(),
        })
    }

    /// Returns true when the context holds a privileged role.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }

    /// Returns true when the context is authorized to act on the group.
    #[must_use]
    pub fn teaches(&self, group_id: &GroupId) -> bool {
        self.taught_class_ids.contains(group_id)
    }
}
