// crates/noticeboard-core/src/runtime/scope.rs
// ============================================================================
// Module: Noticeboard Scope Validator
// Description: Author-time eligibility rules for record visibility scopes.
// Purpose: Decide whether an identity may author content at a requested scope.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The scope validator answers one question: may this identity author a
//! record at this visibility scope at all, independent of any specific
//! record. It applies at create only, since visibility is immutable after
//! creation. The function is pure and deterministic; identical inputs
//! always produce the same verdict.
//!
//! ## Invariants
//! - Organization and role scopes require a privileged role.
//! - A teacher may target only groups in their taught set.
//! - No I/O and no side effects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::auth::AuthContext;
use crate::core::identifiers::GroupId;
use crate::core::scope::Visibility;

// ============================================================================
// SECTION: Scope Errors
// ============================================================================

/// Scope eligibility errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages are caller-facing and name no other tenant or record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// Organization or role scope requested without a privileged role.
    #[error("organization scope requires elevated role")]
    ElevatedRoleRequired,
    /// Group scope requested for a group outside the identity's taught set.
    #[error("not authorized for this group")]
    GroupNotAuthorized {
        /// Group the identity attempted to target.
        group_id: GroupId,
    },
    /// Group scope requested by a role that cannot author group content.
    #[error("group scope requires a teaching or elevated role")]
    GroupRoleRequired,
}

// ============================================================================
// SECTION: Scope Validation
// ============================================================================

/// Validates that the identity may author content at the requested scope.
///
/// # Errors
///
/// Returns [`ScopeError`] when the identity's role (or, for teachers, its
/// taught group set) does not permit the requested scope.
pub fn validate_author_scope(
    ctx: &AuthContext,
    visibility: &Visibility,
) -> Result<(), ScopeError> {
    match visibility {
        Visibility::Organization
        | Visibility::Role {
            ..
        } => {
            if ctx.is_privileged() {
                Ok(())
            } else {
                Err(ScopeError::ElevatedRoleRequired)
            }
        }
        Visibility::Group {
            group_id,
        } => {
            if ctx.is_privileged() {
                return Ok(());
            }
            if !ctx.role.is_teaching() {
                return Err(ScopeError::GroupRoleRequired);
            }
            if ctx.teaches(group_id) {
                Ok(())
            } else {
                Err(ScopeError::GroupNotAuthorized {
                    group_id: group_id.clone(),
                })
            }
        }
    }
}
