// crates/noticeboard-core/src/core/record.rs
// ============================================================================
// Module: Noticeboard Record Model
// Description: The protected tenant-scoped record entity and its write shapes.
// Purpose: Model records, creation input, and patch input with immutable keys.
// Dependencies: crate::core::{identifiers, scope, time}, serde
// ============================================================================

//! ## Overview
//! A record is the protected entity gated by the permission engine; the
//! announcement is the concrete instance. `id`, `tenant_id`, and
//! `visibility` are immutable after creation. `owner_id` is nullable for
//! legacy rows that predate attribution; the owner check is vacuously
//! false for them, so only privileged roles can govern such records.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::RecordId;
use crate::core::identifiers::TenantId;
use crate::core::identifiers::UserId;
use crate::core::scope::Visibility;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Record
// ============================================================================

/// Persisted tenant-scoped record.
///
/// # Invariants
/// - `id`, `tenant_id`, and `visibility` never change after creation.
/// - Every store access filters on `tenant_id`; a record is invisible
///   outside its tenant.
/// - Timestamps are maintained by the store that persisted the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier, unique within the tenant.
    pub id: RecordId,
    /// Owning tenant identifier.
    pub tenant_id: TenantId,
    /// Record title.
    pub title: String,
    /// Record body text.
    pub body: String,
    /// Visibility scope.
    pub visibility: Visibility,
    /// Identity that created the record; absent on legacy rows.
    pub owner_id: Option<UserId>,
    /// Whether the record is visible to non-privileged readers.
    pub published: bool,
    /// Creation timestamp stamped by the store.
    pub created_at: Timestamp,
    /// Last-update timestamp stamped by the store.
    pub updated_at: Timestamp,
}

impl Record {
    /// Returns true when the user owns this record.
    ///
    /// Vacuously false when the record has no owner.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id.as_ref() == Some(user_id)
    }
}

// ============================================================================
// SECTION: Write Shapes
// ============================================================================

/// Input for creating a record.
///
/// # Invariants
/// - Produced only by the mutation pipeline after validation and
///   authorization; stores must not re-check permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    /// Owning tenant identifier.
    pub tenant_id: TenantId,
    /// Record title.
    pub title: String,
    /// Record body text.
    pub body: String,
    /// Visibility scope.
    pub visibility: Visibility,
    /// Creating identity.
    pub owner_id: Option<UserId>,
    /// Initial published flag.
    pub published: bool,
}

/// Field patch for updating a record in place.
///
/// # Invariants
/// - Only mutable fields appear here; identity, tenant, and visibility
///   have no patch representation.
/// - `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement body text.
    pub body: Option<String>,
    /// Replacement published flag.
    pub published: Option<bool>,
}

impl RecordPatch {
    /// Returns true when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.published.is_none()
    }
}
