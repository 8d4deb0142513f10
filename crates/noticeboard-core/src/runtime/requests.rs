// crates/noticeboard-core/src/runtime/requests.rs
// ============================================================================
// Module: Noticeboard Operation Payloads
// Description: Request and page types for the mutation contract operations.
// Purpose: Give every operation a typed, serializable payload shape.
// Dependencies: crate::core, crate::interfaces, serde
// ============================================================================

//! ## Overview
//! Operation payloads are the wire shapes accepted by the record service.
//! Deserialization enforces field types; semantic checks (emptiness,
//! length caps, pagination bounds) run in [`crate::runtime::validation`]
//! before any store access. Update payloads carry no visibility field at
//! all: scope is immutable after creation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::RecordId;
use crate::core::record::Record;
use crate::core::scope::Visibility;
use crate::core::scope::VisibilityKind;
use crate::interfaces::RecordSort;

// ============================================================================
// SECTION: Mutation Payloads
// ============================================================================

/// Payload for creating a record.
///
/// # Invariants
/// - `publish` is an elevated field: only privileged roles may set it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    /// Record title.
    pub title: String,
    /// Record body text.
    pub body: String,
    /// Requested visibility scope.
    pub visibility: Visibility,
    /// Publish immediately instead of starting as a draft.
    #[serde(default)]
    pub publish: bool,
}

/// Payload for updating a record's mutable fields.
///
/// # Invariants
/// - At least one field must be present; validation rejects empty patches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    /// Target record identifier.
    pub id: RecordId,
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement body text.
    #[serde(default)]
    pub body: Option<String>,
}

/// Payload for changing a record's published flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPublishedRequest {
    /// Target record identifier.
    pub id: RecordId,
    /// New published state.
    pub published: bool,
}

/// Payload for deleting a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRecordRequest {
    /// Target record identifier.
    pub id: RecordId,
}

// ============================================================================
// SECTION: Read Payloads
// ============================================================================

/// Payload for reading a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRecordRequest {
    /// Target record identifier.
    pub id: RecordId,
}

/// Query for listing records.
///
/// # Invariants
/// - `page` is 1-based; `per_page` is capped by service configuration.
/// - Sorting is restricted to the [`crate::interfaces::SortKey`]
///   allow-list by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecordsQuery {
    /// Case-insensitive text match against title and body.
    #[serde(default)]
    pub search: Option<String>,
    /// Restrict to one visibility scope kind.
    #[serde(default)]
    pub visibility: Option<VisibilityKind>,
    /// Restrict to a published state.
    #[serde(default)]
    pub published: Option<bool>,
    /// 1-based page number; defaults to the first page.
    #[serde(default)]
    pub page: Option<u64>,
    /// Page size; defaults to the configured page size.
    #[serde(default)]
    pub per_page: Option<u64>,
    /// Sort specification; defaults to newest-first.
    #[serde(default)]
    pub sort: Option<RecordSort>,
}

/// One page of list results with an independent total.
///
/// # Invariants
/// - `total` counts every record matching the filter, not just this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPage {
    /// Records on this page.
    pub items: Vec<Record>,
    /// 1-based page number served.
    pub page: u64,
    /// Page size used for this query.
    pub per_page: u64,
    /// Total records matching the filter.
    pub total: u64,
}
