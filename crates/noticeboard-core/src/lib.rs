// crates/noticeboard-core/src/lib.rs
// ============================================================================
// Module: Noticeboard Core Library
// Description: Tenant-isolated, scope-and-role-based authorization core.
// Purpose: Gate every mutation and read of shared records behind one pipeline.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Noticeboard Core composes three independent axes into one allow/deny
//! decision: authentication identity, tenant membership, and record
//! visibility scope. The [`runtime::RecordService`] wraps every state
//! change in a uniform validate, authorize, persist, invalidate pipeline;
//! the [`runtime::permissions`] engine and [`runtime::scope`] validator
//! are pure functions over explicit inputs.
//!
//! Invariants:
//! - A record outside the caller's tenant is indistinguishable from a
//!   missing record.
//! - Identity resolution fails closed; no permissive role defaults.
//! - All failures cross the public boundary as values, never panics.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::ALL_ROLES;
pub use crate::core::Action;
pub use crate::core::AuthContext;
pub use crate::core::AuthError;
pub use crate::core::DenialReason;
pub use crate::core::GroupId;
pub use crate::core::NewRecord;
pub use crate::core::PermissionDecision;
pub use crate::core::Record;
pub use crate::core::RecordId;
pub use crate::core::RecordPatch;
pub use crate::core::Role;
pub use crate::core::SessionToken;
pub use crate::core::TenantId;
pub use crate::core::Timestamp;
pub use crate::core::UserId;
pub use crate::core::Visibility;
pub use crate::core::VisibilityKind;
pub use crate::interfaces::AuditEvent;
pub use crate::interfaces::AuditOutcome;
pub use crate::interfaces::AuditSink;
pub use crate::interfaces::FixedSessionSource;
pub use crate::interfaces::FixedTenantResolver;
pub use crate::interfaces::InMemoryAuditSink;
pub use crate::interfaces::InMemoryInvalidationNotifier;
pub use crate::interfaces::InvalidationNotifier;
pub use crate::interfaces::NoopAuditSink;
pub use crate::interfaces::NoopInvalidationNotifier;
pub use crate::interfaces::RecordFilter;
pub use crate::interfaces::RecordSort;
pub use crate::interfaces::RecordStore;
pub use crate::interfaces::SessionSource;
pub use crate::interfaces::SortKey;
pub use crate::interfaces::SortOrder;
pub use crate::interfaces::StoreError;
pub use crate::interfaces::TenantResolver;
