// crates/noticeboard-core/src/interfaces/mod.rs
// ============================================================================
// Module: Noticeboard Interfaces
// Description: Backend-agnostic interfaces for storage, sessions, and invalidation.
// Purpose: Define the contract surfaces used by the Noticeboard runtime.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the authorization core integrates with external
//! collaborators without embedding backend-specific details. Store
//! implementations must carry the tenant-qualified compound filter inside
//! every query and fail closed on missing or invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::PoisonError;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::auth::SessionToken;
use crate::core::decision::Action;
use crate::core::identifiers::RecordId;
use crate::core::identifiers::TenantId;
use crate::core::identifiers::UserId;
use crate::core::record::NewRecord;
use crate::core::record::Record;
use crate::core::record::RecordPatch;
use crate::core::role::Role;
use crate::core::scope::VisibilityKind;

// ============================================================================
// SECTION: Record Store
// ============================================================================

/// Record store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages never reach end callers; the service maps store failures to
///   an opaque internal error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("record store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails decode checks.
    #[error("record store corruption: {0}")]
    Corrupt(String),
    /// Store schema version is incompatible.
    #[error("record store version mismatch: {0}")]
    VersionMismatch(String),
    /// Query parameters are invalid for this store.
    #[error("record store invalid query: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("record store error: {0}")]
    Store(String),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Store("store lock poisoned".to_string())
    }
}

/// Filter applied to list and count queries.
///
/// # Invariants
/// - The tenant filter is not part of this value; stores receive the
///   tenant as a separate mandatory parameter.
/// - `visible_to` restricts results to published records plus records
///   owned by the given user; the service sets it for non-privileged
///   callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive text match against title and body.
    pub search: Option<String>,
    /// Restrict to one visibility scope kind.
    pub visibility: Option<VisibilityKind>,
    /// Restrict to a published state.
    pub published: Option<bool>,
    /// Visibility narrowing for non-privileged callers.
    pub visible_to: Option<UserId>,
}

/// Sortable fields for list queries.
///
/// # Invariants
/// - This enum is the complete sort allow-list; arbitrary field names are
///   unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Creation timestamp.
    CreatedAt,
    /// Last-update timestamp.
    UpdatedAt,
    /// Record title.
    Title,
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// Sort specification for list queries.
///
/// # Invariants
/// - Defaults to newest-first when the caller supplies no sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSort {
    /// Field to sort by.
    pub key: SortKey,
    /// Sort direction.
    pub order: SortOrder,
}

impl Default for RecordSort {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

/// Backend-agnostic record store.
///
/// # Invariants
/// - Every method scopes its work to the given tenant inside the query
///   itself, never by filtering loaded rows afterwards.
/// - Write methods return affected counts so callers can distinguish
///   absent targets from successful writes.
pub trait RecordStore: Send + Sync {
    /// Loads one record by compound `{tenant_id, id}` filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn find_one(&self, tenant_id: &TenantId, id: &RecordId) -> Result<Option<Record>, StoreError>;

    /// Lists records under the tenant filter plus the supplied filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn find_many(
        &self,
        tenant_id: &TenantId,
        filter: &RecordFilter,
        sort: RecordSort,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Record>, StoreError>;

    /// Counts records under the tenant filter plus the supplied filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn count(&self, tenant_id: &TenantId, filter: &RecordFilter) -> Result<u64, StoreError>;

    /// Persists a new record and stamps its identifier and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    fn create(&self, record: NewRecord) -> Result<Record, StoreError>;

    /// Applies a patch to the record matching `{tenant_id, id}`.
    ///
    /// Returns the number of affected rows (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    fn update_where(
        &self,
        tenant_id: &TenantId,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> Result<u64, StoreError>;

    /// Deletes the record matching `{tenant_id, id}`.
    ///
    /// Returns the number of affected rows (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    fn delete_where(&self, tenant_id: &TenantId, id: &RecordId) -> Result<u64, StoreError>;

    /// Reports store readiness for liveness/readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Session and Tenant Resolution
// ============================================================================

/// Session source provided by the surrounding framework.
pub trait SessionSource {
    /// Returns the current session claims, when a session exists.
    fn current_session(&self) -> Option<SessionToken>;
}

/// Tenant resolver provided by the surrounding framework.
///
/// The resolution mechanism (host, subdomain, or session claim) is a
/// collaborator detail; the core consumes one optional value.
pub trait TenantResolver {
    /// Returns the tenant resolved for the current request, when any.
    fn resolve_tenant(&self) -> Option<TenantId>;
}

/// Session source returning a fixed claim set.
///
/// # Invariants
/// - Returns a clone of the same claims on every call.
#[derive(Debug, Clone, Default)]
pub struct FixedSessionSource {
    /// Session claims to return; `None` models an unauthenticated request.
    session: Option<SessionToken>,
}

impl FixedSessionSource {
    /// Creates a session source returning the given claims.
    #[must_use]
    pub const fn new(session: Option<SessionToken>) -> Self {
        Self {
            session,
        }
    }
}

impl SessionSource for FixedSessionSource {
    fn current_session(&self) -> Option<SessionToken> {
        self.session.clone()
    }
}

/// Tenant resolver returning a fixed tenant.
///
/// # Invariants
/// - Returns a clone of the same tenant on every call.
#[derive(Debug, Clone, Default)]
pub struct FixedTenantResolver {
    /// Tenant to return; `None` models an unresolvable tenant context.
    tenant_id: Option<TenantId>,
}

impl FixedTenantResolver {
    /// Creates a tenant resolver returning the given tenant.
    #[must_use]
    pub const fn new(tenant_id: Option<TenantId>) -> Self {
        Self {
            tenant_id,
        }
    }
}

impl TenantResolver for FixedTenantResolver {
    fn resolve_tenant(&self) -> Option<TenantId> {
        self.tenant_id.clone()
    }
}

// ============================================================================
// SECTION: Invalidation Notifier
// ============================================================================

/// Cache/index invalidation seam signaled after successful mutations.
pub trait InvalidationNotifier: Send + Sync {
    /// Signals that cached views of the tenant's resource are stale.
    fn invalidate(&self, tenant_id: &TenantId, resource_tag: &str);
}

/// No-op notifier for deployments without cached views.
///
/// # Invariants
/// - Ignores every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidationNotifier;

impl InvalidationNotifier for NoopInvalidationNotifier {
    fn invalidate(&self, _tenant_id: &TenantId, _resource_tag: &str) {}
}

/// Notifier that records signals in memory for inspection.
///
/// # Invariants
/// - Signals are appended in call order.
#[derive(Debug, Default)]
pub struct InMemoryInvalidationNotifier {
    /// Recorded `(tenant, resource_tag)` signals.
    signals: Mutex<Vec<(TenantId, String)>>,
}

impl InMemoryInvalidationNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded signals.
    #[must_use]
    pub fn signals(&self) -> Vec<(TenantId, String)> {
        self.signals.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl InvalidationNotifier for InMemoryInvalidationNotifier {
    fn invalidate(&self, tenant_id: &TenantId, resource_tag: &str) {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((tenant_id.clone(), resource_tag.to_string()));
    }
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Outcome label attached to an audit event.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Operation was allowed and completed.
    Allowed,
    /// Operation was denied by a pipeline gate.
    Denied,
    /// Operation failed inside a collaborator.
    Failed,
}

impl AuditOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Denied => "denied",
            Self::Failed => "failed",
        }
    }
}

/// One audited authorization decision.
///
/// # Invariants
/// - Carries labels and identifiers only; record titles and bodies never
///   enter audit events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Tenant of the request, when resolved.
    pub tenant_id: Option<TenantId>,
    /// Acting user, when authenticated.
    pub user_id: Option<UserId>,
    /// Acting role, when authenticated.
    pub role: Option<Role>,
    /// Action that was evaluated.
    pub action: Action,
    /// Decision outcome.
    pub outcome: AuditOutcome,
    /// Stable failure label when the outcome is not allowed.
    pub reason: Option<String>,
}

/// Audit sink for authorization decisions.
///
/// Observability is a pluggable seam so deployments can wire their own
/// structured log or metrics backend without redesign.
pub trait AuditSink: Send + Sync {
    /// Records one audit event.
    fn record(&self, event: AuditEvent);
}

/// No-op audit sink.
///
/// # Invariants
/// - Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: AuditEvent) {}
}

/// Audit sink that buffers events in memory for inspection.
///
/// # Invariants
/// - Events are appended in call order.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    /// Buffered events.
    events: Mutex<Vec<AuditEvent>>,
}

impl InMemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of buffered events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: AuditEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}
