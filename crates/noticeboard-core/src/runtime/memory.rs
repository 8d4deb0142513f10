// crates/noticeboard-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Record Store
// Description: Reference RecordStore held in process memory.
// Purpose: Back tests and small deployments; define the store contract shape.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The in-memory store is the reference implementation of
//! [`RecordStore`]: durable stores must match its observable behavior.
//! Records key on `(tenant, id)` so every access is tenant-qualified by
//! construction. Identifiers and logical timestamps come from monotonic
//! counters, keeping list ordering deterministic in tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::core::identifiers::RecordId;
use crate::core::identifiers::TenantId;
use crate::core::record::NewRecord;
use crate::core::record::Record;
use crate::core::record::RecordPatch;
use crate::core::time::Timestamp;
use crate::interfaces::RecordFilter;
use crate::interfaces::RecordSort;
use crate::interfaces::RecordStore;
use crate::interfaces::SortKey;
use crate::interfaces::SortOrder;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Store State
// ============================================================================

/// Mutable state behind the store lock.
#[derive(Debug, Default)]
struct MemoryState {
    /// Records keyed by `(tenant, id)`.
    records: BTreeMap<(TenantId, RecordId), Record>,
    /// Monotonic identifier counter.
    next_id: u64,
    /// Monotonic logical clock for timestamps.
    clock: u64,
}

/// In-memory reference record store.
///
/// # Invariants
/// - Access is serialized through one lock; timestamps and identifiers
///   are monotonic within the store's lifetime.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    /// Locked store state.
    state: Mutex<MemoryState>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record directly, bypassing the service pipeline.
    ///
    /// Test seam for shaping fixtures (legacy ownerless rows, foreign
    /// tenants) that the pipeline would refuse to create.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store lock is poisoned.
    pub fn insert_raw(&self, record: Record) -> Result<(), StoreError> {
        let mut state = self.state.lock()?;
        state.records.insert((record.tenant_id.clone(), record.id.clone()), record);
        Ok(())
    }
}

impl RecordStore for InMemoryRecordStore {
    fn find_one(&self, tenant_id: &TenantId, id: &RecordId) -> Result<Option<Record>, StoreError> {
        let state = self.state.lock()?;
        Ok(state.records.get(&(tenant_id.clone(), id.clone())).cloned())
    }

    fn find_many(
        &self,
        tenant_id: &TenantId,
        filter: &RecordFilter,
        sort: RecordSort,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Record>, StoreError> {
        let state = self.state.lock()?;
        let mut matched: Vec<Record> = state
            .records
            .iter()
            .filter(|((tenant, _), record)| tenant == tenant_id && matches(record, filter))
            .map(|(_, record)| record.clone())
            .collect();
        matched.sort_by(|a, b| compare(a, b, sort));
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = usize::try_from(take).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(skip).take(take).collect())
    }

    fn count(&self, tenant_id: &TenantId, filter: &RecordFilter) -> Result<u64, StoreError> {
        let state = self.state.lock()?;
        let total = state
            .records
            .iter()
            .filter(|((tenant, _), record)| tenant == tenant_id && matches(record, filter))
            .count();
        Ok(total.try_into().unwrap_or(u64::MAX))
    }

    fn create(&self, record: NewRecord) -> Result<Record, StoreError> {
        let mut state = self.state.lock()?;
        state.next_id += 1;
        state.clock += 1;
        let stamped = Timestamp::Logical(state.clock);
        let created = Record {
            id: RecordId::new(format!("rec-{}", state.next_id)),
            tenant_id: record.tenant_id,
            title: record.title,
            body: record.body,
            visibility: record.visibility,
            owner_id: record.owner_id,
            published: record.published,
            created_at: stamped,
            updated_at: stamped,
        };
        state
            .records
            .insert((created.tenant_id.clone(), created.id.clone()), created.clone());
        Ok(created)
    }

    fn update_where(
        &self,
        tenant_id: &TenantId,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> Result<u64, StoreError> {
        let mut state = self.state.lock()?;
        state.clock += 1;
        let stamped = Timestamp::Logical(state.clock);
        let Some(record) = state.records.get_mut(&(tenant_id.clone(), id.clone())) else {
            return Ok(0);
        };
        if let Some(title) = &patch.title {
            record.title = title.clone();
        }
        if let Some(body) = &patch.body {
            record.body = body.clone();
        }
        if let Some(published) = patch.published {
            record.published = published;
        }
        record.updated_at = stamped;
        Ok(1)
    }

    fn delete_where(&self, tenant_id: &TenantId, id: &RecordId) -> Result<u64, StoreError> {
        let mut state = self.state.lock()?;
        Ok(u64::from(state.records.remove(&(tenant_id.clone(), id.clone())).is_some()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when the record matches every supplied filter clause.
fn matches(record: &Record, filter: &RecordFilter) -> bool {
    if let Some(term) = &filter.search {
        let needle = term.to_lowercase();
        if !record.title.to_lowercase().contains(&needle)
            && !record.body.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if let Some(kind) = filter.visibility
        && record.visibility.kind() != kind
    {
        return false;
    }
    if let Some(published) = filter.published
        && record.published != published
    {
        return false;
    }
    if let Some(user) = &filter.visible_to
        && !record.published
        && !record.is_owned_by(user)
    {
        return false;
    }
    true
}

/// Compares two records under a sort specification.
///
/// Ties break on record id so pagination stays deterministic.
fn compare(a: &Record, b: &Record, sort: RecordSort) -> Ordering {
    let ordering = match sort.key {
        SortKey::CreatedAt => a.created_at.sort_key().cmp(&b.created_at.sort_key()),
        SortKey::UpdatedAt => a.updated_at.sort_key().cmp(&b.updated_at.sort_key()),
        SortKey::Title => a.title.cmp(&b.title),
    }
    .then_with(|| a.id.cmp(&b.id));
    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}
