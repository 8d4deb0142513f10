// system-tests/src/fixtures.rs
// ============================================================================
// Module: System Test Fixtures
// Description: Session, tenant, and service builders shared across suites.
// Purpose: Keep scenario tests focused on behavior, not setup.
// Dependencies: noticeboard-core
// ============================================================================

//! ## Overview
//! Fixture helpers for system tests: canonical sessions per role, tenant
//! resolvers, and a service constructor that works over any store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use noticeboard_core::GroupId;
use noticeboard_core::Role;
use noticeboard_core::SessionToken;
use noticeboard_core::TenantId;
use noticeboard_core::UserId;
use noticeboard_core::interfaces::FixedSessionSource;
use noticeboard_core::interfaces::FixedTenantResolver;
use noticeboard_core::interfaces::RecordStore;
use noticeboard_core::runtime::RecordService;
use noticeboard_core::runtime::ServiceBuildError;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Builds a session for the given user, role, tenant, and taught classes.
#[must_use]
pub fn session(user: &str, role: Role, tenant: &str, classes: &[&str]) -> SessionToken {
    SessionToken {
        user_id: UserId::new(user),
        role: Some(role),
        tenant_id: TenantId::new(tenant),
        taught_class_ids: classes.iter().map(|id| GroupId::new(*id)).collect::<BTreeSet<_>>(),
    }
}

/// Session source serving one session.
#[must_use]
pub fn sessions_of(token: SessionToken) -> FixedSessionSource {
    FixedSessionSource::new(Some(token))
}

/// Session source for an unauthenticated request.
#[must_use]
pub fn no_session() -> FixedSessionSource {
    FixedSessionSource::new(None)
}

/// Tenant resolver serving one tenant.
#[must_use]
pub fn tenant_of(tenant: &str) -> FixedTenantResolver {
    FixedTenantResolver::new(Some(TenantId::new(tenant)))
}

/// Builds a default-configured record service over the given store.
///
/// # Errors
///
/// Returns [`ServiceBuildError`] when the service cannot be built; the
/// default configuration always validates.
pub fn service_over<S: RecordStore>(store: S) -> Result<RecordService<S>, ServiceBuildError> {
    RecordService::builder().store(store).build()
}
