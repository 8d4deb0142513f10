// crates/noticeboard-core/src/runtime/service.rs
// ============================================================================
// Module: Noticeboard Record Service
// Description: The mutation contract pipeline over a record store.
// Purpose: Run validate, authorize, persist, and invalidate as hard gates.
// Dependencies: crate::core, crate::interfaces, crate::runtime, thiserror
// ============================================================================

//! ## Overview
//! Every state change and read of shared records passes through this
//! service. The pipeline is fixed: resolve identity, resolve tenant,
//! validate the payload, load the target under the compound tenant
//! filter, ask the permission engine, perform the tenant-qualified write,
//! signal invalidation, and return a typed result. Each step is a hard
//! gate; the first failing gate's error is returned and no partial
//! effects occur.
//!
//! ## Invariants
//! - The tenant is an explicit parameter threaded through every call,
//!   never ambient state.
//! - Writes re-assert the `{tenant_id, id}` filter at the store; a
//!   zero-affected write surfaces as not-found.
//! - No panic or store detail crosses the public boundary; all failures
//!   are values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::auth::AuthContext;
use crate::core::decision::Action;
use crate::core::decision::DenialReason;
use crate::core::identifiers::RecordId;
use crate::core::record::NewRecord;
use crate::core::record::Record;
use crate::core::record::RecordPatch;
use crate::interfaces::AuditEvent;
use crate::interfaces::AuditOutcome;
use crate::interfaces::AuditSink;
use crate::interfaces::InvalidationNotifier;
use crate::interfaces::NoopAuditSink;
use crate::interfaces::NoopInvalidationNotifier;
use crate::interfaces::RecordFilter;
use crate::interfaces::RecordStore;
use crate::interfaces::SessionSource;
use crate::interfaces::StoreError;
use crate::interfaces::TenantResolver;
use crate::runtime::permissions::AccessRequest;
use crate::runtime::permissions::check;
use crate::runtime::requests::CreateRecordRequest;
use crate::runtime::requests::DeleteRecordRequest;
use crate::runtime::requests::GetRecordRequest;
use crate::runtime::requests::ListRecordsQuery;
use crate::runtime::requests::RecordPage;
use crate::runtime::requests::SetPublishedRequest;
use crate::runtime::requests::UpdateRecordRequest;
use crate::runtime::scope::ScopeError;
use crate::runtime::validation::ValidationFailure;
use crate::runtime::validation::validate_create;
use crate::runtime::validation::validate_list;
use crate::runtime::validation::validate_record_id;
use crate::runtime::validation::validate_update;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default page size for list queries.
pub const DEFAULT_PER_PAGE: u64 = 20;
/// Hard cap for caller-supplied page sizes.
pub const MAX_PER_PAGE: u64 = 100;
/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum body length in characters.
pub const MAX_BODY_LEN: usize = 20_000;
/// Resource tag signaled to the invalidation notifier.
pub const DEFAULT_RESOURCE_TAG: &str = "records";

// ============================================================================
// SECTION: Action Errors
// ============================================================================

/// Terminal error kinds returned by service operations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `NotFound` covers absent records and tenant mismatches alike.
/// - `Internal` renders an opaque message; the underlying detail reaches
///   the audit sink only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No valid identity for the resolved tenant context.
    #[error("not authenticated")]
    NotAuthenticated,
    /// Tenant could not be resolved for the request.
    #[error("tenant context is missing")]
    MissingTenantContext,
    /// Payload failed semantic validation.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    /// Record absent or outside the caller's tenant.
    #[error("record not found")]
    NotFound,
    /// Requested authoring scope is not permitted.
    #[error("{reason}")]
    ScopeDenied {
        /// Scope rule that failed.
        reason: ScopeError,
    },
    /// Action denied for an existing record.
    #[error("{reason}")]
    Unauthorized {
        /// Denial reason from the permission engine.
        reason: DenialReason,
    },
    /// Unexpected failure in a collaborator.
    #[error("internal error")]
    Internal {
        /// Collaborator detail; surfaced to the audit sink, never to callers.
        detail: String,
    },
}

impl ActionError {
    /// Returns a stable kind label for callers and audit sinks.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::MissingTenantContext => "missing_tenant_context",
            Self::Validation(_) => "validation",
            Self::NotFound => "not_found",
            Self::ScopeDenied {
                ..
            } => "scope_denied",
            Self::Unauthorized {
                ..
            } => "unauthorized",
            Self::Internal {
                ..
            } => "internal",
        }
    }
}

// ============================================================================
// SECTION: Service Configuration
// ============================================================================

/// Service configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Page size defaults are zero or exceed the cap.
    #[error("default page size must be between 1 and the page size cap")]
    PageBounds,
    /// Field length caps are zero.
    #[error("field length caps must be non-zero")]
    FieldCaps,
    /// Resource tag is empty.
    #[error("resource tag must not be empty")]
    ResourceTag,
}

/// Tunable bounds for the record service.
///
/// # Invariants
/// - `1 <= default_per_page <= max_per_page`; length caps are non-zero;
///   the resource tag is non-empty. [`ServiceConfig::validate`] enforces
///   this at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Page size used when the caller supplies none.
    pub default_per_page: u64,
    /// Hard cap for caller-supplied page sizes.
    pub max_per_page: u64,
    /// Maximum title length in characters.
    pub max_title_len: usize,
    /// Maximum body length in characters.
    pub max_body_len: usize,
    /// Resource tag passed to the invalidation notifier.
    pub resource_tag: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
            max_title_len: MAX_TITLE_LEN,
            max_body_len: MAX_BODY_LEN,
            resource_tag: DEFAULT_RESOURCE_TAG.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Validates the configuration bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any bound is zero, inverted, or empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_per_page == 0 || self.default_per_page > self.max_per_page {
            return Err(ConfigError::PageBounds);
        }
        if self.max_title_len == 0 || self.max_body_len == 0 {
            return Err(ConfigError::FieldCaps);
        }
        if self.resource_tag.is_empty() {
            return Err(ConfigError::ResourceTag);
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Service Builder
// ============================================================================

/// Service build errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ServiceBuildError {
    /// No record store was configured.
    #[error("record service store is not configured")]
    MissingStore,
    /// Configuration bounds are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Builder for a record service.
///
/// # Invariants
/// - `build` succeeds only when a store is configured and the
///   configuration validates.
pub struct RecordServiceBuilder<S> {
    /// Record store backing the service.
    store: Option<S>,
    /// Invalidation notifier signaled after successful mutations.
    notifier: Arc<dyn InvalidationNotifier>,
    /// Audit sink receiving decision events.
    audit: Arc<dyn AuditSink>,
    /// Service configuration.
    config: ServiceConfig,
}

impl<S: RecordStore> Default for RecordServiceBuilder<S> {
    fn default() -> Self {
        Self {
            store: None,
            notifier: Arc::new(NoopInvalidationNotifier),
            audit: Arc::new(NoopAuditSink),
            config: ServiceConfig::default(),
        }
    }
}

impl<S: RecordStore> RecordServiceBuilder<S> {
    /// Registers the record store.
    #[must_use]
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Registers the invalidation notifier.
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn InvalidationNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Registers the audit sink.
    #[must_use]
    pub fn audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Overrides the service configuration.
    #[must_use]
    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the record service.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceBuildError`] when no store is configured or the
    /// configuration bounds are invalid.
    pub fn build(self) -> Result<RecordService<S>, ServiceBuildError> {
        self.config.validate()?;
        Ok(RecordService {
            store: self.store.ok_or(ServiceBuildError::MissingStore)?,
            notifier: self.notifier,
            audit: self.audit,
            config: self.config,
        })
    }
}

// ============================================================================
// SECTION: Record Service
// ============================================================================

/// Mutation contract service over a record store.
///
/// # Invariants
/// - Holds no per-request state; safe to share across requests.
/// - Every store access carries the caller's tenant filter.
pub struct RecordService<S> {
    /// Record store backing the service.
    store: S,
    /// Invalidation notifier signaled after successful mutations.
    notifier: Arc<dyn InvalidationNotifier>,
    /// Audit sink receiving decision events.
    audit: Arc<dyn AuditSink>,
    /// Service configuration.
    config: ServiceConfig,
}

impl<S: RecordStore> RecordService<S> {
    /// Returns a builder for the record service.
    #[must_use]
    pub fn builder() -> RecordServiceBuilder<S> {
        RecordServiceBuilder::default()
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Creates a record at the requested scope.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when any pipeline gate fails.
    pub fn create_record(
        &self,
        sessions: &dyn SessionSource,
        tenants: &dyn TenantResolver,
        request: &CreateRecordRequest,
    ) -> Result<Record, ActionError> {
        let ctx = match self.resolve(sessions, tenants) {
            Ok(ctx) => ctx,
            Err(err) => return Err(self.audit_unresolved(Action::Create, err)),
        };
        let result = self.create_in(&ctx, request);
        self.audit_resolved(&ctx, Action::Create, result.as_ref().err());
        result
    }

    /// Updates a record's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when any pipeline gate fails.
    pub fn update_record(
        &self,
        sessions: &dyn SessionSource,
        tenants: &dyn TenantResolver,
        request: &UpdateRecordRequest,
    ) -> Result<Record, ActionError> {
        let ctx = match self.resolve(sessions, tenants) {
            Ok(ctx) => ctx,
            Err(err) => return Err(self.audit_unresolved(Action::Update, err)),
        };
        let result = self.update_in(&ctx, request);
        self.audit_resolved(&ctx, Action::Update, result.as_ref().err());
        result
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when any pipeline gate fails.
    pub fn delete_record(
        &self,
        sessions: &dyn SessionSource,
        tenants: &dyn TenantResolver,
        request: &DeleteRecordRequest,
    ) -> Result<(), ActionError> {
        let ctx = match self.resolve(sessions, tenants) {
            Ok(ctx) => ctx,
            Err(err) => return Err(self.audit_unresolved(Action::Delete, err)),
        };
        let result = self.delete_in(&ctx, request);
        self.audit_resolved(&ctx, Action::Delete, result.as_ref().err());
        result
    }

    /// Changes a record's published flag.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when any pipeline gate fails.
    pub fn set_published(
        &self,
        sessions: &dyn SessionSource,
        tenants: &dyn TenantResolver,
        request: &SetPublishedRequest,
    ) -> Result<Record, ActionError> {
        let ctx = match self.resolve(sessions, tenants) {
            Ok(ctx) => ctx,
            Err(err) => return Err(self.audit_unresolved(Action::Publish, err)),
        };
        let result = self.set_published_in(&ctx, request);
        self.audit_resolved(&ctx, Action::Publish, result.as_ref().err());
        result
    }

    /// Reads a single record.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when any pipeline gate fails.
    pub fn get_record(
        &self,
        sessions: &dyn SessionSource,
        tenants: &dyn TenantResolver,
        request: &GetRecordRequest,
    ) -> Result<Record, ActionError> {
        let ctx = match self.resolve(sessions, tenants) {
            Ok(ctx) => ctx,
            Err(err) => return Err(self.audit_unresolved(Action::Read, err)),
        };
        let result = self.get_in(&ctx, request);
        self.audit_resolved(&ctx, Action::Read, result.as_ref().err());
        result
    }

    /// Lists records visible to the caller, paginated with a total count.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when any pipeline gate fails.
    pub fn list_records(
        &self,
        sessions: &dyn SessionSource,
        tenants: &dyn TenantResolver,
        query: &ListRecordsQuery,
    ) -> Result<RecordPage, ActionError> {
        let ctx = match self.resolve(sessions, tenants) {
            Ok(ctx) => ctx,
            Err(err) => return Err(self.audit_unresolved(Action::Read, err)),
        };
        let result = self.list_in(&ctx, query);
        self.audit_resolved(&ctx, Action::Read, result.as_ref().err());
        result
    }

    // ------------------------------------------------------------------
    // Pipeline steps
    // ------------------------------------------------------------------

    /// Resolves identity and tenant, the first two pipeline gates.
    ///
    /// A session whose tenant differs from the resolved request tenant is
    /// not a valid identity in this context and fails closed.
    fn resolve(
        &self,
        sessions: &dyn SessionSource,
        tenants: &dyn TenantResolver,
    ) -> Result<AuthContext, ActionError> {
        let session = sessions.current_session();
        let ctx = AuthContext::from_session(session.as_ref())
            .map_err(|_| ActionError::NotAuthenticated)?;
        let tenant = tenants.resolve_tenant().ok_or(ActionError::MissingTenantContext)?;
        if tenant != ctx.tenant_id {
            return Err(ActionError::NotAuthenticated);
        }
        Ok(ctx)
    }

    /// Loads the target record under the compound tenant filter.
    fn load(&self, ctx: &AuthContext, id: &RecordId) -> Result<Record, ActionError> {
        self.store
            .find_one(&ctx.tenant_id, id)
            .map_err(internal)?
            .ok_or(ActionError::NotFound)
    }

    /// Create pipeline after identity and tenant resolution.
    fn create_in(
        &self,
        ctx: &AuthContext,
        request: &CreateRecordRequest,
    ) -> Result<Record, ActionError> {
        let fields = validate_create(request, &self.config);
        if !fields.is_empty() {
            return Err(ValidationFailure {
                fields,
            }
            .into());
        }
        let decision = check(ctx, &AccessRequest::Create {
            visibility: &request.visibility,
        });
        if let Some(reason) = decision.reason {
            return Err(deny_to_error(reason));
        }
        if request.publish && !ctx.is_privileged() {
            return Err(ActionError::Unauthorized {
                reason: DenialReason::UnauthorizedWrite,
            });
        }
        let record = self
            .store
            .create(NewRecord {
                tenant_id: ctx.tenant_id.clone(),
                title: request.title.clone(),
                body: request.body.clone(),
                visibility: request.visibility.clone(),
                owner_id: Some(ctx.user_id.clone()),
                published: request.publish,
            })
            .map_err(internal)?;
        self.notifier.invalidate(&ctx.tenant_id, &self.config.resource_tag);
        Ok(record)
    }

    /// Update pipeline after identity and tenant resolution.
    fn update_in(
        &self,
        ctx: &AuthContext,
        request: &UpdateRecordRequest,
    ) -> Result<Record, ActionError> {
        let fields = validate_update(request, &self.config);
        if !fields.is_empty() {
            return Err(ValidationFailure {
                fields,
            }
            .into());
        }
        let record = self.load(ctx, &request.id)?;
        let decision = check(ctx, &AccessRequest::Update {
            record: &record,
        });
        if let Some(reason) = decision.reason {
            return Err(deny_to_error(reason));
        }
        let patch = RecordPatch {
            title: request.title.clone(),
            body: request.body.clone(),
            published: None,
        };
        let affected =
            self.store.update_where(&ctx.tenant_id, &request.id, &patch).map_err(internal)?;
        if affected == 0 {
            return Err(ActionError::NotFound);
        }
        self.notifier.invalidate(&ctx.tenant_id, &self.config.resource_tag);
        self.load(ctx, &request.id)
    }

    /// Delete pipeline after identity and tenant resolution.
    fn delete_in(&self, ctx: &AuthContext, request: &DeleteRecordRequest) -> Result<(), ActionError> {
        let fields = validate_record_id(request.id.as_str());
        if !fields.is_empty() {
            return Err(ValidationFailure {
                fields,
            }
            .into());
        }
        let record = self.load(ctx, &request.id)?;
        let decision = check(ctx, &AccessRequest::Delete {
            record: &record,
        });
        if let Some(reason) = decision.reason {
            return Err(deny_to_error(reason));
        }
        let affected = self.store.delete_where(&ctx.tenant_id, &request.id).map_err(internal)?;
        if affected == 0 {
            return Err(ActionError::NotFound);
        }
        self.notifier.invalidate(&ctx.tenant_id, &self.config.resource_tag);
        Ok(())
    }

    /// Publish pipeline after identity and tenant resolution.
    fn set_published_in(
        &self,
        ctx: &AuthContext,
        request: &SetPublishedRequest,
    ) -> Result<Record, ActionError> {
        let fields = validate_record_id(request.id.as_str());
        if !fields.is_empty() {
            return Err(ValidationFailure {
                fields,
            }
            .into());
        }
        let record = self.load(ctx, &request.id)?;
        let decision = check(ctx, &AccessRequest::Publish {
            record: &record,
        });
        if let Some(reason) = decision.reason {
            return Err(deny_to_error(reason));
        }
        let patch = RecordPatch {
            title: None,
            body: None,
            published: Some(request.published),
        };
        let affected =
            self.store.update_where(&ctx.tenant_id, &request.id, &patch).map_err(internal)?;
        if affected == 0 {
            return Err(ActionError::NotFound);
        }
        self.notifier.invalidate(&ctx.tenant_id, &self.config.resource_tag);
        self.load(ctx, &request.id)
    }

    /// Single-record read pipeline after identity and tenant resolution.
    fn get_in(&self, ctx: &AuthContext, request: &GetRecordRequest) -> Result<Record, ActionError> {
        let fields = validate_record_id(request.id.as_str());
        if !fields.is_empty() {
            return Err(ValidationFailure {
                fields,
            }
            .into());
        }
        let record = self.load(ctx, &request.id)?;
        let decision = check(ctx, &AccessRequest::Read {
            record: &record,
        });
        if let Some(reason) = decision.reason {
            return Err(deny_to_error(reason));
        }
        Ok(record)
    }

    /// List pipeline after identity and tenant resolution.
    fn list_in(&self, ctx: &AuthContext, query: &ListRecordsQuery) -> Result<RecordPage, ActionError> {
        let fields = validate_list(query, &self.config);
        if !fields.is_empty() {
            return Err(ValidationFailure {
                fields,
            }
            .into());
        }
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(self.config.default_per_page);
        let sort = query.sort.unwrap_or_default();
        let filter = RecordFilter {
            search: query.search.as_ref().map(|term| term.trim().to_string()),
            visibility: query.visibility,
            published: query.published,
            visible_to: (!ctx.is_privileged()).then(|| ctx.user_id.clone()),
        };
        let skip = (page - 1).saturating_mul(per_page);
        let items = self
            .store
            .find_many(&ctx.tenant_id, &filter, sort, skip, per_page)
            .map_err(internal)?;
        let total = self.store.count(&ctx.tenant_id, &filter).map_err(internal)?;
        Ok(RecordPage {
            items,
            page,
            per_page,
            total,
        })
    }

    // ------------------------------------------------------------------
    // Audit emission
    // ------------------------------------------------------------------

    /// Records an audit event for a failure before identity resolution.
    fn audit_unresolved(&self, action: Action, err: ActionError) -> ActionError {
        self.audit.record(AuditEvent {
            tenant_id: None,
            user_id: None,
            role: None,
            action,
            outcome: AuditOutcome::Denied,
            reason: Some(err.kind().to_string()),
        });
        err
    }

    /// Records an audit event for a resolved operation outcome.
    fn audit_resolved(&self, ctx: &AuthContext, action: Action, err: Option<&ActionError>) {
        let (outcome, reason) = match err {
            None => (AuditOutcome::Allowed, None),
            Some(ActionError::Internal {
                detail,
            }) => (AuditOutcome::Failed, Some(format!("internal: {detail}"))),
            Some(other) => (AuditOutcome::Denied, Some(other.kind().to_string())),
        };
        self.audit.record(AuditEvent {
            tenant_id: Some(ctx.tenant_id.clone()),
            user_id: Some(ctx.user_id.clone()),
            role: Some(ctx.role),
            action,
            outcome,
            reason,
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps an engine denial onto the service error surface.
fn deny_to_error(reason: DenialReason) -> ActionError {
    match reason {
        DenialReason::NotFound => ActionError::NotFound,
        DenialReason::ScopeDenied(err) => ActionError::ScopeDenied {
            reason: err,
        },
        DenialReason::UnauthorizedRead | DenialReason::UnauthorizedWrite => {
            ActionError::Unauthorized {
                reason,
            }
        }
    }
}

/// Wraps a store failure as an opaque internal error.
fn internal(err: StoreError) -> ActionError {
    ActionError::Internal {
        detail: err.to_string(),
    }
}
