// crates/noticeboard-core/src/runtime/validation.rs
// ============================================================================
// Module: Noticeboard Payload Validation
// Description: Semantic payload checks producing field-level error lists.
// Purpose: Reject malformed payloads fully before any store access.
// Dependencies: crate::runtime::{requests, service}, serde
// ============================================================================

//! ## Overview
//! Validation runs as the third pipeline gate, after identity and tenant
//! resolution and before any record is loaded. Checks accumulate into a
//! field-level list so callers can render every problem at once; the
//! pipeline stops on a non-empty list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::runtime::requests::CreateRecordRequest;
use crate::runtime::requests::ListRecordsQuery;
use crate::runtime::requests::UpdateRecordRequest;
use crate::runtime::service::ServiceConfig;

// ============================================================================
// SECTION: Field Errors
// ============================================================================

/// One field-level validation failure.
///
/// # Invariants
/// - `field` names a payload field; `message` is caller-facing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Payload field that failed.
    pub field: String,
    /// Caller-facing message.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure carrying every failing field.
///
/// # Invariants
/// - `fields` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Field-level failures.
    pub fields: Vec<FieldError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed: ")?;
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            field.fmt(f)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

// ============================================================================
// SECTION: Payload Checks
// ============================================================================

/// Validates a create payload.
#[must_use]
pub fn validate_create(request: &CreateRecordRequest, config: &ServiceConfig) -> Vec<FieldError> {
    let mut fields = Vec::new();
    check_title(&mut fields, "title", &request.title, config);
    check_body(&mut fields, "body", &request.body, config);
    fields
}

/// Validates an update payload.
#[must_use]
pub fn validate_update(request: &UpdateRecordRequest, config: &ServiceConfig) -> Vec<FieldError> {
    let mut fields = Vec::new();
    check_record_id(&mut fields, request.id.as_str());
    if request.title.is_none() && request.body.is_none() {
        fields.push(FieldError::new("payload", "at least one field must be set"));
    }
    if let Some(title) = &request.title {
        check_title(&mut fields, "title", title, config);
    }
    if let Some(body) = &request.body {
        check_body(&mut fields, "body", body, config);
    }
    fields
}

/// Validates a record identifier carried by a single-record payload.
#[must_use]
pub fn validate_record_id(id: &str) -> Vec<FieldError> {
    let mut fields = Vec::new();
    check_record_id(&mut fields, id);
    fields
}

/// Validates a list query against the configured bounds.
#[must_use]
pub fn validate_list(query: &ListRecordsQuery, config: &ServiceConfig) -> Vec<FieldError> {
    let mut fields = Vec::new();
    if query.page == Some(0) {
        fields.push(FieldError::new("page", "must be at least 1"));
    }
    if let Some(per_page) = query.per_page
        && (per_page == 0 || per_page > config.max_per_page)
    {
        fields.push(FieldError::new(
            "per_page",
            format!("must be between 1 and {}", config.max_per_page),
        ));
    }
    if let Some(search) = &query.search
        && search.trim().is_empty()
    {
        fields.push(FieldError::new("search", "must not be empty"));
    }
    fields
}

// ============================================================================
// SECTION: Field Checks
// ============================================================================

/// Checks a title field for emptiness and the configured length cap.
fn check_title(fields: &mut Vec<FieldError>, name: &str, value: &str, config: &ServiceConfig) {
    if value.trim().is_empty() {
        fields.push(FieldError::new(name, "must not be empty"));
    } else if value.chars().count() > config.max_title_len {
        fields.push(FieldError::new(
            name,
            format!("must not exceed {} characters", config.max_title_len),
        ));
    }
}

/// Checks a body field for the configured length cap.
fn check_body(fields: &mut Vec<FieldError>, name: &str, value: &str, config: &ServiceConfig) {
    if value.chars().count() > config.max_body_len {
        fields.push(FieldError::new(
            name,
            format!("must not exceed {} characters", config.max_body_len),
        ));
    }
}

/// Checks a record identifier for emptiness.
fn check_record_id(fields: &mut Vec<FieldError>, id: &str) {
    if id.trim().is_empty() {
        fields.push(FieldError::new("id", "must not be empty"));
    }
}
