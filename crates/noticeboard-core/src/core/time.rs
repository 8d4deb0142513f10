// crates/noticeboard-core/src/core/time.rs
// ============================================================================
// Module: Noticeboard Time Model
// Description: Canonical timestamp representations for record metadata.
// Purpose: Provide deterministic time values without reading wall-clock in the core.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Noticeboard records carry explicit time values maintained by the store
//! that created them. The core engine never reads wall-clock time; durable
//! stores stamp unix milliseconds, while the in-memory reference store
//! uses a monotonic logical counter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp used in record metadata.
///
/// # Invariants
/// - Values are supplied by the store that stamped them; the core never
///   reads wall-clock time.
/// - Ordering is only meaningful between values of the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical time value.
    Logical(u64),
}

impl Timestamp {
    /// Returns the timestamp as unix milliseconds when available.
    #[must_use]
    pub const fn as_unix_millis(&self) -> Option<i64> {
        match self {
            Self::UnixMillis(value) => Some(*value),
            Self::Logical(_) => None,
        }
    }

    /// Returns the timestamp as logical time when available.
    #[must_use]
    pub const fn as_logical(&self) -> Option<u64> {
        match self {
            Self::UnixMillis(_) => None,
            Self::Logical(value) => Some(*value),
        }
    }

    /// Returns a total ordering key across variants.
    ///
    /// Unix and logical values never mix within one store; the variant
    /// discriminant leads the key so ordering stays total anyway.
    #[must_use]
    pub const fn sort_key(&self) -> (u8, i128) {
        match self {
            Self::UnixMillis(value) => (0, *value as i128),
            Self::Logical(value) => (1, *value as i128),
        }
    }
}
