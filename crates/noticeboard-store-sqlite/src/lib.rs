// crates/noticeboard-store-sqlite/src/lib.rs
// ============================================================================
// Module: Noticeboard SQLite Store Library
// Description: Durable RecordStore backed by SQLite.
// Purpose: Persist tenant-scoped records with compound filters in every statement.
// Dependencies: noticeboard-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate implements a durable [`noticeboard_core::RecordStore`] on
//! `SQLite`. The tenant-qualified compound filter is part of every
//! statement's text, so an unscoped query is unrepresentable at the call
//! site. Row decode failures fail closed as corruption errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::DEFAULT_BUSY_TIMEOUT_MS;
pub use store::SCHEMA_VERSION;
pub use store::SqliteRecordStore;
pub use store::SqliteRecordStoreConfig;
pub use store::SqliteStoreMode;
