// crates/noticeboard-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Record Store
// Description: Durable RecordStore backed by SQLite WAL.
// Purpose: Persist records with the tenant filter inside every statement.
// Dependencies: noticeboard-core, rusqlite
// ============================================================================

//! ## Overview
//! This module implements a durable [`RecordStore`] using `SQLite`. The
//! primary key is `(tenant_id, id)` and every statement repeats the
//! tenant predicate in its WHERE clause, so even a bypassed service gate
//! cannot reach another tenant's rows. Sort columns derive from the
//! [`SortKey`] allow-list only; caller text never enters statement text.
//! Rows that fail to decode surface as corruption errors and fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use noticeboard_core::GroupId;
use noticeboard_core::NewRecord;
use noticeboard_core::Record;
use noticeboard_core::RecordFilter;
use noticeboard_core::RecordId;
use noticeboard_core::RecordPatch;
use noticeboard_core::RecordSort;
use noticeboard_core::RecordStore;
use noticeboard_core::Role;
use noticeboard_core::SortKey;
use noticeboard_core::SortOrder;
use noticeboard_core::StoreError;
use noticeboard_core::TenantId;
use noticeboard_core::Timestamp;
use noticeboard_core::UserId;
use noticeboard_core::Visibility;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use rusqlite::types::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
pub const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Schema applied to fresh databases.
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS records (
    id TEXT NOT NULL,
    tenant_id TEXT NOT NULL,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    visibility_kind TEXT NOT NULL,
    group_id TEXT,
    target_role TEXT,
    owner_id TEXT,
    published INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    PRIMARY KEY (tenant_id, id)
);
CREATE INDEX IF NOT EXISTS idx_records_tenant_created
    ON records (tenant_id, created_at);
CREATE TABLE IF NOT EXISTS record_seq (
    seq INTEGER PRIMARY KEY AUTOINCREMENT
);
";

/// Column list shared by every record SELECT.
const RECORD_COLUMNS: &str = "id, tenant_id, title, body, visibility_kind, group_id, \
                              target_role, owner_id, published, created_at, updated_at";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the pragma value for the mode.
    const fn pragma(self) -> &'static str {
        match self {
            Self::Wal => "WAL",
            Self::Delete => "DELETE",
        }
    }
}

/// Configuration for opening a `SQLite` record store.
///
/// # Invariants
/// - `path` points at a database file; parent directories must exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteRecordStoreConfig {
    /// Database file path.
    pub path: PathBuf,
    /// Journal mode.
    pub mode: SqliteStoreMode,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u64,
}

impl SqliteRecordStoreConfig {
    /// Creates a configuration with default mode and timeout.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: SqliteStoreMode::default(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Durable record store backed by `SQLite`.
///
/// # Invariants
/// - Access is serialized through one connection lock.
/// - Every statement carries the tenant predicate in its WHERE clause.
#[derive(Debug)]
pub struct SqliteRecordStore {
    /// Locked database connection.
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Opens a store at the configured path, initializing the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the database cannot be opened, a
    /// pragma fails, or the on-disk schema version is incompatible.
    pub fn open(config: &SqliteRecordStoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open(&config.path).map_err(io_err)?;
        Self::initialize(conn, config)
    }

    /// Opens a store at a path with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when opening fails.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(&SqliteRecordStoreConfig::new(path.as_ref()))
    }

    /// Applies pragmas and the schema, enforcing the version check.
    fn initialize(conn: Connection, config: &SqliteRecordStoreConfig) -> Result<Self, StoreError> {
        conn.busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
            .map_err(io_err)?;
        conn.execute_batch(&format!("PRAGMA journal_mode = {};", config.mode.pragma()))
            .map_err(io_err)?;
        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(io_err)?;
        if version == 0 {
            conn.execute_batch(SCHEMA_SQL).map_err(io_err)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION).map_err(io_err)?;
        } else if version != SCHEMA_VERSION {
            return Err(StoreError::VersionMismatch(format!(
                "expected schema version {SCHEMA_VERSION}, found {version}"
            )));
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl RecordStore for SqliteRecordStore {
    fn find_one(&self, tenant_id: &TenantId, id: &RecordId) -> Result<Option<Record>, StoreError> {
        let conn = self.conn.lock()?;
        let sql = format!("SELECT {RECORD_COLUMNS} FROM records WHERE tenant_id = ?1 AND id = ?2");
        let raw = conn
            .query_row(&sql, params![tenant_id.as_str(), id.as_str()], RawRecord::from_row)
            .optional()
            .map_err(store_err)?;
        raw.map(RawRecord::into_record).transpose()
    }

    fn find_many(
        &self,
        tenant_id: &TenantId,
        filter: &RecordFilter,
        sort: RecordSort,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Record>, StoreError> {
        let conn = self.conn.lock()?;
        let (clauses, mut values) = filter_clauses(tenant_id, filter);
        let mut sql = format!(
            "SELECT {RECORD_COLUMNS} FROM records WHERE {}",
            clauses.join(" AND ")
        );
        sql.push_str(&order_clause(sort));
        sql.push_str(" LIMIT ? OFFSET ?");
        values.push(Value::Integer(clamp_i64(take)));
        values.push(Value::Integer(clamp_i64(skip)));
        let mut stmt = conn.prepare(&sql).map_err(store_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(values), RawRecord::from_row)
            .map_err(store_err)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(store_err)?.into_record()?);
        }
        Ok(records)
    }

    fn count(&self, tenant_id: &TenantId, filter: &RecordFilter) -> Result<u64, StoreError> {
        let conn = self.conn.lock()?;
        let (clauses, values) = filter_clauses(tenant_id, filter);
        let sql = format!("SELECT COUNT(*) FROM records WHERE {}", clauses.join(" AND "));
        let total: i64 = conn
            .query_row(&sql, rusqlite::params_from_iter(values), |row| row.get(0))
            .map_err(store_err)?;
        u64::try_from(total).map_err(|_| StoreError::Corrupt("negative row count".to_string()))
    }

    fn create(&self, record: NewRecord) -> Result<Record, StoreError> {
        let conn = self.conn.lock()?;
        conn.execute("INSERT INTO record_seq DEFAULT VALUES", []).map_err(store_err)?;
        let id = RecordId::new(format!("rec-{}", conn.last_insert_rowid()));
        let now = now_unix_millis()?;
        let (kind, group_id, target_role) = visibility_columns(&record.visibility);
        conn.execute(
            "INSERT INTO records (id, tenant_id, title, body, visibility_kind, group_id, \
             target_role, owner_id, published, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id.as_str(),
                record.tenant_id.as_str(),
                record.title,
                record.body,
                kind,
                group_id,
                target_role,
                record.owner_id.as_ref().map(UserId::as_str),
                i64::from(record.published),
                now,
                now,
            ],
        )
        .map_err(store_err)?;
        Ok(Record {
            id,
            tenant_id: record.tenant_id,
            title: record.title,
            body: record.body,
            visibility: record.visibility,
            owner_id: record.owner_id,
            published: record.published,
            created_at: Timestamp::UnixMillis(now),
            updated_at: Timestamp::UnixMillis(now),
        })
    }

    fn update_where(
        &self,
        tenant_id: &TenantId,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> Result<u64, StoreError> {
        let conn = self.conn.lock()?;
        let mut sets = vec!["updated_at = ?".to_string()];
        let mut values = vec![Value::Integer(now_unix_millis()?)];
        if let Some(title) = &patch.title {
            sets.push("title = ?".to_string());
            values.push(Value::Text(title.clone()));
        }
        if let Some(body) = &patch.body {
            sets.push("body = ?".to_string());
            values.push(Value::Text(body.clone()));
        }
        if let Some(published) = patch.published {
            sets.push("published = ?".to_string());
            values.push(Value::Integer(i64::from(published)));
        }
        let sql = format!(
            "UPDATE records SET {} WHERE tenant_id = ? AND id = ?",
            sets.join(", ")
        );
        values.push(Value::Text(tenant_id.as_str().to_string()));
        values.push(Value::Text(id.as_str().to_string()));
        let affected =
            conn.execute(&sql, rusqlite::params_from_iter(values)).map_err(store_err)?;
        Ok(u64::try_from(affected).unwrap_or(u64::MAX))
    }

    fn delete_where(&self, tenant_id: &TenantId, id: &RecordId) -> Result<u64, StoreError> {
        let conn = self.conn.lock()?;
        let affected = conn
            .execute(
                "DELETE FROM records WHERE tenant_id = ?1 AND id = ?2",
                params![tenant_id.as_str(), id.as_str()],
            )
            .map_err(store_err)?;
        Ok(u64::try_from(affected).unwrap_or(u64::MAX))
    }

    fn readiness(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)).map_err(io_err)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Row Decoding
// ============================================================================

/// Raw row shape before invariant checks.
#[derive(Debug)]
struct RawRecord {
    /// Record identifier column.
    id: String,
    /// Tenant identifier column.
    tenant_id: String,
    /// Title column.
    title: String,
    /// Body column.
    body: String,
    /// Visibility kind label column.
    visibility_kind: String,
    /// Group target column.
    group_id: Option<String>,
    /// Role target column.
    target_role: Option<String>,
    /// Owner column.
    owner_id: Option<String>,
    /// Published flag column.
    published: i64,
    /// Creation timestamp column.
    created_at: i64,
    /// Update timestamp column.
    updated_at: i64,
}

impl RawRecord {
    /// Reads a raw record from a result row.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            tenant_id: row.get(1)?,
            title: row.get(2)?,
            body: row.get(3)?,
            visibility_kind: row.get(4)?,
            group_id: row.get(5)?,
            target_role: row.get(6)?,
            owner_id: row.get(7)?,
            published: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    /// Converts the raw row into a record, failing closed on bad data.
    fn into_record(self) -> Result<Record, StoreError> {
        let visibility = decode_visibility(
            &self.visibility_kind,
            self.group_id.as_deref(),
            self.target_role.as_deref(),
        )?;
        Ok(Record {
            id: RecordId::new(self.id),
            tenant_id: TenantId::new(self.tenant_id),
            title: self.title,
            body: self.body,
            visibility,
            owner_id: self.owner_id.map(UserId::new),
            published: self.published != 0,
            created_at: Timestamp::UnixMillis(self.created_at),
            updated_at: Timestamp::UnixMillis(self.updated_at),
        })
    }
}

/// Decodes the flattened visibility columns, re-checking the invariant.
fn decode_visibility(
    kind: &str,
    group_id: Option<&str>,
    target_role: Option<&str>,
) -> Result<Visibility, StoreError> {
    match (kind, group_id, target_role) {
        ("organization", None, None) => Ok(Visibility::Organization),
        ("group", Some(group_id), None) => Ok(Visibility::Group {
            group_id: GroupId::new(group_id),
        }),
        ("role", None, Some(label)) => Ok(Visibility::Role {
            target_role: parse_role(label)?,
        }),
        _ => Err(StoreError::Corrupt(format!("invalid visibility columns for kind {kind}"))),
    }
}

/// Parses a stored role label, failing closed on unknown values.
fn parse_role(label: &str) -> Result<Role, StoreError> {
    match label {
        "admin" => Ok(Role::Admin),
        "principal" => Ok(Role::Principal),
        "teacher" => Ok(Role::Teacher),
        "student" => Ok(Role::Student),
        "guardian" => Ok(Role::Guardian),
        "staff" => Ok(Role::Staff),
        "accountant" => Ok(Role::Accountant),
        _ => Err(StoreError::Corrupt(format!("unknown role label {label}"))),
    }
}

// ============================================================================
// SECTION: Statement Helpers
// ============================================================================

/// Flattens a visibility scope into its column values.
fn visibility_columns(visibility: &Visibility) -> (&'static str, Option<&str>, Option<&str>) {
    match visibility {
        Visibility::Organization => ("organization", None, None),
        Visibility::Group {
            group_id,
        } => ("group", Some(group_id.as_str()), None),
        Visibility::Role {
            target_role,
        } => ("role", None, Some(target_role.as_str())),
    }
}

/// Builds WHERE clauses and bound values for a tenant-scoped filter.
///
/// The tenant predicate is always the first clause; caller-supplied text
/// is only ever bound as a parameter, never spliced into statement text.
fn filter_clauses(tenant_id: &TenantId, filter: &RecordFilter) -> (Vec<String>, Vec<Value>) {
    let mut clauses = vec!["tenant_id = ?".to_string()];
    let mut values = vec![Value::Text(tenant_id.as_str().to_string())];
    if let Some(term) = &filter.search {
        clauses.push("(title LIKE ? ESCAPE '\\' OR body LIKE ? ESCAPE '\\')".to_string());
        let pattern = format!("%{}%", escape_like(term));
        values.push(Value::Text(pattern.clone()));
        values.push(Value::Text(pattern));
    }
    if let Some(kind) = filter.visibility {
        clauses.push("visibility_kind = ?".to_string());
        values.push(Value::Text(kind.as_str().to_string()));
    }
    if let Some(published) = filter.published {
        clauses.push("published = ?".to_string());
        values.push(Value::Integer(i64::from(published)));
    }
    if let Some(user) = &filter.visible_to {
        clauses.push("(published = 1 OR owner_id = ?)".to_string());
        values.push(Value::Text(user.as_str().to_string()));
    }
    (clauses, values)
}

/// Builds the ORDER BY clause from the sort allow-list.
fn order_clause(sort: RecordSort) -> String {
    let column = match sort.key {
        SortKey::CreatedAt => "created_at",
        SortKey::UpdatedAt => "updated_at",
        SortKey::Title => "title",
    };
    let direction = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!(" ORDER BY {column} {direction}, id {direction}")
}

/// Escapes LIKE wildcards in caller-supplied search text.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Clamps a u64 into the non-negative i64 range for LIMIT/OFFSET binds.
fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Returns the current wall-clock time as unix milliseconds.
fn now_unix_millis() -> Result<i64, StoreError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| StoreError::Store(err.to_string()))?;
    i64::try_from(elapsed.as_millis())
        .map_err(|_| StoreError::Store("wall clock out of range".to_string()))
}

/// Maps a database open or pragma failure onto the store error surface.
fn io_err(err: rusqlite::Error) -> StoreError {
    StoreError::Io(err.to_string())
}

/// Maps a statement failure onto the store error surface.
fn store_err(err: rusqlite::Error) -> StoreError {
    StoreError::Store(err.to_string())
}
