// system-tests/tests/store_parity.rs
// ============================================================================
// Module: Store Parity Tests
// Description: Contract agreement between the reference and durable stores.
// Purpose: Ensure both stores answer the same pipeline identically.
// Dependencies: system-tests fixtures, noticeboard-store-sqlite
// ============================================================================

//! Parity tests: the in-memory reference store and the `SQLite` store must
//! produce the same observable results for the same operation sequence.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use noticeboard_core::RecordStore;
use noticeboard_core::Role;
use noticeboard_core::SortKey;
use noticeboard_core::SortOrder;
use noticeboard_core::Visibility;
use noticeboard_core::interfaces::RecordSort;
use noticeboard_core::runtime::CreateRecordRequest;
use noticeboard_core::runtime::InMemoryRecordStore;
use noticeboard_core::runtime::ListRecordsQuery;
use noticeboard_core::runtime::RecordService;
use noticeboard_store_sqlite::SqliteRecordStore;
use system_tests::fixtures::service_over;
use system_tests::fixtures::session;
use system_tests::fixtures::sessions_of;
use system_tests::fixtures::tenant_of;
use tempfile::TempDir;

/// Runs the shared seeding sequence against a service.
fn seed<S: RecordStore>(service: &RecordService<S>) {
    let admin = sessions_of(session("admin-1", Role::Admin, "s1", &[]));
    let staff = sessions_of(session("staff-1", Role::Staff, "s1", &[]));
    let tenants = tenant_of("s1");
    for (title, publish) in [
        ("Assembly", true),
        ("Budget", false),
        ("Canteen", true),
    ] {
        service
            .create_record(&admin, &tenants, &CreateRecordRequest {
                title: title.to_string(),
                body: "Shared body.".to_string(),
                visibility: Visibility::Organization,
                publish,
            })
            .expect("admin seed");
    }
    service
        .create_record(&staff, &tenants, &CreateRecordRequest {
            title: "Stationery".to_string(),
            body: "Draft order.".to_string(),
            visibility: Visibility::Organization,
            publish: false,
        })
        .expect("staff seed");
}

/// Collects titles visible to the given role under a title sort.
fn titles_for<S: RecordStore>(service: &RecordService<S>, user: &str, role: Role) -> Vec<String> {
    let caller = sessions_of(session(user, role, "s1", &[]));
    let page = service
        .list_records(&caller, &tenant_of("s1"), &ListRecordsQuery {
            sort: Some(RecordSort {
                key: SortKey::Title,
                order: SortOrder::Asc,
            }),
            ..ListRecordsQuery::default()
        })
        .expect("list succeeds");
    page.items.into_iter().map(|record| record.title).collect()
}

#[test]
fn both_stores_agree_on_visibility_and_totals() {
    let memory = service_over(InMemoryRecordStore::new()).expect("memory service");
    let dir = TempDir::new().expect("tempdir");
    let sqlite = service_over(
        SqliteRecordStore::open_at(dir.path().join("records.db")).expect("open store"),
    )
    .expect("sqlite service");

    seed(&memory);
    seed(&sqlite);

    for (user, role) in [
        ("admin-1", Role::Admin),
        ("staff-1", Role::Staff),
        ("student-1", Role::Student),
    ] {
        let memory_titles = titles_for(&memory, user, role);
        let sqlite_titles = titles_for(&sqlite, user, role);
        assert_eq!(memory_titles, sqlite_titles, "{role} visibility diverged");
    }
}

#[test]
fn both_stores_agree_on_filtered_counts() {
    let memory = service_over(InMemoryRecordStore::new()).expect("memory service");
    let dir = TempDir::new().expect("tempdir");
    let sqlite = service_over(
        SqliteRecordStore::open_at(dir.path().join("records.db")).expect("open store"),
    )
    .expect("sqlite service");

    seed(&memory);
    seed(&sqlite);

    let admin = sessions_of(session("admin-1", Role::Admin, "s1", &[]));
    for query in [
        ListRecordsQuery::default(),
        ListRecordsQuery {
            published: Some(true),
            ..ListRecordsQuery::default()
        },
        ListRecordsQuery {
            search: Some("budget".to_string()),
            ..ListRecordsQuery::default()
        },
    ] {
        let memory_page =
            memory.list_records(&admin, &tenant_of("s1"), &query).expect("memory list");
        let sqlite_page =
            sqlite.list_records(&admin, &tenant_of("s1"), &query).expect("sqlite list");
        assert_eq!(memory_page.total, sqlite_page.total, "{query:?}");
        assert_eq!(memory_page.items.len(), sqlite_page.items.len(), "{query:?}");
    }
}
