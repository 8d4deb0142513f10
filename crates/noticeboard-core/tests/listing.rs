// crates/noticeboard-core/tests/listing.rs
// ============================================================================
// Module: Listing Tests
// Description: Pagination, filtering, ordering, and visibility narrowing.
// Purpose: Ensure list results stay tenant-scoped and caller-visible only.
// Dependencies: noticeboard-core
// ============================================================================

//! List operation tests: filters, the sort allow-list, pagination totals,
//! and per-role visibility narrowing.

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

use std::collections::BTreeSet;

use noticeboard_core::GroupId;
use noticeboard_core::Role;
use noticeboard_core::SessionToken;
use noticeboard_core::SortKey;
use noticeboard_core::SortOrder;
use noticeboard_core::TenantId;
use noticeboard_core::UserId;
use noticeboard_core::Visibility;
use noticeboard_core::VisibilityKind;
use noticeboard_core::interfaces::FixedSessionSource;
use noticeboard_core::interfaces::FixedTenantResolver;
use noticeboard_core::interfaces::RecordSort;
use noticeboard_core::runtime::CreateRecordRequest;
use noticeboard_core::runtime::InMemoryRecordStore;
use noticeboard_core::runtime::ListRecordsQuery;
use noticeboard_core::runtime::RecordService;

/// Builds a session for the given user and role in `school-1`.
fn session(user: &str, role: Role) -> SessionToken {
    SessionToken {
        user_id: UserId::new(user),
        role: Some(role),
        tenant_id: TenantId::new("school-1"),
        taught_class_ids: BTreeSet::new(),
    }
}

/// Session source for one session.
fn sessions_of(token: SessionToken) -> FixedSessionSource {
    FixedSessionSource::new(Some(token))
}

/// Tenant resolver for `school-1`.
fn home_tenant() -> FixedTenantResolver {
    FixedTenantResolver::new(Some(TenantId::new("school-1")))
}

/// Seeds a service with a mixed set of published and draft records.
fn seeded_service() -> RecordService<InMemoryRecordStore> {
    let service =
        RecordService::builder().store(InMemoryRecordStore::new()).build().expect("service builds");
    let admin = sessions_of(session("admin-1", Role::Admin));
    let tenants = home_tenant();
    for (title, publish) in [
        ("Assembly on Monday", true),
        ("Budget draft", false),
        ("Canteen menu", true),
        ("Derby results", true),
        ("Exam timetable", false),
    ] {
        service
            .create_record(&admin, &tenants, &CreateRecordRequest {
                title: title.to_string(),
                body: "Details follow.".to_string(),
                visibility: Visibility::Organization,
                publish,
            })
            .expect("seed create succeeds");
    }
    service
}

#[test]
fn default_order_is_newest_first() {
    let service = seeded_service();
    let admin = sessions_of(session("admin-1", Role::Admin));
    let page = service
        .list_records(&admin, &home_tenant(), &ListRecordsQuery::default())
        .expect("list succeeds");
    assert_eq!(page.total, 5);
    let titles: Vec<&str> = page.items.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Exam timetable",
            "Derby results",
            "Canteen menu",
            "Budget draft",
            "Assembly on Monday",
        ]
    );
}

#[test]
fn sort_allow_list_orders_by_title() {
    let service = seeded_service();
    let admin = sessions_of(session("admin-1", Role::Admin));
    let page = service
        .list_records(&admin, &home_tenant(), &ListRecordsQuery {
            sort: Some(RecordSort {
                key: SortKey::Title,
                order: SortOrder::Asc,
            }),
            ..ListRecordsQuery::default()
        })
        .expect("list succeeds");
    let titles: Vec<&str> = page.items.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Assembly on Monday",
            "Budget draft",
            "Canteen menu",
            "Derby results",
            "Exam timetable",
        ]
    );
}

#[test]
fn pagination_splits_results_and_total_stays_constant() {
    let service = seeded_service();
    let admin = sessions_of(session("admin-1", Role::Admin));
    let first = service
        .list_records(&admin, &home_tenant(), &ListRecordsQuery {
            page: Some(1),
            per_page: Some(2),
            ..ListRecordsQuery::default()
        })
        .expect("page 1");
    let second = service
        .list_records(&admin, &home_tenant(), &ListRecordsQuery {
            page: Some(2),
            per_page: Some(2),
            ..ListRecordsQuery::default()
        })
        .expect("page 2");
    let third = service
        .list_records(&admin, &home_tenant(), &ListRecordsQuery {
            page: Some(3),
            per_page: Some(2),
            ..ListRecordsQuery::default()
        })
        .expect("page 3");
    assert_eq!(first.items.len(), 2);
    assert_eq!(second.items.len(), 2);
    assert_eq!(third.items.len(), 1);
    for page in [&first, &second, &third] {
        assert_eq!(page.total, 5);
    }
}

#[test]
fn non_privileged_callers_see_published_plus_their_own_drafts() {
    let service = seeded_service();
    let tenants = home_tenant();

    // A staff member authors a draft of their own.
    let staff = sessions_of(session("staff-1", Role::Staff));
    service
        .create_record(&staff, &tenants, &CreateRecordRequest {
            title: "Stationery order".to_string(),
            body: "Draft list.".to_string(),
            visibility: Visibility::Organization,
            publish: false,
        })
        .expect("staff draft create");

    let page = service
        .list_records(&staff, &tenants, &ListRecordsQuery::default())
        .expect("list succeeds");
    let titles: Vec<&str> = page.items.iter().map(|r| r.title.as_str()).collect();
    assert!(titles.contains(&"Stationery order"), "own draft visible");
    assert!(titles.contains(&"Assembly on Monday"), "published visible");
    assert!(!titles.contains(&"Budget draft"), "foreign draft hidden");
    assert_eq!(page.total, 4, "three published plus own draft");
}

#[test]
fn filters_compose_with_visibility_narrowing() {
    let service = seeded_service();
    let student = sessions_of(session("student-1", Role::Student));
    let page = service
        .list_records(&student, &home_tenant(), &ListRecordsQuery {
            search: Some("derby".to_string()),
            ..ListRecordsQuery::default()
        })
        .expect("list succeeds");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Derby results");

    let none = service
        .list_records(&student, &home_tenant(), &ListRecordsQuery {
            search: Some("budget".to_string()),
            ..ListRecordsQuery::default()
        })
        .expect("list succeeds");
    assert_eq!(none.total, 0, "drafts never match for other readers");
}

#[test]
fn scope_kind_filter_restricts_results() {
    let service = seeded_service();
    let tenants = home_tenant();
    let admin = sessions_of(session("admin-1", Role::Admin));
    service
        .create_record(&admin, &tenants, &CreateRecordRequest {
            title: "Staff meeting".to_string(),
            body: "Agenda attached.".to_string(),
            visibility: Visibility::Role {
                target_role: Role::Staff,
            },
            publish: true,
        })
        .expect("role-scope create");

    let page = service
        .list_records(&admin, &tenants, &ListRecordsQuery {
            visibility: Some(VisibilityKind::Role),
            ..ListRecordsQuery::default()
        })
        .expect("list succeeds");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Staff meeting");
}

#[test]
fn published_filter_composes_with_count() {
    let service = seeded_service();
    let admin = sessions_of(session("admin-1", Role::Admin));
    let drafts = service
        .list_records(&admin, &home_tenant(), &ListRecordsQuery {
            published: Some(false),
            ..ListRecordsQuery::default()
        })
        .expect("list succeeds");
    assert_eq!(drafts.total, 2);
    assert_eq!(drafts.items.len(), 2);
}

#[test]
fn page_and_per_page_bounds_are_validated() {
    let service = seeded_service();
    let admin = sessions_of(session("admin-1", Role::Admin));
    let zero_page = service
        .list_records(&admin, &home_tenant(), &ListRecordsQuery {
            page: Some(0),
            ..ListRecordsQuery::default()
        })
        .expect_err("page 0 rejected");
    assert_eq!(zero_page.kind(), "validation");

    let oversized = service
        .list_records(&admin, &home_tenant(), &ListRecordsQuery {
            per_page: Some(service.config().max_per_page + 1),
            ..ListRecordsQuery::default()
        })
        .expect_err("oversized page rejected");
    assert_eq!(oversized.kind(), "validation");
}

#[test]
fn group_records_require_group_membership_to_author_but_list_for_readers() {
    let service = seeded_service();
    let tenants = home_tenant();
    let teacher = sessions_of(SessionToken {
        user_id: UserId::new("teacher-1"),
        role: Some(Role::Teacher),
        tenant_id: TenantId::new("school-1"),
        taught_class_ids: [GroupId::new("class-1")].into_iter().collect::<BTreeSet<_>>(),
    });
    service
        .create_record(&teacher, &tenants, &CreateRecordRequest {
            title: "Class photo day".to_string(),
            body: "Wear uniforms.".to_string(),
            visibility: Visibility::Group {
                group_id: GroupId::new("class-1"),
            },
            publish: false,
        })
        .expect("teacher create");
    let published = service
        .set_published(&teacher, &tenants, &noticeboard_core::runtime::SetPublishedRequest {
            id: service
                .list_records(&teacher, &tenants, &ListRecordsQuery {
                    visibility: Some(VisibilityKind::Group),
                    ..ListRecordsQuery::default()
                })
                .expect("list own")
                .items[0]
                .id
                .clone(),
            published: true,
        })
        .expect("publish succeeds");
    assert!(published.published);

    let student = sessions_of(session("student-1", Role::Student));
    let page = service
        .list_records(&student, &tenants, &ListRecordsQuery {
            visibility: Some(VisibilityKind::Group),
            ..ListRecordsQuery::default()
        })
        .expect("list succeeds");
    assert_eq!(page.total, 1, "published group record is listed");
}
