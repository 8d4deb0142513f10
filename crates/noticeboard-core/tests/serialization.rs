// crates/noticeboard-core/tests/serialization.rs
// ============================================================================
// Module: Wire Shape Tests
// Description: Stable wire forms for scope, time, and payload types.
// Purpose: Pin the tagged representations consumed by callers.
// Dependencies: noticeboard-core, serde_json
// ============================================================================

//! Wire-form tests for the tagged enums and payload defaults callers
//! depend on.

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

use noticeboard_core::GroupId;
use noticeboard_core::Role;
use noticeboard_core::Timestamp;
use noticeboard_core::Visibility;
use noticeboard_core::runtime::ListRecordsQuery;
use serde_json::json;

#[test]
fn visibility_serializes_with_a_kind_tag() {
    let group = Visibility::Group {
        group_id: GroupId::new("class-1"),
    };
    let value = serde_json::to_value(&group).expect("serialize");
    assert_eq!(value, json!({"kind": "group", "group_id": "class-1"}));

    let role = Visibility::Role {
        target_role: Role::Guardian,
    };
    let value = serde_json::to_value(&role).expect("serialize");
    assert_eq!(value, json!({"kind": "role", "target_role": "guardian"}));

    let org: Visibility = serde_json::from_value(json!({"kind": "organization"})).expect("parse");
    assert_eq!(org, Visibility::Organization);
}

#[test]
fn group_scope_without_a_group_id_fails_to_parse() {
    let result = serde_json::from_value::<Visibility>(json!({"kind": "group"}));
    assert!(result.is_err(), "structural invariant enforced at the wire");
}

#[test]
fn timestamps_serialize_with_kind_and_value() {
    let value = serde_json::to_value(Timestamp::UnixMillis(1_700_000_000_000)).expect("serialize");
    assert_eq!(value, json!({"kind": "unix_millis", "value": 1_700_000_000_000_i64}));
}

#[test]
fn list_query_fields_all_default_to_absent() {
    let query: ListRecordsQuery = serde_json::from_value(json!({})).expect("parse");
    assert_eq!(query, ListRecordsQuery::default());
}
