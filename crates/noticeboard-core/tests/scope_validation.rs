// crates/noticeboard-core/tests/scope_validation.rs
// ============================================================================
// Module: Scope Validation Tests
// Description: Author-time scope eligibility across the role matrix.
// Purpose: Ensure scope rules gate authoring deterministically per role.
// Dependencies: noticeboard-core
// ============================================================================

//! Scope validator behavior tests across roles, groups, and target roles.

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

use noticeboard_core::ALL_ROLES;
use noticeboard_core::AuthContext;
use noticeboard_core::GroupId;
use noticeboard_core::Role;
use noticeboard_core::TenantId;
use noticeboard_core::UserId;
use noticeboard_core::Visibility;
use noticeboard_core::runtime::ScopeError;
use noticeboard_core::runtime::validate_author_scope;

/// Builds a context for the given role with an optional taught class set.
fn context(role: Role, classes: &[&str]) -> AuthContext {
    AuthContext {
        user_id: UserId::new("u-1"),
        role,
        tenant_id: TenantId::new("school-1"),
        taught_class_ids: classes.iter().map(|id| GroupId::new(*id)).collect::<BTreeSet<_>>(),
    }
}

#[test]
fn organization_scope_requires_privileged_role() {
    for role in ALL_ROLES.iter().copied() {
        let verdict = validate_author_scope(&context(role, &[]), &Visibility::Organization);
        if role.is_privileged() {
            assert!(verdict.is_ok(), "{role} should author organization scope");
        } else {
            assert_eq!(verdict, Err(ScopeError::ElevatedRoleRequired), "{role}");
        }
    }
}

#[test]
fn role_scope_requires_privileged_role() {
    let scope = Visibility::Role {
        target_role: Role::Student,
    };
    for role in ALL_ROLES.iter().copied() {
        let verdict = validate_author_scope(&context(role, &[]), &scope);
        if role.is_privileged() {
            assert!(verdict.is_ok(), "{role} should author role scope");
        } else {
            assert_eq!(verdict, Err(ScopeError::ElevatedRoleRequired), "{role}");
        }
    }
}

#[test]
fn group_scope_allows_teacher_for_taught_group() {
    let scope = Visibility::Group {
        group_id: GroupId::new("class-1"),
    };
    let verdict = validate_author_scope(&context(Role::Teacher, &["class-1", "class-2"]), &scope);
    assert!(verdict.is_ok());
}

#[test]
fn group_scope_rejects_teacher_outside_taught_set() {
    let scope = Visibility::Group {
        group_id: GroupId::new("class-9"),
    };
    let verdict = validate_author_scope(&context(Role::Teacher, &["class-1"]), &scope);
    assert_eq!(
        verdict,
        Err(ScopeError::GroupNotAuthorized {
            group_id: GroupId::new("class-9"),
        })
    );
}

#[test]
fn group_scope_allows_privileged_roles_without_membership() {
    let scope = Visibility::Group {
        group_id: GroupId::new("class-1"),
    };
    assert!(validate_author_scope(&context(Role::Admin, &[]), &scope).is_ok());
    assert!(validate_author_scope(&context(Role::Principal, &[]), &scope).is_ok());
}

#[test]
fn group_scope_rejects_non_teaching_roles() {
    let scope = Visibility::Group {
        group_id: GroupId::new("class-1"),
    };
    for role in [Role::Student, Role::Guardian, Role::Staff, Role::Accountant] {
        let verdict = validate_author_scope(&context(role, &["class-1"]), &scope);
        assert_eq!(verdict, Err(ScopeError::GroupRoleRequired), "{role}");
    }
}

#[test]
fn verdicts_are_deterministic_for_identical_inputs() {
    let ctx = context(Role::Teacher, &["class-1"]);
    let scope = Visibility::Group {
        group_id: GroupId::new("class-1"),
    };
    let first = validate_author_scope(&ctx, &scope);
    let second = validate_author_scope(&ctx, &scope);
    assert_eq!(first, second);
}
