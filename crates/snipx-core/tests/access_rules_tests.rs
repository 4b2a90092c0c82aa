#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use proptest::prelude::*;
use snipx_core::{authorize, Action, Denied, Viewer, Visibility};

fn username_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn viewer_strategy() -> impl Strategy<Value = Viewer> {
    prop_oneof![
        Just(Viewer::Anonymous),
        username_strategy().prop_map(|name| common::logged_in(&name)),
    ]
}

fn visibility_strategy() -> impl Strategy<Value = Visibility> {
    prop_oneof![Just(Visibility::Public), Just(Visibility::Private)]
}

proptest! {
    #[test]
    fn private_snippets_only_visible_to_owner(
        owner in username_strategy(),
        viewer in viewer_strategy(),
    ) {
        let s = common::snippet(1, &owner, Visibility::Private);
        let decision = authorize(&viewer, &Action::View(&s));
        prop_assert_eq!(decision.is_ok(), viewer.is(&owner));
    }

    #[test]
    fn public_snippets_visible_to_everyone(
        owner in username_strategy(),
        viewer in viewer_strategy(),
    ) {
        let s = common::snippet(1, &owner, Visibility::Public);
        prop_assert!(authorize(&viewer, &Action::View(&s)).is_ok());
    }

    #[test]
    fn only_owner_may_edit_or_delete(
        owner in username_strategy(),
        viewer in viewer_strategy(),
        visibility in visibility_strategy(),
    ) {
        let s = common::snippet(1, &owner, visibility);
        let is_owner = viewer.is(&owner);
        for action in [Action::Edit(&s), Action::Delete(&s)] {
            match authorize(&viewer, &action) {
                Ok(_) => prop_assert!(is_owner),
                Err(denied) => {
                    prop_assert!(!is_owner);
                    prop_assert_eq!(denied, Denied::Forbidden);
                }
            }
        }
    }

    #[test]
    fn public_listing_always_allowed(viewer in viewer_strategy()) {
        prop_assert!(authorize(&viewer, &Action::ListPublic).is_ok());
    }

    #[test]
    fn full_user_listing_requires_same_identity(
        username in username_strategy(),
        viewer in viewer_strategy(),
    ) {
        let decision = authorize(&viewer, &Action::ListAllForUser { username: &username });
        prop_assert_eq!(decision.is_ok(), viewer.is(&username));
    }
}

#[test]
fn test_create_requires_authentication() {
    assert_eq!(
        authorize(&Viewer::Anonymous, &Action::Create),
        Err(Denied::Unauthenticated)
    );
    assert!(authorize(&common::logged_in("alice"), &Action::Create).is_ok());
}

#[test]
fn test_bob_cannot_edit_alice_public_snippet() {
    let s = common::snippet(1, "alice", Visibility::Public);
    let bob = common::logged_in("bob");
    assert!(authorize(&bob, &Action::View(&s)).is_ok());
    assert_eq!(authorize(&bob, &Action::Edit(&s)), Err(Denied::Forbidden));
    assert!(authorize(&common::logged_in("alice"), &Action::Edit(&s)).is_ok());
}
