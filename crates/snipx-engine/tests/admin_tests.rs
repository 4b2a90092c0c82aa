#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{password, setup};
use snipx_core::ExErrorKind;
use snipx_engine::commands::admin::{language_add, user_add};

#[test]
fn test_language_slug_derived_or_explicit() {
    let fx = setup();
    let cpp = language_add("C++", None, &fx.conn).unwrap();
    assert_eq!(cpp.slug, "cpp");
    let sh = language_add("Shell", Some("bash"), &fx.conn).unwrap();
    assert_eq!(sh.slug, "bash");
}

#[test]
fn test_language_rejects_bad_input() {
    let fx = setup();
    assert_eq!(
        language_add("Go", Some("Go Lang"), &fx.conn).unwrap_err().kind(),
        ExErrorKind::InvalidInput
    );
    assert_eq!(
        language_add("   ", None, &fx.conn).unwrap_err().kind(),
        ExErrorKind::InvalidInput
    );
    assert_eq!(
        language_add("Python", None, &fx.conn).unwrap_err().kind(),
        ExErrorKind::AlreadyExists
    );
}

#[test]
fn test_user_add_validation() {
    let fx = setup();
    assert_eq!(
        user_add("two words", None, &password("x"), &fx.conn).unwrap_err().kind(),
        ExErrorKind::InvalidInput
    );
    assert_eq!(
        user_add("alice", None, &password("x"), &fx.conn).unwrap_err().kind(),
        ExErrorKind::AlreadyExists
    );
    let carol = user_add("carol", Some("  "), &password("x"), &fx.conn).unwrap();
    assert_eq!(carol.email, None);
}
