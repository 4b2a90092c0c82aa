#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{as_viewer, draft, setup};
use snipx_core::model::Viewer;
use snipx_core::notify::{NoopDispatcher, RecordingDispatcher};
use snipx_core::ExErrorKind;
use snipx_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineCommandResult, EngineQuery,
    EngineQueryResult,
};
use snipx_store::repo::SqliteRepo;

fn create(fx: &common::Fixture, viewer: &Viewer, name: &str, public: bool) -> i64 {
    apply_engine_command(
        EngineCommand::SnippetCreate {
            draft: draft(name, public),
        },
        &fx.conn,
        viewer,
        &NoopDispatcher,
    )
    .unwrap()
    .snippet_id()
}

fn public_names(fx: &common::Fixture, viewer: &Viewer) -> Vec<String> {
    match apply_engine_query(EngineQuery::SnippetListPublic, &fx.conn, viewer).unwrap() {
        EngineQueryResult::Snippets(snippets) => snippets.into_iter().map(|s| s.name).collect(),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_public_quick_sort_scenario() {
    let fx = setup();
    let alice = as_viewer(&fx.alice);
    let bob = as_viewer(&fx.bob);
    let id = create(&fx, &alice, "Quick sort", true);

    for viewer in [&Viewer::Anonymous, &alice, &bob] {
        assert_eq!(public_names(&fx, viewer), vec!["Quick sort"]);
    }

    let mut edit = draft("Quick sort", true);
    edit.description = "In-place quick sort".to_string();

    let err = apply_engine_command(
        EngineCommand::SnippetUpdate {
            snippet_id: id,
            draft: edit.clone(),
        },
        &fx.conn,
        &bob,
        &NoopDispatcher,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
    let stored = SqliteRepo::get_snippet(&fx.conn, id).unwrap().unwrap();
    assert_eq!(stored.description, "Sorts a list");

    let result = apply_engine_command(
        EngineCommand::SnippetUpdate {
            snippet_id: id,
            draft: edit,
        },
        &fx.conn,
        &alice,
        &NoopDispatcher,
    )
    .unwrap();
    assert_eq!(result, EngineCommandResult::SnippetUpdated { snippet_id: id });
    let stored = SqliteRepo::get_snippet(&fx.conn, id).unwrap().unwrap();
    assert_eq!(stored.description, "In-place quick sort");
}

#[test]
fn test_private_snippet_scenario() {
    let fx = setup();
    let alice = as_viewer(&fx.alice);
    let id = create(&fx, &alice, "Secret", false);

    for viewer in [Viewer::Anonymous, as_viewer(&fx.bob)] {
        let err = apply_engine_query(EngineQuery::SnippetGet { snippet_id: id }, &fx.conn, &viewer)
            .unwrap_err();
        assert!(err.kind().is_silent_deny());
    }

    let snippet = apply_engine_query(EngineQuery::SnippetGet { snippet_id: id }, &fx.conn, &alice)
        .unwrap()
        .into_snippet()
        .unwrap();
    assert!(snippet.body.contains("sorted"));
    assert!(public_names(&fx, &Viewer::Anonymous).is_empty());
}

#[test]
fn test_anonymous_create_persists_nothing() {
    let fx = setup();
    let err = apply_engine_command(
        EngineCommand::SnippetCreate {
            draft: draft("Nope", true),
        },
        &fx.conn,
        &Viewer::Anonymous,
        &NoopDispatcher,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Unauthorised);
    assert!(public_names(&fx, &Viewer::Anonymous).is_empty());
}

#[test]
fn test_unknown_language_and_username_are_not_found() {
    let fx = setup();
    let err = apply_engine_query(
        EngineQuery::SnippetListByLanguage {
            slug: "cobol".to_string(),
        },
        &fx.conn,
        &Viewer::Anonymous,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);

    let err = apply_engine_query(
        EngineQuery::SnippetListByUser {
            username: "carol".to_string(),
        },
        &fx.conn,
        &Viewer::Anonymous,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_user_listing_includes_private_only_for_owner() {
    let fx = setup();
    let alice = as_viewer(&fx.alice);
    create(&fx, &alice, "open", true);
    create(&fx, &alice, "closed", false);

    let listing = |viewer: &Viewer| match apply_engine_query(
        EngineQuery::SnippetListByUser {
            username: "alice".to_string(),
        },
        &fx.conn,
        viewer,
    )
    .unwrap()
    {
        EngineQueryResult::UserSnippets {
            snippets, complete, ..
        } => (
            snippets.into_iter().map(|s| s.name).collect::<Vec<_>>(),
            complete,
        ),
        other => panic!("unexpected result {other:?}"),
    };

    assert_eq!(listing(&alice), (vec!["closed".to_string(), "open".to_string()], true));
    assert_eq!(listing(&as_viewer(&fx.bob)), (vec!["open".to_string()], false));
    assert_eq!(listing(&Viewer::Anonymous), (vec!["open".to_string()], false));
}

#[test]
fn test_language_listing_is_public_only() {
    let fx = setup();
    let alice = as_viewer(&fx.alice);
    create(&fx, &alice, "py-public", true);
    create(&fx, &alice, "py-private", false);

    match apply_engine_query(
        EngineQuery::SnippetListByLanguage {
            slug: "python".to_string(),
        },
        &fx.conn,
        &alice,
    )
    .unwrap()
    {
        EngineQueryResult::LanguageSnippets { language, snippets } => {
            assert_eq!(language.name, "Python");
            let names: Vec<_> = snippets.into_iter().map(|s| s.name).collect();
            assert_eq!(names, vec!["py-public"]);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_delete_owner_only() {
    let fx = setup();
    let alice = as_viewer(&fx.alice);
    let id = create(&fx, &alice, "temp", true);

    let err = apply_engine_command(
        EngineCommand::SnippetDelete { snippet_id: id },
        &fx.conn,
        &as_viewer(&fx.bob),
        &NoopDispatcher,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
    assert!(SqliteRepo::get_snippet(&fx.conn, id).unwrap().is_some());

    apply_engine_command(
        EngineCommand::SnippetDelete { snippet_id: id },
        &fx.conn,
        &alice,
        &NoopDispatcher,
    )
    .unwrap();
    assert!(SqliteRepo::get_snippet(&fx.conn, id).unwrap().is_none());

    let err = apply_engine_command(
        EngineCommand::SnippetDelete { snippet_id: id },
        &fx.conn,
        &alice,
        &NoopDispatcher,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_edit_form_gated_like_edit() {
    let fx = setup();
    let alice = as_viewer(&fx.alice);
    let id = create(&fx, &alice, "public one", true);

    let err = apply_engine_query(
        EngineQuery::SnippetGetForEdit { snippet_id: id },
        &fx.conn,
        &as_viewer(&fx.bob),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);

    let snippet = apply_engine_query(EngineQuery::SnippetGetForEdit { snippet_id: id }, &fx.conn, &alice)
        .unwrap()
        .into_snippet()
        .unwrap();
    assert_eq!(snippet.id, id);
}

#[test]
fn test_delete_confirmation_gated_like_delete() {
    let fx = setup();
    let alice = as_viewer(&fx.alice);
    let id = create(&fx, &alice, "public one", true);

    for viewer in [as_viewer(&fx.bob), Viewer::Anonymous] {
        let err = apply_engine_query(
            EngineQuery::SnippetGetForDelete { snippet_id: id },
            &fx.conn,
            &viewer,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Forbidden);
    }

    let snippet = apply_engine_query(EngineQuery::SnippetGetForDelete { snippet_id: id }, &fx.conn, &alice)
        .unwrap()
        .into_snippet()
        .unwrap();
    assert_eq!(snippet.id, id);
}

#[test]
fn test_invalid_draft_collects_language_error() {
    let fx = setup();
    let mut bad = draft("", true);
    bad.language_slug = "cobol".to_string();

    let err = apply_engine_command(
        EngineCommand::SnippetCreate { draft: bad },
        &fx.conn,
        &as_viewer(&fx.alice),
        &NoopDispatcher,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    let fields: Vec<_> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "language"]);
}

#[test]
fn test_notice_only_for_owner_with_email() {
    let fx = setup();
    let dispatcher = RecordingDispatcher::new();

    apply_engine_command(
        EngineCommand::SnippetCreate {
            draft: draft("From bob", true),
        },
        &fx.conn,
        &as_viewer(&fx.bob),
        &dispatcher,
    )
    .unwrap();
    assert!(dispatcher.notices().is_empty());

    apply_engine_command(
        EngineCommand::SnippetCreate {
            draft: draft("Quick sort", true),
        },
        &fx.conn,
        &as_viewer(&fx.alice),
        &dispatcher,
    )
    .unwrap();
    let notices = dispatcher.notices();
    assert_eq!(notices.len(), 1);
    let message = notices[0].compose().unwrap();
    assert_eq!(message.to, "alice@example.com");
    assert_eq!(message.subject, "Snippet \"Quick sort\" created successfully");
    assert!(message.body.ends_with("following description:\nSorts a list"));
}

#[test]
fn test_failed_create_dispatches_nothing() {
    let fx = setup();
    let dispatcher = RecordingDispatcher::new();
    let _ = apply_engine_command(
        EngineCommand::SnippetCreate {
            draft: draft("", true),
        },
        &fx.conn,
        &as_viewer(&fx.alice),
        &dispatcher,
    );
    assert!(dispatcher.notices().is_empty());
}
