use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use snipx_core::core_types::Sensitive;
use snipx_core::model::{SnippetDraft, User, Viewer};
use snipx_core::notify::{NoopDispatcher, RecordingDispatcher};
use snipx_engine::commands::admin::{language_add, user_add};
use snipx_engine::commands::session::login;
use snipx_engine::{apply_engine_command, EngineCommand};
use snipx_store::{db, migrations};
use snipx_web::highlight::PlainHighlighter;
use snipx_web::AppState;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub state: AppState,
    pub dispatcher: Arc<RecordingDispatcher>,
    pub alice: User,
    pub bob: User,
}

/// App over a fresh in-memory database with alice (email), bob (no email),
/// python and rust
#[allow(dead_code)]
pub fn setup() -> TestApp {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    let alice = user_add("alice", Some("alice@example.com"), &pw("alice-pw"), &conn).unwrap();
    let bob = user_add("bob", None, &pw("bob-pw"), &conn).unwrap();
    language_add("Python", None, &conn).unwrap();
    language_add("Rust", None, &conn).unwrap();

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let state = AppState::new(conn, Arc::new(PlainHighlighter), dispatcher.clone());
    TestApp {
        state,
        dispatcher,
        alice,
        bob,
    }
}

#[allow(dead_code)]
pub fn pw(raw: &str) -> Sensitive<String> {
    Sensitive::new(raw.to_string())
}

#[allow(dead_code)]
impl TestApp {
    pub fn router(&self) -> Router {
        snipx_web::router(self.state.clone())
    }

    /// `Cookie` header value for a fresh session of `username`
    pub fn cookie_for(&self, username: &str, password: &str) -> String {
        let outcome = self
            .state
            .with_conn(|conn| login(username, &pw(password), self.state.sessions(), conn))
            .unwrap();
        format!("snipx_session={}", outcome.token.expose())
    }

    pub fn alice_cookie(&self) -> String {
        self.cookie_for("alice", "alice-pw")
    }

    pub fn bob_cookie(&self) -> String {
        self.cookie_for("bob", "bob-pw")
    }

    /// Create a snippet directly through the engine
    pub fn create_snippet(&self, owner: &User, name: &str, public: bool) -> i64 {
        let draft = SnippetDraft {
            name: name.to_string(),
            description: "Sorts a list".to_string(),
            language_slug: "python".to_string(),
            public,
            body: "def qs(xs):\n    return sorted(xs)\n".to_string(),
        };
        let viewer = Viewer::User(owner.clone());
        self.state
            .with_conn(|conn| {
                apply_engine_command(
                    EngineCommand::SnippetCreate { draft },
                    conn,
                    &viewer,
                    &NoopDispatcher,
                )
            })
            .unwrap()
            .snippet_id()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.router()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// POST with no body and no `Content-Type`
    pub async fn post_empty(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.router()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, uri: &str, cookie: Option<&str>, form: &str) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.router()
            .oneshot(builder.body(Body::from(form.to_string())).unwrap())
            .await
            .unwrap()
    }
}

#[allow(dead_code)]
pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some(to)
    );
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
