#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use issuelog_api::auth::jwt::{generate_access_token, JwtConfig};
use issuelog_api::config::ServerConfig;
use issuelog_api::router::build_app_router;
use issuelog_api::state::AppState;
use issuelog_core::journal::{Issue, NewJournal, NewJournalDetail, Project};
use issuelog_core::memory::{MemoryJournalStore, StaticPermissionOracle};
use issuelog_core::permissions::{Permission, ANONYMOUS_USER_ID};
use issuelog_core::store::JournalStore;
use issuelog_core::types::DbId;

pub const PROJECT: DbId = 1;
pub const ADMIN: DbId = 1;
pub const JSMITH: DbId = 2;
pub const DLOPPER: DbId = 3;
/// Authenticated but not a member of any project.
pub const OUTSIDER: DbId = 9;

pub const MANAGER: &[Permission] = &[
    Permission::ViewIssues,
    Permission::AddIssueNotes,
    Permission::EditIssueNotes,
    Permission::ViewPrivateNotes,
    Permission::SetNotesPrivate,
];

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_url: "http://tracker.test".to_string(),
        app_title: "Issuelog".to_string(),
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Router plus handles on the in-memory backends it runs on.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryJournalStore>,
    pub oracle: Arc<StaticPermissionOracle>,
    pub config: ServerConfig,
}

impl TestApp {
    /// Bearer token for `user_id`.
    pub fn token_for(&self, user_id: DbId) -> String {
        generate_access_token(user_id, &self.config.jwt).unwrap()
    }

    pub async fn journal_count(&self) -> i64 {
        self.store.count_journals().await.unwrap()
    }
}

/// Seed project 1 with issue 1 carrying two journals:
///
/// - journal 1 by the admin, plain notes;
/// - journal 2 by John Smith, changing the description.
///
/// John Smith holds the manager permissions, Dave Lopper only `view_issues`.
/// The project is public: anonymous callers may view its issues.
pub async fn seed() -> (MemoryJournalStore, StaticPermissionOracle) {
    let store = MemoryJournalStore::new();
    store
        .add_project(Project {
            id: PROJECT,
            identifier: "ecookbook".into(),
            name: "eCookbook".into(),
        })
        .await;
    store
        .add_issue(Issue {
            id: 1,
            project_id: PROJECT,
            subject: "Cannot print recipes".into(),
            description: Some("Unable to print recipes".into()),
            author_id: JSMITH,
            author_name: "John Smith".into(),
            created_at: chrono::Utc::now(),
        })
        .await;
    store.add_user(ADMIN, "Redmine Admin").await;
    store.add_user(DLOPPER, "Dave Lopper").await;

    store
        .create_journal(&NewJournal {
            issue_id: 1,
            user_id: ADMIN,
            notes: "Journal notes".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    store
        .create_journal(&NewJournal {
            issue_id: 1,
            user_id: JSMITH,
            notes: "Some notes with Redmine links: #2, r2.".into(),
            private_notes: false,
            details: vec![NewJournalDetail::attr(
                "description",
                Some("Unable to print recipes"),
                Some("Unable to print cookbooks"),
            )],
        })
        .await
        .unwrap();

    let oracle = StaticPermissionOracle::new();
    oracle.grant(JSMITH, PROJECT, MANAGER).await;
    oracle.grant(DLOPPER, PROJECT, &[Permission::ViewIssues]).await;
    oracle
        .grant(ANONYMOUS_USER_ID, PROJECT, &[Permission::ViewIssues])
        .await;

    (store, oracle)
}

/// Build the full application router over seeded in-memory backends.
///
/// Uses the same `build_app_router` as `main.rs`, so the tests exercise the
/// production middleware stack.
pub async fn build_test_app() -> TestApp {
    let (store, oracle) = seed().await;
    let store = Arc::new(store);
    let oracle = Arc::new(oracle);
    let config = test_config();

    let state = AppState {
        journals: store.clone(),
        permissions: oracle.clone(),
        pool: None,
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        oracle,
        config,
    }
}

/// Withdraw the anonymous grant on the seeded project.
pub async fn make_project_private(app: &TestApp) {
    app.oracle.grant(ANONYMOUS_USER_ID, PROJECT, &[]).await;
}

/// Add a private note by the admin to issue 1.
pub async fn add_private_note(app: &TestApp) -> DbId {
    app.store
        .create_journal(&NewJournal {
            issue_id: 1,
            user_id: ADMIN,
            notes: "Privates notes".into(),
            private_notes: true,
            details: Vec::new(),
        })
        .await
        .unwrap()
        .id
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// GET without credentials.
pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    send(router, Method::GET, uri, None, None).await
}

/// GET with a Bearer token.
pub async fn get_auth(router: &Router, uri: &str, token: &str) -> Response<Body> {
    send(router, Method::GET, uri, Some(token), None).await
}

/// POST a JSON body with a Bearer token.
pub async fn post_json_auth(
    router: &Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(router, Method::POST, uri, Some(token), Some(json)).await
}

/// PUT a JSON body without credentials.
pub async fn put_json(router: &Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(router, Method::PUT, uri, None, Some(json)).await
}

/// PUT a raw `application/json` body with a Bearer token.
pub async fn put_raw_json_auth(
    router: &Router,
    uri: &str,
    raw: &str,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(raw.to_owned()))
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

/// PUT a JSON body with a Bearer token.
pub async fn put_json_auth(
    router: &Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(router, Method::PUT, uri, Some(token), Some(json)).await
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
