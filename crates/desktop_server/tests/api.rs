use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use desktop_server::{
    blob::{BlobError, BlobStore},
    build_router,
    notion::{AccountSource, AccountsFuture, UpstreamError},
    seed::seed,
    store::Repository,
    AppState,
};
use http_body_util::BodyExt;
use platform_host::{AccountRow, AppRecord, ConfigMap, LOCK_PASSWORD_KEY, WALLPAPER_KEY};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

const BLOB_BASE: &str = "/api/blobs";

#[derive(Default)]
struct RecordingBlobs {
    stored: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
}

impl BlobStore for RecordingBlobs {
    fn put(&self, filename: &str, _bytes: &[u8]) -> Result<String, BlobError> {
        let url = format!("{BLOB_BASE}/{filename}");
        self.stored.lock().unwrap().push(url.clone());
        Ok(url)
    }

    fn owns(&self, url: &str) -> bool {
        url.starts_with(BLOB_BASE)
    }

    fn delete(&self, url: &str) -> Result<bool, BlobError> {
        self.deleted.lock().unwrap().push(url.to_string());
        Ok(true)
    }
}

struct StaticAccounts(Result<Vec<AccountRow>, UpstreamError>);

impl AccountSource for StaticAccounts {
    fn fetch_accounts(&self) -> AccountsFuture<'_> {
        let result = self.0.clone();
        Box::pin(async move { result })
    }
}

struct Harness {
    router: Router,
    repo: Arc<Repository>,
    blobs: Arc<RecordingBlobs>,
}

fn harness(accounts: Option<Arc<dyn AccountSource>>) -> Harness {
    let repo = Arc::new(Repository::in_memory());
    seed(&repo, "1234").expect("seed");
    let blobs = Arc::new(RecordingBlobs::default());
    let router = build_router(AppState {
        repo: repo.clone(),
        blobs: blobs.clone(),
        accounts,
    });
    Harness {
        router,
        repo,
        blobs,
    }
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn created_apps_are_listed_with_defaults() {
    let h = harness(None);

    let (status, created) = send(
        &h.router,
        Method::POST,
        "/api/apps",
        Some(json!({ "name": "Docs", "launchUrl": "https://docs.rs", "icon": "search" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created: AppRecord = serde_json::from_value(created).expect("app record");
    assert_eq!((created.grid_row, created.grid_col), (1, 1));

    let (status, listed) = send(&h.router, Method::GET, "/api/apps", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<AppRecord> = serde_json::from_value(listed).expect("app list");
    assert_eq!(listed.len(), 4);
    assert!(listed.iter().any(|app| app.id == created.id));
}

#[tokio::test]
async fn create_without_name_is_rejected() {
    let h = harness(None);
    let (status, body) = send(
        &h.router,
        Method::POST,
        "/api/apps",
        Some(json!({ "launchUrl": "https://docs.rs", "icon": "search" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name is required");
}

#[tokio::test]
async fn patching_an_unknown_app_is_not_found() {
    let h = harness(None);
    let (status, _) = send(
        &h.router,
        Method::PATCH,
        "/api/apps/missing",
        Some(json!({ "gridRow": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_moves_an_app() {
    let h = harness(None);
    let id = h.repo.list_apps().expect("apps")[0].id.clone();

    let (status, body) = send(
        &h.router,
        Method::PATCH,
        &format!("/api/apps/{id}"),
        Some(json!({ "gridRow": 4, "gridCol": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!((body["gridRow"].clone(), body["gridCol"].clone()), (json!(4), json!(7)));
}

#[tokio::test]
async fn deleting_an_app_with_a_named_icon_leaves_blobs_alone() {
    let h = harness(None);
    let id = h.repo.list_apps().expect("apps")[0].id.clone();

    let (status, body) = send(&h.router, Method::DELETE, &format!("/api/apps/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert!(h.blobs.deleted.lock().unwrap().is_empty());
    assert_eq!(h.repo.get_app(&id).expect("get"), None);
}

#[tokio::test]
async fn deleting_an_app_with_an_external_icon_url_leaves_blobs_alone() {
    let h = harness(None);
    let (_, created) = send(
        &h.router,
        Method::POST,
        "/api/apps",
        Some(json!({
            "name": "Cdn",
            "launchUrl": "https://example.com",
            "icon": "https://cdn.test/x.png",
        })),
    )
    .await;
    let id = created["id"].as_str().expect("id").to_string();

    let (status, body) = send(&h.router, Method::DELETE, &format!("/api/apps/{id}"), None).await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "success": true })));
    assert!(h.blobs.deleted.lock().unwrap().is_empty());
    assert_eq!(h.repo.get_app(&id).expect("get"), None);
}

#[tokio::test]
async fn deleting_an_app_with_an_uploaded_icon_removes_the_blob() {
    let h = harness(None);
    let icon = format!("{BLOB_BASE}/abc-logo.png");
    let (_, created) = send(
        &h.router,
        Method::POST,
        "/api/apps",
        Some(json!({ "name": "Logo", "launchUrl": "https://example.com", "icon": icon.clone() })),
    )
    .await;
    let id = created["id"].as_str().expect("id").to_string();

    let (status, _) = send(&h.router, Method::DELETE, &format!("/api/apps/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(*h.blobs.deleted.lock().unwrap(), vec![icon]);
}

#[tokio::test]
async fn configs_hide_the_lock_password() {
    let h = harness(None);
    let (status, body) = send(&h.router, Method::GET, "/api/configs", None).await;
    assert_eq!(status, StatusCode::OK);
    let configs: ConfigMap = serde_json::from_value(body).expect("config map");
    assert!(configs.contains_key(WALLPAPER_KEY));
    assert!(!configs.contains_key(LOCK_PASSWORD_KEY));
}

#[tokio::test]
async fn config_patch_requires_an_id() {
    let h = harness(None);
    let (status, _) = send(
        &h.router,
        Method::PATCH,
        "/api/configs",
        Some(json!({ "id": "", "value": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &h.router,
        Method::PATCH,
        "/api/configs",
        Some(json!({ "id": WALLPAPER_KEY, "value": "https://img.test/w.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": WALLPAPER_KEY, "value": "https://img.test/w.png" }));
}

#[tokio::test]
async fn verify_accepts_only_the_seeded_password() {
    let h = harness(None);
    let (status, body) = send(
        &h.router,
        Method::POST,
        "/api/auth/verify",
        Some(json!({ "password": "1234" })),
    )
    .await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "success": true })));

    let (status, body) = send(
        &h.router,
        Method::POST,
        "/api/auth/verify",
        Some(json!({ "password": "wrong" })),
    )
    .await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "success": false })));
}

#[tokio::test]
async fn verify_without_password_is_a_bad_request() {
    let h = harness(None);
    let (status, body) = send(
        &h.router,
        Method::POST,
        "/api/auth/verify",
        Some(json!({ "password": "" })),
    )
    .await;
    assert_eq!(
        (status, body),
        (StatusCode::BAD_REQUEST, json!({ "success": false }))
    );
}

#[tokio::test]
async fn accounts_require_configuration() {
    let h = harness(None);
    let (status, body) = send(&h.router, Method::GET, "/api/skt", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Notion configuration is missing");
}

#[tokio::test]
async fn accounts_are_proxied_and_upstream_errors_pass_through() {
    let row = AccountRow {
        id: "p1".to_string(),
        name: "홍길동".to_string(),
        enroll_date: "2019/03/02".to_string(),
        account: "hong01".to_string(),
        pw: "-".to_string(),
        years: 5.0,
        last_activation_date: "-".to_string(),
        contract_end_date: "-".to_string(),
        memo: "-".to_string(),
    };
    let h = harness(Some(Arc::new(StaticAccounts(Ok(vec![row.clone()])))));
    let (status, body) = send(&h.router, Method::GET, "/api/skt", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows: Vec<AccountRow> = serde_json::from_value(body).expect("rows");
    assert_eq!(rows, vec![row]);

    let failing = harness(Some(Arc::new(StaticAccounts(Err(UpstreamError {
        message: "Could not find database".to_string(),
        code: Some("object_not_found".to_string()),
    })))));
    let (status, body) = send(&failing.router, Method::GET, "/api/skt", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Could not find database", "details": "object_not_found" })
    );
}

#[tokio::test]
async fn upload_returns_the_public_url() {
    let h = harness(None);
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/upload/logo.png")
        .body(Body::from(&b"png-bytes"[..]))
        .expect("request");
    let response = h.router.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body, json!({ "url": "/api/blobs/logo.png" }));
    assert_eq!(
        *h.blobs.stored.lock().unwrap(),
        vec!["/api/blobs/logo.png".to_string()]
    );
}
