use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use excuse_gen::cache::InMemoryCache;
use excuse_gen::config::Config;
use excuse_gen::errors::UploadError;
use excuse_gen::render::Renderer;
use excuse_gen::services::ExcuseService;
use excuse_gen::upload::Uploader;
use excuse_gen::web::WebServer;

mod common;

struct CountingUploader {
    calls: AtomicUsize,
}

impl CountingUploader {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Uploader for CountingUploader {
    async fn upload(&self, _image_path: &Path) -> Result<String, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("https://i.imgur.com/hosted.png".to_string())
    }
}

fn test_router(template: PathBuf, font: PathBuf, uploader: Arc<CountingUploader>) -> Router {
    let service = ExcuseService::new(
        Renderer::new(template, font),
        Arc::new(InMemoryCache::new()),
        uploader,
    );
    let config = Config::default();
    WebServer::new(&config, service)
        .expect("router construction failed")
        .router()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get("location")
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, location, body)
}

#[tokio::test]
async fn health_endpoint_answers() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(
        dir.path().join("absent.png"),
        dir.path().join("absent.ttf"),
        CountingUploader::new(),
    );

    let (status, _, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn captions_outside_the_charset_are_unroutable() {
    let dir = tempfile::tempdir().unwrap();
    let uploader = CountingUploader::new();
    let app = test_router(
        dir.path().join("absent.png"),
        dir.path().join("absent.ttf"),
        uploader.clone(),
    );

    // '$', '_' and '.' are all outside [a-zA-Z0-9 !]
    for uri in ["/compil%24ing/ok", "/under_score/ok", "/ok/v1.2"] {
        let (status, _, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {uri} should 404");
    }
    assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn render_failure_collapses_to_a_bare_500() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(
        dir.path().join("absent.png"),
        dir.path().join("absent.ttf"),
        CountingUploader::new(),
    );

    let (status, _, body) = get(&app, "/compiling/compiling%20my%20code").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty(), "error detail must not leak to the client");
}

#[tokio::test]
async fn excuse_route_redirects_and_caches() {
    let Some(font) = common::find_font() else {
        eprintln!("skipping: no TrueType font available on this host");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let template = common::write_template(dir.path());
    let uploader = CountingUploader::new();
    let app = test_router(template, font, uploader.clone());

    let (status, location, _) = get(&app, "/compiling/compiling%20my%20code").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("https://i.imgur.com/hosted.png"));

    let (status, second_location, _) = get(&app, "/compiling/compiling%20my%20code").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(second_location, location);
    assert_eq!(uploader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn exclamation_and_digits_are_valid_captions() {
    let Some(font) = common::find_font() else {
        eprintln!("skipping: no TrueType font available on this host");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let template = common::write_template(dir.path());
    let app = test_router(template, font, CountingUploader::new());

    let (status, location, _) = get(&app, "/go!/rewriting%20it%20in%20rust%202%20times").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert!(location.is_some());
}
