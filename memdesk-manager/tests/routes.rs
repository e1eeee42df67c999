use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use memdesk_core::config::{Config, DEFAULT_MAX_CONTENT_LENGTH};
use memdesk_core::{MemoryKind, MemoryLayout};
use memdesk_manager::{router, serve, AppState};
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

struct TestApp {
    _temp_dir: TempDir,
    outside: PathBuf,
    layout: MemoryLayout,
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("memory");
        let outside = temp_dir.path().join("outside.txt");
        std::fs::write(&outside, "do not touch").unwrap();

        let mut config = Config::default();
        config.storage.base_dir = base.to_string_lossy().to_string();
        let layout = MemoryLayout::from_config(&config.storage).unwrap();
        layout.ensure().unwrap();
        let state = AppState::new(config, layout.clone()).unwrap();

        Self {
            _temp_dir: temp_dir,
            outside,
            layout,
            state,
        }
    }

    fn app(&self) -> Router {
        router(self.state.clone())
    }

    fn read(&self, kind: MemoryKind) -> String {
        std::fs::read_to_string(self.layout.path_of(kind)).unwrap()
    }
}

fn form_body(content: &str) -> String {
    format!("content={}", urlencoding::encode(content))
}

fn post_form(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_shows_empty_files_without_placeholder() {
    let app = TestApp::new();

    let response = app.app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(!html.contains("长记忆文件为空"));
    assert!(!html.contains("短记忆文件为空"));
    assert!(html.contains("<pre>\n</pre>"));
    assert!(html.contains(r#"href="/edit/short_memory.txt""#));
    assert!(html.contains(r#"href="/edit/long_memory_buffer.txt""#));
}

#[tokio::test]
async fn test_save_then_index_round_trip() {
    let app = TestApp::new();
    let content = "line one\n<b>bold</b> & \"quoted\"\n第二行";

    let response = app
        .app()
        .oneshot(post_form("/edit/short_memory.txt", form_body(content)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert_eq!(app.read(MemoryKind::Short), content);

    let html = body_text(app.app().oneshot(get("/")).await.unwrap()).await;
    assert!(html.contains("line one\n&lt;b&gt;bold&lt;/b&gt; &amp; \"quoted\"\n第二行"));
}

#[tokio::test]
async fn test_edit_form_prefilled() {
    let app = TestApp::new();
    std::fs::write(app.layout.path_of(MemoryKind::Long), "long <term>").unwrap();

    let response = app
        .app()
        .oneshot(get("/edit/long_memory_buffer.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("编辑文件：long_memory_buffer.txt"));
    assert!(html.contains("long &lt;term&gt;</textarea>"));
}

#[tokio::test]
async fn test_edit_form_for_unknown_file_is_empty() {
    let app = TestApp::new();

    let response = app.app().oneshot(get("/edit/notes.txt")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("编辑文件：notes.txt"));
    assert!(html.contains("...\">\n</textarea>"));
}

#[tokio::test]
async fn test_save_creates_arbitrary_file_in_base() {
    let app = TestApp::new();

    let response = app
        .app()
        .oneshot(post_form("/edit/notes.txt", form_body("scratch")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let written = std::fs::read_to_string(app.layout.directory().join("notes.txt")).unwrap();
    assert_eq!(written, "scratch");
}

#[tokio::test]
async fn test_missing_content_field_writes_empty() {
    let app = TestApp::new();
    std::fs::write(app.layout.path_of(MemoryKind::Short), "old").unwrap();

    let response = app
        .app()
        .oneshot(post_form("/edit/short_memory.txt", String::new()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(app.read(MemoryKind::Short), "");
}

#[tokio::test]
async fn test_content_at_limit_is_accepted() {
    let app = TestApp::new();
    let content = "a".repeat(DEFAULT_MAX_CONTENT_LENGTH);

    let response = app
        .app()
        .oneshot(post_form("/edit/short_memory.txt", form_body(&content)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(app.read(MemoryKind::Short).len(), DEFAULT_MAX_CONTENT_LENGTH);
}

#[tokio::test]
async fn test_content_over_limit_is_rejected() {
    let app = TestApp::new();
    std::fs::write(app.layout.path_of(MemoryKind::Short), "unchanged").unwrap();
    let content = "a".repeat(DEFAULT_MAX_CONTENT_LENGTH + 1);

    let response = app
        .app()
        .oneshot(post_form("/edit/short_memory.txt", form_body(&content)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "内容长度超过限制（100KB）");
    assert_eq!(app.read(MemoryKind::Short), "unchanged");
}

#[tokio::test]
async fn test_content_far_over_limit_is_rejected_with_400() {
    let app = TestApp::new();
    std::fs::write(app.layout.path_of(MemoryKind::Short), "unchanged").unwrap();
    let content = "a".repeat(400 * 1024);

    let response = app
        .app()
        .oneshot(post_form("/edit/short_memory.txt", form_body(&content)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "内容长度超过限制（100KB）");
    assert_eq!(app.read(MemoryKind::Short), "unchanged");
}

#[tokio::test]
async fn test_post_without_form_content_type_writes_empty() {
    let app = TestApp::new();
    std::fs::write(app.layout.path_of(MemoryKind::Short), "old").unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/edit/short_memory.txt")
        .body(Body::from("content=ignored"))
        .unwrap();
    let response = app.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(app.read(MemoryKind::Short), "");
}

#[tokio::test]
async fn test_saving_empty_content_round_trips_as_empty() {
    let app = TestApp::new();
    std::fs::write(app.layout.path_of(MemoryKind::Short), "old").unwrap();

    let response = app
        .app()
        .oneshot(post_form("/edit/short_memory.txt", form_body("")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    let html = body_text(app.app().oneshot(get("/")).await.unwrap()).await;
    assert!(!html.contains("短记忆文件为空"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_saves_to_distinct_files() {
    let app = TestApp::new();

    let mut tasks = Vec::new();
    for i in 0..8 {
        let router = app.app();
        tasks.push(tokio::spawn(async move {
            router
                .oneshot(post_form(
                    &format!("/edit/note_{i}.txt"),
                    form_body(&format!("note {i}")),
                ))
                .await
                .unwrap()
                .status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::FOUND);
    }

    for i in 0..8 {
        let written =
            std::fs::read_to_string(app.layout.directory().join(format!("note_{i}.txt"))).unwrap();
        assert_eq!(written, format!("note {i}"));
    }
}

#[tokio::test]
async fn test_traversal_read_is_denied() {
    let app = TestApp::new();

    let response = app
        .app()
        .oneshot(get("/edit/..%2foutside.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(!html.contains("do not touch"));
}

#[tokio::test]
async fn test_traversal_write_is_denied() {
    let app = TestApp::new();

    let response = app
        .app()
        .oneshot(post_form("/edit/..%2foutside.txt", form_body("pwned")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(std::fs::read_to_string(&app.outside).unwrap(), "do not touch");

    let response = app
        .app()
        .oneshot(post_form(
            "/edit/..%2f..%2f..%2f..%2fetc%2fpasswd",
            form_body("pwned"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_failed_write_is_reported() {
    let app = TestApp::new();

    let response = app
        .app()
        .oneshot(post_form("/edit/missing_dir%2Ffile.txt", form_body("x")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "保存失败");
}

#[tokio::test]
async fn test_index_survives_deleted_file() {
    let app = TestApp::new();
    std::fs::write(app.layout.path_of(MemoryKind::Long), "keep me").unwrap();
    std::fs::remove_file(app.layout.path_of(MemoryKind::Short)).unwrap();

    let response = app.app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("短记忆文件为空"));
    assert!(html.contains("keep me"));
    assert!(app.layout.path_of(MemoryKind::Short).is_file());
}

#[tokio::test]
async fn test_serve_accepts_connections_and_shuts_down() {
    let app = TestApp::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    let server = tokio::spawn(serve(listener, app.state.clone(), shutdown_rx));

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    let response = String::from_utf8_lossy(&response);
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("记忆管理系统"));

    shutdown_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
