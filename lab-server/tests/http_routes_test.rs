//! HTTP route tests against a server bound to an ephemeral port

use async_trait::async_trait;
use lab_engine::{LabResult, ProcessOutput, ProcessRunner};
use lab_server::{build_router, AppState, LabConfig};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;

#[derive(Default)]
struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingRunner {
    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, _program: &str, args: &[String]) -> LabResult<ProcessOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        Ok(ProcessOutput {
            stdout: format!("reply from <{}>\n", args.last().cloned().unwrap_or_default()),
            exit_code: Some(0),
            ..Default::default()
        })
    }
}

struct TestServer {
    base_url: String,
    runner: Arc<RecordingRunner>,
    client: reqwest::Client,
    _content: TempDir,
}

fn content_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("vulnerabilities/exec/help")).unwrap();
    fs::create_dir_all(root.join("vulnerabilities/exec/source")).unwrap();
    fs::write(root.join("vulnerabilities/exec/help/help.html"), "<p>About command injection</p>").unwrap();
    for level in ["low", "medium", "high", "impossible"] {
        fs::write(
            root.join(format!("vulnerabilities/exec/source/{}.rs", level)),
            format!("let level = \"{}\";\nhtml += &format!(\"<pre>{{}}</pre>\", out);\n", level),
        )
        .unwrap();
    }
    dir
}

async fn start_server() -> TestServer {
    let content = content_tree();
    let config = LabConfig {
        content_root: content.path().to_path_buf(),
        ..LabConfig::default()
    };

    let runner = Arc::new(RecordingRunner::default());
    let state = AppState::with_runner(&config, runner.clone()).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        runner,
        client: reqwest::Client::new(),
        _content: content,
    }
}

impl TestServer {
    async fn get(&self, path: &str) -> (u16, String) {
        let response = self.client.get(format!("{}{}", self.base_url, path)).send().await.unwrap();
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }

    async fn submit(&self, security: &str, ip: &str) -> String {
        self.client
            .post(format!("{}/vulnerabilities/exec/?security={}", self.base_url, security))
            .form(&[("ip", ip), ("Submit", "Submit")])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_index_and_health() {
    let server = start_server().await;

    let (status, body) = server.get("/").await;
    assert_eq!(status, 200);
    assert!(body.contains("Command Injection"));

    let (status, body) = server.get("/health").await;
    assert_eq!(status, 200);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["overall_status"], "Healthy");
    assert_eq!(health["content_root"], "Up");
}

#[tokio::test]
async fn test_exec_form_does_not_run_without_submit() {
    let server = start_server().await;

    let (status, body) = server.get("/vulnerabilities/exec/?security=high&ip=8.8.8.8").await;
    assert_eq!(status, 200);
    assert!(body.contains("name=\"Submit\""));
    assert!(server.runner.calls().is_empty());
}

#[tokio::test]
async fn test_exec_high_runs_ip_and_escapes_output() {
    let server = start_server().await;

    let body = server.submit("high", "8.8.8.8").await;
    assert!(body.contains("reply from &lt;8.8.8.8&gt;"));
    assert_eq!(server.runner.calls().len(), 1);
}

#[tokio::test]
async fn test_exec_high_rejects_injection() {
    let server = start_server().await;

    let body = server.submit("high", "8.8.8.8; rm -rf /").await;
    assert!(body.contains("<pre>Invalid target</pre>"));
    assert!(server.runner.calls().is_empty());
}

#[tokio::test]
async fn test_exec_medium_passes_single_argument() {
    let server = start_server().await;

    server.submit("medium", "8.8.8.8&&id").await;
    let calls = server.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 3);
    assert_eq!(calls[0][2], "8.8.8.8id");
}

#[tokio::test]
async fn test_exec_target_falls_back_to_query() {
    let server = start_server().await;

    server
        .client
        .post(format!("{}/vulnerabilities/exec/?security=impossible&ip=127.0.0.1", server.base_url))
        .form(&[("Submit", "Submit")])
        .send()
        .await
        .unwrap();
    assert_eq!(server.runner.calls()[0][2], "127.0.0.1");
}

#[tokio::test]
async fn test_view_help() {
    let server = start_server().await;

    let (_, body) = server.get("/vulnerabilities/view_help?id=exec&security=low&locale=en").await;
    assert!(body.contains("<p>About command injection</p>"));

    let (_, body) = server
        .get("/vulnerabilities/view_help?id=../../etc/passwd&security=low&locale=en")
        .await;
    assert!(body.contains("<p>Not Found</p>"));

    let (_, body) = server.get("/vulnerabilities/view_help?id=exec&security=low").await;
    assert!(body.contains("<p>Not Found</p>"));
}

#[tokio::test]
async fn test_view_source() {
    let server = start_server().await;

    let (status, body) = server.get("/vulnerabilities/view_source?id=exec&security=foo").await;
    assert_eq!(status, 200);
    assert!(body.contains("<h1>Command Injection Source</h1>"));
    assert!(body.contains("vulnerabilities/exec/source/low.rs"));
    assert!(body.contains("print"));
    assert!(!body.contains("format"));
    assert!(body.contains("Compare All Levels"));

    let (_, body) = server.get("/vulnerabilities/view_source?id=bogus&security=low").await;
    assert!(body.contains("Unknown Vulnerability Source"));

    let (_, body) = server.get("/vulnerabilities/view_source?id=exec").await;
    assert!(body.contains("<p>Not found</p>"));
}

#[tokio::test]
async fn test_view_source_all() {
    let server = start_server().await;

    let (_, body) = server.get("/vulnerabilities/view_source_all?id=exec").await;
    for heading in ["Low Command", "Medium Command", "High Command", "Impossible Command"] {
        assert!(body.contains(heading), "missing {}", heading);
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = start_server().await;
    let (status, body) = server.get("/vulnerabilities/sqli/").await;
    assert_eq!(status, 404);
    assert!(body.contains("<p>Not Found</p>"));
}
