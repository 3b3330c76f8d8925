mod common;

use async_trait::async_trait;
use hdock_compile::{CompileError, CompileOptions, Compiler};
use hdock_http::{ClientOptions, Fetch, FetchError, HttpClient};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RANKED: &str = "1 -250.13 0.8911 45.21\n2 -240.02 0.8702 50.10\n";

fn options() -> CompileOptions {
    CompileOptions {
        pause: Duration::ZERO,
        ..CompileOptions::default()
    }
}

fn http_compiler() -> Compiler<HttpClient> {
    let client = HttpClient::new(ClientOptions {
        timeout: Duration::from_secs(2),
        ..ClientOptions::default()
    })
    .expect("client");
    Compiler::new(client, options())
}

fn write_list(tmp: &TempDir, body: &str) -> PathBuf {
    let p = tmp.path().join("hdock_urls.txt");
    std::fs::write(&p, body).expect("write list");
    p
}

#[tokio::test]
async fn malformed_line_is_skipped_and_good_job_written() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/1ab2/ranked_poses.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RANKED))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let input = write_list(
        &tmp,
        &format!("# complexes\n1ab2 {}/data/1ab2\n3cd4\n", server.uri()),
    );
    let output = tmp.path().join("compiled.xlsx");

    let summary = http_compiler().compile(&input, &output).await.expect("compile");
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].line, 3);
    assert!(summary.skipped[0].reason.starts_with("bad format"));
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 0);
    assert!(output.exists());

    // Only the well-formed job reached the server.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn no_successful_job_writes_nothing() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    let tmp = TempDir::new().unwrap();
    let input = write_list(
        &tmp,
        &format!("a1 {0}/data/a1/\nb2 {0}/data/b2/\n", server.uri()),
    );
    let output = tmp.path().join("compiled.xlsx");

    let err = http_compiler().compile(&input, &output).await.unwrap_err();
    assert!(matches!(err, CompileError::NoOutput));
    assert!(!output.exists());
    // Every candidate of both jobs was tried.
    assert_eq!(server.received_requests().await.unwrap().len(), 12);
}

#[tokio::test]
async fn failing_job_does_not_stop_the_next() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/good/ranked.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RANKED))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let input = write_list(
        &tmp,
        &format!("bad {0}/data/bad/\ngood {0}/data/good/\n", server.uri()),
    );
    let output = tmp.path().join("compiled.xlsx");

    let summary = http_compiler().compile(&input, &output).await.expect("compile");
    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert!(output.exists());
}

#[tokio::test]
async fn missing_job_list_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = http_compiler()
        .compile(&tmp.path().join("absent.txt"), &tmp.path().join("out.xlsx"))
        .await
        .unwrap_err();
    assert!(matches!(err, CompileError::Io { .. }));
}

struct AlwaysRanked;

#[async_trait]
impl Fetch for AlwaysRanked {
    async fn fetch(&self, _url: &Url) -> Result<String, FetchError> {
        Ok(RANKED.to_string())
    }
}

#[tokio::test]
async fn pause_follows_every_job() {
    let compiler = Compiler::new(
        AlwaysRanked,
        CompileOptions {
            pause: Duration::from_millis(60),
            ..CompileOptions::default()
        },
    );
    let list = hdock_compile::parse_job_list(
        "a http://h.example/a/\nb http://h.example/b/\nc http://h.example/c/\n",
    );

    let started = Instant::now();
    let blocks = compiler.collect(&list.jobs).await;
    assert_eq!(blocks.len(), 3);
    assert!(started.elapsed() >= Duration::from_millis(180));
    let ids: Vec<&str> = blocks.iter().map(|b| b.complex_id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}
