//! Full deploy against a mock server: create, then upload only missing content

use super::test_utils::{client_for, write_file};
use now_client::deploy::{deploy, prepare, DeployOptions};
use now_client::upload::{HEADER_DEPLOYMENT_ID, HEADER_FILE, HEADER_SHA, HEADER_SIZE, SYNC_ENDPOINT};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HELLO_SHA: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";
const WORLD_SHA: &str = "7c211433f02071597741e6ff5a8ea34789abbf43";

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", "hello");
    write_file(temp.path(), "b.txt", "hello");
    write_file(temp.path(), "c.txt", "world");
    write_file(temp.path(), ".git/HEAD", "ref: refs/heads/main");
    temp
}

#[tokio::test]
async fn test_deploy_uploads_only_missing_groups() {
    let temp = project();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/now/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deploymentId": "dpl_42",
            "url": "app-42.now.sh",
            "missing": [HELLO_SHA]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(SYNC_ENDPOINT))
        .and(header(HEADER_DEPLOYMENT_ID, "dpl_42"))
        .and(header(HEADER_SHA, HELLO_SHA))
        .and(header(HEADER_SIZE, "5"))
        .and(body_string("hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = deploy(&client, temp.path(), &DeployOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.deployment.deployment_id, "dpl_42");
    assert_eq!(outcome.uploaded, vec![HELLO_SHA.to_string()]);
    assert_eq!(outcome.manifest.len(), 2);

    let requests = server.received_requests().await.unwrap();
    let create: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(create["deploymentType"], "STATIC");
    let files: Vec<&str> = create["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["file"].as_str().unwrap())
        .collect();
    assert_eq!(files.len(), 3);
    assert!(!files.iter().any(|f| f.starts_with(".git")));

    let upload = &requests[1];
    assert_eq!(
        upload.headers.get(HEADER_FILE).unwrap().to_str().unwrap(),
        "a.txt,b.txt"
    );
}

#[tokio::test]
async fn test_nothing_missing_means_no_uploads() {
    let temp = project();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/now/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deploymentId": "dpl_43",
            "url": "app-43.now.sh",
            "missing": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SYNC_ENDPOINT))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = deploy(&client, temp.path(), &DeployOptions::default())
        .await
        .unwrap();
    assert!(outcome.uploaded.is_empty());
}

#[tokio::test]
async fn test_failed_upload_surfaces_error() {
    let temp = project();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/now/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deploymentId": "dpl_44",
            "missing": [WORLD_SHA]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SYNC_ENDPOINT))
        .respond_with(ResponseTemplate::new(413).set_body_json(json!({
            "error": { "code": "too_large", "message": "File too large" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = deploy(&client, temp.path(), &DeployOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 413);
    assert_eq!(err.code(), "too_large");
}

#[test]
fn test_prepare_honors_extra_ignore_and_name() {
    let temp = project();
    let options = DeployOptions {
        name: Some("site".to_string()),
        extra_ignore: vec!["c.txt".to_string()],
        ..DeployOptions::default()
    };
    let prepared = prepare(temp.path(), &options).unwrap();
    assert_eq!(prepared.manifest.len(), 1);

    let request = prepared.request(&options);
    assert_eq!(request.name.as_deref(), Some("site"));
    assert_eq!(request.files.len(), 2);
}
