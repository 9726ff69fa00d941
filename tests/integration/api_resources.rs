//! Resource wrappers against a mock server: paths, verbs, bodies and decoding

use super::test_utils::client_for;
use now_client::api::{DeploymentContent, Now};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, Now) {
    let server = MockServer::start().await;
    let now = Now::with_client(client_for(&server));
    (server, now)
}

#[tokio::test]
async fn test_list_deployments() {
    let (server, now) = setup().await;
    Mock::given(method("GET"))
        .and(path("/now/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deployments": [
                { "uid": "dpl_1", "host": "app-1.now.sh", "state": "READY" },
                { "uid": "dpl_2", "host": "app-2.now.sh", "state": "BOOTED" }
            ]
        })))
        .mount(&server)
        .await;

    let deployments = now.deployments().list().await.unwrap();
    assert_eq!(deployments.len(), 2);
    assert_eq!(deployments[0].uid, "dpl_1");
    assert_eq!(deployments[1].state, "BOOTED");
}

#[tokio::test]
async fn test_deployment_files_tree() {
    let (server, now) = setup().await;
    Mock::given(method("GET"))
        .and(path("/now/deployments/dpl_1/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "type": "directory",
                "name": "src",
                "children": [
                    { "type": "file", "name": "index.js", "uid": "f1" }
                ]
            },
            { "type": "file", "name": "package.json", "uid": "f2", "version": "1.0.0" }
        ])))
        .mount(&server)
        .await;

    let files = now.deployments().files("dpl_1").await.unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].is_dir());
    match &files[0] {
        DeploymentContent::Directory { children, .. } => {
            assert_eq!(children[0].name(), "index.js");
        }
        other => panic!("expected directory, got {:?}", other),
    }
    match &files[1] {
        DeploymentContent::File { version, .. } => assert_eq!(version.as_deref(), Some("1.0.0")),
        other => panic!("expected file, got {:?}", other),
    }
}

#[tokio::test]
async fn test_alias_and_list_aliases() {
    let (server, now) = setup().await;
    Mock::given(method("POST"))
        .and(path("/now/deployments/dpl_1/aliases"))
        .and(body_json(json!({ "alias": "my-app.now.sh" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": "als_1",
            "alias": "my-app.now.sh",
            "created": "2017-02-01T10:00:00Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/now/deployments/dpl_1/aliases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aliases": [{ "uid": "als_1", "alias": "my-app.now.sh" }]
        })))
        .mount(&server)
        .await;

    let alias = now.deployments().alias("dpl_1", "my-app.now.sh").await.unwrap();
    assert_eq!(alias.uid.as_deref(), Some("als_1"));
    assert!(alias.created.is_some());

    let aliases = now.deployments().list_aliases("dpl_1").await.unwrap();
    assert_eq!(aliases.len(), 1);
    assert_eq!(aliases[0].alias, "my-app.now.sh");
}

#[tokio::test]
async fn test_scale_deployment() {
    let (server, now) = setup().await;
    Mock::given(method("PATCH"))
        .and(path("/now/deployments/dpl_1/instances"))
        .and(body_json(json!({ "min": 1, "max": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": "dpl_1", "host": "app-1.now.sh", "state": "SCALING"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deployment = now.deployments().scale("dpl_1", 1, 3).await.unwrap();
    assert_eq!(deployment.state, "SCALING");
}

#[tokio::test]
async fn test_create_domain() {
    let (server, now) = setup().await;
    Mock::given(method("POST"))
        .and(path("/domains"))
        .and(body_json(json!({ "name": "example.com", "isExternal": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": "dom_1",
            "name": "example.com",
            "verified": false,
            "verifyToken": "tok_abc"
        })))
        .mount(&server)
        .await;

    let domain = now.domains().create("example.com", true).await.unwrap();
    assert_eq!(domain.uid, "dom_1");
    assert!(!domain.verified);
    assert_eq!(domain.verify_token.as_deref(), Some("tok_abc"));
}

#[tokio::test]
async fn test_issue_and_renew_certs() {
    let (server, now) = setup().await;
    Mock::given(method("POST"))
        .and(path("/now/certs"))
        .and(body_json(json!({ "domains": ["example.com"], "renew": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uid": "cert_new" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/now/certs"))
        .and(body_json(json!({ "domains": ["example.com"], "renew": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uid": "cert_renewed" })))
        .mount(&server)
        .await;

    let domains = vec!["example.com".to_string()];
    assert_eq!(now.certs().issue(&domains).await.unwrap().uid, "cert_new");
    assert_eq!(now.certs().renew(&domains).await.unwrap().uid, "cert_renewed");
}

#[tokio::test]
async fn test_list_and_delete_certs() {
    let (server, now) = setup().await;
    Mock::given(method("GET"))
        .and(path("/now/certs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "certificates": [{ "uid": "cert_1", "created": "2017-01-01T00:00:00Z" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/now/certs/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let certs = now.certs().list().await.unwrap();
    assert_eq!(certs[0].uid, "cert_1");
    now.certs().delete("example.com").await.unwrap();
}

#[tokio::test]
async fn test_team_lifecycle() {
    let (server, now) = setup().await;
    Mock::given(method("POST"))
        .and(path("/teams"))
        .and(body_json(json!({ "slug": "my-team" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "team_1", "slug": "my-team"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/teams/team_1"))
        .and(body_json(json!({ "name": "My Team" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/teams/team_1/members"))
        .and(body_json(json!({ "email": "dev@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/teams/team_1/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "uid": "usr_1", "role": "OWNER", "email": "me@example.com", "username": "me" }
        ])))
        .mount(&server)
        .await;

    let team = now.teams().create("my-team").await.unwrap();
    assert_eq!(team.id, "team_1");
    now.teams().rename(&team.id, "My Team").await.unwrap();
    now.teams().invite(&team.id, "dev@example.com").await.unwrap();

    let members = now.teams().members(&team.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].role, "OWNER");
}

#[tokio::test]
async fn test_current_plan() {
    let (server, now) = setup().await;
    Mock::given(method("GET"))
        .and(path("/plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subscription": {
                "id": "sub_1",
                "plan": {
                    "id": "premium",
                    "name": "Premium",
                    "amount": 1500,
                    "currency": "usd",
                    "interval": "month",
                    "interval_count": 1
                }
            }
        })))
        .mount(&server)
        .await;

    let subscription = now.plans().current().await.unwrap();
    assert_eq!(subscription.id, "sub_1");
    assert_eq!(subscription.plan.name, "Premium");
    assert_eq!(subscription.plan.amount, 1500);
}
