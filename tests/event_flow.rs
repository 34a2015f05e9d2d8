use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wip_check::github::{GitHubClient, PullRequestEvent};
use wip_check::wip::{dispatch_event, EventOutcome, Location};

const CONFIG_PATH: &str = "/repos/octo/hello/contents/.github/apps/wip.yml";
const COMMITS_PATH: &str = "/repos/octo/hello/pulls/12/commits";
const CHECK_RUNS_PATH: &str = "/repos/octo/hello/commits/cafebabe/check-runs";
const CREATE_PATH: &str = "/repos/octo/hello/check-runs";

fn event(action: &str, title: &str, body: Option<&str>, labels: &[&str]) -> PullRequestEvent {
    let labels: Vec<Value> = labels.iter().map(|name| json!({"name": name})).collect();
    serde_json::from_value(json!({
        "action": action,
        "pull_request": {
            "number": 12,
            "title": title,
            "body": body,
            "labels": labels,
            "head": {"sha": "cafebabe", "ref": "feature"}
        },
        "repository": {"name": "hello", "owner": {"login": "octo"}}
    }))
    .unwrap()
}

async fn mount_config(server: &MockServer, config: &str) {
    Mock::given(method("GET"))
        .and(path(CONFIG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "encoding": "base64",
            "content": STANDARD.encode(config),
        })))
        .mount(server)
        .await;
}

async fn mount_missing_config(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(CONFIG_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

async fn mount_check_runs(server: &MockServer, runs: Value) {
    Mock::given(method("GET"))
        .and(path(CHECK_RUNS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": runs.as_array().map_or(0, Vec::len),
            "check_runs": runs,
        })))
        .mount(server)
        .await;
}

async fn mount_create(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(times)
        .mount(server)
        .await;
}

async fn posted_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.method.as_str() == "POST")
        .map(|request| request.body_json::<Value>().unwrap())
        .collect()
}

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(&server.uri(), "test-token".to_string()).unwrap()
}

#[tokio::test]
async fn wip_title_publishes_in_progress_run() {
    let server = MockServer::start().await;
    mount_missing_config(&server).await;
    mount_check_runs(&server, json!([])).await;
    mount_create(&server, 1).await;

    let outcome = dispatch_event(&client(&server), &event("opened", "[WIP] parser", None, &[])).await;

    let status = match outcome {
        EventOutcome::Published(status) => status,
        other => panic!("expected a published status, got {other:?}"),
    };
    assert!(status.wip);
    assert_eq!(status.manual, Some(false));

    let bodies = posted_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["name"], "WIP");
    assert_eq!(bodies[0]["head_sha"], "cafebabe");
    assert_eq!(bodies[0]["status"], "in_progress");
    assert!(bodies[0].get("conclusion").is_none());
    assert_eq!(bodies[0]["output"]["title"], "Work in progress");
}

#[tokio::test]
async fn commit_subjects_fetched_only_when_configured() {
    let server = MockServer::start().await;
    mount_config(&server, "terms: [wip]\nlocations: [title, label]\n").await;
    Mock::given(method("GET"))
        .and(path(COMMITS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    mount_check_runs(&server, json!([])).await;
    mount_create(&server, 1).await;

    let outcome = dispatch_event(&client(&server), &event("edited", "parser", None, &[])).await;

    assert!(matches!(outcome, EventOutcome::Published(ref status) if !status.wip));
}

#[tokio::test]
async fn commit_subject_match() {
    let server = MockServer::start().await;
    mount_config(
        &server,
        "- terms: [rfc]\n  locations: title\n- terms: [fixup!]\n  locations: [commit]\n",
    )
    .await;
    Mock::given(method("GET"))
        .and(path(COMMITS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"commit": {"message": "feat: parser"}},
            {"commit": {"message": "fixup! feat: parser\n\nsquash me"}},
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_check_runs(&server, json!([])).await;
    mount_create(&server, 1).await;

    let outcome =
        dispatch_event(&client(&server), &event("synchronize", "parser", None, &[])).await;

    let status = match outcome {
        EventOutcome::Published(status) => status,
        other => panic!("expected a published status, got {other:?}"),
    };
    let matched = status.matched.unwrap();
    assert_eq!(matched.location, Location::Commit);
    assert_eq!(matched.text, "fixup! feat: parser");
    assert_eq!(matched.term, "fixup!");
    assert_eq!(status.manual, Some(true));
}

#[tokio::test]
async fn unchanged_status_is_not_published() {
    let server = MockServer::start().await;
    mount_missing_config(&server).await;
    mount_check_runs(
        &server,
        json!([{"conclusion": null, "output": {"title": "Work in progress"}}]),
    )
    .await;
    mount_create(&server, 0).await;

    let outcome =
        dispatch_event(&client(&server), &event("labeled", "parser", None, &["do-not-merge"])).await;

    assert!(matches!(outcome, EventOutcome::Unchanged(ref status) if status.wip));
}

#[tokio::test]
async fn override_phrase_publishes_override_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONFIG_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;
    mount_check_runs(
        &server,
        json!([{"conclusion": "success", "output": {"title": "Ready for review"}}]),
    )
    .await;
    mount_create(&server, 1).await;

    let outcome = dispatch_event(
        &client(&server),
        &event(
            "edited",
            "WIP: parser",
            Some("Good to go.\n\n@WIP Ready For Review"),
            &["wip"],
        ),
    )
    .await;

    let status = match outcome {
        EventOutcome::Published(status) => status,
        other => panic!("expected a published status, got {other:?}"),
    };
    assert!(!status.wip);
    assert!(status.is_override());

    let bodies = posted_bodies(&server).await;
    assert_eq!(bodies[0]["status"], "completed");
    assert_eq!(bodies[0]["conclusion"], "success");
    assert_eq!(bodies[0]["output"]["title"], "Ready for review (override)");
}

#[tokio::test]
async fn api_failure_is_swallowed() {
    let server = MockServer::start().await;
    mount_missing_config(&server).await;
    Mock::given(method("GET"))
        .and(path(CHECK_RUNS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    mount_create(&server, 0).await;

    let outcome = dispatch_event(&client(&server), &event("opened", "parser", None, &[])).await;

    match outcome {
        EventOutcome::Failed(message) => assert!(message.contains("HTTP 500"), "{message}"),
        other => panic!("expected a failure, got {other:?}"),
    }
}

#[tokio::test]
async fn closed_action_is_ignored() {
    let server = MockServer::start().await;
    mount_create(&server, 0).await;

    let outcome = dispatch_event(&client(&server), &event("closed", "WIP", None, &[])).await;

    assert_eq!(outcome, EventOutcome::Ignored("closed".to_string()));
    assert!(server.received_requests().await.unwrap().is_empty());
}
