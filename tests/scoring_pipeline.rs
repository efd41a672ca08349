use chrono::{NaiveDate, NaiveDateTime};
use gamification::analyze::{Area, Dashboard, DashboardState, Period, ViewState};
use gamification::clickup::{ClickUpClient, PageProgress};
use gamification::error::{Error, FetchError};
use gamification::model::{AppConfig, RawTask, ScoredRecord, DEFAULT_MONTHLY_GOAL};
use gamification::pipeline::{fetch_snapshot, score_snapshot};
use gamification::report::MarkdownReport;
use httpmock::prelude::*;
use serde_json::json;
use std::fs;

// 2025-03-14T23:30:00Z and 2025-03-02T10:00:00Z
const MARCH_14: i64 = 1_741_995_000_000;
const MARCH_2: i64 = 1_740_909_600_000;

fn silent<'a>(_: &str) -> PageProgress<'a> {
    Box::new(|_| {})
}

fn config(lists: &[&str]) -> AppConfig {
    AppConfig {
        clickup_token: Some("pk_test".to_string()),
        list_ids: lists.iter().map(|l| l.to_string()).collect(),
        ..AppConfig::default()
    }
}

fn mid_march() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 20)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

#[tokio::test]
async fn fetch_score_and_report() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/list/content/task");
            then.status(200).json_body(json!({
                "tasks": [
                    {
                        "id": "1",
                        "name": "Fix urgent bug",
                        "assignees": [{"username": "Ana"}, {"username": "Bea"}],
                        "tags": [],
                        "date_closed": MARCH_14.to_string()
                    },
                    {
                        "id": "2",
                        "name": "Post sobre renovação",
                        "assignees": [{"username": "Bea"}],
                        "tags": [{"name": "Renovação"}],
                        "date_closed": MARCH_2.to_string()
                    }
                ],
                "last_page": true
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/list/video/task");
            then.status(200).json_body(json!({
                "tasks": [
                    {
                        "id": "3",
                        "name": "Edit video",
                        "assignees": [],
                        "tags": [{"name": "Video"}],
                        "date_closed": MARCH_2.to_string()
                    },
                    {
                        "id": "4",
                        "name": "Still open",
                        "assignees": [{"username": "Caio"}],
                        "tags": [],
                        "date_closed": null
                    }
                ],
                "last_page": true
            }));
        })
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let tasks_path = dir.path().join("clickup_tasks.json");
    let rules_path = dir.path().join("pontuacoes.json");
    let records_path = dir.path().join("processed_tasks.json");
    fs::write(&rules_path, r#"{"urgent": 10, "bug": 5, "renovação": 4}"#).expect("rules written");

    let config = config(&["content", "video"]);
    let client = ClickUpClient::new(server.base_url(), "pk_test").expect("client builds");
    let fetched = fetch_snapshot(&client, &config, &tasks_path, silent)
        .await
        .expect("fetch succeeds");
    assert_eq!(fetched, 4);

    let outcome = score_snapshot(&config, &rules_path, &tasks_path, &records_path)
        .expect("scoring succeeds");
    assert_eq!(outcome.records, 3);

    let records = ScoredRecord::from_config(&records_path).expect("records load");
    let points = records
        .iter()
        .map(|r| (r.responsavel.as_str(), r.pontos))
        .collect::<Vec<_>>();
    assert_eq!(points, [("Ana", 10), ("Bea", 10), ("Bea", 4)]);
    assert_eq!(records[0].data, NaiveDate::from_ymd_opt(2025, 3, 14));

    let dashboard = Dashboard::build(
        &records,
        ViewState::new(Period::CurrentMonth, Area::All),
        mid_march(),
        DEFAULT_MONTHLY_GOAL,
    );
    assert_eq!(dashboard.state, DashboardState::Ready);
    assert_eq!(dashboard.podium()[0].responsavel, "Bea");
    assert_eq!(dashboard.podium()[0].pontos, 14);
    assert_eq!(dashboard.aggregation.metrics.total_points, 24);

    let accentless = dashboard.view.with_area(Area::Tag("renovacao".into()));
    let filtered = Dashboard::build(&records, accentless, mid_march(), DEFAULT_MONTHLY_GOAL);
    assert_eq!(filtered.state, DashboardState::EmptyDataWarning);

    let exact = dashboard.view.with_area(Area::Tag("Renovação".into()));
    let filtered = Dashboard::build(&records, exact, mid_march(), DEFAULT_MONTHLY_GOAL);
    assert_eq!(filtered.aggregation.metrics.total_points, 4);

    let report_path = dir.path().join("dashboard.md");
    dashboard.report_create(&report_path).expect("report written");
    let report = fs::read_to_string(&report_path).expect("report readable");
    assert!(report.contains("🥇 **Bea**"));
}

#[tokio::test]
async fn failed_fetch_keeps_previous_snapshot() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/list/ok/task");
            then.status(200).json_body(json!({"tasks": [], "last_page": true}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/list/down/task");
            then.status(503).body("unavailable");
        })
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let tasks_path = dir.path().join("clickup_tasks.json");
    let previous = vec![RawTask::new("old", "Old task", vec!["Dev"], vec!["Ana"], Some(MARCH_2))];
    RawTask::save(&previous, &tasks_path).expect("previous snapshot written");

    let client = ClickUpClient::new(server.base_url(), "pk_test").expect("client builds");
    let err = fetch_snapshot(&client, &config(&["ok", "down"]), &tasks_path, silent)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Fetch(FetchError::Status { status: 503, .. })
    ));

    let batch = RawTask::from_config(&tasks_path).expect("snapshot still readable");
    assert_eq!(batch.tasks, previous);
}

#[tokio::test]
async fn fetch_requires_configured_lists() {
    let dir = tempfile::tempdir().expect("temp dir");
    let client = ClickUpClient::new("http://127.0.0.1:9", "pk_test").expect("client builds");
    let err = fetch_snapshot(
        &client,
        &config(&[]),
        &dir.path().join("clickup_tasks.json"),
        silent,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
