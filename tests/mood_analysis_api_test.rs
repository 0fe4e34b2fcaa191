//! 감정 분석 API 통합 테스트
//!
//! - POST /mood-analysis/analyze/{record_id}
//! - GET /mood-analysis/{record_id}
//! - GET /mood-analysis/list

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{bearer, send, test_app, test_app_with, InMemoryAnalyses, ScriptedLlm};
use moodping_server::domain::mood_record::entity::mood_record::NewMoodRecord;

fn analyze_request(record_id: &str, auth: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(format!("/mood-analysis/analyze/{}", record_id));
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

fn get_request(uri: &str, auth: Option<String>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

fn anonymous_record() -> NewMoodRecord {
    NewMoodRecord::create("tired", 3, Some("야근"), None, Some("anon-1".to_string())).unwrap()
}

fn user_record(user_id: &str) -> NewMoodRecord {
    NewMoodRecord::create("happy", 8, None, Some(user_id.to_string()), None).unwrap()
}

// ============== 분석 실행 ==============

#[tokio::test]
async fn should_analyze_anonymous_record_and_save_result() {
    // Arrange
    let app = test_app(ScriptedLlm::replying(
        r#"```json
{"analysis_text": "😴 오늘 많이 지치셨군요.\n\n푹 쉬어요."}
```"#,
    ));
    let record = app.records.insert(anonymous_record());

    // Act
    let (status, body) = send(
        &app.router,
        analyze_request(&record.id.to_string(), None),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isSuccess"], true);
    assert_eq!(body["result"]["recordId"], record.id);
    assert_eq!(
        body["result"]["analysisText"],
        "😴 오늘 많이 지치셨군요.\n\n푹 쉬어요."
    );
    assert_eq!(app.analyses.count(), 1);
}

#[tokio::test]
async fn should_analyze_own_record_when_logged_in() {
    let app = test_app(ScriptedLlm::replying(r#"{"analysis_text": "😊 좋은 하루"}"#));
    let record = app.records.insert(user_record("user-1"));

    let (status, body) = send(
        &app.router,
        analyze_request(&record.id.to_string(), Some(bearer("user-1"))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["analysisText"], "😊 좋은 하루");
}

#[tokio::test]
async fn should_return_404_when_record_does_not_exist() {
    let app = test_app(ScriptedLlm::replying("unused"));

    let (status, body) = send(&app.router, analyze_request("999", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MOOD4041");
    assert_eq!(app.llm.calls(), 0);
}

#[tokio::test]
async fn should_return_403_when_analyzing_someone_elses_record() {
    let app = test_app(ScriptedLlm::replying("unused"));
    let record = app.records.insert(user_record("owner"));

    let (status, body) = send(
        &app.router,
        analyze_request(&record.id.to_string(), Some(bearer("intruder"))),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "MOOD4031");
    assert_eq!(app.llm.calls(), 0);
}

#[tokio::test]
async fn should_return_409_when_record_already_analyzed() {
    // Arrange
    let app = test_app(ScriptedLlm::replying(r#"{"analysis_text": "첫 분석"}"#));
    let record = app.records.insert(anonymous_record());
    let id = record.id.to_string();
    send(&app.router, analyze_request(&id, None)).await;

    // Act
    let (status, body) = send(&app.router, analyze_request(&id, None)).await;

    // Assert
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ANALYSIS4091");
    assert_eq!(app.llm.calls(), 1);
    assert_eq!(app.analyses.count(), 1);
}

#[tokio::test]
async fn should_return_502_without_saving_when_llm_is_unavailable() {
    let app = test_app(ScriptedLlm::unavailable());
    let record = app.records.insert(anonymous_record());

    let (status, body) = send(&app.router, analyze_request(&record.id.to_string(), None)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["isSuccess"], false);
    assert_eq!(body["code"], "ANALYSIS5021");
    assert_eq!(app.analyses.count(), 0);
}

#[tokio::test]
async fn should_return_502_when_persistence_fails() {
    let app = test_app_with(
        ScriptedLlm::replying(r#"{"analysis_text": "분석"}"#),
        InMemoryAnalyses::failing(),
    );
    let record = app.records.insert(anonymous_record());

    let (status, body) = send(&app.router, analyze_request(&record.id.to_string(), None)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "ANALYSIS5021");
}

#[tokio::test]
async fn should_return_400_for_invalid_record_id() {
    let app = test_app(ScriptedLlm::replying("unused"));

    let (status, _) = send(&app.router, analyze_request("abc", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app.router, analyze_request("0", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_return_401_for_malformed_token() {
    let app = test_app(ScriptedLlm::replying("unused"));
    let record = app.records.insert(anonymous_record());

    let (status, body) = send(
        &app.router,
        analyze_request(&record.id.to_string(), Some("Bearer not-a-jwt".to_string())),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH4001");
}

// ============== 분석 조회 ==============

#[tokio::test]
async fn should_get_saved_analysis() {
    let app = test_app(ScriptedLlm::replying("평문 분석 결과"));
    let record = app.records.insert(anonymous_record());
    send(&app.router, analyze_request(&record.id.to_string(), None)).await;

    let (status, body) = send(
        &app.router,
        get_request(&format!("/mood-analysis/{}", record.id), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["analysisText"], "평문 분석 결과");
}

#[tokio::test]
async fn should_return_404_when_analysis_is_missing() {
    let app = test_app(ScriptedLlm::replying("unused"));

    let (status, body) = send(&app.router, get_request("/mood-analysis/1", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ANALYSIS4041");
}

#[tokio::test]
async fn should_list_only_my_analyses() {
    // Arrange
    let app = test_app(ScriptedLlm::replying(r#"{"analysis_text": "분석"}"#));
    let mine = app.records.insert(user_record("user-1"));
    let others = app.records.insert(user_record("user-2"));
    send(
        &app.router,
        analyze_request(&mine.id.to_string(), Some(bearer("user-1"))),
    )
    .await;
    send(
        &app.router,
        analyze_request(&others.id.to_string(), Some(bearer("user-2"))),
    )
    .await;

    // Act
    let (status, body) = send(
        &app.router,
        get_request("/mood-analysis/list", Some(bearer("user-1"))),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["total"], 1);
    assert_eq!(body["result"]["items"][0]["recordId"], mine.id);
}

#[tokio::test]
async fn should_require_login_for_analysis_list() {
    let app = test_app(ScriptedLlm::replying("unused"));

    let (status, _) = send(&app.router, get_request("/mood-analysis/list", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
