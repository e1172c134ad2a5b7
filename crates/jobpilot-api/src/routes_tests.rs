
use super::*;
use crate::automation::{ApiError, Automation};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use jobpilot_engine::{CoverLetter, EngineError, PostingReference, SubmissionOutcome, Vacancy};
use serde_json::Value;
use tower::ServiceExt;

/// Scripted automation so router tests never touch a browser.
struct StubAutomation {
    outcome: SubmissionOutcome,
    vacancies: Vec<Vacancy>,
    search_fails: bool,
}

impl StubAutomation {
    fn with_outcome(outcome: SubmissionOutcome) -> Self {
        Self {
            outcome,
            vacancies: Vec::new(),
            search_fails: false,
        }
    }
}

#[async_trait]
impl Automation for StubAutomation {
    async fn apply(&self, _posting: PostingReference, _letter: CoverLetter) -> SubmissionOutcome {
        self.outcome.clone()
    }

    async fn search(
        &self,
        _query: Option<String>,
        _page_num: u32,
    ) -> Result<Vec<Vacancy>, ApiError> {
        if self.search_fails {
            Err(ApiError::Engine(EngineError::BotProtection))
        } else {
            Ok(self.vacancies.clone())
        }
    }
}

fn test_router(automation: StubAutomation) -> Router {
    let state = Arc::new(AppState::new(Arc::new(automation)));
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn apply_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/apply")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_apply_success_mapping() {
    let app = test_router(StubAutomation::with_outcome(
        SubmissionOutcome::SubmittedWithoutLetter,
    ));

    let response = app
        .oneshot(apply_request(r#"{"url": "https://hh.ru/vacancy/1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Applied successfully");
}

#[tokio::test]
async fn test_apply_already_applied_is_skipped() {
    let app = test_router(StubAutomation::with_outcome(
        SubmissionOutcome::AlreadyApplied,
    ));

    let response = app
        .oneshot(apply_request(
            r#"{"url": "https://hh.ru/vacancy/1", "message": "Hello"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "skipped");
    assert_eq!(body["message"], "Already applied");
}

#[tokio::test]
async fn test_apply_failure_stays_http_200() {
    let app = test_router(StubAutomation::with_outcome(SubmissionOutcome::Failed(
        "apply control not found".to_string(),
    )));

    let response = app
        .oneshot(apply_request(r#"{"url": "https://hh.ru/vacancy/1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "apply control not found");
}

#[tokio::test]
async fn test_apply_empty_url_is_bad_request() {
    let app = test_router(StubAutomation::with_outcome(
        SubmissionOutcome::SubmittedWithoutLetter,
    ));

    let response = app.oneshot(apply_request(r#"{"url": ""}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing 'url' field");
}

#[tokio::test]
async fn test_apply_missing_url_is_rejected() {
    let app = test_router(StubAutomation::with_outcome(
        SubmissionOutcome::SubmittedWithoutLetter,
    ));

    let response = app
        .oneshot(apply_request(r#"{"message": "Hello"}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_apply_malformed_body_is_rejected() {
    let app = test_router(StubAutomation::with_outcome(
        SubmissionOutcome::SubmittedWithoutLetter,
    ));

    let response = app.oneshot(apply_request("not json")).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_search_returns_vacancies() {
    let automation = StubAutomation {
        outcome: SubmissionOutcome::SubmittedWithoutLetter,
        vacancies: vec![Vacancy {
            title: "Frontend Developer".to_string(),
            url: "https://hh.ru/vacancy/1".to_string(),
            employer: "Acme".to_string(),
            description: "Building UIs".to_string(),
        }],
        search_fails: false,
    };
    let app = test_router(automation);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search?text=Rust&page=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["vacancies"][0]["title"], "Frontend Developer");
    assert_eq!(body["vacancies"][0]["employer"], "Acme");
}

#[tokio::test]
async fn test_search_failure_is_server_error() {
    let automation = StubAutomation {
        outcome: SubmissionOutcome::SubmittedWithoutLetter,
        vacancies: Vec::new(),
        search_fails: true,
    };
    let app = test_router(automation);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("protection"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router(StubAutomation::with_outcome(
        SubmissionOutcome::SubmittedWithoutLetter,
    ));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = test_router(StubAutomation::with_outcome(
        SubmissionOutcome::SubmittedWithoutLetter,
    ));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
