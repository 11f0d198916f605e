//! End-to-end tests for the query pipeline over the HTTP surface.
//!
//! The remote path is unconfigured in every test, so classification
//! runs through the local fallback and the advice handler through the
//! rule-based generator - the degradation behavior is the behavior
//! under test.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use rolo_core::contact::Temperature;
use rolo_core::{Contact, IntentClassifier, UserId};
use rolod::config::LlmConfig;
use rolod::handlers::HandlerCx;
use rolod::llm::LlmClient;
use rolod::resolver::IntentResolver;
use rolod::server::{router, AppState};
use rolod::store::MemoryStore;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

fn offline_app(store: Arc<MemoryStore>) -> Router {
    let llm = Arc::new(LlmClient::from_config(&LlmConfig::default()));
    let resolver = IntentResolver::new(llm.clone(), IntentClassifier::with_default_corpus());
    let cx = HandlerCx {
        contacts: store.clone(),
        reminders: store,
        llm,
    };
    router(Arc::new(AppState::new(resolver, cx)))
}

async fn post_query(app: Router, user: UserId, query: &str) -> (StatusCode, serde_json::Value) {
    let body = serde_json::json!({ "query": query, "user_id": user });
    let request = Request::builder()
        .method("POST")
        .uri("/api/chatbot/query")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn seed_team_contact(store: &MemoryStore, user: UserId, name: &str, team: &str) {
    let mut contact = Contact::new(user, name);
    contact.team = Some(team.to_string());
    store.add_contact(contact).await;
}

#[tokio::test]
async fn team_search_end_to_end() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    seed_team_contact(&store, user, "Ann", "Marketing").await;
    seed_team_contact(&store, user, "Bob", "Marketing").await;
    seed_team_contact(&store, user, "Cy", "Sales").await;

    let app = offline_app(store);
    let (status, json) = post_query(app, user, "Find contacts in team Marketing").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "contacts");
    assert_eq!(json["content"].as_array().unwrap().len(), 2);
    assert!(json["message"].as_str().unwrap().contains("Marketing"));
}

#[tokio::test]
async fn reminder_end_to_end() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    store.add_contact(Contact::new(user, "John Smith")).await;

    let app = offline_app(store.clone());
    let (status, json) = post_query(app, user, "remind me to contact John in 3 days").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "reminder");
    assert_eq!(json["content"]["description"], "Follow up with John Smith");

    let due: DateTime<Utc> =
        serde_json::from_value(json["content"]["due_date"].clone()).unwrap();
    assert_eq!(due.date_naive(), (Utc::now() + Duration::days(3)).date_naive());

    // Persisted, not just composed.
    let stored = store.reminders().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user, user);
}

#[tokio::test]
async fn cold_contacts_default_threshold_end_to_end() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    let mut stale = Contact::new(user, "Stale");
    stale.last_contacted_date = Some(Utc::now() - Duration::days(90));
    store.add_contact(stale).await;
    let mut fresh = Contact::new(user, "Fresh");
    fresh.last_contacted_date = Some(Utc::now() - Duration::days(3));
    store.add_contact(fresh).await;

    let app = offline_app(store);
    let (status, json) = post_query(app, user, "show me cold contacts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "contacts");
    assert_eq!(json["content"].as_array().unwrap().len(), 1);
    assert!(json["message"].as_str().unwrap().contains("30 days"));
}

#[tokio::test]
async fn advice_end_to_end_uses_rule_fallback() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    let mut contact = Contact::new(user, "Sarah Chen");
    contact.temperature = Temperature::Hot;
    store.add_contact(contact).await;

    let app = offline_app(store);
    let (status, json) = post_query(app, user, "give me talking points for Sarah").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "advice");
    let advice = json["advice"].as_array().unwrap();
    assert!(advice
        .last()
        .unwrap()
        .as_str()
        .unwrap()
        .starts_with("This is a hot contact."));
}

#[tokio::test]
async fn report_end_to_end_covers_all_contacts() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    seed_team_contact(&store, user, "Ann", "Marketing").await;
    seed_team_contact(&store, user, "Bob", "Marketing").await;
    seed_team_contact(&store, user, "Cy", "Sales").await;
    // Another user's contacts must not leak into the report.
    seed_team_contact(&store, Uuid::new_v4(), "Eve", "Marketing").await;

    let app = offline_app(store);
    let (status, json) = post_query(app, user, "generate a report on teams").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "chart");
    assert_eq!(json["chart_type"], "bar");
    let labels = json["labels"].as_array().unwrap();
    let data = json["data"].as_array().unwrap();
    assert_eq!(labels.len(), 2);
    let total: u64 = data.iter().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn missing_query_is_bad_request() {
    let store = MemoryStore::new();
    let app = offline_app(store);

    let body = serde_json::json!({ "user_id": Uuid::new_v4() });
    let request = Request::builder()
        .method("POST")
        .uri("/api/chatbot/query")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["message"], "Query is required");
}

#[tokio::test]
async fn every_query_terminates_with_a_typed_response() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    let app = offline_app(store);

    // No seeded data, no remote classifier: whatever the local
    // classifier guesses, the handler must still answer with text.
    for query in [
        "tell me something",
        "what should I do next week",
        "report",
    ] {
        let (status, json) = post_query(app.clone(), user, query).await;
        assert_eq!(status, StatusCode::OK, "query: {query:?}");
        assert!(json["type"].is_string(), "query: {query:?}");
    }
}

#[tokio::test]
async fn health_endpoint() {
    let store = MemoryStore::new();
    let app = offline_app(store);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
}
