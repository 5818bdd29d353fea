use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use kinetic_flow::config::{AppConfig, LeadStoreKind};
use kinetic_flow::db;
use kinetic_flow::handlers;
use kinetic_flow::models::LeadRecord;
use kinetic_flow::services::leads::{CsvLeadStore, LeadSink};
use kinetic_flow::services::matcher::ResponseCatalog;
use kinetic_flow::state::AppState;

const SESSION: &str = "kf_session=0b6c9d5e-1f2a-4b3c-8d4e-5f6a7b8c9d0e";

// ── Mock Lead Sinks ──

struct RecordingSink {
    leads: Arc<Mutex<Vec<LeadRecord>>>,
}

#[async_trait]
impl LeadSink for RecordingSink {
    async fn record(&self, lead: &LeadRecord) -> anyhow::Result<()> {
        self.leads.lock().unwrap().push(lead.clone());
        Ok(())
    }
}

struct FailingSink;

#[async_trait]
impl LeadSink for FailingSink {
    async fn record(&self, _lead: &LeadRecord) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        lead_store: LeadStoreKind::Csv,
        leads_csv_path: "leads.csv".to_string(),
        session_ttl_minutes: 120,
    }
}

fn state_with_sink(leads: Box<dyn LeadSink>) -> Arc<AppState> {
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: test_config(),
        catalog: ResponseCatalog::default(),
        leads,
    })
}

fn test_state_with_leads() -> (Arc<AppState>, Arc<Mutex<Vec<LeadRecord>>>) {
    let leads = Arc::new(Mutex::new(vec![]));
    let sink = RecordingSink {
        leads: Arc::clone(&leads),
    };
    (state_with_sink(Box::new(sink)), leads)
}

fn test_state() -> Arc<AppState> {
    test_state_with_leads().0
}

fn test_app(state: Arc<AppState>) -> Router {
    handlers::router(state)
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header(header::COOKIE, SESSION)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header(header::COOKIE, SESSION)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, SESSION)
        .body(Body::empty())
        .unwrap()
}

async fn body_string(res: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_string(res).await).unwrap()
}

async fn send_chat(state: &Arc<AppState>, message: &str) -> serde_json::Value {
    let res = test_app(state.clone())
        .oneshot(json_post("/api/chat", serde_json::json!({ "message": message })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let res = test_app(test_state()).oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["active_sessions"], 0);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let res = test_app(test_state()).oneshot(get("/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"], "not found: /nope");
}

// ── Pages ──

#[tokio::test]
async fn test_every_page_renders() {
    let state = test_state();
    for (uri, marker) in [
        ("/", "KINETIC FLOW AI"),
        ("/agent", "Frontier AI Agent Demo"),
        ("/dashboard", "Client Dashboard Preview"),
        ("/roi", "ROI Calculator"),
        ("/book", "Book Your Free Kinetic Audit"),
    ] {
        let res = test_app(state.clone()).oneshot(get(uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
        let html = body_string(res).await;
        assert!(html.contains(marker), "{uri} missing {marker}");
        assert!(html.contains(&format!("<a href=\"{uri}\" class=\"active\">")));
    }
}

#[tokio::test]
async fn test_new_visitor_gets_session_cookie() {
    let res = test_app(test_state())
        .oneshot(Request::builder().uri("/agent").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("kf_session="));

    // Returning visitor keeps their id
    let res = test_app(test_state()).oneshot(get("/agent")).await.unwrap();
    assert!(res.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_agent_form_flow() {
    let state = test_state();

    let res = test_app(state.clone())
        .oneshot(form_post("/agent", "message=What+is+your+pricing%3F"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/agent");

    let html = body_string(test_app(state.clone()).oneshot(get("/agent")).await.unwrap()).await;
    assert!(html.contains("<strong>You:</strong> What is your pricing?"));
    assert!(html.contains("Our services typically range from $1,500-$3,000..."));
    assert!(!html.contains("Lead captured!"));

    test_app(state.clone())
        .oneshot(form_post("/agent", "message=Sure%2C+book+me"))
        .await
        .unwrap();
    let html = body_string(test_app(state.clone()).oneshot(get("/agent")).await.unwrap()).await;
    assert!(html.contains("Lead captured!"));

    test_app(state.clone())
        .oneshot(form_post("/agent/clear", ""))
        .await
        .unwrap();
    let html = body_string(test_app(state).oneshot(get("/agent")).await.unwrap()).await;
    assert!(!html.contains("<strong>You:</strong>"));
    assert!(!html.contains("Lead captured!"));
}

#[tokio::test]
async fn test_agent_form_ignores_blank_message() {
    let state = test_state();
    let res = test_app(state.clone())
        .oneshot(form_post("/agent", "message=+++"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let json = body_json(test_app(state).oneshot(get("/api/chat")).await.unwrap()).await;
    assert_eq!(json["messages"].as_array().unwrap().len(), 0);
}

// ── Chat API ──

#[tokio::test]
async fn test_chat_keyword_priority() {
    let state = test_state();

    let json = send_chat(&state, "PRICING?").await;
    assert_eq!(json["reply"], "Our services typically range from $1,500-$3,000...");
    assert_eq!(json["lead_captured"], false);

    let json = send_chat(&state, "hmm, tell me something").await;
    assert_eq!(
        json["reply"],
        "Great question! Our Frontier Agent can assist with that — want to book an audit?"
    );
}

#[tokio::test]
async fn test_lead_captured_once_per_session() {
    let state = test_state();

    let first = send_chat(&state, "I want to book an appointment").await;
    assert_eq!(first["newly_captured"], true);
    assert_eq!(first["lead_captured"], true);
    assert!(first["reply"]
        .as_str()
        .unwrap()
        .ends_with("✅ Lead captured — confirmation will be sent."));

    let second = send_chat(&state, "yes, book it").await;
    assert_eq!(second["newly_captured"], false);
    assert_eq!(second["lead_captured"], true);
    assert!(!second["reply"].as_str().unwrap().contains("Lead captured"));

    let third = send_chat(&state, "what about pricing").await;
    assert_eq!(third["lead_captured"], true);

    let transcript = body_json(test_app(state.clone()).oneshot(get("/api/chat")).await.unwrap()).await;
    let messages = transcript["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "I want to book an appointment");
    assert_eq!(messages[1]["role"], "bot");
    assert_eq!(messages[4]["content"], "what about pricing");
    assert_eq!(transcript["lead_captured"], true);
}

#[tokio::test]
async fn test_clear_resets_flag_and_allows_recapture() {
    let state = test_state();
    send_chat(&state, "sure").await;

    let res = test_app(state.clone())
        .oneshot(json_post("/api/chat/clear", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let transcript = body_json(test_app(state.clone()).oneshot(get("/api/chat")).await.unwrap()).await;
    assert_eq!(transcript["messages"].as_array().unwrap().len(), 0);
    assert_eq!(transcript["lead_captured"], false);

    let again = send_chat(&state, "schedule me").await;
    assert_eq!(again["newly_captured"], true);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let state = test_state();
    send_chat(&state, "book").await;

    let other = Request::builder()
        .uri("/api/chat")
        .header(header::COOKIE, "kf_session=11111111-2222-4333-8444-555555555555")
        .body(Body::empty())
        .unwrap();
    let json = body_json(test_app(state).oneshot(other).await.unwrap()).await;
    assert_eq!(json["messages"].as_array().unwrap().len(), 0);
    assert_eq!(json["lead_captured"], false);
}

#[tokio::test]
async fn test_chat_api_rejects_blank_message() {
    let res = test_app(test_state())
        .oneshot(json_post("/api/chat", serde_json::json!({ "message": "   " })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert_eq!(json["error"], "validation error: message is required");
}

// ── Dashboard ──

#[tokio::test]
async fn test_dashboard_api_shape() {
    let res = test_app(test_state()).oneshot(get("/api/dashboard")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;

    let leads = json["series"]["leads"].as_array().unwrap();
    assert_eq!(leads.len(), 30);
    assert_eq!(json["series"]["dates"].as_array().unwrap().len(), 30);

    let total: u64 = leads.iter().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(json["snapshot"]["total_leads"].as_u64().unwrap(), total);
    assert_eq!(json["snapshot"]["avg_response"], "8 sec");
    assert_eq!(json["snapshot"]["funnel"].as_array().unwrap().len(), 4);
}

// ── ROI ──

#[tokio::test]
async fn test_roi_api() {
    let res = test_app(test_state())
        .oneshot(json_post(
            "/api/roi",
            serde_json::json!({
                "monthly_leads": 100,
                "conversion_rate": 15,
                "avg_deal_value": 1500,
                "after_hours_pct": 35
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["additional_revenue"], 7875.0);
    assert_eq!(json["annual_revenue"], 94500.0);
    assert_eq!(json["net_monthly_gain"], 7176.0);
}

#[tokio::test]
async fn test_roi_api_rejects_bad_percent() {
    let res = test_app(test_state())
        .oneshot(json_post(
            "/api/roi",
            serde_json::json!({
                "monthly_leads": 100,
                "conversion_rate": 150,
                "avg_deal_value": 1500,
                "after_hours_pct": 35
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_roi_api_missing_field_is_json_400() {
    let res = test_app(test_state())
        .oneshot(json_post("/api/roi", serde_json::json!({ "monthly_leads": 100 })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("missing field `conversion_rate`"));
}

#[tokio::test]
async fn test_roi_api_wrong_type_is_json_400() {
    let res = test_app(test_state())
        .oneshot(json_post(
            "/api/roi",
            serde_json::json!({
                "monthly_leads": "abc",
                "conversion_rate": 15,
                "avg_deal_value": 1500,
                "after_hours_pct": 35
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("invalid type"));
}

#[tokio::test]
async fn test_chat_and_lead_api_reject_malformed_json() {
    let state = test_state();

    let res = test_app(state.clone())
        .oneshot(json_post("/api/chat", serde_json::json!({ "text": "hi" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(res).await["error"].is_string());

    let res = test_app(state)
        .oneshot(json_post("/api/leads", serde_json::json!({ "name": 42 })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(res).await["error"].is_string());
}

#[tokio::test]
async fn test_roi_page_renders_results() {
    let res = test_app(test_state())
        .oneshot(get(
            "/roi?monthly_leads=100&conversion_rate=15&avg_deal_value=1500&after_hours_pct=35&monthly_cost=699",
        ))
        .await
        .unwrap();
    let html = body_string(res).await;
    assert!(html.contains("<td>Additional revenue / month</td><td>$7,875</td>"));
    assert!(html.contains("<td>Additional revenue / year</td><td>$94,500</td>"));

    let res = test_app(test_state())
        .oneshot(get("/roi?monthly_cost=0"))
        .await
        .unwrap();
    let html = body_string(res).await;
    assert!(html.contains("monthly_cost must be greater than zero"));
}

// ── Lead capture ──

#[tokio::test]
async fn test_book_form_requires_email() {
    let (state, leads) = test_state_with_leads();
    let res = test_app(state)
        .oneshot(form_post("/book", "name=Ada&email=&phone=&message=hi"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let html = body_string(res).await;
    assert!(html.contains("email is required"));
    assert!(html.contains("value=\"Ada\""));
    assert!(leads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_book_form_success_records_lead() {
    let (state, leads) = test_state_with_leads();
    let res = test_app(state)
        .oneshot(form_post(
            "/book",
            "name=Ada+Lovelace&email=ada%40example.com&phone=555-0100&business=&message=Automate+intake",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_string(res).await;
    assert!(html.contains("Thanks, Ada Lovelace!"));

    let leads = leads.lock().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].name, "Ada Lovelace");
    assert_eq!(leads[0].email, "ada@example.com");
    assert_eq!(leads[0].phone, "555-0100");
    assert_eq!(leads[0].message, "Automate intake");
}

#[tokio::test]
async fn test_lead_api_validation() {
    let (state, leads) = test_state_with_leads();
    let res = test_app(state.clone())
        .oneshot(json_post("/api/leads", serde_json::json!({ "email": "a@b.co" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test_app(state)
        .oneshot(json_post(
            "/api/leads",
            serde_json::json!({ "name": "Ada", "email": "a@b.co" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(leads.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_storage_failure_still_confirms() {
    let state = state_with_sink(Box::new(FailingSink));
    let res = test_app(state)
        .oneshot(form_post("/book", "name=Ada&email=ada%40example.com"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("Thanks, Ada!"));
}

#[tokio::test]
async fn test_csv_store_appends_exactly_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leads.csv");
    let state = state_with_sink(Box::new(CsvLeadStore::new(&path)));

    let res = test_app(state.clone())
        .oneshot(form_post(
            "/book",
            "name=Ada&email=ada%40example.com&phone=555&message=Hello",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "timestamp,name,email,phone,message");
    assert!(lines[1].ends_with(",Ada,ada@example.com,555,Hello"));

    // Rejected submission leaves the file alone
    test_app(state)
        .oneshot(form_post("/book", "name=Bob&email="))
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
}
