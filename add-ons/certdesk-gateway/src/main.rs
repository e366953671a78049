//! Axum-based gateway for the certificate desk. Config-driven via CoreConfig.

mod handlers;
mod sessions;

use axum::{
    extract::State,
    http::Method,
    routing::{get, post},
    Json, Router,
};
use certdesk_core::{CertificateTracker, CoreConfig, KnowledgeBase, QueryResolver, ReviewQueue};
use handlers::{catalog, chat};
use sessions::SessionStore;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) resolver: QueryResolver,
    pub(crate) sessions: Arc<SessionStore>,
    pub(crate) tracker: Arc<RwLock<CertificateTracker>>,
    pub(crate) reviews: Arc<RwLock<ReviewQueue>>,
}

impl AppState {
    fn new(
        config: CoreConfig,
        knowledge: KnowledgeBase,
        tracker: CertificateTracker,
        reviews: ReviewQueue,
    ) -> Self {
        let sessions = SessionStore::new(
            config.max_sessions,
            Duration::from_secs(config.session_idle_secs),
        );
        Self {
            config: Arc::new(config),
            resolver: QueryResolver::new(Arc::new(knowledge)),
            sessions: Arc::new(sessions),
            tracker: Arc::new(RwLock::new(tracker)),
            reviews: Arc::new(RwLock::new(reviews)),
        }
    }
}

/// Drops idle chat sessions in the background; clients that just close never call DELETE.
fn spawn_session_sweeper(sessions: Arc<SessionStore>, idle_secs: u64) {
    let period = Duration::from_secs((idle_secs / 4).max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            sessions.evict_idle();
        }
    });
}

/// Knowledge file from config, or the built-in data when none is configured.
fn load_knowledge(config: &CoreConfig) -> certdesk_core::Result<KnowledgeBase> {
    match config.knowledge_path.as_deref() {
        Some(path) => KnowledgeBase::load_path(path),
        None => Ok(KnowledgeBase::builtin()),
    }
}

/// Pre-flight check: config loads, knowledge base validates, port is available.
fn run_verify() -> Result<(), String> {
    let config = CoreConfig::load().map_err(|e| format!("Config load failed: {}", e))?;

    print!("Checking knowledge base... ");
    let knowledge = load_knowledge(&config).map_err(|e| format!("knowledge base invalid: {}", e))?;
    let gaps = knowledge.missing_metadata();
    println!(
        "OK ({} offices, {} certificates, {} missing metadata fields)",
        knowledge.offices().len(),
        knowledge.known_certificates().len(),
        gaps.len()
    );

    let port = config.port;
    print!("Checking port {}... ", port);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => {
            return Err(format!("Port {} BLOCKED: {}", port, e));
        }
    }

    println!("\nAll checks passed. Ready to start gateway.");
    Ok(())
}

fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/v1/status", get(status))
        .route("/v1/chat", post(chat::chat))
        .route("/v1/chat/:session_id", get(chat::history).delete(chat::end_session))
        .route("/v1/offices", get(catalog::list_offices))
        .route("/v1/offices/:id", get(catalog::get_office))
        .route("/v1/certificates", get(catalog::dashboard))
        .route("/v1/certificates/:kind", get(catalog::certificate_info))
        .route("/v1/admin/certificates/:id/status", post(catalog::update_status))
        .route("/v1/admin/reviews", get(catalog::review_queue))
        .route("/v1/admin/reviews/:id/approve", post(catalog::approve_review))
        .route("/v1/admin/reviews/:id/reject", post(catalog::reject_review))
        .with_state(state)
        .layer(cors)
}

/// GET /v1/status – app identity, office count, and rule order.
async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let knowledge = state.resolver.knowledge();
    Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "offices": knowledge.offices().len(),
        "certificates": knowledge.known_certificates().len(),
        "rules": state.resolver.rules().rule_names(),
        "sessions": state.sessions.len(),
    }))
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[certdesk-gateway] .env not loaded: {} (using system environment)", e);
    }

    if std::env::args().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match CoreConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("config load failed: {}", e);
            std::process::exit(1);
        }
    };
    let knowledge = match load_knowledge(&config) {
        Ok(kb) => kb,
        Err(e) => {
            tracing::error!("knowledge base rejected: {}", e);
            std::process::exit(1);
        }
    };
    for (kind, field) in knowledge.missing_metadata() {
        tracing::warn!(
            target: "certdesk::knowledge",
            certificate = kind.display_name(),
            field = field.label(),
            "metadata missing; answers will show a placeholder"
        );
    }
    tracing::info!(
        offices = knowledge.offices().len(),
        certificates = knowledge.known_certificates().len(),
        "knowledge base ready"
    );

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let idle_secs = config.session_idle_secs;
    let state = AppState::new(
        config,
        knowledge,
        CertificateTracker::seeded(),
        ReviewQueue::seeded(),
    );
    spawn_session_sweeper(Arc::clone(&state.sessions), idle_secs);
    let app = build_app(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("certdesk-gateway listening on {}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_config() -> CoreConfig {
        CoreConfig {
            app_name: "Test Desk".to_string(),
            port: 8001,
            knowledge_path: None,
            reply_delay_ms: 0,
            max_query_chars: 200,
            max_sessions: 100,
            session_idle_secs: 600,
        }
    }

    fn app_with(config: CoreConfig) -> (Router, AppState) {
        let state = AppState::new(
            config,
            KnowledgeBase::builtin(),
            CertificateTracker::seeded(),
            ReviewQueue::seeded(),
        );
        (build_app(state.clone()), state)
    }

    fn test_app() -> (Router, AppState) {
        app_with(test_config())
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    fn new_chat(message: &str) -> Request<Body> {
        post_json("/v1/chat", serde_json::json!({ "message": message }))
    }

    fn admin_post(uri: &str) -> Request<Body> {
        post_json(uri, serde_json::json!({}))
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_status_reports_identity_and_rules() {
        let (app, _) = test_app();
        let (status, json) = send(&app, get_req("/v1/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["app_name"], "Test Desk");
        assert_eq!(json["offices"], 6);
        assert_eq!(json["rules"][0], "location");
        assert_eq!(json["rules"][9], "help");
    }

    #[tokio::test]
    async fn test_chat_starts_session_and_answers() {
        let (app, state) = test_app();
        let (status, json) = send(
            &app,
            post_json(
                "/v1/chat",
                serde_json::json!({ "message": "What is the fee for Character Certificate?" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rule"], "certificate");
        assert_eq!(json["reply"]["id"], 3);
        assert_eq!(json["reply"]["originator"], "assistant");
        let text = json["reply"]["text"].as_str().unwrap();
        assert!(text.contains("₹100"));
        assert!(text.contains("Academic Section"));
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_chat_continues_session_and_keeps_history() {
        let (app, _) = test_app();
        let (_, first) = send(
            &app,
            post_json("/v1/chat", serde_json::json!({ "message": "office hours" })),
        )
        .await;
        let session_id = first["session_id"].as_str().unwrap().to_string();

        let (status, second) = send(
            &app,
            post_json(
                "/v1/chat",
                serde_json::json!({
                    "session_id": session_id,
                    "message": "How long does a degree certificate take?"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["session_id"], session_id.as_str());
        assert_eq!(second["reply"]["id"], 5);
        assert!(second["reply"]["text"].as_str().unwrap().contains("30-45 working days"));

        let (status, history) = send(&app, get_req(&format!("/v1/chat/{}", session_id))).await;
        assert_eq!(status, StatusCode::OK);
        let messages = history.as_array().unwrap();
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0]["text"], certdesk_core::GREETING);
        assert_eq!(messages[1]["originator"], "user");
        assert_eq!(messages[1]["text"], "office hours");
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_and_oversized_messages() {
        let (app, state) = test_app();
        let (status, json) = send(
            &app,
            post_json("/v1/chat", serde_json::json!({ "message": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");

        let long = "a".repeat(201);
        let (status, _) = send(
            &app,
            post_json("/v1/chat", serde_json::json!({ "message": long })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_chat_unknown_session_is_not_found() {
        let (app, _) = test_app();
        let (status, _) = send(
            &app,
            post_json(
                "/v1/chat",
                serde_json::json!({ "session_id": Uuid::new_v4(), "message": "help" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_end_session_drops_log() {
        let (app, state) = test_app();
        let (_, first) = send(
            &app,
            post_json("/v1/chat", serde_json::json!({ "message": "tell me a joke" })),
        )
        .await;
        assert_eq!(first["rule"], "default");
        assert_eq!(first["reply"]["text"], certdesk_core::DEFAULT_RESPONSE);
        let uri = format!("/v1/chat/{}", first["session_id"].as_str().unwrap());

        let req = Request::builder()
            .method("DELETE")
            .uri(&uri)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.sessions.is_empty());

        let (status, _) = send(&app, get_req(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_offices_list_and_lookup() {
        let (app, _) = test_app();
        let (status, json) = send(&app, get_req("/v1/offices")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 6);
        assert_eq!(json[1]["name"], "Examination Branch");
        assert_eq!(json[1]["certificates"][1], "degree");

        let (status, json) = send(&app, get_req("/v1/offices/4")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Student Affairs Office");

        let (status, _) = send(&app, get_req("/v1/offices/99")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_certificate_info_exposes_gaps_as_null() {
        let (app, _) = test_app();
        let (status, json) = send(&app, get_req("/v1/certificates/degree")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Degree Certificate");
        assert_eq!(json["processing_time"], "30-45 working days");
        assert_eq!(json["offices"][0], "Examination Branch");

        let (status, json) = send(&app, get_req("/v1/certificates/revaluation_results")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["deadline"].is_null());
        assert!(json["requirements"].is_null());
    }

    #[tokio::test]
    async fn test_dashboard_views_and_summary() {
        let (app, _) = test_app();
        let (status, json) = send(&app, get_req("/v1/certificates?view=pending")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["view"], "pending");
        assert_eq!(json["certificates"].as_array().unwrap().len(), 5);
        assert_eq!(json["summary"]["total"], 6);
        assert_eq!(json["summary"]["completed"], 1);

        let (_, json) = send(&app, get_req("/v1/certificates?view=upcoming")).await;
        assert_eq!(json["certificates"][0]["kind"], "examination_fee_receipt");

        let (_, json) = send(&app, get_req("/v1/certificates?search=no%20dues")).await;
        assert_eq!(json["certificates"].as_array().unwrap().len(), 1);
        assert_eq!(json["certificates"][0]["id"], 5);
    }

    #[tokio::test]
    async fn test_admin_status_update() {
        let (app, state) = test_app();
        let (status, json) = send(
            &app,
            post_json(
                "/v1/admin/certificates/6/status",
                serde_json::json!({ "status": "completed" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "completed");
        assert_eq!(json["submissions"][0]["office"], certdesk_core::ADMIN_OFFICE);
        assert_eq!(json["submissions"][0]["status"], "approved");
        assert_eq!(state.tracker.read().unwrap().summary().completed, 2);

        let (status, _) = send(
            &app,
            post_json(
                "/v1/admin/certificates/42/status",
                serde_json::json!({ "status": "in_progress" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reply_delay_is_applied() {
        let mut config = test_config();
        config.reply_delay_ms = 50;
        let (app, _) = app_with(config);
        let started = std::time::Instant::now();
        let (status, _) = send(
            &app,
            post_json("/v1/chat", serde_json::json!({ "message": "contact" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(started.elapsed() >= std::time::Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_unknown_certificate_kind_is_json_not_found() {
        let (app, _) = test_app();
        let (status, json) = send(&app, get_req("/v1/certificates/not_a_kind")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().unwrap().contains("not_a_kind"));
    }

    #[tokio::test]
    async fn test_anonymous_sessions_are_capped() {
        let mut config = test_config();
        config.max_sessions = 3;
        let (app, state) = app_with(config);
        for _ in 0..3 {
            let (status, _) = send(&app, new_chat("hi")).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, json) = send(&app, new_chat("hi")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["status"], "error");
        assert_eq!(state.sessions.len(), 3);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_reclaimed() {
        let mut config = test_config();
        config.max_sessions = 1;
        config.session_idle_secs = 0;
        let (app, state) = app_with(config);
        let (_, first) = send(&app, new_chat("hi")).await;
        let (status, second) = send(&app, new_chat("hi")).await;
        assert_eq!(status, StatusCode::OK);
        assert_ne!(first["session_id"], second["session_id"]);
        assert_eq!(state.sessions.len(), 1);

        let uri = format!("/v1/chat/{}", first["session_id"].as_str().unwrap());
        let (status, _) = send(&app, get_req(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_user_message_is_stored_as_typed() {
        let (app, _) = test_app();
        let (_, json) = send(
            &app,
            post_json("/v1/chat", serde_json::json!({ "message": "  Office Hours?  " })),
        )
        .await;
        let uri = format!("/v1/chat/{}", json["session_id"].as_str().unwrap());
        let (_, history) = send(&app, get_req(&uri)).await;
        assert_eq!(history[1]["text"], "  Office Hours?  ");
    }

    #[tokio::test]
    async fn test_concurrent_posts_keep_question_answer_pairs() {
        let mut config = test_config();
        config.reply_delay_ms = 30;
        let (app, _) = app_with(config);
        let (_, first) = send(&app, new_chat("fees")).await;
        let session_id = first["session_id"].as_str().unwrap().to_string();

        let post = |message: &str| {
            post_json(
                "/v1/chat",
                serde_json::json!({ "session_id": session_id, "message": message }),
            )
        };
        let (a, b) = tokio::join!(
            send(&app, post("office hours")),
            send(&app, post("contact"))
        );
        assert_eq!(a.0, StatusCode::OK);
        assert_eq!(b.0, StatusCode::OK);

        let (_, history) = send(&app, get_req(&format!("/v1/chat/{}", session_id))).await;
        let messages = history.as_array().unwrap();
        assert_eq!(messages.len(), 7);
        for (i, message) in messages.iter().enumerate() {
            let expected = if i % 2 == 0 { "assistant" } else { "user" };
            assert_eq!(message["originator"], expected, "message {}", i);
        }
    }

    #[tokio::test]
    async fn test_review_queue_approve_and_reject() {
        let (app, state) = test_app();
        let (status, json) = send(&app, get_req("/v1/admin/reviews")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["counts"]["pending"], 2);
        assert_eq!(json["counts"]["approved"], 1);
        assert_eq!(json["requests"][0]["student_id"], "ST001");

        let (status, json) = send(&app, admin_post("/v1/admin/reviews/1/approve")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "approved");

        let (status, json) = send(&app, admin_post("/v1/admin/reviews/2/reject")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "rejected");

        let (status, _) = send(&app, admin_post("/v1/admin/reviews/2/approve")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = send(&app, admin_post("/v1/admin/reviews/9/reject")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let counts = state.reviews.read().unwrap().counts();
        assert_eq!((counts.pending, counts.approved, counts.rejected), (0, 2, 1));
    }
}
