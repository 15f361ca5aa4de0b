// tests/support/helpers.rs
use super::mocks;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use lms_core::application::{
    commands::notifications::NotificationDispatcher,
    ports::{delivery::NotificationSender, time::Clock},
    resilience::{CircuitBreakerConfig, RetryPolicy},
    services::ApplicationServices,
};
use lms_core::domain::{
    audit::AuditLogRepository,
    notification::{DeliveryChannel, NotificationRepository},
};
use lms_core::infrastructure::repositories::InMemoryNotificationRepository;
use lms_core::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const ACTOR: &str = "u1";

/// 高速なテスト用リトライポリシー（3 回、1ms 基準）
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

/// テスト用アプリケーション一式
pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    /// 改ざんを再現できるインメモリ監査ストア
    pub audit_repo: Arc<mocks::TamperingAuditRepo>,
    pub notification_repo: Arc<InMemoryNotificationRepository>,
    pub in_app: Arc<mocks::RecordingSender>,
    pub email: Arc<dyn NotificationSender>,
    pub sms: Arc<mocks::RecordingSender>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_email_sender(Arc::new(mocks::RecordingSender::new(DeliveryChannel::Email)))
    }

    /// メール送信者を差し替えて構築する
    pub fn with_email_sender(email: Arc<dyn NotificationSender>) -> Self {
        Self::build(email, Arc::new(mocks::SteppingClock::default()))
    }

    pub fn build(email: Arc<dyn NotificationSender>, clock: Arc<dyn Clock>) -> Self {
        let audit_repo = Arc::new(mocks::TamperingAuditRepo::new());
        let notification_repo = Arc::new(InMemoryNotificationRepository::new());
        let in_app = Arc::new(mocks::RecordingSender::new(DeliveryChannel::InApp));
        let sms = Arc::new(mocks::RecordingSender::new(DeliveryChannel::Sms));

        let senders: Vec<Arc<dyn NotificationSender>> = vec![
            Arc::clone(&in_app) as Arc<dyn NotificationSender>,
            Arc::clone(&email),
            Arc::clone(&sms) as Arc<dyn NotificationSender>,
        ];
        let dispatcher = Arc::new(NotificationDispatcher::new(
            senders,
            fast_retry(),
            CircuitBreakerConfig {
                failure_threshold: 2,
                reset_timeout: Duration::from_secs(60),
            },
        ));

        let audit_port: Arc<dyn AuditLogRepository> = audit_repo.clone();
        let notification_port: Arc<dyn NotificationRepository> = notification_repo.clone();
        let services = Arc::new(ApplicationServices::new(
            audit_port,
            notification_port,
            dispatcher,
            clock,
        ));

        Self {
            services,
            audit_repo,
            notification_repo,
            in_app,
            email,
            sms,
        }
    }

    pub fn router(&self) -> axum::Router {
        build_router(
            HttpState::new(Arc::clone(&self.services)),
            RouterOptions::default(),
        )
    }

    /// バックグラウンドの監査書き込みが `expected` 件に達するまで待つ
    pub async fn wait_for_audit_entries(&self, expected: usize) -> Vec<lms_core::domain::audit::AuditLogEntry> {
        for _ in 0..100 {
            let entries = self.audit_repo.snapshot().await;
            if entries.len() >= expected {
                return entries;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.audit_repo.snapshot().await
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-actor-id", ACTOR)
        .body(Body::empty())
        .unwrap()
}

pub fn get_as(uri: &str, actor: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-actor-id", actor)
        .body(Body::empty())
        .unwrap()
}

pub fn get_anonymous(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, actor: Option<&str>, payload: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.7");
    if let Some(actor) = actor {
        builder = builder.header("x-actor-id", actor);
    }
    builder
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

pub async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("expected json body")
}

/// Assert that a response is an error body with the expected status, reason and code.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value =
        serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    assert_eq!(
        json["error"].as_str(),
        expected_status.canonical_reason(),
        "unexpected error field: {json}"
    );
    assert_eq!(json["code"].as_str(), Some(expected_code), "unexpected code: {json}");
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected non-empty message field"
    );
    json
}

/// 監査リポジトリを差し替えたルーター（エラー経路の E2E 用）
pub fn router_with_audit_repo(audit_repo: Arc<dyn AuditLogRepository>) -> axum::Router {
    let notification_repo: Arc<dyn NotificationRepository> =
        Arc::new(InMemoryNotificationRepository::new());
    let in_app: Arc<dyn NotificationSender> =
        Arc::new(mocks::RecordingSender::new(DeliveryChannel::InApp));
    let dispatcher = Arc::new(NotificationDispatcher::new(
        vec![in_app],
        fast_retry(),
        CircuitBreakerConfig::default(),
    ));
    let services = Arc::new(ApplicationServices::new(
        audit_repo,
        notification_repo,
        dispatcher,
        Arc::new(mocks::FixedClock::default()),
    ));
    build_router(HttpState::new(services), RouterOptions::default())
}
