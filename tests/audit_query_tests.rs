// tests/audit_query_tests.rs
use lms_core::application::commands::audit::AuditCommandService;
use lms_core::application::queries::audit::{
    AuditQueryService, ListAuditLogsByActorQuery, ListAuditLogsByEntityQuery, ListAuditLogsQuery,
};
use lms_core::infrastructure::repositories::InMemoryAuditLogRepository;
use std::sync::Arc;

mod support;
use support::{SteppingClock, sample_entry};

async fn seeded() -> AuditQueryService {
    let repo = Arc::new(InMemoryAuditLogRepository::new());
    let audit = AuditCommandService::new(repo.clone(), Arc::new(SteppingClock::default()));
    for i in 0..5 {
        audit
            .record(sample_entry("u1", "lesson_viewed", "lessons").entity_id(format!("l-{i}")))
            .await;
    }
    audit
        .record(sample_entry("u2", "course_created", "courses").entity_id("c-1"))
        .await;
    audit
        .record(sample_entry("u2", "course_updated", "courses").entity_id("c-1"))
        .await;
    AuditQueryService::new(repo)
}

/// カーソルで新しい順にページングできる
#[tokio::test]
async fn list_pages_newest_first_through_cursor() {
    let svc = seeded().await;

    let first = svc
        .list_audit_logs(ListAuditLogsQuery {
            limit: 3,
            cursor: None,
        })
        .await
        .unwrap();
    assert_eq!(first.items.iter().map(|e| e.id).collect::<Vec<_>>(), vec![7, 6, 5]);
    assert!(first.has_more);

    let second = svc
        .list_audit_logs(ListAuditLogsQuery {
            limit: 3,
            cursor: first.next_cursor.clone(),
        })
        .await
        .unwrap();
    assert_eq!(second.items.iter().map(|e| e.id).collect::<Vec<_>>(), vec![4, 3, 2]);

    let last = svc
        .list_audit_logs(ListAuditLogsQuery {
            limit: 3,
            cursor: second.next_cursor.clone(),
        })
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert!(!last.has_more);
    assert!(last.next_cursor.is_none());
}

/// アクター・エンティティ単位の絞り込み
#[tokio::test]
async fn filters_by_actor_and_entity() {
    let svc = seeded().await;

    let by_actor = svc
        .list_by_actor(ListAuditLogsByActorQuery {
            actor_id: "u2".into(),
            limit: 0,
            cursor: None,
        })
        .await
        .unwrap();
    assert_eq!(by_actor.items.len(), 2);
    assert!(by_actor.items.iter().all(|e| e.actor_id == "u2"));

    let by_entity = svc
        .list_by_entity(ListAuditLogsByEntityQuery {
            entity: "lessons".into(),
            entity_id: "l-2".into(),
            limit: 10,
            cursor: None,
        })
        .await
        .unwrap();
    assert_eq!(by_entity.items.len(), 1);
    assert_eq!(by_entity.items[0].entity_id.as_deref(), Some("l-2"));
}

/// 不正なカーソルは VALIDATION_ERROR
#[tokio::test]
async fn malformed_cursor_is_a_validation_error() {
    let svc = seeded().await;
    let err = svc
        .list_audit_logs(ListAuditLogsQuery {
            limit: 10,
            cursor: Some("%%%".into()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}
