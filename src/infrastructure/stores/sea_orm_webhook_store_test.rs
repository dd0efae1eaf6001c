use super::*;
use crate::domain::models::webhook::WebhookEventType;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

async fn setup_store() -> SeaOrmWebhookStore {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let db = Arc::new(db);
    Migrator::up(db.as_ref(), None).await.unwrap();
    SeaOrmWebhookStore::new(db)
}

fn webhook(org: &str, project: Option<&str>, url: &str) -> Webhook {
    Webhook::new(
        org,
        project.map(str::to_string),
        url,
        &[WebhookEventType::NewError, WebhookEventType::StackRegression],
    )
}

#[tokio::test]
async fn test_insert_assigns_id_and_round_trips() {
    let store = setup_store().await;

    let stored = store
        .insert(webhook("org1", None, "http://x"))
        .await
        .unwrap();
    assert!(!stored.id.is_empty());

    let loaded = store.get_by_id(&stored.id).await.unwrap().unwrap();
    assert_eq!(loaded.organization_id, "org1");
    assert_eq!(loaded.project_id, None);
    assert_eq!(loaded.url, "http://x");
    assert_eq!(
        loaded.event_types,
        vec!["NewError".to_string(), "StackRegression".to_string()]
    );
    assert!(loaded.is_enabled);

    assert!(store.get_by_id("missing").await.unwrap().is_none());
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_find_by_field_equals() {
    let store = setup_store().await;
    store.insert(webhook("org1", None, "http://x")).await.unwrap();
    store.insert(webhook("org2", Some("p1"), "http://y")).await.unwrap();

    let query = QueryDescriptor::new().with_field_equals(webhook_fields::URL, "http://x");
    let results = store.find(&query).await.unwrap();

    assert_eq!(results.total, 1);
    assert_eq!(results.documents[0].organization_id, "org1");
}

#[tokio::test]
async fn test_visibility_filter_translates_or_of_two_branches() {
    let store = setup_store().await;
    store.insert(webhook("org1", None, "http://a")).await.unwrap();
    store.insert(webhook("org1", Some("p2"), "http://b")).await.unwrap();
    store.insert(webhook("org2", Some("p1"), "http://c")).await.unwrap();
    store.insert(webhook("org2", None, "http://d")).await.unwrap();

    let filter = Filter::term(webhook_fields::ORGANIZATION_ID, "org1")
        .and(Filter::missing(webhook_fields::PROJECT_ID))
        .or(Filter::term(webhook_fields::PROJECT_ID, "p1"));
    let results = store
        .find(&QueryDescriptor::new().with_filter(filter))
        .await
        .unwrap();

    let mut urls: Vec<&str> = results.documents.iter().map(|w| w.url.as_str()).collect();
    urls.sort();
    assert_eq!(urls, vec!["http://a", "http://c"]);
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let store = setup_store().await;

    let query = QueryDescriptor::new().with_field_equals("team_id", "t1");
    assert!(matches!(
        store.find(&query).await,
        Err(RepositoryError::Query(_))
    ));

    let query = QueryDescriptor::new().with_field_equals(webhook_fields::IS_ENABLED, "yes");
    assert!(matches!(
        store.find(&query).await,
        Err(RepositoryError::Query(_))
    ));
}

#[tokio::test]
async fn test_paging() {
    let store = setup_store().await;
    for i in 0..5 {
        store
            .insert(webhook("org1", None, &format!("http://h{}", i)))
            .await
            .unwrap();
    }

    let query = QueryDescriptor::new()
        .with_field_equals(webhook_fields::ORGANIZATION_ID, "org1")
        .with_paging(2, 2);
    let results = store.find(&query).await.unwrap();

    assert_eq!(results.total, 5);
    assert_eq!(results.len(), 2);
    assert!(results.has_more);
}

#[tokio::test]
async fn test_update_and_delete_missing_record() {
    let store = setup_store().await;

    let mut stored = store
        .insert(webhook("org1", None, "http://x"))
        .await
        .unwrap();
    stored.project_id = Some("p1".to_string());
    stored.is_enabled = false;
    let updated = store.update(stored.clone()).await.unwrap();
    assert_eq!(updated.project_id.as_deref(), Some("p1"));

    let query = QueryDescriptor::new().with_field_equals(webhook_fields::IS_ENABLED, "false");
    assert_eq!(store.find(&query).await.unwrap().total, 1);

    let mut ghost = webhook("org1", None, "http://ghost");
    ghost.id = "ghost".to_string();
    assert!(matches!(
        store.update(ghost).await,
        Err(RepositoryError::NotFound)
    ));

    store.delete(&stored.id).await.unwrap();
    assert!(matches!(
        store.delete(&stored.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert_eq!(store.count().await.unwrap(), 0);
}
