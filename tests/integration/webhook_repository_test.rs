// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{memory_repository, sqlite_repository, webhook, TestRepository};
use hookstore::domain::models::modification::ModifiedDocument;
use hookstore::domain::models::webhook::WebhookEventType;
use hookstore::domain::repositories::capabilities::Invalidatable;
use hookstore::domain::repositories::webhook_repository::WebhookRepository;
use hookstore::domain::repositories::RepositoryError;

const ORG_WIDE_KEY: &str = "webhook:org:org1-project:*";

async fn assert_find_by_url(fixture: TestRepository) {
    let repo = &fixture.repository;
    repo.add(webhook("org1", None, "http://x")).await.unwrap();
    repo.add(webhook("org2", Some("p9"), "http://other"))
        .await
        .unwrap();

    let results = repo.get_by_url("http://x").await.unwrap();

    assert_eq!(results.total, 1);
    assert_eq!(results.documents.len(), 1);
    assert_eq!(results.documents[0].organization_id, "org1");
    assert!(results.documents[0].project_id.is_none());
}

async fn assert_visibility_includes_project_match(fixture: TestRepository) {
    let repo = &fixture.repository;
    repo.add(webhook("org1", None, "http://a")).await.unwrap();
    repo.add(webhook("org2", Some("p1"), "http://b")).await.unwrap();
    repo.add(webhook("org1", Some("p2"), "http://c")).await.unwrap();

    let results = repo
        .get_by_organization_id_or_project_id("org1", Some("p1"))
        .await
        .unwrap();

    let mut urls: Vec<&str> = results.documents.iter().map(|w| w.url.as_str()).collect();
    urls.sort();
    assert_eq!(urls, vec!["http://a", "http://b"]);
    assert!(fixture.cache.contains_key("webhook:org:org1-project:p1"));
}

async fn assert_write_invalidates_visibility(fixture: TestRepository) {
    let repo = &fixture.repository;

    let empty = repo
        .get_by_organization_id_or_project_id("org1", None)
        .await
        .unwrap();
    assert!(empty.is_empty());
    assert!(fixture.cache.contains_key(ORG_WIDE_KEY));

    let stored = repo.add(webhook("org1", None, "http://x")).await.unwrap();
    assert!(!stored.id.is_empty());
    assert!(!fixture.cache.contains_key(ORG_WIDE_KEY));

    let results = repo
        .get_by_organization_id_or_project_id("org1", None)
        .await
        .unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.documents[0].id, stored.id);
}

#[tokio::test]
async fn test_find_by_url_memory() {
    assert_find_by_url(memory_repository()).await;
}

#[tokio::test]
async fn test_find_by_url_sqlite() {
    assert_find_by_url(sqlite_repository().await).await;
}

#[tokio::test]
async fn test_visibility_memory() {
    assert_visibility_includes_project_match(memory_repository()).await;
}

#[tokio::test]
async fn test_visibility_sqlite() {
    assert_visibility_includes_project_match(sqlite_repository().await).await;
}

#[tokio::test]
async fn test_write_invalidates_visibility_memory() {
    assert_write_invalidates_visibility(memory_repository()).await;
}

#[tokio::test]
async fn test_write_invalidates_visibility_sqlite() {
    assert_write_invalidates_visibility(sqlite_repository().await).await;
}

#[tokio::test]
async fn test_project_reassignment_sqlite() {
    let fixture = sqlite_repository().await;
    let repo = &fixture.repository;
    let stored = repo.add(webhook("org1", None, "http://x")).await.unwrap();

    repo.get_by_organization_id_or_project_id("org1", None)
        .await
        .unwrap();
    repo.get_by_organization_id_or_project_id("org1", Some("p1"))
        .await
        .unwrap();

    let mut moved = stored.clone();
    moved.project_id = Some("p1".to_string());
    repo.save(moved).await.unwrap();

    assert!(!fixture.cache.contains_key(ORG_WIDE_KEY));
    assert!(!fixture.cache.contains_key("webhook:org:org1-project:p1"));

    let org_wide = repo
        .get_by_organization_id_or_project_id("org1", None)
        .await
        .unwrap();
    assert!(org_wide.is_empty());

    let project = repo
        .get_by_organization_id_or_project_id("org1", Some("p1"))
        .await
        .unwrap();
    assert_eq!(project.total, 1);
    assert_eq!(project.documents[0].project_id.as_deref(), Some("p1"));
}

#[tokio::test]
async fn test_crud_round_trip_sqlite() {
    let fixture = sqlite_repository().await;
    let repo = &fixture.repository;

    let stored = repo
        .add(webhook("org1", Some("p1"), "http://x"))
        .await
        .unwrap();
    let loaded = repo.find_by_id(&stored.id).await.unwrap().unwrap();
    assert_eq!(loaded.url, "http://x");
    assert!(loaded.subscribes_to(WebhookEventType::CriticalError));
    assert!(!loaded.subscribes_to(WebhookEventType::StackRegression));
    assert!(loaded.is_enabled);
    assert_eq!(loaded.version, "v2");

    let mut disabled = loaded.clone();
    disabled.is_enabled = false;
    repo.save(disabled).await.unwrap();
    let reloaded = repo.find_by_id(&stored.id).await.unwrap().unwrap();
    assert!(!reloaded.is_enabled);

    assert_eq!(repo.get_by_organization_id("org1").await.unwrap().total, 1);
    assert_eq!(repo.get_by_project_id("p1").await.unwrap().total, 1);
    assert_eq!(repo.count().await.unwrap(), 1);

    repo.remove(&stored.id).await.unwrap();
    assert!(repo.find_by_id(&stored.id).await.unwrap().is_none());
    assert!(matches!(
        repo.remove(&stored.id).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn test_remove_all_by_organization_sqlite() {
    let fixture = sqlite_repository().await;
    let repo = &fixture.repository;
    repo.add(webhook("org1", None, "http://a")).await.unwrap();
    repo.add(webhook("org1", Some("p1"), "http://b")).await.unwrap();
    repo.add(webhook("org2", None, "http://c")).await.unwrap();

    repo.get_by_organization_id_or_project_id("org1", None)
        .await
        .unwrap();

    assert_eq!(repo.remove_all_by_organization_id("org1").await.unwrap(), 2);
    assert!(!fixture.cache.contains_key(ORG_WIDE_KEY));
    assert_eq!(repo.count().await.unwrap(), 1);
    assert_eq!(repo.remove_all_by_project_id("p1").await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_webhook_is_rejected() {
    let fixture = memory_repository();
    let repo = &fixture.repository;

    let mut no_events = webhook("org1", None, "http://x");
    no_events.event_types.clear();
    assert!(matches!(
        repo.add(no_events).await,
        Err(RepositoryError::Validation(_))
    ));

    let bad_url = webhook("org1", None, "not a url");
    assert!(matches!(
        repo.add(bad_url).await,
        Err(RepositoryError::Validation(_))
    ));

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_explicit_invalidation_is_idempotent() {
    let fixture = memory_repository();
    let repo = &fixture.repository;
    let stored = repo.add(webhook("org1", None, "http://x")).await.unwrap();

    repo.get_by_organization_id_or_project_id("org1", None)
        .await
        .unwrap();
    let modification = [ModifiedDocument::created(stored)];

    assert_eq!(repo.invalidate(&modification).await.unwrap(), 1);
    let after_first = fixture.cache.keys();
    assert_eq!(repo.invalidate(&modification).await.unwrap(), 0);
    assert_eq!(fixture.cache.keys(), after_first);
}
