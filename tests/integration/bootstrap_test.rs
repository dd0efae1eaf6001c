// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::webhook;
use hookstore::config::settings::Settings;
use hookstore::domain::repositories::capabilities::Cacheable;
use hookstore::domain::repositories::webhook_repository::WebhookRepository;
use hookstore::infrastructure::bootstrap::{build_cache_client, build_webhook_repository};

fn settings_with(overrides: &[(&str, &str)]) -> Settings {
    let mut builder = Settings::builder().unwrap();
    for (key, value) in overrides {
        builder = builder.set_override(*key, *value).unwrap();
    }
    builder.build().unwrap().try_deserialize().unwrap()
}

#[tokio::test]
async fn test_build_repository_from_default_settings() {
    let settings = settings_with(&[]);
    let repo = build_webhook_repository(&settings).await.unwrap();

    assert!(repo.repository().is_cache_enabled());

    repo.add(webhook("org1", None, "http://x")).await.unwrap();
    let results = repo
        .get_by_organization_id_or_project_id("org1", None)
        .await
        .unwrap();
    assert_eq!(results.total, 1);
}

#[tokio::test]
async fn test_disabled_cache_builds_no_client() {
    let settings = settings_with(&[("cache.enabled", "false")]);

    assert!(build_cache_client(&settings).await.unwrap().is_none());

    let repo = build_webhook_repository(&settings).await.unwrap();
    assert!(!repo.repository().is_cache_enabled());
}

#[tokio::test]
async fn test_redis_backend_requires_url() {
    let settings = settings_with(&[("cache.backend", "redis")]);

    assert!(build_cache_client(&settings).await.is_err());
}
