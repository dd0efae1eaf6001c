// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use hookstore::config::settings::DatabaseSettings;
use hookstore::domain::models::webhook::{Webhook, WebhookEventType};
use hookstore::infrastructure::cache::memory_cache::MemoryCacheClient;
use hookstore::infrastructure::database::connection;
use hookstore::infrastructure::repositories::cached_repository::CacheOptions;
use hookstore::infrastructure::repositories::webhook_repo_impl::WebhookRepoImpl;
use hookstore::infrastructure::stores::memory_store::MemoryDocumentStore;
use hookstore::infrastructure::stores::sea_orm_webhook_store::SeaOrmWebhookStore;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;

pub struct TestRepository {
    pub repository: WebhookRepoImpl,
    pub cache: Arc<MemoryCacheClient>,
}

fn sqlite_settings() -> DatabaseSettings {
    DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: None,
        min_connections: None,
        connect_timeout: Some(5),
        idle_timeout: None,
    }
}

/// 基于 SQLite 内存库的仓库
pub async fn sqlite_repository() -> TestRepository {
    let db = connection::create_pool(&sqlite_settings())
        .await
        .expect("Failed to connect to sqlite");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let cache = Arc::new(MemoryCacheClient::new());
    let repository = WebhookRepoImpl::new(
        Arc::new(SeaOrmWebhookStore::new(Arc::new(db))),
        Some(cache.clone()),
        CacheOptions::default(),
    );

    TestRepository { repository, cache }
}

/// 基于内存存储的仓库
pub fn memory_repository() -> TestRepository {
    let cache = Arc::new(MemoryCacheClient::new());
    let repository = WebhookRepoImpl::new(
        Arc::new(MemoryDocumentStore::<Webhook>::new()),
        Some(cache.clone()),
        CacheOptions::default(),
    );

    TestRepository { repository, cache }
}

pub fn webhook(organization_id: &str, project_id: Option<&str>, url: &str) -> Webhook {
    Webhook::new(
        organization_id,
        project_id.map(str::to_string),
        url,
        &[WebhookEventType::NewError, WebhookEventType::CriticalError],
    )
}
