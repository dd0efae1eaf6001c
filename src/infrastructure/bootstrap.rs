// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracing::info;

use crate::config::settings::{CacheBackend, Settings};
use crate::domain::repositories::cache_client::CacheClient;
use crate::infrastructure::cache::memory_cache::MemoryCacheClient;
use crate::infrastructure::cache::redis_cache::RedisCacheClient;
use crate::infrastructure::cache::redis_client::RedisClient;
use crate::infrastructure::database::connection;
use crate::infrastructure::observability::metrics;
use crate::infrastructure::repositories::cached_repository::CacheOptions;
use crate::infrastructure::repositories::webhook_repo_impl::WebhookRepoImpl;
use crate::infrastructure::stores::sea_orm_webhook_store::SeaOrmWebhookStore;

/// 根据配置创建缓存后端，缓存关闭时返回 `None`
pub async fn build_cache_client(settings: &Settings) -> Result<Option<Arc<dyn CacheClient>>> {
    if !settings.cache.enabled {
        info!("Query cache disabled");
        return Ok(None);
    }

    let client: Arc<dyn CacheClient> = match settings.cache.backend {
        CacheBackend::Memory => Arc::new(MemoryCacheClient::new()),
        CacheBackend::Redis => {
            let url = settings
                .redis
                .url
                .as_deref()
                .context("redis.url is required when cache.backend is redis")?;
            let redis_client = RedisClient::new(url)
                .await
                .context("Failed to create redis client")?;
            Arc::new(RedisCacheClient::new(
                redis_client,
                settings.cache.key_prefix.clone(),
            ))
        }
    };

    info!("Query cache enabled with {:?} backend", settings.cache.backend);
    Ok(Some(client))
}

/// 连接数据库、执行迁移并组装 Webhook 仓库
pub async fn build_webhook_repository(settings: &Settings) -> Result<WebhookRepoImpl> {
    metrics::describe_metrics();

    let db = connection::create_pool(&settings.database)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations applied");

    let store = Arc::new(SeaOrmWebhookStore::new(Arc::new(db)));
    let cache = build_cache_client(settings).await?;

    Ok(WebhookRepoImpl::new(
        store,
        cache,
        CacheOptions::from(&settings.cache),
    ))
}
