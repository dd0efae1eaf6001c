// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::domain::repositories::cache_client::CacheClient;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::cache::redis_client::RedisClient;

/// Redis缓存客户端
///
/// 所有键加上全局前缀，避免与同一 Redis 实例中的其他数据冲突。
#[derive(Clone)]
pub struct RedisCacheClient {
    redis_client: RedisClient,
    key_prefix: String,
}

impl RedisCacheClient {
    pub fn new(redis_client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            redis_client,
            key_prefix: key_prefix.into(),
        }
    }

    fn generate_cache_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }
}

fn connectivity(err: anyhow::Error) -> RepositoryError {
    RepositoryError::Connectivity(err.to_string())
}

#[async_trait]
impl CacheClient for RedisCacheClient {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        self.redis_client
            .get(&self.generate_cache_key(key))
            .await
            .map_err(connectivity)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), RepositoryError> {
        // SET EX 只接受整秒且必须大于0
        let ttl_seconds = ttl.as_secs().max(1);
        self.redis_client
            .set(&self.generate_cache_key(key), value, ttl_seconds)
            .await
            .map_err(connectivity)
    }

    async fn remove_all(&self, keys: &[String]) -> Result<u64, RepositoryError> {
        let cache_keys: Vec<String> = keys.iter().map(|k| self.generate_cache_key(k)).collect();
        let removed = self
            .redis_client
            .del_many(&cache_keys)
            .await
            .map_err(connectivity)?;

        debug!("Removed {} of {} Redis cache keys", removed, keys.len());
        Ok(removed)
    }
}
