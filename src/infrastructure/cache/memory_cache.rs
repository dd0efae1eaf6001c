// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::repositories::cache_client::CacheClient;
use crate::domain::repositories::RepositoryError;

/// 缓存条目
#[derive(Clone)]
struct CacheEntry {
    data: String,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn new(data: String, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// 内存缓存客户端
///
/// 基于 DashMap 的进程内缓存，过期条目在读取时惰性清除。
#[derive(Default)]
pub struct MemoryCacheClient {
    cache: DashMap<String, CacheEntry>,
}

impl MemoryCacheClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 键存在且未过期
    pub fn contains_key(&self, key: &str) -> bool {
        self.cache
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    /// 未过期的键，按字典序排列
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .cache
            .iter()
            .filter(|entry| !entry.value().is_expired())
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    /// 未过期的条目数
    pub fn len(&self) -> usize {
        self.cache
            .iter()
            .filter(|entry| !entry.value().is_expired())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 清空缓存
    pub fn clear(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl CacheClient for MemoryCacheClient {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        if let Some(entry) = self.cache.get(key) {
            if entry.is_expired() {
                drop(entry);
                // 检查与删除之间可能有并发写入，只删除仍然过期的条目
                self.cache.remove_if(key, |_, entry| entry.is_expired());
                debug!("Memory cache entry expired for key: {}", key);
                return Ok(None);
            }

            return Ok(Some(entry.data.clone()));
        }

        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), RepositoryError> {
        self.cache
            .insert(key.to_string(), CacheEntry::new(value.to_string(), ttl));
        debug!("Stored memory cache entry for key: {} (ttl {:?})", key, ttl);
        Ok(())
    }

    async fn remove_all(&self, keys: &[String]) -> Result<u64, RepositoryError> {
        let removed = keys
            .iter()
            .filter_map(|key| self.cache.remove(key))
            .filter(|(_, entry)| !entry.is_expired())
            .count() as u64;

        debug!("Removed {} of {} memory cache keys", removed, keys.len());
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "memory_cache_test.rs"]
mod tests;
