// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use async_trait::async_trait;
use std::time::Duration;

/// 缓存客户端特质
///
/// 缓存只作为旁路，删除不存在的键不是错误。
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// 获取缓存值
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    /// 设置缓存值并指定过期时间
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), RepositoryError>;
    /// 批量删除，返回实际删除的条目数
    async fn remove_all(&self, keys: &[String]) -> Result<u64, RepositoryError>;
}
