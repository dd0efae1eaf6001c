// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::settings::CacheSettings;
use crate::domain::models::document::{Document, OwnedByOrganizationAndProject};
use crate::domain::models::modification::ModifiedDocument;
use crate::domain::query::{Filter, FindResults, QueryDescriptor};
use crate::domain::repositories::cache_client::CacheClient;
use crate::domain::repositories::cache_keys::{
    document_cache_key, organization_project_cache_key, scoped_cache_key,
};
use crate::domain::repositories::capabilities::{
    Cacheable, Findable, Invalidatable, InvalidationPolicy,
};
use crate::domain::repositories::document_store::DocumentStore;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::observability::metrics;

/// 默认缓存过期时间（5分钟）
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// 缓存选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// 进程级缓存开关
    pub enabled: bool,
    /// 查询未指定过期时间时使用的TTL
    pub default_ttl: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl From<&CacheSettings> for CacheOptions {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            default_ttl: settings.default_ttl(),
        }
    }
}

/// 带缓存的通用文档仓库
///
/// 在文档存储之上提供查询、结果缓存和写入后的精确失效。
/// 具体实体仓库通过注入 [`InvalidationPolicy`] 提供自己的查询缓存键，而不是继承。
///
/// 缓存只是旁路：读缓存失败会回落到存储，写缓存或失效失败只记录日志，
/// 陈旧数据最多存活一个TTL。
#[derive(Clone)]
pub struct CachedRepository<T: Document> {
    store: Arc<dyn DocumentStore<T>>,
    cache: Option<Arc<dyn CacheClient>>,
    policy: Option<Arc<dyn InvalidationPolicy<T>>>,
    options: CacheOptions,
}

impl<T: Document> CachedRepository<T> {
    /// 创建不带缓存的仓库
    pub fn new(store: Arc<dyn DocumentStore<T>>) -> Self {
        Self {
            store,
            cache: None,
            policy: None,
            options: CacheOptions::default(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn CacheClient>, options: CacheOptions) -> Self {
        self.cache = Some(cache);
        self.options = options;
        self
    }

    pub fn with_invalidation_policy(mut self, policy: Arc<dyn InvalidationPolicy<T>>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn options(&self) -> CacheOptions {
        self.options
    }

    /// 当前启用的缓存后端
    fn active_cache(&self) -> Option<&Arc<dyn CacheClient>> {
        self.cache.as_ref().filter(|_| self.options.enabled)
    }

    async fn read_cached<V: DeserializeOwned>(
        &self,
        cache: &dyn CacheClient,
        key: &str,
    ) -> Option<V> {
        match cache.get(key).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(value) => {
                    metrics::record_cache_hit(T::TYPE_NAME);
                    debug!("Cache hit for key: {}", key);
                    Some(value)
                }
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    metrics::record_cache_miss(T::TYPE_NAME);
                    None
                }
            },
            Ok(None) => {
                metrics::record_cache_miss(T::TYPE_NAME);
                debug!("Cache miss for key: {}", key);
                None
            }
            Err(e) => {
                warn!("Cache read failed for key {}, falling back to store: {}", key, e);
                metrics::record_cache_miss(T::TYPE_NAME);
                None
            }
        }
    }

    async fn write_cached<V: Serialize + Sync>(
        &self,
        cache: &dyn CacheClient,
        key: &str,
        value: &V,
        ttl: Duration,
    ) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to encode cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = cache.set(key, &payload, ttl).await {
            warn!("Cache write failed for key {}: {}", key, e);
        }
    }

    /// 变更涉及的全部缓存键（已加作用域并去重）
    fn invalidation_keys(&self, modifications: &[ModifiedDocument<T>]) -> Vec<String> {
        let mut keys = BTreeSet::new();

        for document in modifications.iter().flat_map(ModifiedDocument::documents) {
            keys.insert(self.scoped_cache_key(&document_cache_key(document.id())));
            if let Some(policy) = &self.policy {
                keys.extend(
                    policy
                        .cache_keys(document)
                        .iter()
                        .map(|key| self.scoped_cache_key(key)),
                );
            }
        }

        keys.into_iter().collect()
    }

    /// 写入成功后失效缓存，失败只记录日志
    async fn after_write(&self, modifications: &[ModifiedDocument<T>]) {
        if modifications.is_empty() {
            return;
        }

        if let Err(e) = self.invalidate(modifications).await {
            metrics::record_invalidation_failure(T::TYPE_NAME);
            warn!(
                "Cache invalidation failed after writing {} {} document(s): {}",
                modifications.len(),
                T::TYPE_NAME,
                e
            );
        }
    }

    /// 新建文档
    pub async fn add(&self, document: T) -> Result<T, RepositoryError> {
        document.validate()?;

        let stored = self.store.insert(document).await?;
        self.after_write(&[ModifiedDocument::created(stored.clone())])
            .await;
        Ok(stored)
    }

    /// 更新文档，旧值与新值对应的缓存都会失效
    pub async fn save(&self, document: T) -> Result<T, RepositoryError> {
        document.validate()?;

        let original = self
            .store
            .get_by_id(document.id())
            .await?
            .ok_or(RepositoryError::NotFound)?;
        let stored = self.store.update(document).await?;
        self.after_write(&[ModifiedDocument::updated(stored.clone(), original)])
            .await;
        Ok(stored)
    }

    /// 删除文档
    pub async fn remove(&self, id: &str) -> Result<(), RepositoryError> {
        let existing = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        self.store.delete(id).await?;
        self.after_write(&[ModifiedDocument::removed(existing)]).await;
        Ok(())
    }

    /// 删除查询匹配的全部文档，返回删除数量
    ///
    /// 所有被删除文档的缓存键在一次批量调用中失效。中途出错时，
    /// 已删除的文档仍会被失效，然后返回该错误。
    pub async fn remove_all(&self, query: QueryDescriptor) -> Result<u64, RepositoryError> {
        let found = self.store.find(&query).await?;

        let mut removed = Vec::with_capacity(found.documents.len());
        let mut failure = None;
        for document in found.documents {
            match self.store.delete(document.id()).await {
                Ok(()) => removed.push(ModifiedDocument::removed(document)),
                // 并发删除
                Err(RepositoryError::NotFound) => {}
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        self.after_write(&removed).await;

        match failure {
            Some(e) => Err(e),
            None => Ok(removed.len() as u64),
        }
    }

    /// 文档总数
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        self.store.count().await
    }
}

/// 组织/项目可见性查询
///
/// `(organization_id = org AND project_id 缺失) OR project_id = project`。
/// 两个分支相互独立，其他组织下项目ID相同的文档也会匹配。
pub fn visible_to_query<T: OwnedByOrganizationAndProject>(
    organization_id: &str,
    project_id: Option<&str>,
) -> QueryDescriptor {
    let organization_wide = Filter::term(T::ORGANIZATION_FIELD, organization_id)
        .and(Filter::missing(T::PROJECT_FIELD));
    let filter = match project_id {
        Some(project_id) => organization_wide.or(Filter::term(T::PROJECT_FIELD, project_id)),
        None => organization_wide,
    };

    QueryDescriptor::new()
        .with_filter(filter)
        .with_cache_key(organization_project_cache_key(organization_id, project_id))
}

impl<T: OwnedByOrganizationAndProject> CachedRepository<T> {
    /// 查找对组织或项目可见的文档，结果缓存 `expires_in`
    pub async fn find_visible_to(
        &self,
        organization_id: &str,
        project_id: Option<&str>,
        expires_in: Duration,
    ) -> Result<FindResults<T>, RepositoryError> {
        let query =
            visible_to_query::<T>(organization_id, project_id).with_expires_in(expires_in);
        self.find(query).await
    }

    pub async fn find_by_organization_id(
        &self,
        organization_id: &str,
    ) -> Result<FindResults<T>, RepositoryError> {
        self.find_by_field(T::ORGANIZATION_FIELD, organization_id)
            .await
    }

    pub async fn find_by_project_id(
        &self,
        project_id: &str,
    ) -> Result<FindResults<T>, RepositoryError> {
        self.find_by_field(T::PROJECT_FIELD, project_id).await
    }

    pub async fn remove_all_by_organization_id(
        &self,
        organization_id: &str,
    ) -> Result<u64, RepositoryError> {
        let query =
            QueryDescriptor::new().with_field_equals(T::ORGANIZATION_FIELD, organization_id);
        self.remove_all(query).await
    }

    pub async fn remove_all_by_project_id(&self, project_id: &str) -> Result<u64, RepositoryError> {
        let query = QueryDescriptor::new().with_field_equals(T::PROJECT_FIELD, project_id);
        self.remove_all(query).await
    }
}

#[async_trait]
impl<T: Document> Findable<T> for CachedRepository<T> {
    async fn find(&self, query: QueryDescriptor) -> Result<FindResults<T>, RepositoryError> {
        // 分页查询不读写缓存
        let cached = match (self.active_cache(), query.cache_key(), query.paging()) {
            (Some(cache), Some(key), None) => Some((cache.clone(), self.scoped_cache_key(key))),
            (Some(_), Some(key), Some(paging)) => {
                debug!("Bypassing cache for paged query {} ({:?})", key, paging);
                None
            }
            _ => None,
        };

        if let Some((cache, key)) = &cached {
            if let Some(results) = self.read_cached::<FindResults<T>>(cache.as_ref(), key).await {
                return Ok(results);
            }
        }

        let results = self.store.find(&query).await?;

        if let Some((cache, key)) = &cached {
            let ttl = query
                .expires_in()
                .unwrap_or_else(|| self.default_expires_in());
            self.write_cached(cache.as_ref(), key, &results, ttl).await;
            debug!(
                "Cached {} {} document(s) under {} for {:?}",
                results.len(),
                T::TYPE_NAME,
                key,
                ttl
            );
        }

        Ok(results)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        let Some(cache) = self.active_cache().cloned() else {
            return self.store.get_by_id(id).await;
        };

        let key = self.scoped_cache_key(&document_cache_key(id));
        if let Some(document) = self.read_cached::<T>(cache.as_ref(), &key).await {
            return Ok(Some(document));
        }

        let document = self.store.get_by_id(id).await?;
        if let Some(document) = &document {
            self.write_cached(cache.as_ref(), &key, document, self.default_expires_in())
                .await;
        }
        Ok(document)
    }
}

impl<T: Document> Cacheable for CachedRepository<T> {
    fn is_cache_enabled(&self) -> bool {
        self.active_cache().is_some()
    }

    fn default_expires_in(&self) -> Duration {
        self.options.default_ttl
    }

    fn scoped_cache_key(&self, key: &str) -> String {
        scoped_cache_key(T::TYPE_NAME, key)
    }
}

#[async_trait]
impl<T: Document> Invalidatable<T> for CachedRepository<T> {
    async fn invalidate(
        &self,
        modifications: &[ModifiedDocument<T>],
    ) -> Result<u64, RepositoryError> {
        let Some(cache) = self.active_cache() else {
            return Ok(0);
        };

        let keys = self.invalidation_keys(modifications);
        if keys.is_empty() {
            return Ok(0);
        }

        let removed = cache.remove_all(&keys).await?;
        metrics::record_invalidation(T::TYPE_NAME, removed);
        info!(
            "Invalidated {} of {} {} cache key(s)",
            removed,
            keys.len(),
            T::TYPE_NAME
        );
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "cached_repository_test.rs"]
mod tests;
