// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::models::modification::ModifiedDocument;
use crate::domain::models::webhook::{webhook_fields, Webhook};
use crate::domain::query::FindResults;
use crate::domain::repositories::cache_client::CacheClient;
use crate::domain::repositories::capabilities::{
    Findable, Invalidatable, OrganizationProjectCacheKeys,
};
use crate::domain::repositories::document_store::DocumentStore;
use crate::domain::repositories::webhook_repository::WebhookRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::repositories::cached_repository::{CacheOptions, CachedRepository};

/// 组织/项目可见性查询的缓存时间
pub const VISIBILITY_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Webhook仓库实现
///
/// 只提供字段映射与缓存键，查询、缓存和失效都交给 [`CachedRepository`]。
#[derive(Clone)]
pub struct WebhookRepoImpl {
    repository: CachedRepository<Webhook>,
}

impl WebhookRepoImpl {
    /// 创建新的Webhook仓库实现
    ///
    /// `cache` 为空时缓存整体关闭。
    pub fn new(
        store: Arc<dyn DocumentStore<Webhook>>,
        cache: Option<Arc<dyn CacheClient>>,
        options: CacheOptions,
    ) -> Self {
        let repository = CachedRepository::new(store)
            .with_invalidation_policy(Arc::new(OrganizationProjectCacheKeys));
        let repository = match cache {
            Some(cache) => repository.with_cache(cache, options),
            None => repository,
        };

        Self { repository }
    }

    /// 底层通用仓库
    pub fn repository(&self) -> &CachedRepository<Webhook> {
        &self.repository
    }
}

#[async_trait]
impl WebhookRepository for WebhookRepoImpl {
    async fn add(&self, webhook: Webhook) -> Result<Webhook, RepositoryError> {
        self.repository.add(webhook).await
    }

    async fn save(&self, webhook: Webhook) -> Result<Webhook, RepositoryError> {
        self.repository.save(webhook).await
    }

    async fn remove(&self, id: &str) -> Result<(), RepositoryError> {
        self.repository.remove(id).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Webhook>, RepositoryError> {
        self.repository.get_by_id(id).await
    }

    async fn get_by_url(&self, target_url: &str) -> Result<FindResults<Webhook>, RepositoryError> {
        self.repository
            .find_by_field(webhook_fields::URL, target_url)
            .await
    }

    async fn get_by_organization_id_or_project_id(
        &self,
        organization_id: &str,
        project_id: Option<&str>,
    ) -> Result<FindResults<Webhook>, RepositoryError> {
        self.repository
            .find_visible_to(organization_id, project_id, VISIBILITY_CACHE_TTL)
            .await
    }

    async fn get_by_organization_id(
        &self,
        organization_id: &str,
    ) -> Result<FindResults<Webhook>, RepositoryError> {
        self.repository
            .find_by_organization_id(organization_id)
            .await
    }

    async fn get_by_project_id(
        &self,
        project_id: &str,
    ) -> Result<FindResults<Webhook>, RepositoryError> {
        self.repository.find_by_project_id(project_id).await
    }

    async fn remove_all_by_organization_id(
        &self,
        organization_id: &str,
    ) -> Result<u64, RepositoryError> {
        self.repository
            .remove_all_by_organization_id(organization_id)
            .await
    }

    async fn remove_all_by_project_id(&self, project_id: &str) -> Result<u64, RepositoryError> {
        self.repository.remove_all_by_project_id(project_id).await
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        self.repository.count().await
    }
}

#[async_trait]
impl Invalidatable<Webhook> for WebhookRepoImpl {
    async fn invalidate(
        &self,
        modifications: &[ModifiedDocument<Webhook>],
    ) -> Result<u64, RepositoryError> {
        self.repository.invalidate(modifications).await
    }
}

#[cfg(test)]
#[path = "webhook_repo_impl_test.rs"]
mod tests;
