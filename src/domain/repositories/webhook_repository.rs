// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::webhook::Webhook;
use crate::domain::query::FindResults;
use async_trait::async_trait;

/// Webhook仓库特质
///
/// 定义Webhook订阅的数据访问接口。写操作在存储成功后同步失效相关缓存，
/// 缓存失效失败不会导致写操作失败。
#[async_trait]
pub trait WebhookRepository: Send + Sync {
    /// 创建Webhook
    async fn add(&self, webhook: Webhook) -> Result<Webhook, RepositoryError>;
    /// 更新Webhook
    async fn save(&self, webhook: Webhook) -> Result<Webhook, RepositoryError>;
    /// 删除Webhook
    async fn remove(&self, id: &str) -> Result<(), RepositoryError>;
    /// 根据ID查找Webhook
    async fn find_by_id(&self, id: &str) -> Result<Option<Webhook>, RepositoryError>;
    /// 根据目标URL查找Webhook
    async fn get_by_url(&self, target_url: &str) -> Result<FindResults<Webhook>, RepositoryError>;
    /// 查找对组织或项目可见的Webhook
    ///
    /// 匹配条件为“属于该组织且没有项目”或“属于该项目”，两者是或的关系：
    /// 其他组织下项目ID相同的Webhook同样会被返回。
    async fn get_by_organization_id_or_project_id(
        &self,
        organization_id: &str,
        project_id: Option<&str>,
    ) -> Result<FindResults<Webhook>, RepositoryError>;
    /// 查找组织下的全部Webhook
    async fn get_by_organization_id(
        &self,
        organization_id: &str,
    ) -> Result<FindResults<Webhook>, RepositoryError>;
    /// 查找项目下的全部Webhook
    async fn get_by_project_id(
        &self,
        project_id: &str,
    ) -> Result<FindResults<Webhook>, RepositoryError>;
    /// 删除组织下的全部Webhook，返回删除数量
    async fn remove_all_by_organization_id(
        &self,
        organization_id: &str,
    ) -> Result<u64, RepositoryError>;
    /// 删除项目下的全部Webhook，返回删除数量
    async fn remove_all_by_project_id(&self, project_id: &str) -> Result<u64, RepositoryError>;
    /// Webhook总数
    async fn count(&self) -> Result<u64, RepositoryError>;
}
