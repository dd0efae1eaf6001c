// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::document::{Document, OwnedByOrganizationAndProject};
use crate::domain::models::modification::ModifiedDocument;
use crate::domain::query::{FindResults, QueryDescriptor};
use crate::domain::repositories::cache_keys::organization_project_cache_key;
use async_trait::async_trait;
use std::time::Duration;

/// 查询能力
#[async_trait]
pub trait Findable<T: Document>: Send + Sync {
    /// 执行查询，设置了缓存键时走缓存
    async fn find(&self, query: QueryDescriptor) -> Result<FindResults<T>, RepositoryError>;

    /// 根据ID查找文档
    async fn get_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError>;

    /// 字段精确匹配查询，默认不缓存
    async fn find_by_field(
        &self,
        field: &str,
        value: &str,
    ) -> Result<FindResults<T>, RepositoryError> {
        self.find(QueryDescriptor::new().with_field_equals(field, value))
            .await
    }
}

/// 缓存能力
pub trait Cacheable {
    /// 进程级缓存开关，且配置了缓存后端
    fn is_cache_enabled(&self) -> bool;

    /// 未指定过期时间的查询使用的TTL
    fn default_expires_in(&self) -> Duration;

    /// 加上文档类型作用域后的缓存键
    fn scoped_cache_key(&self, key: &str) -> String;
}

/// 缓存失效能力
#[async_trait]
pub trait Invalidatable<T: Document>: Send + Sync {
    /// 根据写入前后的文档删除受影响的缓存项，返回实际删除数
    async fn invalidate(&self, modifications: &[ModifiedDocument<T>])
        -> Result<u64, RepositoryError>;
}

/// 失效策略
///
/// 由具体实体仓库注入，给出某个文档值会影响到的查询缓存键（不含类型作用域）。
pub trait InvalidationPolicy<T>: Send + Sync {
    fn cache_keys(&self, document: &T) -> Vec<String>;
}

/// 组织/项目可见性缓存键失效策略
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationProjectCacheKeys;

impl<T: OwnedByOrganizationAndProject> InvalidationPolicy<T> for OrganizationProjectCacheKeys {
    fn cache_keys(&self, document: &T) -> Vec<String> {
        vec![organization_project_cache_key(
            document.organization_id(),
            document.project_id(),
        )]
    }
}
