// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::document::Document;
use crate::domain::query::{FindResults, QueryDescriptor};
use async_trait::async_trait;

/// 文档存储特质
///
/// 存储独占持久化状态，缓存层只保存副本。
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    /// 执行结构化查询
    ///
    /// 过滤条件引用未知字段时返回 [`RepositoryError::Query`]。
    async fn find(&self, query: &QueryDescriptor) -> Result<FindResults<T>, RepositoryError>;
    /// 根据ID查找文档
    async fn get_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError>;
    /// 插入文档，ID为空时由存储分配
    async fn insert(&self, document: T) -> Result<T, RepositoryError>;
    /// 更新已有文档，不存在时返回 [`RepositoryError::NotFound`]
    async fn update(&self, document: T) -> Result<T, RepositoryError>;
    /// 删除文档，不存在时返回 [`RepositoryError::NotFound`]
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
    /// 文档总数
    async fn count(&self) -> Result<u64, RepositoryError>;
}
