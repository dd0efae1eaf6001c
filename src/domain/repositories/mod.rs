// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层的仓库与外部协作者接口，具体实现由基础设施层提供：
/// - 文档存储（document_store）：执行结构化查询并返回分页结果
/// - 缓存客户端（cache_client）：带过期时间和批量删除的键值存储
/// - 能力特质（capabilities）：查询、缓存与失效能力
/// - 缓存键（cache_keys）：纯函数形式的缓存键推导
/// - Webhook仓库（webhook_repository）：Webhook订阅的数据访问接口
pub mod cache_client;
pub mod cache_keys;
pub mod capabilities;
pub mod document_store;
pub mod webhook_repository;

use sea_orm::{sqlx, DbErr, RuntimeErr};
use std::borrow::Borrow;
use thiserror::Error;
use validator::ValidationErrors;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 存储拒绝了查询（例如引用了未知字段），不重试
    #[error("Query rejected: {0}")]
    Query(String),
    /// 无法连接到存储或缓存，重试策略由调用方负责
    #[error("Connectivity error: {0}")]
    Connectivity(String),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 文档校验失败
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// 序列化失败
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                RepositoryError::Connectivity(err.to_string())
            }
            DbErr::Query(runtime) | DbErr::Exec(runtime) if is_transport_failure(runtime) => {
                RepositoryError::Connectivity(err.to_string())
            }
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepositoryError::NotFound,
            _ => RepositoryError::Query(err.to_string()),
        }
    }
}

/// 驱动层的传输类错误（连接中断、TLS、连接池耗尽或关闭）
fn is_transport_failure(runtime: &RuntimeErr) -> bool {
    match runtime {
        RuntimeErr::SqlxError(source) => {
            let source: &sqlx::Error = Borrow::borrow(source);
            matches!(
                source,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            )
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "repository_error_test.rs"]
mod tests;
