// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 文档存储模块
///
/// [`DocumentStore`](crate::domain::repositories::document_store::DocumentStore) 的实现：
/// 内存存储与基于 sea-orm 的 Webhook 存储
pub mod memory_store;
pub mod sea_orm_webhook_store;
