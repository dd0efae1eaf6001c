// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 文档特质（document）：存储与缓存层对实体的最小要求
/// - 变更记录（modification）：写入前后的文档对
/// - Webhook（webhook）：Webhook 订阅实体与事件类型
pub mod document;
pub mod modification;
pub mod webhook;
