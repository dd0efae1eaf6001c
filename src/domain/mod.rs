// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：Webhook 实体与文档特质
/// - 查询描述（query）：过滤条件、缓存指令与查询结果
/// - 仓库接口（repositories）：存储、缓存与仓库的抽象接口
///
/// 领域层不依赖具体的存储或缓存实现。
pub mod models;
pub mod query;
pub mod repositories;
