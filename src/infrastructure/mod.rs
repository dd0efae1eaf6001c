// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 提供领域层抽象接口的技术实现，包括数据库、缓存和文档存储。
///
/// 包含的子模块：
/// - 组装（bootstrap）：根据配置构建仓库
/// - 缓存（cache）：进程内缓存与Redis缓存
/// - 数据库（database）：数据库连接和实体映射
/// - 可观测性（observability）：缓存指标
/// - 仓库实现（repositories）：带缓存的仓库
/// - 存储（stores）：文档存储实现
pub mod bootstrap;
pub mod cache;
pub mod database;
pub mod observability;
pub mod repositories;
pub mod stores;
