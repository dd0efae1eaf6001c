// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理数据库、Redis和缓存配置
pub mod config;

/// 领域模块
///
/// 包含Webhook实体、查询描述和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供数据库、缓存和文档存储的实现
pub mod infrastructure;

/// 工具模块
pub mod utils;
