// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 提供 [`CacheClient`](crate::domain::repositories::cache_client::CacheClient) 的实现：
/// 进程内缓存与 Redis 缓存
pub mod memory_cache;
pub mod redis_cache;
pub mod redis_client;
