// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 通用的带缓存仓库，以及基于它的 Webhook 仓库
pub mod cached_repository;
pub mod webhook_repo_impl;
