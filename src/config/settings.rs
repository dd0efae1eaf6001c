// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含数据库、Redis和查询缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// Redis配置
    #[serde(default)]
    pub redis: RedisSettings,
    /// 查询缓存配置
    pub cache: CacheSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// Redis配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL，使用redis缓存后端时必填
    pub url: Option<String>,
}

/// 缓存后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Memory,
    Redis,
}

/// 查询缓存配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// 是否启用查询缓存
    pub enabled: bool,
    /// 缓存后端
    pub backend: CacheBackend,
    /// 默认缓存过期时间（秒）
    pub default_ttl_seconds: u64,
    /// Redis键前缀
    pub key_prefix: String,
}

impl CacheSettings {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }
}

impl Settings {
    /// 带默认值和全部配置源的构建器
    ///
    /// 优先级从低到高：默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// `HOOKSTORE__` 前缀的环境变量。
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default DB settings
            .set_default("database.url", "sqlite::memory:")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default cache settings
            .set_default("cache.enabled", true)?
            .set_default("cache.backend", "memory")?
            .set_default("cache.default_ttl_seconds", 300)?
            .set_default("cache.key_prefix", "hookstore")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("HOOKSTORE").separator("__"));

        Ok(builder)
    }

    /// 创建新的配置实例
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
