// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use super::document::{Document, OwnedByOrganizationAndProject};

/// Webhook 文档字段名
///
/// 查询过滤与存储列使用同一组名称。
pub mod webhook_fields {
    pub const ID: &str = "id";
    pub const ORGANIZATION_ID: &str = "organization_id";
    pub const PROJECT_ID: &str = "project_id";
    pub const URL: &str = "url";
    pub const IS_ENABLED: &str = "is_enabled";
    pub const VERSION: &str = "version";
}

/// 默认负载格式版本
pub const DEFAULT_WEBHOOK_VERSION: &str = "v2";

/// Webhook订阅实体
///
/// 描述一个外部回调地址及其订阅的触发事件。
/// 没有项目ID的 Webhook 对整个组织生效。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Webhook {
    /// Webhook唯一标识符，由存储分配
    #[serde(default)]
    pub id: String,
    /// 所属组织ID
    #[validate(length(min = 1, message = "organization_id is required"))]
    pub organization_id: String,
    /// 所属项目ID，为空表示组织级
    #[serde(default)]
    pub project_id: Option<String>,
    /// 回调目标URL
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
    /// 订阅的事件类型标识
    #[validate(custom(function = "validate_event_types"))]
    pub event_types: Vec<String>,
    /// 是否启用
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    /// 负载格式版本
    #[serde(default = "default_version")]
    pub version: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

fn default_enabled() -> bool {
    true
}

fn default_version() -> String {
    DEFAULT_WEBHOOK_VERSION.to_string()
}

fn validate_event_types(event_types: &[String]) -> Result<(), ValidationError> {
    if event_types.is_empty() {
        return Err(ValidationError::new("event_types_empty")
            .with_message("at least one event type is required".into()));
    }

    if let Some(unknown) = event_types
        .iter()
        .find(|event_type| event_type.parse::<WebhookEventType>().is_err())
    {
        let mut error = ValidationError::new("unknown_event_type")
            .with_message(format!("unknown event type: {}", unknown).into());
        error.add_param("value".into(), unknown);
        return Err(error);
    }

    Ok(())
}

impl Webhook {
    /// 创建一个新的Webhook订阅
    ///
    /// ID 留空，由存储在写入时分配。
    pub fn new(
        organization_id: impl Into<String>,
        project_id: Option<String>,
        url: impl Into<String>,
        event_types: &[WebhookEventType],
    ) -> Self {
        Self {
            id: String::new(),
            organization_id: organization_id.into(),
            project_id,
            url: url.into(),
            event_types: event_types.iter().map(|t| t.as_str().to_string()).collect(),
            is_enabled: true,
            version: default_version(),
            created_at: Utc::now(),
        }
    }

    /// 是否订阅了指定事件类型
    pub fn subscribes_to(&self, event_type: WebhookEventType) -> bool {
        self.event_types.iter().any(|t| t == event_type.as_str())
    }
}

impl Document for Webhook {
    const TYPE_NAME: &'static str = "webhook";

    const FIELDS: &'static [&'static str] = &[
        webhook_fields::ID,
        webhook_fields::ORGANIZATION_ID,
        webhook_fields::PROJECT_ID,
        webhook_fields::URL,
        webhook_fields::IS_ENABLED,
        webhook_fields::VERSION,
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            webhook_fields::ID => Some(self.id.clone()),
            webhook_fields::ORGANIZATION_ID => Some(self.organization_id.clone()),
            webhook_fields::PROJECT_ID => self.project_id.clone(),
            webhook_fields::URL => Some(self.url.clone()),
            webhook_fields::IS_ENABLED => Some(self.is_enabled.to_string()),
            webhook_fields::VERSION => Some(self.version.clone()),
            _ => None,
        }
    }
}

impl OwnedByOrganizationAndProject for Webhook {
    fn organization_id(&self) -> &str {
        &self.organization_id
    }

    fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

/// Webhook事件类型
///
/// 外部调用方订阅和分发时使用的固定词汇表，字符串标识与变体名一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    /// 新错误
    NewError,
    /// 严重错误
    CriticalError,
    /// 新事件
    NewEvent,
    /// 严重事件
    CriticalEvent,
    /// 已修复的错误栈再次出现
    StackRegression,
    /// 错误栈被推送
    StackPromoted,
}

impl WebhookEventType {
    /// 全部事件类型
    pub const ALL: [WebhookEventType; 6] = [
        WebhookEventType::NewError,
        WebhookEventType::CriticalError,
        WebhookEventType::NewEvent,
        WebhookEventType::CriticalEvent,
        WebhookEventType::StackRegression,
        WebhookEventType::StackPromoted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEventType::NewError => "NewError",
            WebhookEventType::CriticalError => "CriticalError",
            WebhookEventType::NewEvent => "NewEvent",
            WebhookEventType::CriticalEvent => "CriticalEvent",
            WebhookEventType::StackRegression => "StackRegression",
            WebhookEventType::StackPromoted => "StackPromoted",
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WebhookEventType::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| format!("Invalid webhook event type: {}", s))
    }
}

#[cfg(test)]
#[path = "webhook_test.rs"]
mod tests;
