// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

/// 可存储文档特质
///
/// 所有经由 [`CachedRepository`](crate::infrastructure::repositories::cached_repository::CachedRepository)
/// 持久化的实体都需要实现该特质。缓存结果以 JSON 形式保存，因此文档必须可序列化。
pub trait Document: Validate + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// 文档类型名，用作缓存键的作用域前缀
    const TYPE_NAME: &'static str;

    /// 可参与查询过滤的字段名
    const FIELDS: &'static [&'static str];

    /// 文档ID，空字符串表示尚未由存储分配
    fn id(&self) -> &str;

    /// 写入存储分配的ID
    fn set_id(&mut self, id: String);

    /// 读取可查询字段的值
    ///
    /// 字段缺失（例如可选字段为空）时返回 `None`。
    fn field_value(&self, field: &str) -> Option<String>;
}

/// 组织/项目归属特质
///
/// 文档必定属于一个组织，可选属于一个项目；没有项目的文档对整个组织可见。
pub trait OwnedByOrganizationAndProject: Document {
    /// 组织ID字段名
    const ORGANIZATION_FIELD: &'static str = "organization_id";
    /// 项目ID字段名
    const PROJECT_FIELD: &'static str = "project_id";

    fn organization_id(&self) -> &str;

    fn project_id(&self) -> Option<&str>;
}
