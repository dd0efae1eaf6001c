// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 缓存键推导
//!
//! 所有组成部分先做百分号编码，编码结果只包含字母数字和 `-_.~%`，
//! 因此分隔符 `:` 和缺省标记 `*` 不会出现在编码后的值里，不同参数不会得到同一个键。

use urlencoding::encode;

/// 项目缺省时的占位符
const NO_PROJECT: &str = "*";

/// 组织/项目可见性查询的缓存键
pub fn organization_project_cache_key(organization_id: &str, project_id: Option<&str>) -> String {
    let project = project_id.map_or_else(|| NO_PROJECT.into(), encode);
    format!("org:{}-project:{}", encode(organization_id), project)
}

/// 按ID读取文档的缓存键
pub fn document_cache_key(id: &str) -> String {
    format!("id:{}", encode(id))
}

/// 为缓存键加上文档类型作用域
pub fn scoped_cache_key(type_name: &str, key: &str) -> String {
    format!("{}:{}", type_name, key)
}

#[cfg(test)]
#[path = "cache_keys_test.rs"]
mod tests;
