// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 文档变更记录
///
/// 将写入后的文档与写入前的文档配对，仅在缓存失效时使用，不会被持久化。
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedDocument<T> {
    /// 写入后的值（删除时为被删除的文档）
    pub value: T,
    /// 写入前的值，新建时为空
    pub original: Option<T>,
}

impl<T> ModifiedDocument<T> {
    /// 新建文档的变更记录
    pub fn created(value: T) -> Self {
        Self {
            value,
            original: None,
        }
    }

    /// 更新文档的变更记录
    pub fn updated(value: T, original: T) -> Self {
        Self {
            value,
            original: Some(original),
        }
    }

    /// 删除文档的变更记录
    pub fn removed(value: T) -> Self {
        Self::created(value)
    }

    /// 依次返回新值和旧值（如存在）
    pub fn documents(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.value).chain(self.original.iter())
    }
}
