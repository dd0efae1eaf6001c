// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::models::document::Document;
use crate::domain::repositories::RepositoryError;

/// 查询过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    /// 匹配全部文档
    #[default]
    All,
    /// 字段精确匹配
    Term { field: String, value: String },
    /// 字段缺失或为空
    Missing { field: String },
    /// 所有子条件同时成立
    And(Vec<Filter>),
    /// 任一子条件成立
    Or(Vec<Filter>),
}

impl Filter {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Filter::Missing {
            field: field.into(),
        }
    }

    /// 与另一个条件取交集，`All` 作为单位元被吸收
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), f) => {
                left.push(f);
                Filter::And(left)
            }
            (f, Filter::And(mut right)) => {
                right.insert(0, f);
                Filter::And(right)
            }
            (left, right) => Filter::And(vec![left, right]),
        }
    }

    /// 与另一个条件取并集
    pub fn or(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::All, _) | (_, Filter::All) => Filter::All,
            (Filter::Or(mut left), Filter::Or(right)) => {
                left.extend(right);
                Filter::Or(left)
            }
            (Filter::Or(mut left), f) => {
                left.push(f);
                Filter::Or(left)
            }
            (left, right) => Filter::Or(vec![left, right]),
        }
    }

    /// 条件中引用的全部字段名
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Filter::All => Vec::new(),
            Filter::Term { field, .. } | Filter::Missing { field } => vec![field.as_str()],
            Filter::And(filters) | Filter::Or(filters) => {
                filters.iter().flat_map(Filter::fields).collect()
            }
        }
    }

    /// 校验条件只引用文档声明的可查询字段
    pub fn validate_fields<T: Document>(&self) -> Result<(), RepositoryError> {
        match self.fields().into_iter().find(|field| !T::FIELDS.contains(field)) {
            Some(field) => Err(RepositoryError::Query(format!(
                "unknown field '{}' for document type '{}'",
                field,
                T::TYPE_NAME
            ))),
            None => Ok(()),
        }
    }

    /// 在内存中对单个文档求值
    pub fn matches<T: Document>(&self, document: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Term { field, value } => {
                document.field_value(field).as_deref() == Some(value.as_str())
            }
            Filter::Missing { field } => document.field_value(field).is_none(),
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(document)),
        }
    }
}

/// 分页参数，页码从1开始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl Paging {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// 查询描述
///
/// 过滤条件加上可选的缓存键与过期时间。设置了缓存键的查询结果可以被缓存，
/// 缓存键必须只由查询的语义参数决定。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    filter: Filter,
    cache_key: Option<String>,
    expires_in: Option<Duration>,
    paging: Option<Paging>,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加过滤条件（与已有条件取交集）
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = std::mem::take(&mut self.filter).and(filter);
        self
    }

    pub fn with_field_equals(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_filter(Filter::term(field, value))
    }

    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = Some(cache_key.into());
        self
    }

    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    /// 设置分页；分页查询即使有缓存键也不走缓存
    pub fn with_paging(mut self, page: u32, limit: u32) -> Self {
        self.paging = Some(Paging::new(page, limit));
        self
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn cache_key(&self) -> Option<&str> {
        self.cache_key.as_deref()
    }

    pub fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }

    pub fn paging(&self) -> Option<Paging> {
        self.paging
    }
}

/// 查询结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
pub struct FindResults<T> {
    /// 当前页的文档
    pub documents: Vec<T>,
    /// 分页前的匹配总数
    pub total: u64,
    /// 是否还有后续页
    pub has_more: bool,
}

impl<T> FindResults<T> {
    pub fn empty() -> Self {
        Self {
            documents: Vec::new(),
            total: 0,
            has_more: false,
        }
    }

    /// 由全部匹配项构造结果并应用分页
    pub fn from_matches(matches: Vec<T>, paging: Option<Paging>) -> Self {
        let total = matches.len() as u64;
        let Some(paging) = paging else {
            return Self {
                documents: matches,
                total,
                has_more: false,
            };
        };

        let documents: Vec<T> = matches
            .into_iter()
            .skip(paging.offset() as usize)
            .take(paging.limit as usize)
            .collect();
        let has_more = paging.offset() + (documents.len() as u64) < total;

        Self {
            documents,
            total,
            has_more,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
