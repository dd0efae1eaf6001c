// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::models::document::Document;
use crate::domain::query::{FindResults, QueryDescriptor};
use crate::domain::repositories::document_store::DocumentStore;
use crate::domain::repositories::RepositoryError;

/// 内存文档存储
///
/// 过滤条件在内存中逐个文档求值，结果按ID排序以保证分页稳定。
pub struct MemoryDocumentStore<T: Document> {
    documents: DashMap<String, T>,
}

impl<T: Document> Default for MemoryDocumentStore<T> {
    fn default() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }
}

impl<T: Document> MemoryDocumentStore<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MemoryDocumentStore<T> {
    async fn find(&self, query: &QueryDescriptor) -> Result<FindResults<T>, RepositoryError> {
        query.filter().validate_fields::<T>()?;

        let mut matches: Vec<T> = self
            .documents
            .iter()
            .filter(|entry| query.filter().matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| a.id().cmp(b.id()));

        Ok(FindResults::from_matches(matches, query.paging()))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        Ok(self.documents.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, mut document: T) -> Result<T, RepositoryError> {
        if document.id().is_empty() {
            document.set_id(Uuid::new_v4().to_string());
        }

        match self.documents.entry(document.id().to_string()) {
            Entry::Occupied(_) => Err(RepositoryError::Query(format!(
                "{} '{}' already exists",
                T::TYPE_NAME,
                document.id()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(document.clone());
                Ok(document)
            }
        }
    }

    async fn update(&self, document: T) -> Result<T, RepositoryError> {
        match self.documents.get_mut(document.id()) {
            Some(mut existing) => {
                *existing = document.clone();
                Ok(document)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.documents
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.documents.len() as u64)
    }
}

#[cfg(test)]
#[path = "memory_store_test.rs"]
mod tests;
