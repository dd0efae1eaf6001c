// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::document::Document;
use crate::domain::models::webhook::{webhook_fields, Webhook};
use crate::domain::query::{Filter, FindResults, QueryDescriptor};
use crate::domain::repositories::document_store::DocumentStore;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::webhook;

/// 基于 sea-orm 的 Webhook 文档存储
#[derive(Clone)]
pub struct SeaOrmWebhookStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmWebhookStore {
    /// 创建新的Webhook存储
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn column(field: &str) -> Result<webhook::Column, RepositoryError> {
    match field {
        webhook_fields::ID => Ok(webhook::Column::Id),
        webhook_fields::ORGANIZATION_ID => Ok(webhook::Column::OrganizationId),
        webhook_fields::PROJECT_ID => Ok(webhook::Column::ProjectId),
        webhook_fields::URL => Ok(webhook::Column::Url),
        webhook_fields::IS_ENABLED => Ok(webhook::Column::IsEnabled),
        webhook_fields::VERSION => Ok(webhook::Column::Version),
        other => Err(RepositoryError::Query(format!(
            "unknown field '{}' for document type '{}'",
            other,
            Webhook::TYPE_NAME
        ))),
    }
}

fn term(field: &str, value: &str) -> Result<SimpleExpr, RepositoryError> {
    let column = column(field)?;
    if field == webhook_fields::IS_ENABLED {
        let flag = value.parse::<bool>().map_err(|_| {
            RepositoryError::Query(format!("'{}' expects true or false, got '{}'", field, value))
        })?;
        return Ok(column.eq(flag));
    }

    Ok(column.eq(value))
}

/// 将过滤条件翻译为 sea-orm 条件
fn to_condition(filter: &Filter) -> Result<Condition, RepositoryError> {
    let condition = match filter {
        Filter::All => Condition::all(),
        Filter::Term { field, value } => Condition::all().add(term(field, value)?),
        Filter::Missing { field } => Condition::all().add(column(field)?.is_null()),
        Filter::And(filters) => filters
            .iter()
            .try_fold(Condition::all(), |acc, f| Ok::<_, RepositoryError>(acc.add(to_condition(f)?)))?,
        Filter::Or(filters) => filters
            .iter()
            .try_fold(Condition::any(), |acc, f| Ok::<_, RepositoryError>(acc.add(to_condition(f)?)))?,
    };

    Ok(condition)
}

#[async_trait]
impl DocumentStore<Webhook> for SeaOrmWebhookStore {
    async fn find(&self, query: &QueryDescriptor) -> Result<FindResults<Webhook>, RepositoryError> {
        query.filter().validate_fields::<Webhook>()?;
        let condition = to_condition(query.filter())?;

        let select = webhook::Entity::find()
            .filter(condition)
            .order_by_asc(webhook::Column::Id);
        let total = select.clone().count(self.db.as_ref()).await?;

        let select = match query.paging() {
            Some(paging) => select
                .offset(paging.offset())
                .limit(u64::from(paging.limit)),
            None => select,
        };

        let documents = select
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Webhook::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let has_more = query
            .paging()
            .is_some_and(|paging| paging.offset() + (documents.len() as u64) < total);

        Ok(FindResults {
            documents,
            total,
            has_more,
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Webhook>, RepositoryError> {
        webhook::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .map(Webhook::try_from)
            .transpose()
    }

    async fn insert(&self, mut document: Webhook) -> Result<Webhook, RepositoryError> {
        if document.id.is_empty() {
            document.id = Uuid::new_v4().to_string();
        }

        let model = webhook::ActiveModel::try_from(&document)?
            .insert(self.db.as_ref())
            .await?;
        Webhook::try_from(model)
    }

    async fn update(&self, document: Webhook) -> Result<Webhook, RepositoryError> {
        let model = match webhook::ActiveModel::try_from(&document)?
            .update(self.db.as_ref())
            .await
        {
            Ok(model) => model,
            Err(DbErr::RecordNotFound(_)) | Err(DbErr::RecordNotUpdated) => {
                return Err(RepositoryError::NotFound)
            }
            Err(err) => return Err(err.into()),
        };
        Webhook::try_from(model)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = webhook::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(webhook::Entity::find().count(self.db.as_ref()).await?)
    }
}

impl TryFrom<&Webhook> for webhook::ActiveModel {
    type Error = RepositoryError;

    fn try_from(webhook: &Webhook) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(webhook.id.clone()),
            organization_id: Set(webhook.organization_id.clone()),
            project_id: Set(webhook.project_id.clone()),
            url: Set(webhook.url.clone()),
            event_types: Set(serde_json::to_value(&webhook.event_types)?),
            is_enabled: Set(webhook.is_enabled),
            version: Set(webhook.version.clone()),
            created_at: Set(webhook.created_at.into()),
        })
    }
}

impl TryFrom<webhook::Model> for Webhook {
    type Error = RepositoryError;

    fn try_from(model: webhook::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            organization_id: model.organization_id,
            project_id: model.project_id,
            url: model.url,
            event_types: serde_json::from_value(model.event_types)?,
            is_enabled: model.is_enabled,
            version: model.version,
            created_at: model.created_at.into(),
        })
    }
}

#[cfg(test)]
#[path = "sea_orm_webhook_store_test.rs"]
mod tests;
