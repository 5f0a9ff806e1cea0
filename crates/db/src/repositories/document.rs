//! Document repository for database operations.
//!
//! Implements document CRUD operations using SeaORM. Reads join the client
//! and project tables for display names.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use studio_core::documents::{
    CategoryUsage, Document, DocumentError, DocumentFilter, DocumentMetadata,
    DocumentRepository as DocumentRepoTrait, NewDocument,
};
use studio_shared::types::{ClientId, DocumentId, ProjectId, UserId};
use uuid::Uuid;

use crate::entities::{clients, documents, projects};

/// Document row with the joined client and project names.
#[derive(Debug, FromQueryResult)]
struct DocumentRow {
    id: Uuid,
    original_name: String,
    file_name: String,
    storage_key: String,
    file_size: i64,
    file_type: String,
    document_type: String,
    category: String,
    description: String,
    tags: String,
    project_id: Option<Uuid>,
    client_id: Option<Uuid>,
    uploaded_by: Option<Uuid>,
    created_at: chrono::DateTime<chrono::FixedOffset>,
    updated_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    client_name: Option<String>,
    project_name: Option<String>,
}

/// Document repository implementation.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Create a new document repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn with_names() -> Select<documents::Entity> {
        documents::Entity::find()
            .join(JoinType::LeftJoin, documents::Relation::Clients.def())
            .join(JoinType::LeftJoin, documents::Relation::Projects.def())
            .column_as(clients::Column::Name, "client_name")
            .column_as(projects::Column::Service, "project_name")
    }
}

impl DocumentRepoTrait for DocumentRepository {
    async fn insert(&self, input: NewDocument) -> Result<Document, DocumentError> {
        let file_size = i64::try_from(input.file_size)
            .map_err(|_| DocumentError::repository("file size out of range"))?;
        let metadata = input.metadata;

        let active_model = documents::ActiveModel {
            id: Set(input.id.into_inner()),
            original_name: Set(input.original_name),
            file_name: Set(input.file_name),
            storage_key: Set(input.storage_key),
            file_size: Set(file_size),
            file_type: Set(input.file_type),
            document_type: Set(metadata.document_type),
            category: Set(metadata.category),
            description: Set(metadata.description),
            tags: Set(metadata.tags),
            project_id: Set(metadata.project_id.map(ProjectId::into_inner)),
            client_id: Set(metadata.client_id.map(ClientId::into_inner)),
            uploaded_by: Set(input.uploaded_by.map(UserId::into_inner)),
            created_at: Set(input.created_at.into()),
            updated_at: Set(None),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        tracing::info!(document_id = %input.id, file_size, "document recorded");

        self.find_by_id(input.id)
            .await?
            .ok_or_else(|| DocumentError::repository("inserted document not found"))
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, DocumentError> {
        let row = Self::with_names()
            .filter(documents::Column::Id.eq(id.into_inner()))
            .into_model::<DocumentRow>()
            .one(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        Ok(row.map(to_domain))
    }

    async fn list(&self, filter: DocumentFilter) -> Result<Vec<Document>, DocumentError> {
        let mut query = Self::with_names();

        if let Some(category) = filter.category {
            query = query.filter(documents::Column::Category.eq(category));
        }
        if let Some(document_type) = filter.document_type {
            query = query.filter(documents::Column::DocumentType.eq(document_type));
        }
        if let Some(client_id) = filter.client_id {
            query = query.filter(documents::Column::ClientId.eq(client_id.into_inner()));
        }
        if let Some(project_id) = filter.project_id {
            query = query.filter(documents::Column::ProjectId.eq(project_id.into_inner()));
        }
        if let Some(search) = filter.search.filter(|s| !s.is_empty()) {
            query = query.filter(search_condition(&search));
        }

        let rows = query
            .order_by_desc(documents::Column::CreatedAt)
            .limit(filter.limit)
            .into_model::<DocumentRow>()
            .all(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn update_metadata(
        &self,
        id: DocumentId,
        metadata: DocumentMetadata,
    ) -> Result<Option<Document>, DocumentError> {
        let Some(model) = documents::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut active_model: documents::ActiveModel = model.into();
        active_model.document_type = Set(metadata.document_type);
        active_model.category = Set(metadata.category);
        active_model.description = Set(metadata.description);
        active_model.tags = Set(metadata.tags);
        active_model.project_id = Set(metadata.project_id.map(ProjectId::into_inner));
        active_model.client_id = Set(metadata.client_id.map(ClientId::into_inner));
        active_model.updated_at = Set(Some(Utc::now().into()));

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: DocumentId) -> Result<bool, DocumentError> {
        let result = documents::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn usage_by_category(&self) -> Result<Vec<CategoryUsage>, DocumentError> {
        let rows: Vec<(String, i64)> = documents::Entity::find()
            .select_only()
            .column(documents::Column::Category)
            .column(documents::Column::FileSize)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        let mut usage: BTreeMap<String, (u64, u64)> = BTreeMap::new();
        for (category, size) in rows {
            let entry = usage.entry(category).or_default();
            entry.0 += 1;
            entry.1 += u64::try_from(size).unwrap_or(0);
        }

        Ok(usage
            .into_iter()
            .map(|(category, (document_count, total_size))| CategoryUsage {
                category,
                document_count,
                total_size,
            })
            .collect())
    }
}

/// Case-insensitive substring match on name, description or tags.
fn search_condition(search: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
    [
        documents::Column::OriginalName,
        documents::Column::Description,
        documents::Column::Tags,
    ]
    .into_iter()
    .fold(Condition::any(), |cond, column| {
        cond.add(
            Expr::expr(Func::lower(Expr::col((documents::Entity, column)))).like(pattern.as_str()),
        )
    })
}

/// Escapes LIKE wildcards so they match literally.
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Convert database row to domain model.
fn to_domain(row: DocumentRow) -> Document {
    Document {
        id: DocumentId::from_uuid(row.id),
        original_name: row.original_name,
        file_name: row.file_name,
        storage_key: row.storage_key,
        file_size: u64::try_from(row.file_size).unwrap_or(0),
        file_type: row.file_type,
        document_type: row.document_type,
        category: row.category,
        description: row.description,
        tags: row.tags,
        project_id: row.project_id.map(ProjectId::from_uuid),
        client_id: row.client_id.map(ClientId::from_uuid),
        uploaded_by: row.uploaded_by.map(UserId::from_uuid),
        created_at: row.created_at.with_timezone(&Utc),
        updated_at: row.updated_at.map(|t| t.with_timezone(&Utc)),
        client_name: row.client_name,
        project_name: row.project_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("brief"), "brief");
    }
}
