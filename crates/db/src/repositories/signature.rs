//! Signature template repository for database operations.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set,
};
use studio_core::signature::{
    NewSignatureTemplate, SignatureError, SignatureTemplate,
    SignatureTemplateRepository as SignatureRepoTrait, TemplateInput, TemplateType, TemplateUsage,
};
use studio_shared::types::{DocumentId, SignatureTemplateId, UserId};
use uuid::Uuid;

use crate::entities::{document_signatures, signature_templates};

/// Signature template repository implementation.
#[derive(Debug, Clone)]
pub struct SignatureTemplateRepository {
    db: DatabaseConnection,
}

impl SignatureTemplateRepository {
    /// Create a new signature template repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(
        &self,
        id: SignatureTemplateId,
    ) -> Result<Option<signature_templates::Model>, SignatureError> {
        signature_templates::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| SignatureError::repository(e.to_string()))
    }
}

impl SignatureRepoTrait for SignatureTemplateRepository {
    async fn list(&self) -> Result<Vec<SignatureTemplate>, SignatureError> {
        let models = signature_templates::Entity::find()
            .order_by_asc(signature_templates::Column::TemplateName)
            .all(&self.db)
            .await
            .map_err(|e| SignatureError::repository(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(
        &self,
        id: SignatureTemplateId,
    ) -> Result<Option<SignatureTemplate>, SignatureError> {
        self.find_model(id).await?.map(to_domain).transpose()
    }

    async fn insert(
        &self,
        template: NewSignatureTemplate,
    ) -> Result<SignatureTemplate, SignatureError> {
        let input = template.input;
        let active_model = signature_templates::ActiveModel {
            id: Set(template.id.into_inner()),
            template_name: Set(input.template_name),
            template_type: Set(input.template_type.as_str().to_string()),
            html_content: Set(input.html_content),
            css_styles: Set(input.css_styles),
            signature_fields: Set(to_json(&input.signature_fields)?),
            default_values: Set(to_json(&input.default_values)?),
            created_by: Set(template.created_by.map(UserId::into_inner)),
            created_at: Set(template.created_at.into()),
            updated_at: Set(None),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| SignatureError::repository(e.to_string()))?;

        tracing::info!(template_id = %template.id, name = %model.template_name, "signature template created");
        to_domain(model)
    }

    async fn update(
        &self,
        id: SignatureTemplateId,
        input: TemplateInput,
    ) -> Result<Option<SignatureTemplate>, SignatureError> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active_model: signature_templates::ActiveModel = model.into();
        active_model.template_name = Set(input.template_name);
        active_model.template_type = Set(input.template_type.as_str().to_string());
        active_model.html_content = Set(input.html_content);
        active_model.css_styles = Set(input.css_styles);
        active_model.signature_fields = Set(to_json(&input.signature_fields)?);
        active_model.default_values = Set(to_json(&input.default_values)?);
        active_model.updated_at = Set(Some(Utc::now().into()));

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| SignatureError::repository(e.to_string()))?;

        to_domain(model).map(Some)
    }

    async fn delete(&self, id: SignatureTemplateId) -> Result<bool, SignatureError> {
        let result = signature_templates::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| SignatureError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn record_usage(
        &self,
        template_id: SignatureTemplateId,
        document_id: DocumentId,
    ) -> Result<(), SignatureError> {
        document_signatures::ActiveModel {
            id: Set(Uuid::now_v7()),
            template_id: Set(template_id.into_inner()),
            document_id: Set(Some(document_id.into_inner())),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| SignatureError::repository(e.to_string()))?;

        Ok(())
    }

    async fn usage_stats(&self) -> Result<Vec<TemplateUsage>, SignatureError> {
        let templates: Vec<(Uuid, String, String)> = signature_templates::Entity::find()
            .select_only()
            .column(signature_templates::Column::Id)
            .column(signature_templates::Column::TemplateName)
            .column(signature_templates::Column::TemplateType)
            .order_by_asc(signature_templates::Column::TemplateName)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SignatureError::repository(e.to_string()))?;

        let uses: Vec<(Uuid, DateTime<FixedOffset>)> = document_signatures::Entity::find()
            .select_only()
            .column(document_signatures::Column::TemplateId)
            .column(document_signatures::Column::CreatedAt)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SignatureError::repository(e.to_string()))?;

        let mut tally: HashMap<Uuid, (u64, Option<DateTime<Utc>>)> = HashMap::new();
        for (template_id, used_at) in uses {
            let used_at = used_at.with_timezone(&Utc);
            let entry = tally.entry(template_id).or_default();
            entry.0 += 1;
            entry.1 = entry.1.max(Some(used_at));
        }

        let mut usage = templates
            .into_iter()
            .map(|(id, template_name, template_type)| {
                let (usage_count, last_used) = tally.get(&id).copied().unwrap_or_default();
                Ok(TemplateUsage {
                    template_id: SignatureTemplateId::from_uuid(id),
                    template_name,
                    template_type: parse_type(&template_type)?,
                    usage_count,
                    last_used,
                })
            })
            .collect::<Result<Vec<_>, SignatureError>>()?;

        // Stable sort keeps name order among equal counts.
        usage.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        Ok(usage)
    }
}

fn to_json(map: &BTreeMap<String, String>) -> Result<serde_json::Value, SignatureError> {
    serde_json::to_value(map).map_err(|e| SignatureError::repository(e.to_string()))
}

fn from_json(value: serde_json::Value) -> Result<BTreeMap<String, String>, SignatureError> {
    serde_json::from_value(value).map_err(|e| SignatureError::repository(e.to_string()))
}

fn parse_type(value: &str) -> Result<TemplateType, SignatureError> {
    TemplateType::parse(value)
        .ok_or_else(|| SignatureError::repository(format!("unknown template type '{value}'")))
}

/// Convert database model to domain model.
fn to_domain(model: signature_templates::Model) -> Result<SignatureTemplate, SignatureError> {
    Ok(SignatureTemplate {
        id: SignatureTemplateId::from_uuid(model.id),
        template_name: model.template_name,
        template_type: parse_type(&model.template_type)?,
        html_content: model.html_content,
        css_styles: model.css_styles,
        signature_fields: from_json(model.signature_fields)?,
        default_values: from_json(model.default_values)?,
        created_by: model.created_by.map(UserId::from_uuid),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.map(|t| t.with_timezone(&Utc)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_maps_from_jsonb() {
        let value = serde_json::json!({ "signer_name": "Signer Name", "date": "Date" });
        let map = from_json(value).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["date"], "Date");
    }

    #[test]
    fn test_rejects_non_string_values() {
        let value = serde_json::json!({ "date": 5 });
        assert!(matches!(from_json(value), Err(SignatureError::Repository(_))));
    }

    #[test]
    fn test_unknown_template_type() {
        assert_eq!(parse_type("client_approval").unwrap(), TemplateType::ClientApproval);
        assert!(matches!(parse_type("notary"), Err(SignatureError::Repository(_))));
    }
}
