//! Signature template service implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use studio_shared::types::{DocumentId, SignatureTemplateId, UserId};

use super::error::SignatureError;
use super::render::{render, sample_data};
use super::stock::stock_templates;
use super::types::{
    NewSignatureTemplate, RenderedSignature, SignatureTemplate, TemplateInput, TemplateType,
    TemplateUsage,
};

/// Repository trait for signature template persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait SignatureTemplateRepository: Send + Sync {
    /// All templates ordered by name.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<SignatureTemplate>, SignatureError>> + Send;

    /// Find template by ID.
    fn find_by_id(
        &self,
        id: SignatureTemplateId,
    ) -> impl std::future::Future<Output = Result<Option<SignatureTemplate>, SignatureError>> + Send;

    /// Insert a new template.
    fn insert(
        &self,
        template: NewSignatureTemplate,
    ) -> impl std::future::Future<Output = Result<SignatureTemplate, SignatureError>> + Send;

    /// Replace every editable field of a template.
    fn update(
        &self,
        id: SignatureTemplateId,
        input: TemplateInput,
    ) -> impl std::future::Future<Output = Result<Option<SignatureTemplate>, SignatureError>> + Send;

    /// Delete template by ID.
    fn delete(
        &self,
        id: SignatureTemplateId,
    ) -> impl std::future::Future<Output = Result<bool, SignatureError>> + Send;

    /// Log that a template was applied to a document.
    fn record_usage(
        &self,
        template_id: SignatureTemplateId,
        document_id: DocumentId,
    ) -> impl std::future::Future<Output = Result<(), SignatureError>> + Send;

    /// Use count and last use of every template, most used first.
    fn usage_stats(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<TemplateUsage>, SignatureError>> + Send;
}

/// Signature template service.
pub struct SignatureService<R: SignatureTemplateRepository> {
    repo: Arc<R>,
}

impl<R: SignatureTemplateRepository> SignatureService<R> {
    /// Create a new signature service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Template types with their labels.
    #[must_use]
    pub fn template_types() -> Vec<(TemplateType, &'static str)> {
        TemplateType::ALL.into_iter().map(|t| (t, t.label())).collect()
    }

    /// All templates ordered by name.
    pub async fn list(&self) -> Result<Vec<SignatureTemplate>, SignatureError> {
        self.repo.list().await
    }

    /// Get template by ID.
    pub async fn get(&self, id: SignatureTemplateId) -> Result<SignatureTemplate, SignatureError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(SignatureError::NotFound(id))
    }

    /// Create a template.
    pub async fn create(
        &self,
        input: TemplateInput,
        created_by: Option<UserId>,
    ) -> Result<SignatureTemplate, SignatureError> {
        let input = input.validate()?;
        self.repo
            .insert(NewSignatureTemplate {
                id: SignatureTemplateId::new(),
                input,
                created_by,
                created_at: Utc::now(),
            })
            .await
    }

    /// Replace a template.
    pub async fn update(
        &self,
        id: SignatureTemplateId,
        input: TemplateInput,
    ) -> Result<SignatureTemplate, SignatureError> {
        let input = input.validate()?;
        self.repo
            .update(id, input)
            .await?
            .ok_or(SignatureError::NotFound(id))
    }

    /// Delete a template.
    pub async fn delete(&self, id: SignatureTemplateId) -> Result<(), SignatureError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(SignatureError::NotFound(id))
        }
    }

    /// Render a template with caller data.
    ///
    /// When `document` is given the use is logged for usage statistics.
    pub async fn render(
        &self,
        id: SignatureTemplateId,
        data: &BTreeMap<String, String>,
        document: Option<DocumentId>,
    ) -> Result<RenderedSignature, SignatureError> {
        let template = self.get(id).await?;
        let rendered = render(&template, data);
        if let Some(document_id) = document {
            self.repo.record_usage(id, document_id).await?;
        }
        Ok(rendered)
    }

    /// Render a template with sample names and `today`'s date.
    pub async fn preview(
        &self,
        id: SignatureTemplateId,
        today: NaiveDate,
    ) -> Result<RenderedSignature, SignatureError> {
        let template = self.get(id).await?;
        Ok(render(&template, &sample_data(today)))
    }

    /// Insert the stock templates.
    pub async fn install_defaults(
        &self,
        created_by: Option<UserId>,
        today: NaiveDate,
    ) -> Result<Vec<SignatureTemplate>, SignatureError> {
        let mut created = Vec::new();
        for input in stock_templates(today) {
            created.push(self.create(input, created_by).await?);
        }
        Ok(created)
    }

    /// Use count per template, most used first.
    pub async fn usage_stats(&self) -> Result<Vec<TemplateUsage>, SignatureError> {
        self.repo.usage_stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock repository for testing.
    #[derive(Default)]
    struct MockSignatureRepository {
        templates: Mutex<Vec<SignatureTemplate>>,
        usage: Mutex<Vec<(SignatureTemplateId, DocumentId)>>,
    }

    impl SignatureTemplateRepository for MockSignatureRepository {
        async fn list(&self) -> Result<Vec<SignatureTemplate>, SignatureError> {
            let mut templates = self.templates.lock().unwrap().clone();
            templates.sort_by(|a, b| a.template_name.cmp(&b.template_name));
            Ok(templates)
        }

        async fn find_by_id(
            &self,
            id: SignatureTemplateId,
        ) -> Result<Option<SignatureTemplate>, SignatureError> {
            Ok(self
                .templates
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == id)
                .cloned())
        }

        async fn insert(
            &self,
            template: NewSignatureTemplate,
        ) -> Result<SignatureTemplate, SignatureError> {
            let NewSignatureTemplate {
                id,
                input,
                created_by,
                created_at,
            } = template;
            let stored = SignatureTemplate {
                id,
                template_name: input.template_name,
                template_type: input.template_type,
                html_content: input.html_content,
                css_styles: input.css_styles,
                signature_fields: input.signature_fields,
                default_values: input.default_values,
                created_by,
                created_at,
                updated_at: None,
            };
            self.templates.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn update(
            &self,
            id: SignatureTemplateId,
            input: TemplateInput,
        ) -> Result<Option<SignatureTemplate>, SignatureError> {
            let mut templates = self.templates.lock().unwrap();
            let Some(t) = templates.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };
            t.template_name = input.template_name;
            t.template_type = input.template_type;
            t.html_content = input.html_content;
            t.css_styles = input.css_styles;
            t.signature_fields = input.signature_fields;
            t.default_values = input.default_values;
            t.updated_at = Some(Utc::now());
            Ok(Some(t.clone()))
        }

        async fn delete(&self, id: SignatureTemplateId) -> Result<bool, SignatureError> {
            let mut templates = self.templates.lock().unwrap();
            let before = templates.len();
            templates.retain(|t| t.id != id);
            Ok(templates.len() < before)
        }

        async fn record_usage(
            &self,
            template_id: SignatureTemplateId,
            document_id: DocumentId,
        ) -> Result<(), SignatureError> {
            self.usage.lock().unwrap().push((template_id, document_id));
            Ok(())
        }

        async fn usage_stats(&self) -> Result<Vec<TemplateUsage>, SignatureError> {
            let usage = self.usage.lock().unwrap();
            let mut stats: Vec<TemplateUsage> = self
                .templates
                .lock()
                .unwrap()
                .iter()
                .map(|t| TemplateUsage {
                    template_id: t.id,
                    template_name: t.template_name.clone(),
                    template_type: t.template_type,
                    usage_count: usage.iter().filter(|(id, _)| *id == t.id).count() as u64,
                    last_used: None,
                })
                .collect();
            stats.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
            Ok(stats)
        }
    }

    fn service() -> SignatureService<MockSignatureRepository> {
        SignatureService::new(Arc::new(MockSignatureRepository::default()))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[tokio::test]
    async fn test_install_defaults_and_list_by_name() {
        let service = service();
        let created = service.install_defaults(None, today()).await.unwrap();
        assert_eq!(created.len(), 3);

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.template_name)
            .collect();
        assert_eq!(
            names,
            ["Basic Signature Block", "Client Approval", "Executive Approval"]
        );
    }

    #[tokio::test]
    async fn test_preview_uses_sample_data() {
        let service = service();
        let created = service.install_defaults(None, today()).await.unwrap();
        let executive = created
            .iter()
            .find(|t| t.template_type == TemplateType::Executive)
            .unwrap();

        let preview = service.preview(executive.id, today()).await.unwrap();
        assert!(preview.html.starts_with("<style>.executive-signature"));
        assert!(preview.html.contains("Michael Johnson"));
        assert!(preview.html.contains("Chief Executive Officer"));
        assert!(!preview.html.contains("{{"));
        assert_eq!(preview.fields.len(), 2);
    }

    #[tokio::test]
    async fn test_render_records_usage_only_for_documents() {
        let service = service();
        let created = service.install_defaults(None, today()).await.unwrap();
        let basic = &created[0];
        let data = BTreeMap::from([("signer_name".to_string(), "Ada & Co".to_string())]);

        let rendered = service.render(basic.id, &data, None).await.unwrap();
        assert!(rendered.html.contains("Ada &amp; Co"));
        assert!(rendered.html.contains("{{signer_title}}"));
        assert!(rendered.html.contains("Date: October 19, 2026"));

        service
            .render(basic.id, &data, Some(DocumentId::new()))
            .await
            .unwrap();
        service
            .render(basic.id, &data, Some(DocumentId::new()))
            .await
            .unwrap();

        let stats = service.usage_stats().await.unwrap();
        assert_eq!(stats[0].template_id, basic.id);
        assert_eq!(stats[0].usage_count, 2);
    }

    #[tokio::test]
    async fn test_crud_errors() {
        let service = service();
        let missing = SignatureTemplateId::new();

        assert!(matches!(
            service.get(missing).await,
            Err(SignatureError::NotFound(id)) if id == missing
        ));
        assert!(matches!(
            service.delete(missing).await,
            Err(SignatureError::NotFound(_))
        ));
        assert!(matches!(
            service.preview(missing, today()).await,
            Err(SignatureError::NotFound(_))
        ));

        let invalid = TemplateInput {
            template_name: String::new(),
            html_content: "<div></div>".into(),
            ..TemplateInput::default()
        };
        assert!(matches!(
            service.create(invalid, None).await,
            Err(SignatureError::Validation(_))
        ));

        let created = service
            .create(
                TemplateInput {
                    template_name: "Witness".into(),
                    template_type: TemplateType::Witness,
                    html_content: "<p>{{witness_name}}</p>".into(),
                    ..TemplateInput::default()
                },
                Some(UserId::new()),
            )
            .await
            .unwrap();
        let updated = service
            .update(
                created.id,
                TemplateInput {
                    template_name: "Witness Line".into(),
                    template_type: TemplateType::Witness,
                    html_content: "<p>{{witness_name}}</p>".into(),
                    ..TemplateInput::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.template_name, "Witness Line");
        assert!(updated.updated_at.is_some());

        service.delete(created.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_template_types() {
        let types = SignatureService::<MockSignatureRepository>::template_types();
        assert_eq!(types.len(), 8);
        assert_eq!(types[3], (TemplateType::ClientApproval, "Client Approval"));
    }
}
