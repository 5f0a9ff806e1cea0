//! Integration tests for the signature template repository.

mod common;

use std::collections::BTreeMap;

use chrono::Utc;
use studio_core::documents::{DocumentMetadata, DocumentRepository as _, NewDocument};
use studio_core::signature::{
    NewSignatureTemplate, SignatureTemplateRepository as _, TemplateInput, TemplateType,
};
use studio_db::{DocumentRepository, SignatureTemplateRepository};
use studio_shared::types::{DocumentId, SignatureTemplateId};

fn template_input(name: &str) -> TemplateInput {
    TemplateInput {
        template_name: name.to_string(),
        template_type: TemplateType::Witness,
        html_content: "<div>{{witness_name}}</div>".to_string(),
        css_styles: ".w{}".to_string(),
        signature_fields: BTreeMap::from([("witness_name".to_string(), "Witness Name".to_string())]),
        default_values: BTreeMap::new(),
    }
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_template_crud() {
    let db = common::connect().await;
    let repo = SignatureTemplateRepository::new(db);
    let id = SignatureTemplateId::new();

    let created = repo
        .insert(NewSignatureTemplate {
            id,
            input: template_input("Witness line"),
            created_by: None,
            created_at: Utc::now(),
        })
        .await
        .expect("Failed to insert template");
    assert_eq!(created.template_type, TemplateType::Witness);
    assert_eq!(created.signature_fields["witness_name"], "Witness Name");

    let mut input = template_input("Witness line (revised)");
    input.default_values.insert("witness_name".into(), "Jane Smith".into());
    let updated = repo
        .update(id, input)
        .await
        .expect("Failed to update template")
        .expect("Template should exist");
    assert_eq!(updated.default_values["witness_name"], "Jane Smith");
    assert!(updated.updated_at.is_some());

    assert!(repo.delete(id).await.expect("Failed to delete"));
    assert!(repo.find_by_id(id).await.expect("Failed to find").is_none());
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_usage_stats_count_recorded_uses() {
    let db = common::connect().await;
    let documents = DocumentRepository::new(db.clone());
    let repo = SignatureTemplateRepository::new(db);

    let document_id = DocumentId::new();
    documents
        .insert(NewDocument {
            id: document_id,
            original_name: "sow.pdf".to_string(),
            file_name: format!("{}_1767225600.pdf", document_id.into_inner().simple()),
            storage_key: format!("documents/{}.pdf", document_id.into_inner().simple()),
            file_size: 10,
            file_type: "pdf".to_string(),
            metadata: DocumentMetadata::default(),
            uploaded_by: None,
            created_at: Utc::now(),
        })
        .await
        .expect("Failed to insert document");

    let id = SignatureTemplateId::new();
    repo.insert(NewSignatureTemplate {
        id,
        input: template_input("Usage probe"),
        created_by: None,
        created_at: Utc::now(),
    })
    .await
    .expect("Failed to insert template");

    repo.record_usage(id, document_id).await.expect("Failed to record");
    repo.record_usage(id, document_id).await.expect("Failed to record");

    let stats = repo.usage_stats().await.expect("Failed to load usage");
    let ours = stats
        .iter()
        .find(|u| u.template_id == id)
        .expect("template should be listed");
    assert_eq!(ours.usage_count, 2);
    assert!(ours.last_used.is_some());
    assert!(
        stats
            .windows(2)
            .all(|pair| pair[0].usage_count >= pair[1].usage_count)
    );
}
