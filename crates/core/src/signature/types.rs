//! Signature template data types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studio_shared::types::{SignatureTemplateId, UserId};

use super::error::SignatureError;

/// Purpose of a signature block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// Single signer.
    #[default]
    Basic,
    /// Executive approval.
    Executive,
    /// Witness line.
    Witness,
    /// Client sign-off on deliverables.
    ClientApproval,
    /// Finance approval.
    FinancialApproval,
    /// Project close-out.
    ProjectSignoff,
    /// Contract execution.
    ContractSignature,
    /// Invoice approval.
    InvoiceApproval,
}

impl TemplateType {
    /// All types, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Basic,
        Self::Executive,
        Self::Witness,
        Self::ClientApproval,
        Self::FinancialApproval,
        Self::ProjectSignoff,
        Self::ContractSignature,
        Self::InvoiceApproval,
    ];

    /// Database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Executive => "executive",
            Self::Witness => "witness",
            Self::ClientApproval => "client_approval",
            Self::FinancialApproval => "financial_approval",
            Self::ProjectSignoff => "project_signoff",
            Self::ContractSignature => "contract_signature",
            Self::InvoiceApproval => "invoice_approval",
        }
    }

    /// Parse from database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Basic Signature Block",
            Self::Executive => "Executive Signature",
            Self::Witness => "Witness Signature",
            Self::ClientApproval => "Client Approval",
            Self::FinancialApproval => "Financial Approval",
            Self::ProjectSignoff => "Project Sign-off",
            Self::ContractSignature => "Contract Signature",
            Self::InvoiceApproval => "Invoice Approval",
        }
    }
}

/// A stored signature template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureTemplate {
    /// Template ID.
    pub id: SignatureTemplateId,
    /// Display name.
    pub template_name: String,
    /// Purpose.
    pub template_type: TemplateType,
    /// HTML with `{{key}}` placeholders.
    pub html_content: String,
    /// CSS rules.
    pub css_styles: String,
    /// Placeholder key to form label.
    pub signature_fields: BTreeMap<String, String>,
    /// Placeholder key to value used when the caller gives none.
    pub default_values: BTreeMap<String, String>,
    /// Author.
    pub created_by: Option<UserId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last change.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields a caller supplies to create or replace a template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemplateInput {
    /// Display name.
    pub template_name: String,
    /// Purpose.
    #[serde(default)]
    pub template_type: TemplateType,
    /// HTML with `{{key}}` placeholders.
    pub html_content: String,
    /// CSS rules.
    #[serde(default)]
    pub css_styles: String,
    /// Placeholder key to form label.
    #[serde(default)]
    pub signature_fields: BTreeMap<String, String>,
    /// Placeholder key to default value.
    #[serde(default)]
    pub default_values: BTreeMap<String, String>,
}

impl TemplateInput {
    /// Name and HTML must be non-blank; the name is trimmed.
    pub fn validate(mut self) -> Result<Self, SignatureError> {
        self.template_name = self.template_name.trim().to_string();
        if self.template_name.is_empty() {
            return Err(SignatureError::validation("template name is required"));
        }
        if self.html_content.trim().is_empty() {
            return Err(SignatureError::validation("template HTML is required"));
        }
        Ok(self)
    }
}

/// Record inserted for a new template.
#[derive(Debug, Clone)]
pub struct NewSignatureTemplate {
    /// Template ID.
    pub id: SignatureTemplateId,
    /// Validated fields.
    pub input: TemplateInput,
    /// Author.
    pub created_by: Option<UserId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Output of rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSignature {
    /// `<style>` block followed by the filled-in HTML.
    pub html: String,
    /// The template's field labels.
    pub fields: BTreeMap<String, String>,
}

/// How often a template has been applied to documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateUsage {
    /// Template.
    pub template_id: SignatureTemplateId,
    /// Display name.
    pub template_name: String,
    /// Purpose.
    pub template_type: TemplateType,
    /// Number of recorded uses.
    pub usage_count: u64,
    /// Most recent use.
    pub last_used: Option<DateTime<Utc>>,
}
