//! Templates installed on request for a fresh studio.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::render::long_date;
use super::types::{TemplateInput, TemplateType};

const BASIC_HTML: &str = r#"<div class="signature-block">
    <div class="signature-line"></div>
    <div class="signature-info">
        <div class="signer-name">{{signer_name}}</div>
        <div class="signer-title">{{signer_title}}</div>
        <div class="signature-date">Date: {{date}}</div>
    </div>
</div>"#;

const BASIC_CSS: &str = ".signature-block { margin: 40px 0; width: 300px; }
.signature-line { border-top: 1px solid #333; margin-bottom: 5px; }
.signature-info { font-size: 12px; line-height: 1.4; }
.signer-name { font-weight: bold; }
.signer-title { color: #666; }
.signature-date { margin-top: 5px; }";

const EXECUTIVE_HTML: &str = r#"<div class="executive-signature">
    <div class="approval-section">
        <h4>Executive Approval</h4>
        <div class="signature-row">
            <div class="signature-field">
                <div class="signature-line"></div>
                <div class="field-label">{{executive_name}}</div>
                <div class="field-title">{{executive_title}}</div>
            </div>
            <div class="date-field">
                <div class="signature-line"></div>
                <div class="field-label">Date</div>
            </div>
        </div>
    </div>
</div>"#;

const EXECUTIVE_CSS: &str = ".executive-signature { margin: 40px 0; border: 1px solid #ddd; padding: 20px; background: #f9f9f9; }
.executive-signature h4 { margin: 0 0 20px 0; color: #333; border-bottom: 2px solid #007bff; padding-bottom: 5px; }
.signature-row { display: flex; justify-content: space-between; }
.signature-field, .date-field { width: 45%; }
.signature-line { border-top: 1px solid #333; margin-bottom: 5px; height: 40px; }
.field-label { font-weight: bold; font-size: 12px; }
.field-title { font-size: 11px; color: #666; }";

const CLIENT_APPROVAL_HTML: &str = r#"<div class="client-approval">
    <div class="approval-header">
        <h4>Client Approval &amp; Sign-off</h4>
        <p>By signing below, the client acknowledges receipt and approval of the deliverables.</p>
    </div>
    <div class="signature-section">
        <div class="client-signature">
            <div class="signature-line"></div>
            <div class="signature-details">
                <div class="client-name">{{client_name}}</div>
                <div class="client-company">{{client_company}}</div>
                <div class="signature-date">Date: {{date}}</div>
            </div>
        </div>
        <div class="witness-signature">
            <div class="signature-line"></div>
            <div class="signature-details">
                <div class="witness-name">{{witness_name}}</div>
                <div class="witness-title">Studio Representative</div>
                <div class="signature-date">Date: {{date}}</div>
            </div>
        </div>
    </div>
</div>"#;

const CLIENT_APPROVAL_CSS: &str = ".client-approval { margin: 40px 0; padding: 20px; border: 2px solid #007bff; }
.approval-header h4 { color: #007bff; margin: 0 0 10px 0; }
.approval-header p { font-size: 12px; color: #666; margin-bottom: 20px; }
.signature-section { display: flex; justify-content: space-between; }
.client-signature, .witness-signature { width: 45%; }
.signature-line { border-top: 1px solid #333; margin-bottom: 5px; height: 50px; }
.signature-details { font-size: 12px; line-height: 1.4; }
.client-name, .witness-name { font-weight: bold; }
.client-company, .witness-title { color: #666; font-style: italic; }";

fn pairs(items: &[(&str, &str)]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Basic Signature Block, Executive Approval and Client Approval.
///
/// Date defaults are fixed to `today`.
#[must_use]
pub fn stock_templates(today: NaiveDate) -> Vec<TemplateInput> {
    let date = long_date(today);
    vec![
        TemplateInput {
            template_name: "Basic Signature Block".to_string(),
            template_type: TemplateType::Basic,
            html_content: BASIC_HTML.to_string(),
            css_styles: BASIC_CSS.to_string(),
            signature_fields: pairs(&[
                ("signer_name", "Signer Name"),
                ("signer_title", "Title/Position"),
                ("date", "Date"),
            ]),
            default_values: pairs(&[("date", date.as_str())]),
        },
        TemplateInput {
            template_name: "Executive Approval".to_string(),
            template_type: TemplateType::Executive,
            html_content: EXECUTIVE_HTML.to_string(),
            css_styles: EXECUTIVE_CSS.to_string(),
            signature_fields: pairs(&[
                ("executive_name", "Executive Name"),
                ("executive_title", "Executive Title"),
            ]),
            default_values: pairs(&[("executive_title", "Chief Executive Officer")]),
        },
        TemplateInput {
            template_name: "Client Approval".to_string(),
            template_type: TemplateType::ClientApproval,
            html_content: CLIENT_APPROVAL_HTML.to_string(),
            css_styles: CLIENT_APPROVAL_CSS.to_string(),
            signature_fields: pairs(&[
                ("client_name", "Client Name"),
                ("client_company", "Client Company"),
                ("witness_name", "Witness Name"),
                ("date", "Date"),
            ]),
            default_values: pairs(&[("date", date.as_str())]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_templates_are_valid() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let templates = stock_templates(today);
        assert_eq!(templates.len(), 3);
        for t in &templates {
            assert!(t.clone().validate().is_ok());
            for key in t.signature_fields.keys() {
                assert!(
                    t.html_content.contains(&format!("{{{{{key}}}}}")),
                    "{} lacks placeholder {key}",
                    t.template_name
                );
            }
        }
        assert_eq!(templates[0].default_values["date"], "October 19, 2026");
    }
}
