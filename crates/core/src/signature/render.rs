//! Placeholder substitution.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::types::{RenderedSignature, SignatureTemplate};

/// Escapes `& < > " '` for HTML text and attribute values.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Dates in signature blocks read like `March 5, 2026`.
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Values used to preview a template.
#[must_use]
pub fn sample_data(today: NaiveDate) -> BTreeMap<String, String> {
    [
        ("signer_name", "John Doe".to_string()),
        ("signer_title", "Project Manager".to_string()),
        ("client_name", "Sample Client".to_string()),
        ("client_company", "Sample Company Inc.".to_string()),
        ("witness_name", "Jane Smith".to_string()),
        ("executive_name", "Michael Johnson".to_string()),
        ("executive_title", "Chief Executive Officer".to_string()),
        ("date", long_date(today)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Fills `{{key}}` placeholders in one pass.
///
/// `data` overrides the template defaults. Substituted values are escaped and
/// never rescanned; placeholders without a value stay as written.
#[must_use]
pub fn render(template: &SignatureTemplate, data: &BTreeMap<String, String>) -> RenderedSignature {
    let mut values = template.default_values.clone();
    values.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));

    let source = template.html_content.as_str();
    let mut html = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let key = &after_open[..close];
        html.push_str(&rest[..open]);
        match values.get(key) {
            Some(value) => html.push_str(&escape_html(value)),
            None => html.push_str(&rest[open..open + close + 4]),
        }
        rest = &after_open[close + 2..];
    }
    html.push_str(rest);

    RenderedSignature {
        html: format!("<style>{}</style>\n{}", template.css_styles, html),
        fields: template.signature_fields.clone(),
    }
}
