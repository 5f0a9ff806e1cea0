//! Signature block templates.
//!
//! Templates are HTML fragments with `{{key}}` placeholders plus a CSS block.
//! Rendering merges stored defaults with caller data, escapes every value and
//! prefixes the styles.

mod error;
mod render;
mod service;
mod stock;
mod types;

pub use error::SignatureError;
pub use render::{escape_html, long_date, render, sample_data};
pub use service::{SignatureService, SignatureTemplateRepository};
pub use stock::stock_templates;
pub use types::{
    NewSignatureTemplate, RenderedSignature, SignatureTemplate, TemplateInput, TemplateType,
    TemplateUsage,
};
