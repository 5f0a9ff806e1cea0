//! Fixed category and document type catalogues.

/// Category key and label pairs, in menu order.
pub const CATEGORIES: [(&str, &str); 10] = [
    ("contracts", "Contracts"),
    ("invoices", "Invoices"),
    ("receipts", "Receipts"),
    ("reports", "Reports"),
    ("presentations", "Presentations"),
    ("designs", "Designs"),
    ("photos", "Photos"),
    ("legal", "Legal Documents"),
    ("marketing", "Marketing Materials"),
    ("uncategorized", "Uncategorized"),
];

/// Document type key and label pairs, in menu order.
pub const DOCUMENT_TYPES: [(&str, &str); 10] = [
    ("general", "General Document"),
    ("contract", "Contract"),
    ("invoice", "Invoice"),
    ("receipt", "Receipt"),
    ("report", "Report"),
    ("presentation", "Presentation"),
    ("design", "Design File"),
    ("photo", "Photo"),
    ("template", "Template"),
    ("signature_block", "Signature Block"),
];

/// Every category as `(key, label)`.
#[must_use]
pub fn categories() -> &'static [(&'static str, &'static str)] {
    &CATEGORIES
}

/// Every document type as `(key, label)`.
#[must_use]
pub fn document_types() -> &'static [(&'static str, &'static str)] {
    &DOCUMENT_TYPES
}
