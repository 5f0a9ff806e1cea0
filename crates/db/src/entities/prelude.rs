//! Entity re-exports.

pub use super::clients::Entity as Clients;
pub use super::document_signatures::Entity as DocumentSignatures;
pub use super::documents::Entity as Documents;
pub use super::expenses::Entity as Expenses;
pub use super::ledger_entries::Entity as LedgerEntries;
pub use super::payments::Entity as Payments;
pub use super::projects::Entity as Projects;
pub use super::signature_templates::Entity as SignatureTemplates;
