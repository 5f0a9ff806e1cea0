//! `SeaORM` entity definitions.

pub mod prelude;

pub mod clients;
pub mod document_signatures;
pub mod documents;
pub mod expenses;
pub mod ledger_entries;
pub mod payments;
pub mod projects;
pub mod signature_templates;
