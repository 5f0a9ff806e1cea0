//! Query interface the engine reads from.

use studio_shared::types::ProjectId;

use super::error::AnalyticsError;
use super::period::DateRange;
use super::records::{Client, Expense, LedgerEntry, LedgerEntryType, Payment, Project};

/// Filter for ledger entry queries. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerQuery {
    /// Inclusive booking-date window.
    pub range: Option<DateRange>,
    /// Entry type.
    pub entry_type: Option<LedgerEntryType>,
    /// Linked project.
    pub linked_project_id: Option<ProjectId>,
}

impl LedgerQuery {
    /// All entries of one type.
    #[must_use]
    pub fn of_type(entry_type: LedgerEntryType) -> Self {
        Self {
            entry_type: Some(entry_type),
            ..Self::default()
        }
    }

    /// Restrict to a window.
    #[must_use]
    pub fn within(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Whether `entry` satisfies every set field.
    #[must_use]
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        self.range.is_none_or(|r| r.contains(entry.entry_date))
            && self.entry_type.is_none_or(|t| t == entry.entry_type)
            && self
                .linked_project_id
                .is_none_or(|p| entry.linked_project_id == Some(p))
    }
}

/// Read access to the financial rows.
///
/// Implemented by the db crate over PostgreSQL. Rows come back already
/// filtered; the engine only groups and sums them.
pub trait AnalyticsSource: Send + Sync {
    /// Payments, optionally restricted to a window.
    fn payments(
        &self,
        range: Option<DateRange>,
    ) -> impl std::future::Future<Output = Result<Vec<Payment>, AnalyticsError>> + Send;

    /// Expenses, optionally restricted to a window.
    fn expenses(
        &self,
        range: Option<DateRange>,
    ) -> impl std::future::Future<Output = Result<Vec<Expense>, AnalyticsError>> + Send;

    /// Ledger entries matching `query`.
    fn ledger_entries(
        &self,
        query: LedgerQuery,
    ) -> impl std::future::Future<Output = Result<Vec<LedgerEntry>, AnalyticsError>> + Send;

    /// All projects.
    fn projects(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Project>, AnalyticsError>> + Send;

    /// All clients.
    fn clients(&self)
    -> impl std::future::Future<Output = Result<Vec<Client>, AnalyticsError>> + Send;
}
