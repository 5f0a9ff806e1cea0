//! Rows read by the analytics engine.
//!
//! These are owned by other parts of the system (payment, expense and ledger
//! entry forms). The engine only ever reads them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_shared::types::{ClientId, ExpenseId, LedgerEntryId, PaymentId, ProjectId};

/// Money received from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID.
    pub id: PaymentId,
    /// Paying client.
    pub client_id: ClientId,
    /// Amount received (non-negative).
    pub amount: Decimal,
    /// Method key, e.g. `cash`, `card`, `bank_transfer`, `check`.
    pub payment_method: String,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
}

/// Money spent, independent of any project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Free-form category, e.g. `software`, `equipment`.
    pub category: String,
    /// Amount spent (non-negative).
    pub amount: Decimal,
    /// Date the expense was incurred.
    pub expense_date: NaiveDate,
    /// Free-text note.
    pub description: Option<String>,
}

/// Kind of ledger journal row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryType {
    /// Capital put into the business.
    Investment,
    /// Money in.
    Credit,
    /// Money out.
    Debit,
}

impl LedgerEntryType {
    /// Database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investment => "investment",
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }

    /// Parse from database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "investment" => Some(Self::Investment),
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            _ => None,
        }
    }
}

/// A general-purpose financial journal row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entry ID.
    pub id: LedgerEntryId,
    /// Investment, credit or debit.
    pub entry_type: LedgerEntryType,
    /// Unsigned amount; direction comes from `entry_type`.
    pub amount: Decimal,
    /// Booking date.
    pub entry_date: NaiveDate,
    /// Project this entry is charged to, if any.
    pub linked_project_id: Option<ProjectId>,
    /// Free-text note.
    pub description: Option<String>,
}

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Not started.
    Pending,
    /// Work underway.
    InProgress,
    /// Delivered.
    Completed,
    /// Paused.
    OnHold,
}

impl ProjectStatus {
    /// Database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
        }
    }

    /// Parse from database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "on-hold" => Some(Self::OnHold),
            _ => None,
        }
    }
}

/// A client engagement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: ProjectId,
    /// Owning client.
    pub client_id: ClientId,
    /// Service sold, used as the project name.
    pub service: String,
    /// Current status.
    pub status: ProjectStatus,
    /// Staff member assigned, if any.
    pub assigned_staff: Option<String>,
}

/// A studio client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client ID.
    pub id: ClientId,
    /// Display name.
    pub name: String,
}
