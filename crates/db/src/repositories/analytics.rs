//! Analytics source backed by the financial tables.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Select,
};
use studio_core::analytics::{
    AnalyticsError, AnalyticsSource, Client, DateRange, Expense, LedgerEntry, LedgerEntryType,
    LedgerQuery, Payment, Project, ProjectStatus,
};
use studio_shared::types::{ClientId, ExpenseId, LedgerEntryId, PaymentId, ProjectId};

use crate::entities::{clients, expenses, ledger_entries, payments, projects};

/// Read-only repository feeding the analytics engine.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    db: DatabaseConnection,
}

impl AnalyticsRepository {
    /// Create a new analytics repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AnalyticsSource for AnalyticsRepository {
    async fn payments(&self, range: Option<DateRange>) -> Result<Vec<Payment>, AnalyticsError> {
        let models = within(
            payments::Entity::find(),
            payments::Column::PaymentDate,
            range,
        )
        .order_by_asc(payments::Column::PaymentDate)
        .all(&self.db)
        .await
        .map_err(source_error)?;

        tracing::debug!(rows = models.len(), "loaded payments");
        Ok(models.into_iter().map(payment_to_domain).collect())
    }

    async fn expenses(&self, range: Option<DateRange>) -> Result<Vec<Expense>, AnalyticsError> {
        let models = within(
            expenses::Entity::find(),
            expenses::Column::ExpenseDate,
            range,
        )
        .order_by_asc(expenses::Column::ExpenseDate)
        .all(&self.db)
        .await
        .map_err(source_error)?;

        tracing::debug!(rows = models.len(), "loaded expenses");
        Ok(models.into_iter().map(expense_to_domain).collect())
    }

    async fn ledger_entries(&self, query: LedgerQuery) -> Result<Vec<LedgerEntry>, AnalyticsError> {
        let mut select = within(
            ledger_entries::Entity::find(),
            ledger_entries::Column::EntryDate,
            query.range,
        );
        if let Some(entry_type) = query.entry_type {
            select = select.filter(ledger_entries::Column::EntryType.eq(entry_type.as_str()));
        }
        if let Some(project_id) = query.linked_project_id {
            select =
                select.filter(ledger_entries::Column::LinkedProjectId.eq(project_id.into_inner()));
        }

        let models = select
            .order_by_asc(ledger_entries::Column::EntryDate)
            .all(&self.db)
            .await
            .map_err(source_error)?;

        tracing::debug!(rows = models.len(), ?query.entry_type, "loaded ledger entries");
        models.into_iter().map(ledger_entry_to_domain).collect()
    }

    async fn projects(&self) -> Result<Vec<Project>, AnalyticsError> {
        let models = projects::Entity::find()
            .order_by_asc(projects::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(source_error)?;

        models.into_iter().map(project_to_domain).collect()
    }

    async fn clients(&self) -> Result<Vec<Client>, AnalyticsError> {
        let models = clients::Entity::find()
            .order_by_asc(clients::Column::Name)
            .all(&self.db)
            .await
            .map_err(source_error)?;

        Ok(models
            .into_iter()
            .map(|m| Client {
                id: ClientId::from_uuid(m.id),
                name: m.name,
            })
            .collect())
    }
}

/// Restrict `query` to rows whose `column` falls inside `range`.
fn within<E: EntityTrait>(
    query: Select<E>,
    column: impl ColumnTrait,
    range: Option<DateRange>,
) -> Select<E> {
    match range {
        Some(range) => query.filter(column.between(range.start(), range.end())),
        None => query,
    }
}

#[allow(clippy::needless_pass_by_value)]
fn source_error(err: DbErr) -> AnalyticsError {
    AnalyticsError::from_source(err.to_string())
}

fn payment_to_domain(model: payments::Model) -> Payment {
    Payment {
        id: PaymentId::from_uuid(model.id),
        client_id: ClientId::from_uuid(model.client_id),
        amount: model.amount,
        payment_method: model.payment_method,
        payment_date: model.payment_date,
    }
}

fn expense_to_domain(model: expenses::Model) -> Expense {
    Expense {
        id: ExpenseId::from_uuid(model.id),
        category: model.category,
        amount: model.amount,
        expense_date: model.expense_date,
        description: model.description,
    }
}

fn ledger_entry_to_domain(model: ledger_entries::Model) -> Result<LedgerEntry, AnalyticsError> {
    let entry_type = LedgerEntryType::parse(&model.entry_type).ok_or_else(|| {
        AnalyticsError::from_source(format!("unknown ledger entry type '{}'", model.entry_type))
    })?;

    Ok(LedgerEntry {
        id: LedgerEntryId::from_uuid(model.id),
        entry_type,
        amount: model.amount,
        entry_date: model.entry_date,
        linked_project_id: model.linked_project_id.map(ProjectId::from_uuid),
        description: model.description,
    })
}

fn project_to_domain(model: projects::Model) -> Result<Project, AnalyticsError> {
    let status = ProjectStatus::parse(&model.status).ok_or_else(|| {
        AnalyticsError::from_source(format!("unknown project status '{}'", model.status))
    })?;

    Ok(Project {
        id: ProjectId::from_uuid(model.id),
        client_id: ClientId::from_uuid(model.client_id),
        service: model.service,
        status,
        assigned_staff: model.assigned_staff,
    })
}
