//! Per-project, per-category, per-client and per-method breakdowns.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use studio_shared::types::{ClientId, ProjectId};

use super::metrics::percent_of;
use super::records::{
    Client, Expense, LedgerEntry, LedgerEntryType, Payment, Project, ProjectStatus,
};
use super::trend::month_key;
use super::types::{
    CashFlowPoint, ClientSummary, ExpenseCategory, PaymentMethodShare, ProjectProfitability,
};

fn revenue_by_client(payments: &[Payment]) -> HashMap<ClientId, Decimal> {
    let mut totals = HashMap::new();
    for payment in payments {
        *totals.entry(payment.client_id).or_default() += payment.amount;
    }
    totals
}

fn debits_by_project(ledger: &[LedgerEntry]) -> HashMap<ProjectId, Decimal> {
    let mut totals = HashMap::new();
    for entry in ledger
        .iter()
        .filter(|e| e.entry_type == LedgerEntryType::Debit)
    {
        if let Some(project_id) = entry.linked_project_id {
            *totals.entry(project_id).or_default() += entry.amount;
        }
    }
    totals
}

/// Revenue, linked costs and margin of every project, most profitable first.
///
/// A project earns everything its client has paid.
#[must_use]
pub fn project_profitability(
    projects: &[Project],
    clients: &[Client],
    payments: &[Payment],
    ledger: &[LedgerEntry],
) -> Vec<ProjectProfitability> {
    let revenue = revenue_by_client(payments);
    let costs = debits_by_project(ledger);
    let names: HashMap<ClientId, &str> = clients.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut rows: Vec<ProjectProfitability> = projects
        .iter()
        .map(|project| {
            let total_revenue = revenue.get(&project.client_id).copied().unwrap_or_default();
            let total_expenses = costs.get(&project.id).copied().unwrap_or_default();
            let profit = total_revenue - total_expenses;
            ProjectProfitability {
                project_id: project.id,
                project_name: project.service.clone(),
                client_name: names.get(&project.client_id).map(|n| (*n).to_string()),
                status: project.status,
                total_revenue,
                total_expenses,
                profit,
                profit_margin: percent_of(profit, total_revenue),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.profit.cmp(&a.profit));
    rows
}

/// Expenses grouped by category, largest total first.
#[must_use]
pub fn expense_breakdown(expenses: &[Expense]) -> Vec<ExpenseCategory> {
    let mut groups: BTreeMap<&str, (Decimal, u64)> = BTreeMap::new();
    for expense in expenses {
        let group = groups
            .entry(expense.category.as_str())
            .or_insert((Decimal::ZERO, 0));
        group.0 += expense.amount;
        group.1 += 1;
    }

    let mut rows: Vec<ExpenseCategory> = groups
        .into_iter()
        .map(|(category, (total, count))| ExpenseCategory {
            category: category.to_string(),
            transaction_count: count,
            total_amount: total,
            avg_amount: total / Decimal::from(count),
        })
        .collect();

    rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    rows
}

/// Lifetime summary of every paying client, highest revenue first.
#[must_use]
pub fn client_analysis(
    clients: &[Client],
    projects: &[Project],
    payments: &[Payment],
    ledger: &[LedgerEntry],
) -> Vec<ClientSummary> {
    let revenue = revenue_by_client(payments);
    let costs = debits_by_project(ledger);

    let mut rows: Vec<ClientSummary> = clients
        .iter()
        .filter_map(|client| {
            let total_revenue = revenue.get(&client.id).copied().unwrap_or_default();
            if total_revenue <= Decimal::ZERO {
                return None;
            }

            let owned: Vec<&Project> = projects
                .iter()
                .filter(|p| p.client_id == client.id)
                .collect();
            let total_projects = owned.len() as u64;
            let completed_projects = owned
                .iter()
                .filter(|p| p.status == ProjectStatus::Completed)
                .count() as u64;
            let total_expenses: Decimal = owned
                .iter()
                .filter_map(|p| costs.get(&p.id))
                .copied()
                .sum();

            let (average_project_value, completion_rate) = if total_projects == 0 {
                (Decimal::ZERO, Decimal::ZERO)
            } else {
                (
                    total_revenue / Decimal::from(total_projects),
                    percent_of(
                        Decimal::from(completed_projects),
                        Decimal::from(total_projects),
                    ),
                )
            };

            Some(ClientSummary {
                client_id: client.id,
                client_name: client.name.clone(),
                total_projects,
                completed_projects,
                total_revenue,
                total_expenses,
                profit: total_revenue - total_expenses,
                average_project_value,
                completion_rate,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    rows
}

/// Display label of a stored payment method key.
#[must_use]
pub fn payment_method_display(method: &str) -> &'static str {
    match method {
        "cash" => "Cash",
        "card" => "Card",
        "bank_transfer" => "Bank Transfer",
        "check" => "Check",
        _ => "Other",
    }
}

/// Revenue split by payment method, largest total first.
#[must_use]
pub fn payment_method_analysis(payments: &[Payment]) -> Vec<PaymentMethodShare> {
    let grand_total: Decimal = payments.iter().map(|p| p.amount).sum();

    let mut groups: BTreeMap<&str, (Decimal, u64)> = BTreeMap::new();
    for payment in payments {
        let group = groups
            .entry(payment.payment_method.as_str())
            .or_insert((Decimal::ZERO, 0));
        group.0 += payment.amount;
        group.1 += 1;
    }

    let mut rows: Vec<PaymentMethodShare> = groups
        .into_iter()
        .map(|(method, (total, count))| PaymentMethodShare {
            payment_method: method.to_string(),
            method_display: payment_method_display(method).to_string(),
            transaction_count: count,
            total_amount: total,
            percentage: percent_of(total, grand_total),
        })
        .collect();

    rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    rows
}

/// Monthly cash in and out, ascending.
///
/// Payments and ledger credits flow in; expenses and every other ledger row
/// flow out.
#[must_use]
pub fn cash_flow(
    payments: &[Payment],
    expenses: &[Expense],
    ledger: &[LedgerEntry],
) -> Vec<CashFlowPoint> {
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for payment in payments {
        months.entry(month_key(payment.payment_date)).or_default().0 += payment.amount;
    }
    for expense in expenses {
        months.entry(month_key(expense.expense_date)).or_default().1 += expense.amount;
    }
    for entry in ledger {
        let flow = months.entry(month_key(entry.entry_date)).or_default();
        if entry.entry_type == LedgerEntryType::Credit {
            flow.0 += entry.amount;
        } else {
            flow.1 += entry.amount;
        }
    }

    months
        .into_iter()
        .map(|(month, (cash_in, cash_out))| CashFlowPoint {
            month,
            cash_in,
            cash_out,
            net_flow: cash_in - cash_out,
        })
        .collect()
}
