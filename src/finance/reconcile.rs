use crate::error::{EngineError, Result};
use crate::model::{ExpenseItem, RevenueItem, TOTAL_EXPENSES, TOTAL_REVENUE};

/// A labelled amount from the Revenue or Expenses table.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub label: String,
    pub amount: f64,
}

/// One wedge of a proportional chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub amount: f64,
    /// Share of the chart total, 0-100.
    pub percent: f64,
}

/// Sign of the net result. The amount is always non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NetOutcome {
    Profit(f64),
    Loss(f64),
}

impl NetOutcome {
    pub fn from_net(net: f64) -> Self {
        if net >= 0.0 {
            NetOutcome::Profit(net)
        } else {
            NetOutcome::Loss(net.abs())
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NetOutcome::Profit(_) => "Net Profit",
            NetOutcome::Loss(_) => "Net Loss",
        }
    }

    pub fn magnitude(&self) -> f64 {
        match self {
            NetOutcome::Profit(v) | NetOutcome::Loss(v) => *v,
        }
    }
}

/// Totals and breakdowns for the finance view.
///
/// The reserved total rows are authoritative. The itemized rows are not
/// checked against them; when they disagree the difference is visible
/// through `itemized_revenue` and `itemized_expenses`, never corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceReport {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net: NetOutcome,
    /// Every revenue row except the reserved total, in table order.
    pub revenue_items: Vec<LineItem>,
    /// Every expense row except the reserved total, in table order.
    pub expense_items: Vec<LineItem>,
}

impl FinanceReport {
    pub fn revenue_chart(&self) -> Vec<ChartSlice> {
        chart_slices(&self.revenue_items)
    }

    pub fn expense_chart(&self) -> Vec<ChartSlice> {
        chart_slices(&self.expense_items)
    }

    pub fn itemized_revenue(&self) -> f64 {
        self.revenue_items.iter().map(|i| i.amount).sum()
    }

    pub fn itemized_expenses(&self) -> f64 {
        self.expense_items.iter().map(|i| i.amount).sum()
    }
}

/// Compute totals, net result and itemized breakdowns.
///
/// Fails with `MissingTotal` when either reserved row is absent; no partial
/// report is produced. If a reserved row appears more than once the first
/// one is used.
pub fn reconcile(revenue: &[RevenueItem], expenses: &[ExpenseItem]) -> Result<FinanceReport> {
    let total_revenue = revenue
        .iter()
        .find(|r| r.source == TOTAL_REVENUE)
        .map(|r| r.amount)
        .ok_or(EngineError::MissingTotal(TOTAL_REVENUE))?;
    let total_expenses = expenses
        .iter()
        .find(|e| e.category == TOTAL_EXPENSES)
        .map(|e| e.amount)
        .ok_or(EngineError::MissingTotal(TOTAL_EXPENSES))?;

    let revenue_items = revenue
        .iter()
        .filter(|r| r.source != TOTAL_REVENUE)
        .map(|r| LineItem { label: r.source.clone(), amount: r.amount })
        .collect();
    let expense_items = expenses
        .iter()
        .filter(|e| e.category != TOTAL_EXPENSES)
        .map(|e| LineItem { label: e.category.clone(), amount: e.amount })
        .collect();

    Ok(FinanceReport {
        total_revenue,
        total_expenses,
        net: NetOutcome::from_net(total_revenue - total_expenses),
        revenue_items,
        expense_items,
    })
}

/// Slices for a proportional chart. Only positive amounts take part.
pub fn chart_slices(items: &[LineItem]) -> Vec<ChartSlice> {
    let eligible: Vec<&LineItem> = items.iter().filter(|i| i.amount > 0.0).collect();
    let total: f64 = eligible.iter().map(|i| i.amount).sum();

    eligible
        .into_iter()
        .map(|i| ChartSlice {
            label: i.label.clone(),
            amount: i.amount,
            percent: i.amount / total * 100.0,
        })
        .collect()
}
