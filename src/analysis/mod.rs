//! Pluggable analysis over the transaction history.
//!
//! The dashboard renders whatever [AnalysisProvider] the application was
//! configured with. The default provider is [RuleBasedAnalysis], a
//! deterministic set of rules over the aggregated history.

mod rule_based;

pub use rule_based::RuleBasedAnalysis;

use time::Date;

use crate::transaction::{Category, Transaction};

/// The share of income that should be kept for the savings advice to be
/// positive, as a percent.
pub const TARGET_SAVINGS_RATE: i64 = 20;

/// A single expense category with its share of all expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseHighlight {
    /// The category.
    pub category: Category,
    /// Total spent in the category.
    pub total: f64,
    /// The category's rounded share of all expenses, as a percent.
    pub percent_of_expenses: i64,
}

/// The calendar month with the highest income.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMonth {
    /// The month, pinned to day 1.
    pub month: Date,
    /// Income recorded in that month.
    pub income: f64,
}

/// Guidance derived from the savings rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    /// The savings rate is below [TARGET_SAVINGS_RATE]: suggest cutting
    /// discretionary spending.
    GrowSavings,
    /// The savings rate meets the target.
    KeepItUp,
}

/// What an analysis concluded about the current ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisReport {
    /// There is nothing to analyze yet.
    Empty,
    /// Findings over a non-empty ledger.
    Findings(Findings),
}

/// The findings of an analysis over a non-empty ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Findings {
    /// How many transactions were analyzed.
    pub transaction_count: usize,
    /// Income minus expenses.
    pub balance: f64,
    /// The rounded percent of income kept, 0 when there is no income.
    pub savings_rate: i64,
    /// The one or two largest expense categories, largest first. Empty when
    /// no expenses have been recorded.
    pub top_expenses: Vec<ExpenseHighlight>,
    /// Guidance derived from the savings rate.
    pub advice: Advice,
    /// The month with the highest income, if any income was recorded.
    pub best_month: Option<BestMonth>,
}

/// Produces an [AnalysisReport] from the transaction history.
///
/// The dashboard calls the provider on every render and whenever the user
/// asks for a refresh; providers should not keep state between calls.
pub trait AnalysisProvider: Send + Sync {
    /// Analyze `transactions` and report the findings.
    fn analyze(&self, transactions: &[Transaction]) -> AnalysisReport;
}
