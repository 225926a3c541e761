//! Transaction aggregation for charts and analysis.
//!
//! Provides functions to sum expenses by category and to break income and
//! expenses down by calendar month. Months are keyed by a [Date] pinned to
//! the first of the month and compared structurally, so chronological order
//! never depends on string formatting.

use std::collections::HashMap;

use time::Date;

use crate::transaction::{Category, Transaction, TransactionKind};

/// Income and expense totals for one calendar month.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct MonthlyTotals {
    pub(crate) income: f64,
    pub(crate) expense: f64,
}

/// The month `date` falls in, as a date pinned to day 1.
pub(crate) fn month_of(date: Date) -> Date {
    date.replace_day(1).unwrap()
}

/// Sums income and expenses per calendar month, in chronological order.
pub(crate) fn monthly_breakdown(transactions: &[Transaction]) -> Vec<(Date, MonthlyTotals)> {
    let mut totals: HashMap<Date, MonthlyTotals> = HashMap::new();

    for transaction in transactions {
        let entry = totals.entry(month_of(transaction.date)).or_default();

        match transaction.kind {
            TransactionKind::Income => entry.income += transaction.amount,
            TransactionKind::Expense => entry.expense += transaction.amount,
        }
    }

    let mut months: Vec<_> = totals.into_iter().collect();
    months.sort_by_key(|(month, _)| *month);

    months
}

/// Sums expense amounts per category, largest total first.
///
/// Categories with equal totals are ordered by name so the result is
/// deterministic.
pub(crate) fn expense_totals_by_category(transactions: &[Transaction]) -> Vec<(Category, f64)> {
    let mut totals: HashMap<Category, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
    {
        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount;
    }

    let mut by_category: Vec<_> = totals.into_iter().collect();
    by_category.sort_by(|(category_a, total_a), (category_b, total_b)| {
        total_b
            .partial_cmp(total_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| category_a.as_str().cmp(category_b.as_str()))
    });

    by_category
}

/// Formats a month as e.g. "Nov 2023".
pub(crate) fn format_month_label(month: Date) -> String {
    use time::Month;

    let name = match month.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{name} {}", month.year())
}

#[cfg(test)]
mod aggregation_tests {
    use time::{Date, macros::date};

    use crate::transaction::{Category, Transaction, TransactionKind};

    use super::{
        MonthlyTotals, expense_totals_by_category, format_month_label, monthly_breakdown,
    };

    fn transaction(
        kind: TransactionKind,
        category: Category,
        amount: f64,
        date: Date,
    ) -> Transaction {
        Transaction::draft(kind, category, amount, date, "test")
            .unwrap()
            .finalize(1)
    }

    #[test]
    fn monthly_breakdown_separates_income_and_expenses() {
        let transactions = vec![
            transaction(
                TransactionKind::Income,
                Category::Salary,
                1000.0,
                date!(2023 - 11 - 01),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Food,
                300.0,
                date!(2023 - 11 - 05),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Transport,
                50.0,
                date!(2023 - 11 - 20),
            ),
        ];

        let breakdown = monthly_breakdown(&transactions);

        assert_eq!(
            breakdown,
            vec![(
                date!(2023 - 11 - 01),
                MonthlyTotals {
                    income: 1000.0,
                    expense: 350.0
                }
            )]
        );
    }

    #[test]
    fn monthly_breakdown_orders_september_before_october() {
        // A string key of year and unpadded month would sort "2023-9"
        // after "2023-10"; structured keys must not.
        let transactions = vec![
            transaction(
                TransactionKind::Expense,
                Category::Food,
                10.0,
                date!(2023 - 10 - 02),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Food,
                20.0,
                date!(2023 - 09 - 15),
            ),
        ];

        let breakdown = monthly_breakdown(&transactions);

        let months: Vec<_> = breakdown.iter().map(|(month, _)| *month).collect();
        assert_eq!(months, vec![date!(2023 - 09 - 01), date!(2023 - 10 - 01)]);
    }

    #[test]
    fn monthly_breakdown_handles_empty_input() {
        assert!(monthly_breakdown(&[]).is_empty());
    }

    #[test]
    fn expense_totals_ignore_income() {
        let transactions = vec![
            transaction(
                TransactionKind::Income,
                Category::Salary,
                1000.0,
                date!(2023 - 11 - 01),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Food,
                300.0,
                date!(2023 - 11 - 05),
            ),
        ];

        let totals = expense_totals_by_category(&transactions);

        assert_eq!(totals, vec![(Category::Food, 300.0)]);
    }

    #[test]
    fn expense_totals_sort_largest_first() {
        let transactions = vec![
            transaction(
                TransactionKind::Expense,
                Category::Food,
                100.0,
                date!(2023 - 11 - 01),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Shopping,
                7500.0,
                date!(2023 - 11 - 12),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Food,
                50.0,
                date!(2023 - 11 - 20),
            ),
        ];

        let totals = expense_totals_by_category(&transactions);

        assert_eq!(
            totals,
            vec![(Category::Shopping, 7500.0), (Category::Food, 150.0)]
        );
    }

    #[test]
    fn month_labels_include_the_year() {
        assert_eq!(format_month_label(date!(2023 - 11 - 01)), "Nov 2023");
        assert_eq!(format_month_label(date!(2024 - 01 - 01)), "Jan 2024");
    }
}
