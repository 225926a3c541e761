//! The financial summary derived from the store's current contents.

use crate::transaction::{Transaction, TransactionKind};

/// Income and expense totals with each side's share of overall turnover.
///
/// A derived view: computed from the transaction list on every request and
/// never stored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
    /// Income as a rounded percentage of `income + expense`, 0 when there
    /// are no transactions.
    pub income_percent: i64,
    /// Expense as a rounded percentage of `income + expense`, 0 when there
    /// are no transactions.
    pub expense_percent: i64,
}

impl Summary {
    /// Compute the summary of `transactions`.
    pub fn of(transactions: &[Transaction]) -> Self {
        let income: f64 = transactions
            .iter()
            .filter(|transaction| transaction.kind == TransactionKind::Income)
            .map(|transaction| transaction.amount)
            .sum();

        let expense: f64 = transactions
            .iter()
            .filter(|transaction| transaction.kind == TransactionKind::Expense)
            .map(|transaction| transaction.amount)
            .sum();

        let total = income + expense;

        // Ties round to even so the two shares can never sum past 100
        // (e.g. 12.5% and 87.5% become 12 and 88, not 13 and 88).
        let (income_percent, expense_percent) = if total > 0.0 {
            (
                (income / total * 100.0).round_ties_even() as i64,
                (expense / total * 100.0).round_ties_even() as i64,
            )
        } else {
            (0, 0)
        };

        Self {
            income,
            expense,
            balance: income - expense,
            income_percent,
            expense_percent,
        }
    }
}

#[cfg(test)]
mod summary_tests {
    use time::{Date, macros::date};

    use crate::transaction::{Category, Transaction, TransactionKind};

    use super::Summary;

    fn transaction(kind: TransactionKind, amount: f64, date: Date) -> Transaction {
        Transaction::draft(kind, Category::Food, amount, date, "test")
            .unwrap()
            .finalize(1)
    }

    #[test]
    fn empty_store_gives_zeroed_summary() {
        let summary = Summary::of(&[]);

        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let transactions = vec![
            transaction(TransactionKind::Income, 1000.0, date!(2023 - 11 - 01)),
            transaction(TransactionKind::Expense, 300.0, date!(2023 - 11 - 05)),
            transaction(TransactionKind::Expense, 150.0, date!(2023 - 11 - 07)),
        ];

        let summary = Summary::of(&transactions);

        assert_eq!(summary.income, 1000.0);
        assert_eq!(summary.expense, 450.0);
        assert_eq!(summary.balance, summary.income - summary.expense);
    }

    #[test]
    fn percentages_match_worked_example() {
        // 1000 / 1300 = 76.9% and 300 / 1300 = 23.1%, rounding to 77 and 23.
        let transactions = vec![
            transaction(TransactionKind::Income, 1000.0, date!(2023 - 11 - 01)),
            transaction(TransactionKind::Expense, 300.0, date!(2023 - 11 - 05)),
        ];

        let summary = Summary::of(&transactions);

        assert_eq!(summary.balance, 700.0);
        assert_eq!(summary.income_percent, 77);
        assert_eq!(summary.expense_percent, 23);
    }

    #[test]
    fn percentages_never_exceed_one_hundred_combined() {
        let cases = vec![
            vec![],
            vec![transaction(
                TransactionKind::Income,
                1.0,
                date!(2023 - 11 - 01),
            )],
            vec![
                transaction(TransactionKind::Income, 1000.0, date!(2023 - 11 - 01)),
                transaction(TransactionKind::Expense, 300.0, date!(2023 - 11 - 05)),
            ],
            vec![
                transaction(TransactionKind::Income, 333.0, date!(2023 - 11 - 01)),
                transaction(TransactionKind::Expense, 667.0, date!(2023 - 11 - 05)),
            ],
            // 12.5% / 87.5% is the rounding worst case.
            vec![
                transaction(TransactionKind::Income, 1.0, date!(2023 - 11 - 01)),
                transaction(TransactionKind::Expense, 7.0, date!(2023 - 11 - 05)),
            ],
        ];

        for transactions in cases {
            let summary = Summary::of(&transactions);

            assert!(
                summary.income_percent + summary.expense_percent <= 100,
                "{} + {} > 100",
                summary.income_percent,
                summary.expense_percent
            );
        }
    }
}
