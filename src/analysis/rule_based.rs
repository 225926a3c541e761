//! The built-in rule-based analysis provider.

use crate::{
    dashboard::aggregation::{expense_totals_by_category, monthly_breakdown},
    summary::Summary,
    transaction::Transaction,
};

use super::{
    Advice, AnalysisProvider, AnalysisReport, BestMonth, ExpenseHighlight, Findings,
    TARGET_SAVINGS_RATE,
};

/// A deterministic analysis built from summary totals, the category
/// breakdown, and the monthly breakdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalysis;

impl AnalysisProvider for RuleBasedAnalysis {
    fn analyze(&self, transactions: &[Transaction]) -> AnalysisReport {
        if transactions.is_empty() {
            return AnalysisReport::Empty;
        }

        let summary = Summary::of(transactions);

        let savings_rate = if summary.income > 0.0 {
            (summary.balance / summary.income * 100.0).round() as i64
        } else {
            0
        };

        let top_expenses = expense_totals_by_category(transactions)
            .into_iter()
            .take(2)
            .map(|(category, total)| ExpenseHighlight {
                category,
                total,
                percent_of_expenses: (total / summary.expense * 100.0).round() as i64,
            })
            .collect();

        let advice = if savings_rate < TARGET_SAVINGS_RATE {
            Advice::GrowSavings
        } else {
            Advice::KeepItUp
        };

        let best_month = monthly_breakdown(transactions)
            .into_iter()
            .filter(|(_, totals)| totals.income > 0.0)
            .max_by(|(_, totals_a), (_, totals_b)| {
                totals_a
                    .income
                    .partial_cmp(&totals_b.income)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(month, totals)| BestMonth {
                month,
                income: totals.income,
            });

        AnalysisReport::Findings(Findings {
            transaction_count: transactions.len(),
            balance: summary.balance,
            savings_rate,
            top_expenses,
            advice,
            best_month,
        })
    }
}

#[cfg(test)]
mod rule_based_tests {
    use time::{Date, macros::date};

    use crate::{
        analysis::{Advice, AnalysisProvider, AnalysisReport, BestMonth},
        transaction::{Category, Transaction, TransactionKind},
    };

    use super::RuleBasedAnalysis;

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

    fn findings(transactions: &[Transaction]) -> crate::analysis::Findings {
        match RuleBasedAnalysis.analyze(transactions) {
            AnalysisReport::Findings(findings) => findings,
            AnalysisReport::Empty => panic!("expected findings for a non-empty ledger"),
        }
    }

    #[test]
    fn empty_ledger_reports_empty() {
        assert_eq!(RuleBasedAnalysis.analyze(&[]), AnalysisReport::Empty);
    }

    #[test]
    fn savings_rate_is_balance_share_of_income() {
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

        let findings = findings(&transactions);

        assert_eq!(findings.balance, 700.0);
        assert_eq!(findings.savings_rate, 70);
        assert_eq!(findings.advice, Advice::KeepItUp);
    }

    #[test]
    fn savings_rate_is_zero_without_income() {
        let transactions = vec![transaction(
            TransactionKind::Expense,
            Category::Food,
            300.0,
            date!(2023 - 11 - 05),
        )];

        let findings = findings(&transactions);

        assert_eq!(findings.savings_rate, 0);
        assert_eq!(findings.advice, Advice::GrowSavings);
    }

    #[test]
    fn low_savings_rate_triggers_advice() {
        // 1000 income, 850 spent: savings rate 15%, below the 20% target.
        let transactions = vec![
            transaction(
                TransactionKind::Income,
                Category::Salary,
                1000.0,
                date!(2023 - 11 - 01),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Shopping,
                850.0,
                date!(2023 - 11 - 05),
            ),
        ];

        assert_eq!(findings(&transactions).advice, Advice::GrowSavings);

        // Exactly 20% meets the target.
        let transactions = vec![
            transaction(
                TransactionKind::Income,
                Category::Salary,
                1000.0,
                date!(2023 - 11 - 01),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Shopping,
                800.0,
                date!(2023 - 11 - 05),
            ),
        ];

        assert_eq!(findings(&transactions).advice, Advice::KeepItUp);
    }

    #[test]
    fn reports_at_most_two_top_expense_categories() {
        let transactions = vec![
            transaction(
                TransactionKind::Expense,
                Category::Food,
                400.0,
                date!(2023 - 11 - 01),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Shopping,
                500.0,
                date!(2023 - 11 - 02),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Transport,
                100.0,
                date!(2023 - 11 - 03),
            ),
        ];

        let findings = findings(&transactions);

        assert_eq!(findings.top_expenses.len(), 2);
        assert_eq!(findings.top_expenses[0].category, Category::Shopping);
        assert_eq!(findings.top_expenses[0].percent_of_expenses, 50);
        assert_eq!(findings.top_expenses[1].category, Category::Food);
        assert_eq!(findings.top_expenses[1].percent_of_expenses, 40);
    }

    #[test]
    fn best_month_has_the_highest_income() {
        let transactions = vec![
            transaction(
                TransactionKind::Income,
                Category::Salary,
                1000.0,
                date!(2023 - 10 - 01),
            ),
            transaction(
                TransactionKind::Income,
                Category::Freelance,
                2500.0,
                date!(2023 - 11 - 10),
            ),
            transaction(
                TransactionKind::Expense,
                Category::Food,
                300.0,
                date!(2023 - 12 - 05),
            ),
        ];

        let findings = findings(&transactions);

        assert_eq!(
            findings.best_month,
            Some(BestMonth {
                month: date!(2023 - 11 - 01),
                income: 2500.0
            })
        );
    }

    #[test]
    fn best_month_is_none_without_income() {
        let transactions = vec![transaction(
            TransactionKind::Expense,
            Category::Food,
            300.0,
            date!(2023 - 11 - 05),
        )];

        assert_eq!(findings(&transactions).best_month, None);
    }
}
