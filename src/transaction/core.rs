//! Defines the core transaction data model.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Identifier assigned to a transaction by the store.
///
/// Ids are unique within a store and increase monotonically; they are only
/// used to look transactions up for deletion.
pub type TransactionId = i64;

/// Whether a transaction brings money in or takes money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. a salary payment.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The label shown in tables and spreadsheet exports.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    /// The wire value used in forms, JSON, and CSV files.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    /// Parse a kind from its wire value or display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

/// The fixed set of categories a transaction can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Category {
    Salary,
    Freelance,
    Investment,
    Food,
    Transport,
    Entertainment,
    Shopping,
}

impl Category {
    /// Every category, in the order they appear in forms.
    pub const ALL: [Category; 7] = [
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
    ];

    /// The label shown in tables, charts, and spreadsheet exports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investment => "Investment",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
        }
    }

    /// The wire value used in forms, JSON, and CSV files.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a category from its wire value or display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();

        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == lowered)
            .ok_or_else(|| Error::InvalidCategory(s.to_string()))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::draft] and pass the
/// draft to [crate::TransactionStore::add], which assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The category the transaction belongs to.
    pub category: Category,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
}

impl Transaction {
    /// Validate the parts of a new transaction, producing a draft that the
    /// store can finalize with an id.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if `amount` is zero or negative,
    /// - or [Error::EmptyDescription] if `description` is empty after trimming.
    pub fn draft(
        kind: TransactionKind,
        category: Category,
        amount: f64,
        date: Date,
        description: &str,
    ) -> Result<TransactionDraft, Error> {
        if amount <= 0.0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        Ok(TransactionDraft {
            kind,
            category,
            amount,
            date,
            description: description.to_owned(),
        })
    }
}

/// A validated transaction that has not been given an id yet.
///
/// Drafts can only be created through [Transaction::draft], so every draft
/// carries a positive amount and a non-empty description.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    kind: TransactionKind,
    category: Category,
    amount: f64,
    date: Date,
    description: String,
}

impl TransactionDraft {
    /// Turn the draft into a stored transaction with the given `id`.
    pub(crate) fn finalize(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self.date,
        }
    }
}

/// Which transactions [crate::TransactionStore::list] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionFilter {
    /// Return every transaction.
    #[default]
    All,
    /// Return only income transactions.
    Income,
    /// Return only expense transactions.
    Expense,
}

impl TransactionFilter {
    /// Every filter, in the order they appear in the filter select.
    pub const ALL_FILTERS: [TransactionFilter; 3] = [
        TransactionFilter::All,
        TransactionFilter::Income,
        TransactionFilter::Expense,
    ];

    /// Whether `transaction` passes the filter.
    pub fn matches(self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Income => transaction.kind == TransactionKind::Income,
            TransactionFilter::Expense => transaction.kind == TransactionKind::Expense,
        }
    }

    /// The label shown in the filter select.
    pub fn label(self) -> &'static str {
        match self {
            TransactionFilter::All => "All transactions",
            TransactionFilter::Income => "Income only",
            TransactionFilter::Expense => "Expenses only",
        }
    }

    /// The wire value used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionFilter::All => "all",
            TransactionFilter::Income => "income",
            TransactionFilter::Expense => "expense",
        }
    }
}

#[cfg(test)]
mod model_tests {
    use std::str::FromStr;

    use time::macros::date;

    use crate::Error;

    use super::{Category, Transaction, TransactionFilter, TransactionKind};

    #[test]
    fn draft_succeeds_with_valid_fields() {
        let draft = Transaction::draft(
            TransactionKind::Expense,
            Category::Food,
            12.3,
            date!(2023 - 11 - 05),
            "Lunch",
        )
        .expect("draft should be valid");

        let transaction = draft.finalize(1);

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.description, "Lunch");
    }

    #[test]
    fn draft_rejects_non_positive_amount() {
        for amount in [0.0, -5.0] {
            let result = Transaction::draft(
                TransactionKind::Expense,
                Category::Food,
                amount,
                date!(2023 - 11 - 05),
                "Lunch",
            );

            assert_eq!(result, Err(Error::NonPositiveAmount(amount)));
        }
    }

    #[test]
    fn draft_rejects_blank_description() {
        let result = Transaction::draft(
            TransactionKind::Income,
            Category::Salary,
            1000.0,
            date!(2023 - 11 - 01),
            "   ",
        );

        assert_eq!(result, Err(Error::EmptyDescription));
    }

    #[test]
    fn draft_trims_description() {
        let transaction = Transaction::draft(
            TransactionKind::Income,
            Category::Salary,
            1000.0,
            date!(2023 - 11 - 01),
            "  October pay  ",
        )
        .unwrap()
        .finalize(1);

        assert_eq!(transaction.description, "October pay");
    }

    #[test]
    fn kind_parses_wire_values_and_labels() {
        assert_eq!(
            TransactionKind::from_str("income"),
            Ok(TransactionKind::Income)
        );
        assert_eq!(
            TransactionKind::from_str("Expense"),
            Ok(TransactionKind::Expense)
        );
        assert_eq!(
            TransactionKind::from_str("transfer"),
            Err(Error::InvalidKind("transfer".to_string()))
        );
    }

    #[test]
    fn category_parses_wire_values_and_labels() {
        assert_eq!(Category::from_str("food"), Ok(Category::Food));
        assert_eq!(Category::from_str("Entertainment"), Ok(Category::Entertainment));
        assert_eq!(
            Category::from_str("rent"),
            Err(Error::InvalidCategory("rent".to_string()))
        );
    }

    #[test]
    fn transaction_serializes_with_original_field_names() {
        let transaction = Transaction::draft(
            TransactionKind::Income,
            Category::Freelance,
            15000.0,
            date!(2023 - 11 - 10),
            "Web development project",
        )
        .unwrap()
        .finalize(42);

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["id"], 42);
        assert_eq!(json["type"], "income");
        assert_eq!(json["category"], "freelance");
        assert_eq!(json["amount"], 15000.0);
        assert_eq!(json["date"], "2023-11-10");
    }

    #[test]
    fn filter_matches_by_kind() {
        let income = Transaction::draft(
            TransactionKind::Income,
            Category::Salary,
            1000.0,
            date!(2023 - 11 - 01),
            "Pay",
        )
        .unwrap()
        .finalize(1);

        assert!(TransactionFilter::All.matches(&income));
        assert!(TransactionFilter::Income.matches(&income));
        assert!(!TransactionFilter::Expense.matches(&income));
    }
}
