//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, kinds, categories, and validated drafts
//! - The JSON API endpoints over the transaction store
//! - View handlers for the transaction pages

mod api;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod new_transaction_page;
mod transactions_page;

pub use core::{
    Category, Transaction, TransactionDraft, TransactionFilter, TransactionId, TransactionKind,
};

pub(crate) use api::{create_transaction_api, delete_transaction_api, get_transactions_api};
pub(crate) use create_endpoint::create_transaction_endpoint;
pub(crate) use delete_endpoint::delete_transaction_endpoint;
pub(crate) use new_transaction_page::get_new_transaction_page;
pub(crate) use transactions_page::get_transactions_page;
