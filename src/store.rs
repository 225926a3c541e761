//! The transaction store: an in-memory list mirrored to a JSON snapshot file.
//!
//! The store is the sole source of truth for the application. Every
//! mutation synchronously rewrites the snapshot file with the full
//! serialized transaction list, and the file is reloaded at process start.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    Error,
    transaction::{Transaction, TransactionDraft, TransactionFilter, TransactionId},
};

/// The authoritative collection of transactions.
///
/// Mutations persist the whole store before returning, so the snapshot file
/// always reflects the in-memory state. The store itself is not thread-safe;
/// the application shares it behind a mutex in [crate::AppState].
#[derive(Debug)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    snapshot_path: PathBuf,
}

impl TransactionStore {
    /// Load the store from the snapshot file at `snapshot_path`.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first mutation.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Storage] if the snapshot file exists but cannot be read,
    /// - or [Error::Serialization] if its contents are not a valid transaction list.
    pub fn load(snapshot_path: impl Into<PathBuf>) -> Result<Self, Error> {
        let snapshot_path = snapshot_path.into();

        let transactions: Vec<Transaction> = match fs::read_to_string(&snapshot_path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|error| Error::Serialization(error.to_string()))?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(error) => return Err(Error::Storage(error.to_string())),
        };

        let next_id = transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .unwrap_or(0)
            + 1;

        Ok(Self {
            transactions,
            next_id,
            snapshot_path,
        })
    }

    /// Add a transaction to the store, assigning it the next free id.
    ///
    /// The store is persisted before the stored transaction is returned.
    ///
    /// # Errors
    /// Returns an error if the snapshot file cannot be written.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, Error> {
        let transaction = draft.finalize(self.next_id);
        self.next_id += 1;
        self.transactions.push(transaction.clone());
        self.persist()?;

        Ok(transaction)
    }

    /// Add several transactions in one pass, persisting once at the end.
    ///
    /// Used by the CSV import, where the whole file has already been
    /// validated and should be applied as a unit.
    ///
    /// # Errors
    /// Returns an error if the snapshot file cannot be written.
    pub fn add_all(&mut self, drafts: Vec<TransactionDraft>) -> Result<usize, Error> {
        let count = drafts.len();

        for draft in drafts {
            let transaction = draft.finalize(self.next_id);
            self.next_id += 1;
            self.transactions.push(transaction);
        }

        if count > 0 {
            self.persist()?;
        }

        Ok(count)
    }

    /// Remove the transaction with the given `id`, if it exists.
    ///
    /// Removing an id that is not in the store is a no-op: the store is
    /// unchanged and no error is returned.
    ///
    /// # Errors
    /// Returns an error if the snapshot file cannot be written.
    pub fn remove(&mut self, id: TransactionId) -> Result<usize, Error> {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);
        let removed = count_before - self.transactions.len();

        if removed > 0 {
            self.persist()?;
        }

        Ok(removed)
    }

    /// Return the transactions matching `filter`, sorted by date descending.
    ///
    /// The sort is stable, so transactions on the same date keep their
    /// original relative order.
    pub fn list(&self, filter: TransactionFilter) -> Vec<Transaction> {
        let mut matches: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|transaction| filter.matches(transaction))
            .cloned()
            .collect();

        matches.sort_by(|a, b| b.date.cmp(&a.date));

        matches
    }

    /// All transactions in insertion order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions in the store.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the store holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The path of the snapshot file backing this store.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    fn persist(&self) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(&self.transactions)
            .map_err(|error| Error::Serialization(error.to_string()))?;

        fs::write(&self.snapshot_path, json).map_err(|error| {
            tracing::error!(
                "Could not write snapshot {}: {error}",
                self.snapshot_path.display()
            );
            Error::Storage(error.to_string())
        })
    }
}
