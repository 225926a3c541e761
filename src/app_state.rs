//! Implements a struct that holds the state of the server.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use crate::{
    Error,
    analysis::{AnalysisProvider, RuleBasedAnalysis},
    store::TransactionStore,
};

/// The state of the server.
///
/// The transaction store is the single source of truth for every route;
/// handlers borrow it through the mutex for the duration of a request.
#[derive(Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The transaction store.
    pub store: Arc<Mutex<TransactionStore>>,

    /// The analysis provider used by the dashboard.
    pub analysis: Arc<dyn AnalysisProvider>,
}

impl AppState {
    /// Create a new [AppState], loading the store from the snapshot file at
    /// `data_path`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland". The analysis provider defaults to
    /// [RuleBasedAnalysis]; use [AppState::with_analysis_provider] to swap
    /// it out.
    ///
    /// # Errors
    /// Returns an error if the snapshot file exists but cannot be loaded.
    pub fn new(data_path: impl Into<PathBuf>, local_timezone: &str) -> Result<Self, Error> {
        let store = TransactionStore::load(data_path)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            store: Arc::new(Mutex::new(store)),
            analysis: Arc::new(RuleBasedAnalysis),
        })
    }

    /// Replace the analysis provider used by the dashboard.
    pub fn with_analysis_provider(mut self, provider: Arc<dyn AnalysisProvider>) -> Self {
        self.analysis = provider;
        self
    }
}
