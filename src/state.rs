// src/state.rs
use std::sync::Arc;

use crate::ledger::LedgerSettings;
use crate::repository::{Document, Repository};
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub ledger: LedgerSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, ledger: LedgerSettings) -> Self {
        Self { store, ledger }
    }

    pub fn repo<T: Document>(&self) -> Repository<'_, T> {
        Repository::new(self.store.as_ref())
    }
}
