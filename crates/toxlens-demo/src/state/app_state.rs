use crate::models::PredictionRecord;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use toxlens_explain::ArtifactBundle;
use toxlens_resolver::SmilesResolver;

const MAX_PREDICTION_HISTORY: usize = 200;

/// Shared application state.
///
/// The engine and resolver are loaded/built once and read-only; only the
/// prediction history mutates after startup.
#[derive(Clone)]
pub struct AppState {
    /// Loaded prediction artifacts
    pub engine: Arc<ArtifactBundle>,

    /// Name-resolution chain
    pub resolver: Arc<dyn SmilesResolver>,

    /// Recent predictions for the UI's history panel
    pub history: Arc<RwLock<VecDeque<PredictionRecord>>>,
}

impl AppState {
    pub fn new(engine: Arc<ArtifactBundle>, resolver: Arc<dyn SmilesResolver>) -> Self {
        Self {
            engine,
            resolver,
            history: Arc::new(RwLock::new(VecDeque::with_capacity(MAX_PREDICTION_HISTORY))),
        }
    }

    /// Add a prediction record to the bounded history
    pub fn add_record(&self, record: PredictionRecord) {
        let mut history = self.history.write();
        history.push_front(record);
        if history.len() > MAX_PREDICTION_HISTORY {
            history.pop_back();
        }
    }

    /// Most recent prediction records, newest first
    pub fn recent_records(&self, limit: usize) -> Vec<PredictionRecord> {
        let history = self.history.read();
        history.iter().take(limit).cloned().collect()
    }
}
