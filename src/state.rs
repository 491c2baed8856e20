use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::data::dashboard::Dashboard;
use crate::data::loader::{load_dataset, LoadOptions};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Aggregates of the loaded dataset (None until a file is loaded).
    /// Never mutated after construction; a new load replaces it.
    pub dashboard: Option<Arc<Dashboard>>,

    /// Currently selected relative compactness.
    pub selected_compactness: Option<f64>,

    /// Options used when opening files from the UI.
    pub load_options: LoadOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(load_options: LoadOptions) -> Self {
        Self {
            dashboard: None,
            selected_compactness: None,
            load_options,
            status_message: None,
        }
    }

    /// Run the aggregation engine over a newly loaded dataset and reset
    /// the selection to its default.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let dashboard = Dashboard::build(dataset);
        self.selected_compactness = dashboard.default_compactness();
        self.dashboard = Some(Arc::new(dashboard));
        self.status_message = None;
    }

    /// Load a file and install it.  On failure the previous dataset stays.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let dataset = load_dataset(path, &self.load_options)
            .with_context(|| format!("loading {}", path.display()))?;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Change the compactness selection.  Values not in the dataset are
    /// accepted; the charts then show the no-data message.
    pub fn select_compactness(&mut self, value: f64) {
        self.selected_compactness = Some(value);
    }
}
