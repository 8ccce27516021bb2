use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::{InputError, open_maybe_gz};

/// Experiment configuration shared with the training side. Only the fields
/// scoring needs are read; everything else in the file is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub window: usize,
    pub horizon: usize,
    pub state_names: Vec<String>,
}

pub fn load_run_config(path: &Path) -> Result<RunConfig, InputError> {
    let reader = open_maybe_gz(path)?;
    let config: RunConfig = serde_json::from_reader(reader)?;
    if config.state_names.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "{}: state_names is empty",
            path.display()
        )));
    }
    tracing::debug!(
        window = config.window,
        horizon = config.horizon,
        states = config.state_names.len(),
        "loaded run configuration"
    );
    Ok(config)
}
