use std::collections::HashMap;
use std::fs;

use advisor_calc_core::settings::{CalculatorId, DefaultParams, SettingsStore};

/// Settings store backed by a JSON file of the form
/// `{ "loan_repayment": { "interest_rate": 6.5, "disclaimer": "..." }, ... }`.
///
/// A missing or malformed file yields an empty store: every lookup then
/// falls through to the built-in defaults, and the calculation proceeds.
pub struct FileSettings {
    entries: HashMap<String, DefaultParams>,
}

impl FileSettings {
    pub fn load(path: &str) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("ignoring settings file '{}': {}", path, e);
                    HashMap::new()
                }
            },
            Err(e) => {
                log::warn!("could not read settings file '{}': {}", path, e);
                HashMap::new()
            }
        };
        FileSettings { entries }
    }
}

impl SettingsStore for FileSettings {
    fn defaults(&self, id: CalculatorId) -> Option<DefaultParams> {
        self.entries.get(id.as_key()).cloned()
    }
}
