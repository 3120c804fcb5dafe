use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use advisor_calc_core::usage::{UsageEvent, UsageSink};

/// Appends one JSON line per usage event. Failures are logged and dropped;
/// the sink never surfaces an error to the calculation path.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: &str) -> Self {
        JsonlSink { path: path.into() }
    }
}

impl UsageSink for JsonlSink {
    fn record(&self, event: UsageEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("could not serialize usage event: {}", e);
                return;
            }
        };
        let appended = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", line));
        if let Err(e) = appended {
            log::warn!("could not append usage event to '{}': {}", self.path.display(), e);
        }
    }
}
