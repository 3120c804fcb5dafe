use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};

/// Resolve a command's typed input: `--input <file.json>` wins, then piped
/// stdin JSON, then `build_from_flags` over the individual flags.
pub fn resolve<T, F>(
    input_path: Option<&str>,
    build_from_flags: F,
) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    if let Some(path) = input_path {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
        let parsed = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path, e))?;
        return Ok(parsed);
    }

    if let Some(piped) = read_stdin()? {
        return Ok(serde_json::from_value(piped)?);
    }

    build_from_flags()
}

/// Read JSON from stdin when data is piped; None on a TTY or empty pipe.
fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(trimmed)?))
}
