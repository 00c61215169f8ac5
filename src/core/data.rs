//! Shared RON loading for the files under `assets/data/`.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

/// Read and parse a RON file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataLoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    parse_ron(&display, &contents)
}

/// Parse RON text, tagging errors with `origin` for the log.
pub fn parse_ron<T: DeserializeOwned>(origin: &str, contents: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: origin.to_string(),
        details: e.to_string(),
    })
}

/// Load a RON file, logging and falling back to `T::default()` on any failure.
///
/// A missing file is expected during development and only warns.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &str) -> T {
    match load_ron(path) {
        Ok(value) => {
            bevy::log::info!("Loaded {}", path);
            value
        }
        Err(e @ DataLoadError::FileNotFound(_)) => {
            bevy::log::warn!("{}. Using defaults.", e);
            T::default()
        }
        Err(e) => {
            bevy::log::error!("{}. Using defaults.", e);
            T::default()
        }
    }
}
