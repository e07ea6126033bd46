//! File format detection and (de)serialization helpers.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// On-disk encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") | Some("geojson") => Ok(FileFormat::Json),
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            _ => Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

pub(crate) fn read_file<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let parsed = match format {
        FileFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| AppError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

pub(crate) fn write_file<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let content = match FileFormat::from_path(path)? {
        FileFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        FileFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    }
    .map_err(AppError::Serialize)?;

    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
