use thiserror::Error;

/// Errors from reading an engine settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid attribute id for '{field}': {value}")]
    InvalidAttr { field: &'static str, value: i32 },
}
