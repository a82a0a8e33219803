use crate::processing::ProcessingError;

/// Error type for picker configuration and session handling
///
/// User-facing results (cancel, deny, no sources) are never errors; they are
/// reported through [`crate::Outcome`].
#[derive(Debug)]
pub enum PickerError {
    /// Configuration values that cannot be used (e.g. zero resize bounds)
    InvalidConfig(String),
    /// An event arrived that the session cannot accept in its current state
    InvalidState(String),
    /// The session was torn down before it produced an outcome
    SessionAbandoned,
    Processing(ProcessingError),
    Json(serde_json::Error),
    Toml(toml::de::Error),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            PickerError::InvalidState(msg) => write!(f, "Invalid session state: {}", msg),
            PickerError::SessionAbandoned => {
                write!(f, "Session was dismissed before producing an outcome")
            }
            PickerError::Processing(e) => write!(f, "Processing error: {}", e),
            PickerError::Json(e) => write!(f, "JSON error: {}", e),
            PickerError::Toml(e) => write!(f, "TOML error: {}", e),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<ProcessingError> for PickerError {
    fn from(err: ProcessingError) -> Self {
        PickerError::Processing(err)
    }
}

impl From<serde_json::Error> for PickerError {
    fn from(err: serde_json::Error) -> Self {
        PickerError::Json(err)
    }
}

impl From<toml::de::Error> for PickerError {
    fn from(err: toml::de::Error) -> Self {
        PickerError::Toml(err)
    }
}
