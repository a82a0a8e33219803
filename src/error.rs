use media_picker::PickerError;
use std::fmt;

/// Central error types for the capture app
#[derive(Debug)]
pub enum AppError {
    /// Picker configuration or session error
    Picker(PickerError),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Settings file could not be parsed
    Config(String),
    /// No native picker on this platform
    PlatformNotSupported(String),
    /// General error
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Picker(e) => write!(f, "Picker error: {}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<PickerError> for AppError {
    fn from(e: PickerError) -> Self {
        AppError::Picker(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(e: toml::ser::Error) -> Self {
        AppError::Other(format!("Metadata serialization failed: {}", e))
    }
}

/// User-friendly error messages for UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Picker(PickerError::InvalidConfig(msg)) => {
                format!("The picker settings are invalid: {}", msg)
            }
            AppError::Picker(_) => "The picker could not be opened. Please try again.".to_string(),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Config(msg) => format!("Settings file is invalid: {}", msg),
            AppError::PlatformNotSupported(msg) => msg.clone(),
            AppError::Other(msg) => msg.clone(),
        }
    }
}
