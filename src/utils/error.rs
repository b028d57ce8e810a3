use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Inventory file not found: {path}")]
    NotFound { path: String },

    #[error("Invalid JSON format in {path}: {message}")]
    MalformedJson { path: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl InventoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Short message suitable for printing to a terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not access a file: {}", e),
            Self::SerializationError(e) => format!("Could not encode inventory data: {}", e),
            Self::NotFound { path } => format!("No inventory file at {}", path),
            Self::MalformedJson { path, .. } => format!("{} is not a valid inventory file", path),
            Self::ValidationError { message } => format!("Invalid input: {}", message),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the path exists and is readable/writable",
            Self::SerializationError(_) => "Make sure every quantity is a finite number",
            Self::NotFound { .. } => "Run a mutating command or `demo` to create the file",
            Self::MalformedJson { .. } => {
                "The file must hold a single JSON object of item names to numbers"
            }
            Self::ValidationError { .. } => {
                "Use a non-empty item name and a finite numeric quantity"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the TOML config file and command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
