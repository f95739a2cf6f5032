use thiserror::Error;

/// Validation errors raised while parsing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("api key cannot be empty")]
    EmptyApiKey,

    #[error("invalid chart period '{value}', expected one of 1W, 1M, 3M, 6M, 1Y")]
    InvalidPeriod { value: String },
    #[error("invalid language '{value}', expected one of ja, en")]
    InvalidLanguage { value: String },
    #[error("invalid theme '{value}', expected one of light, dark")]
    InvalidTheme { value: String },

    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
}

/// Errors raised by a [`PreferenceStore`](crate::PreferenceStore) backend.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference file is not a JSON object of strings: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("preference store lock is poisoned")]
    Poisoned,
}
