use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The service answered with an error payload
    #[error("FatSecret API error {code}: {message}")]
    ApiError { code: i64, message: String },
    /// The service answered with a payload we cannot interpret
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// Authorizing the user against the service failed
    #[error("Authentication failed: {0}")]
    AuthError(String),
    /// Config file missing, unreadable or incomplete
    #[error("Config error: {0}")]
    ConfigError(String),
    /// Data kind argument is not one of food, exercise or weight
    #[error("{0} is not a valid data type.")]
    InvalidDataKind(String),
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// CSV serialization failed
    #[error("CSV error: {0}")]
    CsvError(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ConfigError(format!("invalid api_url: {err}"))
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
