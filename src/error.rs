use std::fmt;

/// Errors produced while reading, analysing or uploading SkyView logs
#[derive(Debug)]
pub enum SkyviewError {
    /// I/O errors
    Io(std::io::Error),
    /// CSV decoding or encoding errors
    Csv(csv::Error),
    /// Header row is missing the `Session Time` column
    InvalidHeader(String),
    /// Session counter on a timestamped row is not a number
    InvalidCounter { line: u64, value: String },
    /// Timestamp is neither `YYYY-MM-DD` nor `YYYY-MM-DD HH:MM:SS`
    InvalidTimestamp(String),
    /// Login to the analysis service failed
    Auth(String),
    /// File submission to the analysis service failed
    Upload(String),
    /// Transport-level HTTP errors
    #[cfg(feature = "upload")]
    Http(reqwest::Error),
    /// JSON encoding errors
    #[cfg(feature = "json")]
    Json(serde_json::Error),
}

impl fmt::Display for SkyviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkyviewError::Io(err) => write!(f, "I/O error: {}", err),
            SkyviewError::Csv(err) => write!(f, "CSV error: {}", err),
            SkyviewError::InvalidHeader(msg) => write!(f, "Invalid header: {}", msg),
            SkyviewError::InvalidCounter { line, value } => {
                write!(f, "Invalid session counter '{}' on line {}", value, line)
            }
            SkyviewError::InvalidTimestamp(value) => write!(f, "Invalid timestamp: '{}'", value),
            SkyviewError::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            SkyviewError::Upload(msg) => write!(f, "Upload failed: {}", msg),
            #[cfg(feature = "upload")]
            SkyviewError::Http(err) => write!(f, "HTTP error: {}", err),
            #[cfg(feature = "json")]
            SkyviewError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for SkyviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SkyviewError::Io(err) => Some(err),
            SkyviewError::Csv(err) => Some(err),
            #[cfg(feature = "upload")]
            SkyviewError::Http(err) => Some(err),
            #[cfg(feature = "json")]
            SkyviewError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SkyviewError {
    fn from(err: std::io::Error) -> Self {
        SkyviewError::Io(err)
    }
}

impl From<csv::Error> for SkyviewError {
    fn from(err: csv::Error) -> Self {
        SkyviewError::Csv(err)
    }
}

#[cfg(feature = "upload")]
impl From<reqwest::Error> for SkyviewError {
    fn from(err: reqwest::Error) -> Self {
        SkyviewError::Http(err)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for SkyviewError {
    fn from(err: serde_json::Error) -> Self {
        SkyviewError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, SkyviewError>;
