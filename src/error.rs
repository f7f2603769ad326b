use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Startup and wiring failures. Request-time failures use [`ApiError`] and
/// [`InputFileError`] and are rendered inline instead of propagated.
#[derive(Error, Debug)]
pub enum Error {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

/// Failure of a single call to the prediction backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection refused, timeout, unreadable or malformed body.
    #[error("Error while calling backend API: {0}")]
    Transport(String),

    /// Any status other than 200. The body is kept verbatim.
    #[error("Backend returned status {status}")]
    Backend { status: u16, body: String },
}

impl ApiError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Builds a transport error from a reqwest failure, keeping the source chain
    /// so that "operation timed out" style causes are not lost.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let mut detail = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Transport(detail)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// An uploaded batch file that cannot be read as a table.
#[derive(Error, Debug)]
pub enum InputFileError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("Could not parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Upload could not be read: {0}")]
    Upload(String),

    #[error("Form field '{0}' is missing")]
    MissingField(&'static str),

    #[error("Staged data is corrupt: {0}")]
    Staged(#[from] base64::DecodeError),
}
