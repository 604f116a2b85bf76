use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Page request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Link not found: {context}")]
    LinkNotFoundError { context: String },

    #[error("{path} is not a zip file")]
    NotAnArchiveError { path: String },

    #[error("Expected exactly one record file matching \"{fragment}\", found {count}")]
    AmbiguousRecordFileError { fragment: String, count: usize },

    #[error("Encountered a problem getting {path}")]
    DownloadIntegrityError { path: String },

    #[error("Invalid value for {field}: \"{value}\" ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl ExportError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ExportError::HttpError(_) => {
                "Could not reach the code publisher's website".to_string()
            }
            ExportError::LinkNotFoundError { context } => {
                format!("The website markup did not contain the expected link ({context})")
            }
            ExportError::NotAnArchiveError { path } => {
                format!("{path} is not a valid zip archive")
            }
            ExportError::AmbiguousRecordFileError { fragment, count } => {
                format!("Found {count} order files matching \"{fragment}\" instead of one")
            }
            ExportError::DownloadIntegrityError { path } => {
                format!("The downloaded archive {path} failed validation")
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExportError::HttpError(_) => "Check your network connection and retry",
            ExportError::LinkNotFoundError { .. } => {
                "The site layout may have changed; verify the page in a browser"
            }
            ExportError::NotAnArchiveError { .. } | ExportError::DownloadIntegrityError { .. } => {
                "Delete the downloaded file and run the export again"
            }
            ExportError::AmbiguousRecordFileError { .. } => {
                "Inspect the downloaded archive and adjust --record-file-prefix"
            }
            ExportError::InvalidConfigValueError { .. } | ExportError::MissingConfigError { .. } => {
                "Run with --help to see the expected configuration values"
            }
            _ => "Check the log output for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
