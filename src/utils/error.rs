use crate::parser::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input '{path}' is not valid UTF-8: {message}")]
    EncodingError { path: String, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ParseError(_) | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::EncodingError { .. } => ErrorCategory::Input,
            EtlError::IoError(_) => ErrorCategory::Input,
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::ZipError(_) | EtlError::CsvError(_) | EtlError::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 設定錯誤：修正後即可重跑
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorSeverity::Medium,
            EtlError::ParseError(_)
            | EtlError::EncodingError { .. }
            | EtlError::ProcessingError { .. } => ErrorSeverity::High,
            EtlError::IoError(_)
            | EtlError::ZipError(_)
            | EtlError::CsvError(_)
            | EtlError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ParseError(err) => match err.line() {
                Some(line) => format!("Fix line {} of the source file and run again", line),
                None => match err.rank() {
                    Some(rank) => format!("Check the fields of entry {} in the source file", rank),
                    None => "Check the source file format".to_string(),
                },
            },
            EtlError::EncodingError { .. } => {
                "Re-save the source file as UTF-8".to_string()
            }
            EtlError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            EtlError::ConfigValidationError { field, .. }
            | EtlError::InvalidConfigValueError { field, .. }
            | EtlError::MissingConfigError { field } => {
                format!("Review the '{}' setting", field)
            }
            EtlError::ZipError(_) | EtlError::CsvError(_) | EtlError::SerializationError(_) => {
                "Check free disk space and try a different output format".to_string()
            }
            EtlError::ProcessingError { .. } => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ParseError(err) => format!("The lexicon file could not be parsed ({})", err),
            EtlError::EncodingError { path, .. } => {
                format!("The file '{}' is not UTF-8 text", path)
            }
            EtlError::IoError(err) => format!("A file could not be read or written ({})", err),
            EtlError::ConfigValidationError { field, message } => {
                format!("Invalid configuration for {}: {}", field, message)
            }
            EtlError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid {}: {}", value, field, reason)
            }
            EtlError::MissingConfigError { field } => {
                format!("The setting '{}' is required", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
