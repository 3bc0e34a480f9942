use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Duplicate course code '{code}' in '{department}' (first declared in '{first_department}')")]
    DuplicateCode {
        code: String,
        department: String,
        first_department: String,
    },

    #[error("Duplicate department '{name}'")]
    DuplicateDepartment { name: String },

    #[error("Unknown course code '{code}'")]
    UnknownCode { code: String },

    #[error("Unknown department '{name}'")]
    UnknownDepartment { name: String },

    #[error("Malformed course code '{code}': {reason}")]
    MalformedCode { code: String, reason: String },

    #[error("Invalid level band '{value}' (expected one of 100-200, 300-400, ..., 1300-1400)")]
    InvalidLevelBand { value: String },

    #[error("Invalid sort key '{value}'")]
    InvalidSortKey { value: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Configuration,
    Export,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::ZipError(_)
            | CatalogError::CsvError(_)
            | CatalogError::SerializationError(_) => ErrorCategory::Export,
            CatalogError::IoError(_) => ErrorCategory::Io,
            CatalogError::TomlError(_)
            | CatalogError::InvalidLevelBand { .. }
            | CatalogError::InvalidSortKey { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CatalogError::DuplicateCode { .. }
            | CatalogError::DuplicateDepartment { .. }
            | CatalogError::UnknownCode { .. }
            | CatalogError::UnknownDepartment { .. }
            | CatalogError::MalformedCode { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Data-quality issues degrade by omission.
            CatalogError::UnknownCode { .. } | CatalogError::MalformedCode { .. } => {
                ErrorSeverity::Low
            }
            CatalogError::UnknownDepartment { .. } => ErrorSeverity::Medium,
            CatalogError::DuplicateCode { .. }
            | CatalogError::DuplicateDepartment { .. }
            | CatalogError::TomlError(_)
            | CatalogError::InvalidLevelBand { .. }
            | CatalogError::InvalidSortKey { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::CsvError(_)
            | CatalogError::SerializationError(_)
            | CatalogError::ZipError(_) => ErrorSeverity::High,
            CatalogError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CatalogError::DuplicateCode { code, .. } => {
                format!("Give course '{}' a unique code in the catalog file", code)
            }
            CatalogError::DuplicateDepartment { name } => {
                format!("Merge or rename the repeated department '{}'", name)
            }
            CatalogError::UnknownCode { .. } => {
                "Pick course codes from the catalog's picker options".to_string()
            }
            CatalogError::UnknownDepartment { .. } => {
                "Use a department name exactly as listed in the catalog".to_string()
            }
            CatalogError::MalformedCode { .. } => {
                "Course codes must be letters followed by digits, e.g. AE101".to_string()
            }
            CatalogError::InvalidLevelBand { .. } => {
                "Use level bands such as \"100-200\" or \"1300-1400\"".to_string()
            }
            CatalogError::InvalidSortKey { .. } => {
                "Use one of code-asc, code-desc, name-asc, name-desc".to_string()
            }
            CatalogError::TomlError(_)
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. } => {
                "Check the session file against the documented sections".to_string()
            }
            CatalogError::IoError(_) => {
                "Check that the path exists and is writable".to_string()
            }
            CatalogError::CsvError(_)
            | CatalogError::SerializationError(_)
            | CatalogError::ZipError(_) => "Retry the export; if it persists, report a bug".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Data => format!("Catalog data problem: {}", self),
            ErrorCategory::Configuration => format!("Session configuration problem: {}", self),
            ErrorCategory::Export => format!("Export failed: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
