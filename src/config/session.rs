use crate::core::browser::BrowseRequest;
use crate::core::catalog::CatalogStore;
use crate::core::level::LevelBand;
use crate::core::query::{FilterSpec, SortKey};
use crate::core::ExportSettings;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CSV_FILE: &str = "TITS_Selected_Courses.csv";
pub const DEFAULT_DOCUMENT_FILE: &str = "TITS_Curriculum.txt";
pub const DEFAULT_BUNDLE_FILE: &str = "TITS_Export.zip";

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// One browsing interaction: which catalog, which filters, which courses
/// are chosen and what gets exported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub catalog: CatalogSource,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSource {
    /// TOML catalog file; the bundled curriculum is used when absent.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Defaults to the first department of the catalog.
    pub department: Option<String>,
    #[serde(default)]
    pub search: String,
    #[serde(default = "all_level_bands")]
    pub levels: Vec<LevelBand>,
    #[serde(default)]
    pub sort: SortKey,
    /// List the department unfiltered when no search term is given.
    #[serde(default)]
    pub show_all: bool,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            department: None,
            search: String::new(),
            levels: all_level_bands(),
            sort: SortKey::default(),
            show_all: false,
        }
    }
}

fn all_level_bands() -> Vec<LevelBand> {
    LevelBand::ALL.to_vec()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Course codes or picker labels (`AE101: Intro to Rocket Design (...)`).
    #[serde(default)]
    pub codes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default)]
    pub csv: bool,
    #[serde(default)]
    pub document: bool,
    #[serde(default)]
    pub bundle: bool,
    #[serde(default = "default_csv_file")]
    pub csv_file: String,
    #[serde(default = "default_document_file")]
    pub document_file: String,
    #[serde(default = "default_bundle_file")]
    pub bundle_file: String,
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            csv: false,
            document: false,
            bundle: false,
            csv_file: default_csv_file(),
            document_file: default_document_file(),
            bundle_file: default_bundle_file(),
            lines_per_page: default_lines_per_page(),
        }
    }
}

fn default_output_path() -> String {
    "./exports".to_string()
}

fn default_csv_file() -> String {
    DEFAULT_CSV_FILE.to_string()
}

fn default_document_file() -> String {
    DEFAULT_DOCUMENT_FILE.to_string()
}

fn default_bundle_file() -> String {
    DEFAULT_BUNDLE_FILE.to_string()
}

fn default_lines_per_page() -> usize {
    crate::adapters::document::DEFAULT_LINES_PER_PAGE
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl SessionConfig {
    /// Loads a session file, substituting `${VAR}` references first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn load_catalog(&self) -> Result<CatalogStore> {
        match &self.catalog.path {
            Some(path) => CatalogStore::from_file(path),
            None => CatalogStore::bundled(),
        }
    }

    /// The department picked in the sidebar, falling back to the first one.
    pub fn department<'c>(&'c self, catalog: &'c CatalogStore) -> Result<&'c str> {
        match &self.filters.department {
            Some(name) => Ok(name.as_str()),
            None => catalog
                .departments()
                .first()
                .map(|d| d.name.as_str())
                .ok_or_else(|| CatalogError::MissingConfigError {
                    field: "filters.department".to_string(),
                }),
        }
    }

    pub fn filter_spec(&self, catalog: &CatalogStore) -> Result<FilterSpec> {
        let department = self.department(catalog)?;
        Ok(FilterSpec::for_sidebar(
            department,
            self.filters.search.clone(),
            self.filters.levels.iter().copied(),
            self.filters.sort,
        ))
    }

    pub fn any_export(&self) -> bool {
        self.export.csv || self.export.document || self.export.bundle
    }

    pub fn browse_request(&self, catalog: &CatalogStore) -> Result<BrowseRequest> {
        Ok(BrowseRequest {
            spec: self.filter_spec(catalog)?,
            show_all: self.filters.show_all,
            chosen: self.selection.codes.clone(),
        })
    }
}

impl ExportSettings for SessionConfig {
    fn wants_csv(&self) -> bool {
        self.export.csv
    }

    fn wants_document(&self) -> bool {
        self.export.document
    }

    fn wants_bundle(&self) -> bool {
        self.export.bundle
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn csv_file_name(&self) -> &str {
        &self.export.csv_file
    }

    fn document_file_name(&self) -> &str {
        &self.export.document_file
    }

    fn bundle_file_name(&self) -> &str {
        &self.export.bundle_file
    }

    fn lines_per_page(&self) -> usize {
        self.export.lines_per_page
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.catalog.path {
            validation::validate_path("catalog.path", path)?;
        }

        if let Some(department) = &self.filters.department {
            validation::validate_non_empty_string("filters.department", department)?;
        }

        if self.any_export() {
            validation::validate_path("export.output_path", &self.export.output_path)?;
        }
        validation::validate_file_name("export.csv_file", &self.export.csv_file, &["csv"])?;
        validation::validate_file_name(
            "export.document_file",
            &self.export.document_file,
            &["txt"],
        )?;
        validation::validate_file_name("export.bundle_file", &self.export.bundle_file, &["zip"])?;
        validation::validate_range(
            "export.lines_per_page",
            self.export.lines_per_page,
            crate::adapters::document::MIN_LINES_PER_PAGE,
            10_000,
        )?;

        Ok(())
    }
}
