use crate::core::catalog::CatalogStore;
use crate::core::level::{CourseCode, LevelBand};
use crate::domain::model::CatalogEntry;
use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Which departments a query may return courses from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentScope {
    /// Search mode: every department is eligible.
    All,
    Only(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CodeAscending,
    CodeDescending,
    NameAscending,
    NameDescending,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CodeAscending => "code-asc",
            SortKey::CodeDescending => "code-desc",
            SortKey::NameAscending => "name-asc",
            SortKey::NameDescending => "name-desc",
        }
    }

    /// Label used by the sort selector.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::CodeAscending => "Code (Ascending)",
            SortKey::CodeDescending => "Code (Descending)",
            SortKey::NameAscending => "Name (A-Z)",
            SortKey::NameDescending => "Name (Z-A)",
        }
    }

    fn compare(self, a: &CatalogEntry<'_>, b: &CatalogEntry<'_>) -> Ordering {
        match self {
            SortKey::CodeAscending => a.course.code.cmp(&b.course.code),
            SortKey::CodeDescending => b.course.code.cmp(&a.course.code),
            SortKey::NameAscending => a.course.name.cmp(&b.course.name),
            SortKey::NameDescending => b.course.name.cmp(&a.course.name),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let key = match s.trim() {
            "code-asc" | "Code (Ascending)" => SortKey::CodeAscending,
            "code-desc" | "Code (Descending)" => SortKey::CodeDescending,
            "name-asc" | "Name (A-Z)" => SortKey::NameAscending,
            "name-desc" | "Name (Z-A)" => SortKey::NameDescending,
            _ => {
                return Err(CatalogError::InvalidSortKey {
                    value: s.to_string(),
                })
            }
        };
        Ok(key)
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Filter and sort settings for one query. Built fresh per interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub department: DepartmentScope,
    pub search_term: String,
    pub level_bands: BTreeSet<LevelBand>,
    pub sort_key: SortKey,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            department: DepartmentScope::All,
            search_term: String::new(),
            level_bands: LevelBand::ALL.into_iter().collect(),
            sort_key: SortKey::default(),
        }
    }
}

impl FilterSpec {
    /// Spec for the sidebar controls: typing a search term switches to
    /// search mode, otherwise only the selected department is shown.
    pub fn for_sidebar(
        department: impl Into<String>,
        search_term: impl Into<String>,
        level_bands: impl IntoIterator<Item = LevelBand>,
        sort_key: SortKey,
    ) -> Self {
        let search_term = search_term.into();
        let department = if search_term.is_empty() {
            DepartmentScope::Only(department.into())
        } else {
            DepartmentScope::All
        };
        Self {
            department,
            search_term,
            level_bands: level_bands.into_iter().collect(),
            sort_key,
        }
    }

    pub fn department(mut self, name: impl Into<String>) -> Self {
        self.department = DepartmentScope::Only(name.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn levels(mut self, bands: impl IntoIterator<Item = LevelBand>) -> Self {
        self.level_bands = bands.into_iter().collect();
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    pub fn is_search_mode(&self) -> bool {
        self.department == DepartmentScope::All
    }

    pub fn matches_level(&self, level: u32) -> bool {
        self.level_bands.iter().any(|band| band.contains(level))
    }

    /// Case-insensitive substring match on name, code and description.
    /// An empty term matches everything.
    pub fn matches_text(&self, entry: &CatalogEntry<'_>) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        let course = entry.course;
        course.name.to_lowercase().contains(&needle)
            || course.code.to_lowercase().contains(&needle)
            || course.description.to_lowercase().contains(&needle)
    }

    pub fn matches_department(&self, entry: &CatalogEntry<'_>) -> bool {
        match &self.department {
            DepartmentScope::All => true,
            DepartmentScope::Only(name) => entry.department == name,
        }
    }
}

/// Non-fatal data-quality findings collected while evaluating a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    MalformedCode {
        department: String,
        code: String,
        reason: String,
    },
    UnknownDepartment {
        name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedCode {
                department,
                code,
                reason,
            } => write!(f, "skipped '{}' in '{}': {}", code, department, reason),
            Diagnostic::UnknownDepartment { name } => {
                write!(f, "department '{}' is not in the catalog", name)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryOutcome<'a> {
    pub entries: Vec<CatalogEntry<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> QueryOutcome<'a> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<CatalogEntry<'a>> {
        self.entries
    }
}

/// Read-only query surface over a catalog.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    catalog: &'a CatalogStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a CatalogStore {
        self.catalog
    }

    pub fn query(&self, spec: &FilterSpec) -> Vec<CatalogEntry<'a>> {
        self.query_with_diagnostics(spec).into_entries()
    }

    pub fn query_with_diagnostics(&self, spec: &FilterSpec) -> QueryOutcome<'a> {
        let mut outcome = QueryOutcome::default();

        if let DepartmentScope::Only(name) = &spec.department {
            if self.catalog.department(name).is_err() {
                tracing::warn!("Query scoped to unknown department '{}'", name);
                outcome
                    .diagnostics
                    .push(Diagnostic::UnknownDepartment { name: name.clone() });
                return outcome;
            }
        }

        for entry in self.catalog.entries() {
            let level = match CourseCode::parse(entry.code()) {
                Ok(code) => code.level(),
                Err(e) => {
                    tracing::warn!("Excluding course from results: {}", e);
                    outcome.diagnostics.push(Diagnostic::MalformedCode {
                        department: entry.department.to_string(),
                        code: entry.code().to_string(),
                        reason: match e {
                            CatalogError::MalformedCode { reason, .. } => reason,
                            other => other.to_string(),
                        },
                    });
                    continue;
                }
            };

            if spec.matches_level(level)
                && spec.matches_text(&entry)
                && spec.matches_department(&entry)
            {
                outcome.entries.push(entry);
            }
        }

        // `sort_by` is stable
        outcome
            .entries
            .sort_by(|a, b| spec.sort_key.compare(a, b));

        tracing::debug!(
            "Query matched {} courses (scope: {:?}, term: {:?}, bands: {}, sort: {})",
            outcome.entries.len(),
            spec.department,
            spec.search_term,
            spec.level_bands.len(),
            spec.sort_key
        );

        outcome
    }

    /// Unfiltered listing of one department in declared order.
    pub fn browse_department(&self, name: &str) -> Result<Vec<CatalogEntry<'a>>> {
        let department = self.catalog.department(name)?;
        Ok(department
            .courses
            .iter()
            .map(|course| CatalogEntry::new(&department.name, course))
            .collect())
    }

    /// Every course as a picker label, in catalog order.
    pub fn picker_options(&self) -> Vec<String> {
        self.catalog.entries().map(|e| e.picker_label()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Course, Department, Prerequisite};

    fn course(code: &str, name: &str) -> Course {
        Course::new(code, name, format!("{} description", name), 3, Prerequisite::None)
    }

    fn small_catalog() -> CatalogStore {
        CatalogStore::from_departments(
            "Test",
            vec![
                Department::new(
                    "Alpha",
                    vec![
                        course("AL101", "Zeta Basics"),
                        course("AL202", "alpha Methods"),
                        course("AL1010", "Beta Theory"),
                        course("AL303X", "Broken Code"),
                    ],
                ),
                Department::new("Beta", vec![course("BE101", "Alpha Topics")]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_malformed_code_is_excluded_and_reported() {
        let catalog = small_catalog();
        let engine = QueryEngine::new(&catalog);

        let outcome = engine.query_with_diagnostics(&FilterSpec::default());
        let codes: Vec<&str> = outcome.entries.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["AL101", "AL1010", "AL202", "BE101"]);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(matches!(
            &outcome.diagnostics[0],
            Diagnostic::MalformedCode { code, .. } if code == "AL303X"
        ));
    }

    #[test]
    fn test_name_sort_is_case_sensitive() {
        let catalog = small_catalog();
        let engine = QueryEngine::new(&catalog);

        let spec = FilterSpec::default().sort_by(SortKey::NameAscending);
        let names: Vec<&str> = engine
            .query(&spec)
            .iter()
            .map(|e| e.course.name.as_str())
            .collect();
        // Uppercase sorts before lowercase.
        assert_eq!(names, vec!["Alpha Topics", "Beta Theory", "Zeta Basics", "alpha Methods"]);
    }

    #[test]
    fn test_text_match_is_case_insensitive_across_fields() {
        let catalog = small_catalog();
        let engine = QueryEngine::new(&catalog);

        let by_name = engine.query(&FilterSpec::default().search("ALPHA"));
        assert_eq!(by_name.len(), 2);

        let by_code = engine.query(&FilterSpec::default().search("be1"));
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code(), "BE101");

        let by_description = engine.query(&FilterSpec::default().search("theory DESCRIPTION"));
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].code(), "AL1010");
    }

    #[test]
    fn test_empty_band_set_matches_nothing() {
        let catalog = small_catalog();
        let engine = QueryEngine::new(&catalog);

        let spec = FilterSpec::default().levels([]);
        assert!(engine.query(&spec).is_empty());
    }

    #[test]
    fn test_unknown_department_yields_empty_outcome() {
        let catalog = small_catalog();
        let engine = QueryEngine::new(&catalog);

        let outcome = engine.query_with_diagnostics(&FilterSpec::default().department("Gamma"));
        assert!(outcome.is_empty());
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::UnknownDepartment {
                name: "Gamma".to_string()
            }]
        );
    }

    #[test]
    fn test_for_sidebar_switches_to_search_mode() {
        let spec = FilterSpec::for_sidebar("Alpha", "", LevelBand::ALL, SortKey::CodeAscending);
        assert_eq!(spec.department, DepartmentScope::Only("Alpha".to_string()));
        assert!(!spec.is_search_mode());

        let spec = FilterSpec::for_sidebar("Alpha", "zeta", LevelBand::ALL, SortKey::CodeAscending);
        assert!(spec.is_search_mode());
    }

    #[test]
    fn test_sort_key_labels() {
        assert_eq!("Code (Descending)".parse::<SortKey>().unwrap(), SortKey::CodeDescending);
        assert_eq!("name-asc".parse::<SortKey>().unwrap(), SortKey::NameAscending);
        assert_eq!(SortKey::NameDescending.label(), "Name (Z-A)");
        assert!("price".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_browse_department_keeps_declared_order() {
        let catalog = small_catalog();
        let engine = QueryEngine::new(&catalog);

        let codes: Vec<&str> = engine
            .browse_department("Alpha")
            .unwrap()
            .iter()
            .map(|e| e.code())
            .collect();
        assert_eq!(codes, vec!["AL101", "AL202", "AL1010", "AL303X"]);
        assert!(engine.browse_department("Gamma").is_err());
    }

    #[test]
    fn test_picker_options() {
        let catalog = small_catalog();
        let options = QueryEngine::new(&catalog).picker_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[4], "BE101: Alpha Topics (Beta)");
    }

    #[test]
    fn test_equal_names_keep_declared_order() {
        let catalog = CatalogStore::from_departments(
            "Test",
            vec![
                Department::new(
                    "Ties",
                    vec![
                        course("TI505", "Seminar"),
                        course("TI101", "Seminar"),
                        course("TI303", "Capstone"),
                        course("TI202", "Seminar"),
                    ],
                ),
                Department::new("More", vec![course("MO101", "Seminar")]),
            ],
        )
        .unwrap();
        let engine = QueryEngine::new(&catalog);

        let ascending: Vec<&str> = engine
            .query(&FilterSpec::default().sort_by(SortKey::NameAscending))
            .iter()
            .map(|e| e.code())
            .collect();
        assert_eq!(ascending, vec!["TI303", "TI505", "TI101", "TI202", "MO101"]);

        let descending: Vec<&str> = engine
            .query(&FilterSpec::default().sort_by(SortKey::NameDescending))
            .iter()
            .map(|e| e.code())
            .collect();
        assert_eq!(descending, vec!["TI505", "TI101", "TI202", "MO101", "TI303"]);
    }
}
