use crate::domain::model::{CatalogEntry, Course, Department};
use crate::utils::error::{CatalogError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    title: String,
    subtitle: Option<String>,
    tagline: Option<String>,
    mission: Option<String>,
    #[serde(default)]
    departments: Vec<Department>,
}

/// Read-only store of departments and their courses.
///
/// Built once; there is no mutation API, so a shared reference can be
/// handed to any number of sessions.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    title: String,
    subtitle: Option<String>,
    tagline: Option<String>,
    mission: Option<String>,
    departments: Vec<Department>,
    // code -> (department index, course index)
    by_code: HashMap<String, (usize, usize)>,
}

impl CatalogStore {
    /// The curriculum shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_CATALOG)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded catalog file {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        let mut store = Self::from_departments(file.title, file.departments)?;
        store.subtitle = file.subtitle;
        store.tagline = file.tagline;
        store.mission = file.mission;
        Ok(store)
    }

    /// Builds the store, rejecting repeated department names and course codes.
    pub fn from_departments(title: impl Into<String>, departments: Vec<Department>) -> Result<Self> {
        let mut by_code: HashMap<String, (usize, usize)> = HashMap::new();
        let mut seen_departments: HashMap<&str, usize> = HashMap::new();

        for (d_idx, department) in departments.iter().enumerate() {
            if seen_departments.insert(&department.name, d_idx).is_some() {
                return Err(CatalogError::DuplicateDepartment {
                    name: department.name.clone(),
                });
            }

            for (c_idx, course) in department.courses.iter().enumerate() {
                if let Some(&(first, _)) = by_code.get(&course.code) {
                    return Err(CatalogError::DuplicateCode {
                        code: course.code.clone(),
                        department: department.name.clone(),
                        first_department: departments[first].name.clone(),
                    });
                }
                by_code.insert(course.code.clone(), (d_idx, c_idx));
            }
        }

        tracing::debug!(
            "Catalog built with {} departments and {} courses",
            departments.len(),
            by_code.len()
        );

        Ok(Self {
            title: title.into(),
            subtitle: None,
            tagline: None,
            mission: None,
            departments,
            by_code,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// One-line motto printed under the title.
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref()
    }

    pub fn mission(&self) -> Option<&str> {
        self.mission.as_deref()
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn department(&self, name: &str) -> Result<&Department> {
        self.departments
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| CatalogError::UnknownDepartment {
                name: name.to_string(),
            })
    }

    /// Every course, department by department, in declared order.
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> + '_ {
        self.departments.iter().flat_map(|department| {
            department
                .courses
                .iter()
                .map(move |course| CatalogEntry::new(&department.name, course))
        })
    }

    pub fn all_courses(&self) -> Vec<CatalogEntry<'_>> {
        self.entries().collect()
    }

    pub fn find_by_code(&self, code: &str) -> Result<CatalogEntry<'_>> {
        let &(d_idx, c_idx) = self
            .by_code
            .get(code)
            .ok_or_else(|| CatalogError::UnknownCode {
                code: code.to_string(),
            })?;
        let department = &self.departments[d_idx];
        Ok(CatalogEntry::new(&department.name, &department.courses[c_idx]))
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Courses whose prerequisite names a code that is not in the catalog.
    /// Reported only; the store does not reject them.
    pub fn dangling_prerequisites(&self) -> Vec<(&Course, &str)> {
        self.entries()
            .filter_map(|entry| {
                entry
                    .course
                    .prerequisite
                    .code()
                    .filter(|code| !self.contains_code(code))
                    .map(|code| (entry.course, code))
            })
            .collect()
    }
}
