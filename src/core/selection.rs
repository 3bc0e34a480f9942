use crate::core::catalog::CatalogStore;
use crate::domain::model::CatalogEntry;
use std::collections::HashSet;

/// Extracts the course code from a picker label such as
/// `AE101: Intro to Rocket Design (Department of Aerospace Engineering)`.
/// A bare code is returned unchanged.
pub fn code_from_label(label: &str) -> &str {
    label.split(':').next().unwrap_or(label).trim()
}

/// What happened to the codes passed to the last replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
    pub resolved: usize,
    pub unknown: Vec<String>,
    pub duplicates: Vec<String>,
}

/// Per-session record of the chosen courses.
///
/// Each session owns its own tracker; the catalog it reads from is shared.
#[derive(Debug, Clone)]
pub struct SelectionTracker<'a> {
    catalog: &'a CatalogStore,
    entries: Vec<CatalogEntry<'a>>,
}

impl<'a> SelectionTracker<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self {
            catalog,
            entries: Vec::new(),
        }
    }

    /// Replaces the whole selection with the courses named by `codes`.
    ///
    /// Unknown codes are skipped without failing the replacement, and a code
    /// repeated later in the list is ignored. Input order is kept.
    pub fn replace_selection<S: AsRef<str>>(&mut self, codes: &[S]) -> SelectionReport {
        self.replace_with(codes.iter().map(|c| c.as_ref().trim()))
    }

    /// Same as [`replace_selection`](Self::replace_selection) but takes picker labels.
    pub fn replace_selection_from_labels<S: AsRef<str>>(&mut self, labels: &[S]) -> SelectionReport {
        self.replace_with(labels.iter().map(|l| code_from_label(l.as_ref())))
    }

    fn replace_with<'c>(&mut self, codes: impl Iterator<Item = &'c str>) -> SelectionReport {
        let catalog: &'a CatalogStore = self.catalog;
        self.entries.clear();
        let mut report = SelectionReport::default();
        let mut seen: HashSet<&'a str> = HashSet::new();

        for code in codes {
            match catalog.find_by_code(code) {
                Ok(entry) => {
                    if seen.insert(entry.code()) {
                        self.entries.push(entry);
                    } else {
                        report.duplicates.push(code.to_string());
                    }
                }
                Err(e) => {
                    tracing::debug!("Skipping selection: {}", e);
                    report.unknown.push(code.to_string());
                }
            }
        }

        report.resolved = self.entries.len();
        tracing::debug!(
            "Selection replaced: {} courses, {} unknown, {} duplicate",
            report.resolved,
            report.unknown.len(),
            report.duplicates.len()
        );
        report
    }

    pub fn current(&self) -> &[CatalogEntry<'a>] {
        &self.entries
    }

    pub fn codes(&self) -> Vec<&'a str> {
        self.entries.iter().map(|e| e.code()).collect()
    }

    pub fn total_credits(&self) -> u32 {
        self.entries.iter().map(|e| u32::from(e.course.credits)).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
