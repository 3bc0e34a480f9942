use crate::adapters::bundle::export_bundle;
use crate::adapters::csv_export::export_csv;
use crate::adapters::document::{export_document, DocumentOptions};
use crate::core::catalog::CatalogStore;
use crate::core::query::{DepartmentScope, FilterSpec, QueryEngine, QueryOutcome};
use crate::core::selection::{SelectionReport, SelectionTracker};
use crate::core::{CatalogEntry, ExportSettings, Storage};
use crate::utils::error::Result;

/// What the user asked for in one interaction.
#[derive(Debug, Clone)]
pub struct BrowseRequest {
    pub spec: FilterSpec,
    /// Unfiltered department listing; ignored while a search term is set.
    pub show_all: bool,
    /// Codes or picker labels; empty keeps the previous selection.
    pub chosen: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum BrowseView<'a> {
    Filtered(QueryOutcome<'a>),
    Department {
        name: String,
        entries: Vec<CatalogEntry<'a>>,
    },
}

impl<'a> BrowseView<'a> {
    pub fn entries(&self) -> &[CatalogEntry<'a>] {
        match self {
            BrowseView::Filtered(outcome) => &outcome.entries,
            BrowseView::Department { entries, .. } => entries,
        }
    }
}

#[derive(Debug)]
pub struct BrowseOutcome<'a> {
    pub view: BrowseView<'a>,
    pub selection_report: Option<SelectionReport>,
    pub written: Vec<String>,
}

/// Runs interactions against one catalog: view, optional re-selection,
/// optional exports.
pub struct CatalogBrowser<'a, S: Storage, C: ExportSettings> {
    catalog: &'a CatalogStore,
    storage: S,
    settings: C,
}

impl<'a, S: Storage, C: ExportSettings> CatalogBrowser<'a, S, C> {
    pub fn new(catalog: &'a CatalogStore, storage: S, settings: C) -> Self {
        Self {
            catalog,
            storage,
            settings,
        }
    }

    pub fn engine(&self) -> QueryEngine<'a> {
        QueryEngine::new(self.catalog)
    }

    /// An unknown department never fails the view: it degrades to an empty
    /// filtered result carrying the diagnostic.
    pub fn view(&self, request: &BrowseRequest) -> BrowseView<'a> {
        let engine = self.engine();
        if let DepartmentScope::Only(name) = &request.spec.department {
            if request.show_all && request.spec.search_term.is_empty() {
                match engine.browse_department(name) {
                    Ok(entries) => {
                        return BrowseView::Department {
                            name: name.clone(),
                            entries,
                        }
                    }
                    Err(e) => tracing::debug!("Department listing unavailable: {}", e),
                }
            }
        }
        BrowseView::Filtered(engine.query_with_diagnostics(&request.spec))
    }

    pub fn export(&self, selection: &[CatalogEntry<'_>]) -> Result<Vec<String>> {
        let mut written = Vec::new();

        if self.settings.wants_csv() {
            if selection.is_empty() {
                tracing::info!("No courses selected, skipping CSV export");
            } else {
                let data = export_csv(selection)?;
                written.push(
                    self.storage
                        .write_file(self.settings.csv_file_name(), &data)?,
                );
            }
        }

        let options = DocumentOptions {
            lines_per_page: self.settings.lines_per_page(),
            generated_at: Some(chrono::Utc::now()),
        };

        if self.settings.wants_document() {
            let data = export_document(self.catalog, &options)?;
            written.push(
                self.storage
                    .write_file(self.settings.document_file_name(), &data)?,
            );
        }

        if self.settings.wants_bundle() {
            let data = export_bundle(self.catalog, selection, &options)?;
            written.push(
                self.storage
                    .write_file(self.settings.bundle_file_name(), &data)?,
            );
        }

        Ok(written)
    }

    /// One full re-evaluation. Exports are skipped when `dry_run` is set.
    pub fn run(
        &self,
        request: &BrowseRequest,
        tracker: &mut SelectionTracker<'a>,
        dry_run: bool,
    ) -> Result<BrowseOutcome<'a>> {
        tracing::debug!("Evaluating filters: {:?}", request.spec);
        let view = self.view(request);
        tracing::info!("Showing {} courses", view.entries().len());

        if let BrowseView::Filtered(outcome) = &view {
            for diagnostic in &outcome.diagnostics {
                tracing::warn!("Data quality: {}", diagnostic);
            }
        }

        let selection_report = if request.chosen.is_empty() {
            None
        } else {
            let report = tracker.replace_selection_from_labels(&request.chosen);
            if !report.unknown.is_empty() {
                tracing::info!(
                    "Ignored {} unknown course codes: {}",
                    report.unknown.len(),
                    report.unknown.join(", ")
                );
            }
            Some(report)
        };

        let written = if dry_run {
            tracing::info!("Dry run, no exports written");
            Vec::new()
        } else {
            self.export(tracker.current())?
        };

        for path in &written {
            tracing::info!("Export saved to: {}", path);
        }

        Ok(BrowseOutcome {
            view,
            selection_report,
            written,
        })
    }
}
