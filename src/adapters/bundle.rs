use crate::adapters::csv_export::export_csv;
use crate::adapters::document::{export_document, DocumentOptions};
use crate::core::catalog::CatalogStore;
use crate::domain::model::CatalogEntry;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const SELECTION_CSV: &str = "selected_courses.csv";
pub const SELECTION_JSON: &str = "selected_courses.json";
pub const CURRICULUM_DOCUMENT: &str = "curriculum.txt";

/// Packs the selection (CSV and JSON) and the full curriculum document
/// into one zip archive held in memory.
pub fn export_bundle(
    catalog: &CatalogStore,
    selection: &[CatalogEntry<'_>],
    options: &DocumentOptions,
) -> Result<Vec<u8>> {
    let csv_data = export_csv(selection)?;
    let json_data = serde_json::to_string_pretty(selection)?;
    let document = export_document(catalog, options)?;

    tracing::debug!(
        "Creating bundle with {} selected courses and {} byte document",
        selection.len(),
        document.len()
    );

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>(SELECTION_CSV, FileOptions::default())?;
    zip.write_all(&csv_data)?;

    zip.start_file::<_, ()>(SELECTION_JSON, FileOptions::default())?;
    zip.write_all(json_data.as_bytes())?;

    zip.start_file::<_, ()>(CURRICULUM_DOCUMENT, FileOptions::default())?;
    zip.write_all(&document)?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::SelectionTracker;
    use std::io::Read;

    #[test]
    fn test_bundle_contains_three_files() {
        let catalog = CatalogStore::bundled().unwrap();
        let mut tracker = SelectionTracker::new(&catalog);
        tracker.replace_selection(&["AE101", "BI202"]);

        let data = export_bundle(&catalog, tracker.current(), &DocumentOptions::default()).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 3);

        let mut json = String::new();
        archive
            .by_name(SELECTION_JSON)
            .unwrap()
            .read_to_string(&mut json)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["code"], "AE101");
        assert_eq!(parsed[1]["department"], "Department of Bioinformatics");

        let mut csv_text = String::new();
        archive
            .by_name(SELECTION_CSV)
            .unwrap()
            .read_to_string(&mut csv_text)
            .unwrap();
        assert_eq!(csv_text.lines().count(), 3);

        assert!(archive.by_name(CURRICULUM_DOCUMENT).is_ok());
    }
}
