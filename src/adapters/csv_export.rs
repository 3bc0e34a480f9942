use crate::domain::model::CatalogEntry;
use crate::utils::error::{CatalogError, Result};

pub const CSV_HEADER: [&str; 6] = [
    "Department",
    "Code",
    "Name",
    "Description",
    "Credits",
    "Prerequisites",
];

/// Renders course records as CSV, one row per entry after the header.
///
/// Fields holding commas, quotes or line breaks are quoted; rows end in `\n`.
pub fn export_csv(entries: &[CatalogEntry<'_>]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for entry in entries {
        let course = entry.course;
        let credits = course.credits.to_string();
        let prerequisite = course.prerequisite.to_string();
        writer.write_record([
            entry.department,
            course.code.as_str(),
            course.name.as_str(),
            course.description.as_str(),
            credits.as_str(),
            prerequisite.as_str(),
        ])?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| CatalogError::IoError(e.into_error()))?;

    tracing::debug!("Rendered {} CSV rows ({} bytes)", entries.len(), data.len());
    Ok(data)
}
