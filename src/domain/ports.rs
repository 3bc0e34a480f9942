use crate::utils::error::Result;

/// Destination for export byte streams.
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

/// Which exports a session asks for and where they go.
pub trait ExportSettings {
    fn wants_csv(&self) -> bool;
    fn wants_document(&self) -> bool;
    fn wants_bundle(&self) -> bool;
    fn output_path(&self) -> &str;
    fn csv_file_name(&self) -> &str;
    fn document_file_name(&self) -> &str;
    fn bundle_file_name(&self) -> &str;
    fn lines_per_page(&self) -> usize;
}
