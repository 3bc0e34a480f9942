// Adapters layer: byte-stream exporters and storage backends.

pub mod bundle;
pub mod csv_export;
pub mod document;
pub mod storage;

pub use bundle::export_bundle;
pub use csv_export::export_csv;
pub use document::{export_document, DocumentOptions};
pub use storage::LocalStorage;
