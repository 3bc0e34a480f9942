pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;
pub use crate::config::SessionConfig;

pub use crate::adapters::{export_bundle, export_csv, export_document, DocumentOptions, LocalStorage};
pub use crate::core::browser::{BrowseRequest, BrowseView, CatalogBrowser};
pub use crate::core::catalog::CatalogStore;
pub use crate::core::level::{CourseCode, LevelBand};
pub use crate::core::query::{DepartmentScope, Diagnostic, FilterSpec, QueryEngine, QueryOutcome, SortKey};
pub use crate::core::selection::{SelectionReport, SelectionTracker};
pub use crate::domain::model::{CatalogEntry, Course, Department, Prerequisite};
pub use crate::utils::error::{CatalogError, Result};
