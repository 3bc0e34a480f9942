pub mod browser;
pub mod catalog;
pub mod level;
pub mod query;
pub mod selection;

pub use crate::domain::model::{CatalogEntry, Course, Department, Prerequisite};
pub use crate::domain::ports::{ExportSettings, Storage};
pub use crate::utils::error::Result;
