//! Excel export and read-back
//!
//! - Export: Table → Excel (.xlsx), one worksheet, no index column
//! - Import: Excel (.xlsx) → Table, first worksheet only

mod exporter;
mod importer;

pub use exporter::{export, program_dir, ExcelExporter, DEFAULT_FILENAME, SHEET_NAME};
pub use importer::ExcelImporter;
