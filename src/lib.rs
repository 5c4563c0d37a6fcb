//! Sheetdrop - semicolon-delimited text to Excel
//!
//! Parses uploaded text into a table of strings, shows it, and writes it out
//! as an `.xlsx` workbook.
//!
//! # Features
//!
//! - Semicolon-delimited parsing with derived `Column N` headers
//! - Configurable handling of rows whose length differs from the first row
//! - Excel export without an index column, plus read-back
//! - Browser upload page served over HTTP
//!
//! # Example
//!
//! ```no_run
//! use sheetdrop::excel::export;
//! use sheetdrop::parser::parse;
//! use std::path::Path;
//!
//! if let Some(table) = parse("name;qty\napple;3") {
//!     let path = export(&table, "data.xlsx", Path::new("."))?;
//!     println!("Saved {}", path.display());
//! }
//! # Ok::<(), sheetdrop::error::SheetError>(())
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod excel;
pub mod parser;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{SheetError, SheetResult};
pub use session::Session;
pub use types::{Row, RowPolicy, Table};
