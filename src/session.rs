//! Interaction state for one user driving one upload/preview/save cycle.
//!
//! The web front end and the CLI both go through [`Session`], so the parse and
//! export steps can be exercised without any UI.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{SheetError, SheetResult};
use crate::excel::{self, DEFAULT_FILENAME};
use crate::parser;
use crate::types::{RowPolicy, Table};

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UploadOutcome {
    pub file_name: String,
    pub content: String,
    /// `None` when the upload held no non-blank line
    pub table: Option<Table>,
}

#[derive(Debug, Default)]
pub struct Session {
    policy: RowPolicy,
    upload_name: Option<String>,
    content: Option<String>,
    table: Option<Table>,
    last_saved: Option<PathBuf>,
}

impl Session {
    pub fn new(policy: RowPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> RowPolicy {
        self.policy
    }

    pub fn upload_name(&self) -> Option<&str> {
        self.upload_name.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }

    /// Handle a file upload.
    ///
    /// Any failure clears the previous upload so stale data is never saved.
    pub fn upload(&mut self, file_name: &str, bytes: &[u8]) -> SheetResult<UploadOutcome> {
        self.reset();

        if let Err(e) = parser::check_upload_name(file_name) {
            warn!(file = file_name, "rejected upload with unsupported extension");
            return Err(e);
        }

        let content = parser::decode(bytes).inspect_err(|e| {
            warn!(file = file_name, error = %e, "upload is not valid UTF-8");
        })?;

        let table = parser::parse(&content)
            .map(|table| table.conform(self.policy))
            .transpose()?;

        match &table {
            Some(t) => info!(
                file = file_name,
                rows = t.row_count(),
                columns = t.column_count(),
                "parsed upload"
            ),
            None => info!(file = file_name, "upload holds no rows"),
        }

        self.upload_name = Some(file_name.to_string());
        self.content = Some(content.clone());
        self.table = table.clone();

        Ok(UploadOutcome {
            file_name: file_name.to_string(),
            content,
            table,
        })
    }

    /// Save the current table to `base_dir/filename`.
    ///
    /// A missing or blank file name falls back to [`DEFAULT_FILENAME`].
    pub fn save(&mut self, filename: Option<&str>, base_dir: &Path) -> SheetResult<PathBuf> {
        let table = self.table.as_ref().ok_or(SheetError::NoTable)?;
        let filename = resolve_filename(filename);

        let path = excel::export(table, filename, base_dir).inspect_err(|e| {
            warn!(file = filename, error = %e, "save failed");
        })?;

        self.last_saved = Some(path.clone());
        Ok(path)
    }

    /// Serialize the current table without touching the filesystem
    pub fn download(&self) -> SheetResult<Vec<u8>> {
        let table = self.table.as_ref().ok_or(SheetError::NoTable)?;
        excel::ExcelExporter::new(table).to_buffer()
    }

    /// Forget the current upload and table
    pub fn reset(&mut self) {
        self.upload_name = None;
        self.content = None;
        self.table = None;
    }
}

/// Trimmed file name, or [`DEFAULT_FILENAME`] when blank
pub fn resolve_filename(filename: Option<&str>) -> &str {
    match filename.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_FILENAME,
    }
}
