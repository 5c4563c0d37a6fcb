//! Excel exporter implementation - Table → .xlsx

use crate::error::{SheetError, SheetResult};
use crate::types::Table;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Worksheet name used for the single exported sheet
pub const SHEET_NAME: &str = "Sheet1";

/// File name used when the user supplies none
pub const DEFAULT_FILENAME: &str = "data.xlsx";

/// Writes a [`Table`] as a single-sheet workbook.
///
/// Row 0 holds the column names; data rows follow without an index column.
/// Every cell is written as a text-formatted string; empty strings become
/// formatted blank cells so all-empty rows still count toward the sheet
/// dimensions. Cells past the header width (long rows) are written as-is and
/// short rows leave their trailing cells unwritten.
pub struct ExcelExporter<'a> {
    table: &'a Table,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Build the workbook and save it, replacing any existing file
    pub fn write(&self, output_path: &Path) -> SheetResult<()> {
        let mut workbook = self.build()?;

        workbook
            .save(output_path)
            .map_err(|e| SheetError::Export(e.to_string()))?;

        Ok(())
    }

    /// Serialize the workbook into memory
    pub fn to_buffer(&self) -> SheetResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| SheetError::Export(e.to_string()))
    }

    fn build(&self) -> SheetResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| SheetError::Export(e.to_string()))?;

        self.write_header(worksheet)?;
        self.write_rows(worksheet)?;

        Ok(workbook)
    }

    fn write_header(&self, worksheet: &mut Worksheet) -> SheetResult<()> {
        for (col_idx, name) in self.table.columns.iter().enumerate() {
            worksheet
                .write_string(0, to_col(col_idx)?, name)
                .map_err(|e| SheetError::Export(e.to_string()))?;
        }
        Ok(())
    }

    fn write_rows(&self, worksheet: &mut Worksheet) -> SheetResult<()> {
        let text = Format::new().set_num_format("@");

        for (row_idx, row) in self.table.rows.iter().enumerate() {
            let excel_row = to_row(row_idx + 1)?; // +1 for header row

            for (col_idx, value) in row.iter().enumerate() {
                let col = to_col(col_idx)?;
                let written = if value.is_empty() {
                    worksheet.write_blank(excel_row, col, &text)
                } else {
                    worksheet.write_string_with_format(excel_row, col, value, &text)
                };
                written.map_err(|e| SheetError::Export(e.to_string()))?;
            }
        }
        Ok(())
    }
}

fn to_row(idx: usize) -> SheetResult<u32> {
    u32::try_from(idx).map_err(|_| SheetError::Export(format!("Row {} is out of range", idx)))
}

fn to_col(idx: usize) -> SheetResult<u16> {
    u16::try_from(idx).map_err(|_| SheetError::Export(format!("Column {} is out of range", idx)))
}

/// Write `table` to `base_dir/filename` and return the resolved path.
///
/// An existing file at that path is overwritten without warning. The file name
/// is used as given; any fault while writing surfaces as [`SheetError::Export`].
pub fn export(table: &Table, filename: &str, base_dir: &Path) -> SheetResult<PathBuf> {
    let save_path = base_dir.join(filename);

    if !table.is_rectangular() {
        warn!(
            ragged = table.ragged_rows().len(),
            "exporting table with rows that do not match the header width"
        );
    }
    if save_path.exists() {
        debug!(path = %save_path.display(), "overwriting existing file");
    }

    ExcelExporter::new(table).write(&save_path)?;

    info!(
        path = %save_path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "table saved to Excel"
    );
    Ok(save_path)
}

/// Directory holding the running executable
pub fn program_dir() -> SheetResult<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        SheetError::Export(format!(
            "Cannot determine directory of {}",
            exe.display()
        ))
    })
}
