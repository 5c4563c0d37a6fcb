//! Excel importer implementation - .xlsx → Table

use crate::error::{SheetError, SheetResult};
use crate::types::{Row, Table};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};

/// Reads the first worksheet of a workbook back into a [`Table`]
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the first worksheet.
    ///
    /// Row 0 supplies the column names (trailing blank header cells dropped).
    /// The sheet's recorded dimensions fix the row and column count, so rows
    /// made only of blank cells survive. Every data row spans the full sheet
    /// width, blank cells read as `""`.
    pub fn import(&self) -> SheetResult<Table> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| SheetError::Import(format!("Failed to open Excel file: {}", e)))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SheetError::Import("Workbook has no worksheets".to_string()))?;

        let dimensions = workbook
            .worksheet_cells_reader(&sheet_name)
            .map_err(|e| SheetError::Import(format!("Failed to read '{}': {}", sheet_name, e)))?
            .dimensions();

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| SheetError::Import(format!("Failed to read '{}': {}", sheet_name, e)))?;

        Ok(Self::range_to_table(&range, dimensions.end))
    }

    /// `last` is the bottom-right cell recorded in the sheet's dimensions
    fn range_to_table(range: &Range<Data>, last: (u32, u32)) -> Table {
        let (last_row, last_col) = match range.end() {
            Some((row, col)) => (row.max(last.0), col.max(last.1)),
            None => last,
        };
        let height = last_row + 1;
        let width = last_col + 1;

        let read_row = |row: u32| -> Row {
            (0..width)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(cell_text)
                        .unwrap_or_default()
                })
                .collect()
        };

        let mut columns = read_row(0);
        while columns.last().is_some_and(|name| name.is_empty()) {
            columns.pop();
        }

        let rows = (1..height).map(read_row).collect();

        Table { columns, rows }
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
