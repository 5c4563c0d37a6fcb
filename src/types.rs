use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{SheetError, SheetResult};

//==============================================================================
// Rows and Tables
//==============================================================================

/// One line of input split into string cells
pub type Row = Vec<String>;

/// Tabular result of parsing: derived column names plus the parsed rows.
///
/// Rows are not required to match the column count. Use [`Table::conform`]
/// to enforce a [`RowPolicy`] before handing the table on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table whose column names come from the first row's length
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        Self {
            columns: Self::column_names(width),
            rows,
        }
    }

    /// `Column 1`, `Column 2`, ... `Column {width}`
    pub fn column_names(width: usize) -> Vec<String> {
        (1..=width).map(|i| format!("Column {}", i)).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row, which may exceed the column count
    pub fn max_width(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.len())
            .max()
            .unwrap_or(0)
            .max(self.column_count())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Indices of rows whose length differs from the column count
    pub fn ragged_rows(&self) -> Vec<usize> {
        let width = self.column_count();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() != width)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn is_rectangular(&self) -> bool {
        self.ragged_rows().is_empty()
    }

    /// Apply a row-length policy, producing a new table
    pub fn conform(&self, policy: RowPolicy) -> SheetResult<Table> {
        let width = self.column_count();
        match policy {
            RowPolicy::Accept => Ok(self.clone()),
            RowPolicy::Pad => {
                let rows = self
                    .rows
                    .iter()
                    .map(|row| {
                        let mut row = row.clone();
                        row.resize(width, String::new());
                        row
                    })
                    .collect();
                Ok(Table {
                    columns: self.columns.clone(),
                    rows,
                })
            }
            RowPolicy::Reject => {
                if let Some(&idx) = self.ragged_rows().first() {
                    return Err(SheetError::Validation(format!(
                        "row {} has {} cells, expected {}",
                        idx + 1,
                        self.rows[idx].len(),
                        width
                    )));
                }
                Ok(self.clone())
            }
        }
    }
}

//==============================================================================
// Row-length policy
//==============================================================================

/// What to do with rows whose cell count differs from the first row's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Keep rows exactly as parsed
    #[default]
    Accept,
    /// Pad short rows with empty cells, truncate long rows
    Pad,
    /// Fail on the first ragged row
    Reject,
}

impl fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RowPolicy::Accept => "accept",
            RowPolicy::Pad => "pad",
            RowPolicy::Reject => "reject",
        };
        f.write_str(name)
    }
}

impl FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accept" => Ok(RowPolicy::Accept),
            "pad" => Ok(RowPolicy::Pad),
            "reject" => Ok(RowPolicy::Reject),
            other => Err(format!(
                "unknown row policy '{}' (expected accept, pad or reject)",
                other
            )),
        }
    }
}
