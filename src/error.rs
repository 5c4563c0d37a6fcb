use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Error reading file: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("Error saving to Excel: {0}")]
    Export(String),

    #[error("Error reading Excel file: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported upload '{0}': expected a .txt or .csv file")]
    UnsupportedUpload(String),

    #[error("No table to save: upload a file first")]
    NoTable,
}
