use crate::error::{SheetError, SheetResult};
use crate::types::{Row, Table};
use std::path::Path;

/// Cell separator within a line
pub const DELIMITER: char = ';';

/// Characters that end a line: `\n`, `\r` (so `\r\n` too), vertical tab, form
/// feed, the file/group/record separators, NEL and the Unicode line and
/// paragraph separators
pub const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// File extensions accepted for upload
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["txt", "csv"];

/// Parse semicolon-delimited text into a [`Table`].
///
/// Lines are separated by any of [`LINE_BREAKS`]; `\r\n` counts as one break.
/// Each line is trimmed of surrounding whitespace (including the `\x1c`-`\x1f`
/// separators) and blank lines are dropped; every remaining line is split on
/// [`DELIMITER`]. Cells themselves are not trimmed, quoted or typed.
///
/// Column names come from the first retained line. Later rows may be shorter or
/// longer than that; see [`Table::conform`].
///
/// # Returns
/// * `Some(Table)` - at least one non-blank line
/// * `None` - empty or whitespace-only input
///
/// # Example
/// ```
/// use sheetdrop::parser::parse;
///
/// let table = parse("a;b\nc;d").unwrap();
/// assert_eq!(table.columns, vec!["Column 1", "Column 2"]);
/// assert_eq!(table.rows[1], vec!["c", "d"]);
/// assert!(parse("  \n").is_none());
/// ```
pub fn parse(text: &str) -> Option<Table> {
    let rows: Vec<Row> = text
        .split(LINE_BREAKS)
        .map(|line| line.trim_matches(is_line_padding))
        .filter(|line| !line.is_empty())
        .map(split_line)
        .collect();

    if rows.is_empty() {
        return None;
    }

    Some(Table::from_rows(rows))
}

fn is_line_padding(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn split_line(line: &str) -> Row {
    line.split(DELIMITER).map(str::to_string).collect()
}

/// Decode uploaded bytes as strict UTF-8
pub fn decode(bytes: &[u8]) -> SheetResult<String> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.to_string())
}

/// Decode then parse. A decode failure never reaches [`parse`].
pub fn parse_upload(bytes: &[u8]) -> SheetResult<Option<Table>> {
    let text = decode(bytes)?;
    Ok(parse(&text))
}

/// Read a delimited text file from disk and parse it
pub fn parse_file(path: &Path) -> SheetResult<(String, Option<Table>)> {
    let bytes = std::fs::read(path)?;
    let text = decode(&bytes)?;
    let table = parse(&text);
    Ok((text, table))
}

/// True when the file name carries a `.txt` or `.csv` extension (any case)
pub fn is_supported_upload(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Reject uploads that are not `.txt` or `.csv`
pub fn check_upload_name(name: &str) -> SheetResult<()> {
    if is_supported_upload(name) {
        Ok(())
    } else {
        Err(SheetError::UnsupportedUpload(name.to_string()))
    }
}
