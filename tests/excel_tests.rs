//! Excel export and read-back tests

use calamine::{open_workbook, Data, Reader, Xlsx};
use pretty_assertions::assert_eq;
use sheetdrop::excel::{export, ExcelExporter, ExcelImporter, SHEET_NAME};
use sheetdrop::parser::parse;
use sheetdrop::{SheetError, Table};
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════════════════════
// ROUND TRIP
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_round_trip_preserves_cells() {
    let dir = TempDir::new().unwrap();
    let table = parse("name;qty;price\napple;3;1.25\npear;10;0.5").unwrap();

    let path = export(&table, "fruit.xlsx", dir.path()).unwrap();
    let back = ExcelImporter::new(&path).import().unwrap();

    assert_eq!(back, table);
}

#[test]
fn test_export_has_no_index_column() {
    let dir = TempDir::new().unwrap();
    let table = parse("a;b\nc;d").unwrap();
    let path = export(&table, "plain.xlsx", dir.path()).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    assert_eq!(range.get_size(), (3, 2));
    assert_eq!(range.get((0, 0)), Some(&Data::String("Column 1".to_string())));
    assert_eq!(range.get((1, 0)), Some(&Data::String("a".to_string())));
    assert_eq!(range.get((2, 1)), Some(&Data::String("d".to_string())));
}

#[test]
fn test_numeric_looking_cells_stay_strings() {
    let dir = TempDir::new().unwrap();
    let table = parse("007;1e3").unwrap();
    let path = export(&table, "numbers.xlsx", dir.path()).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    assert_eq!(range.get((1, 0)), Some(&Data::String("007".to_string())));
    assert_eq!(range.get((1, 1)), Some(&Data::String("1e3".to_string())));
}

#[test]
fn test_short_row_reads_back_with_blank_cells() {
    let dir = TempDir::new().unwrap();
    let table = parse("a;b;c\nd").unwrap();
    let path = export(&table, "short.xlsx", dir.path()).unwrap();

    let back = ExcelImporter::new(&path).import().unwrap();
    assert_eq!(back.columns, table.columns);
    assert_eq!(back.rows[1], vec!["d", "", ""]);
}

#[test]
fn test_long_row_cells_are_written() {
    let dir = TempDir::new().unwrap();
    let table = parse("a\nb;c").unwrap();
    let path = export(&table, "long.xlsx", dir.path()).unwrap();

    let back = ExcelImporter::new(&path).import().unwrap();
    assert_eq!(back.columns, vec!["Column 1"]);
    assert_eq!(back.rows, vec![vec!["a", ""], vec!["b", "c"]]);
}

#[test]
fn test_trailing_empty_row_survives_round_trip() {
    let dir = TempDir::new().unwrap();
    let table = parse("a;b\n;").unwrap();
    assert_eq!(table.row_count(), 2);

    let path = export(&table, "trailing.xlsx", dir.path()).unwrap();
    let back = ExcelImporter::new(&path).import().unwrap();

    assert_eq!(back, table);
    assert_eq!(back.rows[1], vec!["", ""]);
}

#[test]
fn test_single_empty_row_survives_round_trip() {
    let dir = TempDir::new().unwrap();
    let table = parse(";").unwrap();

    let path = export(&table, "blank.xlsx", dir.path()).unwrap();
    let back = ExcelImporter::new(&path).import().unwrap();

    assert_eq!(back.row_count(), 1);
    assert_eq!(back, table);
}

#[test]
fn test_empty_cells_are_written_as_blank_cells() {
    let dir = TempDir::new().unwrap();
    let table = parse("a;b\n;\n;").unwrap();
    let path = export(&table, "blanks.xlsx", dir.path()).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let dimensions = workbook
        .worksheet_cells_reader(SHEET_NAME)
        .unwrap()
        .dimensions();
    assert_eq!(dimensions.end, (3, 1));
}

// ═══════════════════════════════════════════════════════════════════════════
// OVERWRITE AND FAILURES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_second_export_overwrites_first() {
    let dir = TempDir::new().unwrap();
    let first = parse("old;old;old\nold;old;old\nold;old;old").unwrap();
    let second = parse("new;value").unwrap();

    let path1 = export(&first, "same.xlsx", dir.path()).unwrap();
    let path2 = export(&second, "same.xlsx", dir.path()).unwrap();
    assert_eq!(path1, path2);

    let back = ExcelImporter::new(&path2).import().unwrap();
    assert_eq!(back, second);
    assert!(back.rows.iter().flatten().all(|cell| cell != "old"));
}

#[test]
fn test_export_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let table = parse("a;b").unwrap();

    let err = export(&table, "out.xlsx", &dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, SheetError::Export(_)));
}

#[test]
fn test_export_filename_that_is_a_directory_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("taken.xlsx")).unwrap();
    let table = parse("a;b").unwrap();

    let err = export(&table, "taken.xlsx", dir.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Error saving to Excel:"));
    assert_eq!(message.matches("Excel").count(), 1, "{}", message);
}

#[test]
fn test_import_rejects_non_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fake.xlsx");
    std::fs::write(&path, "not a zip").unwrap();

    let err = ExcelImporter::new(&path).import().unwrap_err();
    assert!(matches!(err, SheetError::Import(_)));
}

#[test]
fn test_empty_table_exports_empty_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.xlsx");

    ExcelExporter::new(&Table::default()).write(&path).unwrap();
    let back = ExcelImporter::new(&path).import().unwrap();
    assert_eq!(back, Table::default());
}
