use crate::api::{run_api_server, ApiConfig};
use crate::error::SheetResult;
use crate::excel::{self, ExcelImporter};
use crate::parser;
use crate::session::resolve_filename;
use crate::types::{RowPolicy, Table};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Longest cell shown by `preview` / `inspect` before truncating
const MAX_CELL_WIDTH: usize = 32;

/// Render a table as aligned plain-text columns
pub fn format_table(table: &Table) -> String {
    let width = table.max_width();
    let header: Vec<&str> = (0..width)
        .map(|i| table.columns.get(i).map(String::as_str).unwrap_or(""))
        .collect();

    let cells = |row: &[String]| -> Vec<String> {
        (0..width)
            .map(|i| truncate(row.get(i).map(String::as_str).unwrap_or("")))
            .collect()
    };

    let header: Vec<String> = header.into_iter().map(truncate).collect();
    let body: Vec<Vec<String>> = table.rows.iter().map(|row| cells(row)).collect();

    let widths: Vec<usize> = (0..width)
        .map(|i| {
            body.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&header));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &body {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        cell.to_string()
    } else {
        let head: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{}…", head)
    }
}

fn load(input: &Path, policy: RowPolicy) -> SheetResult<(String, Option<Table>)> {
    parser::check_upload_name(&input.display().to_string())?;
    let (content, table) = parser::parse_file(input)?;
    let table = table.map(|t| t.conform(policy)).transpose()?;
    Ok((content, table))
}

/// Execute the convert command: delimited text → .xlsx
pub fn convert(
    input: PathBuf,
    output: Option<String>,
    dir: Option<PathBuf>,
    policy: RowPolicy,
    verbose: bool,
) -> SheetResult<()> {
    println!("{}", "📄 Sheetdrop - Convert to Excel".bold().green());
    println!("   Input:  {}", input.display());

    let (_, table) = load(&input, policy)?;
    let Some(table) = table else {
        println!("{}", "⚠️  File has no rows, nothing to save".yellow());
        return Ok(());
    };

    if verbose {
        println!(
            "   Parsed {} rows, {} columns (policy: {})",
            table.row_count(),
            table.column_count(),
            policy
        );
        let ragged = table.ragged_rows();
        if !ragged.is_empty() {
            println!(
                "{}",
                format!("   {} row(s) differ from the header width", ragged.len()).yellow()
            );
        }
    }

    let base_dir = match dir {
        Some(dir) => dir,
        None => excel::program_dir()?,
    };
    let filename = resolve_filename(output.as_deref());
    let path = excel::export(&table, filename, &base_dir)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Table saved to Excel: {}\n", path.display());
    Ok(())
}

/// Execute the preview command: show raw content and the parsed table
pub fn preview(input: PathBuf, policy: RowPolicy) -> SheetResult<()> {
    let (content, table) = load(&input, policy)?;

    println!("{}", "File Content:".bold());
    println!("{}", content.trim_end().dimmed());
    println!();

    match table {
        Some(table) => {
            println!(
                "{}",
                format!(
                    "📊 {} rows × {} columns",
                    table.row_count(),
                    table.column_count()
                )
                .cyan()
            );
            print!("{}", format_table(&table));
        }
        None => println!("{}", "No rows found".yellow()),
    }
    Ok(())
}

/// Execute the inspect command: read a workbook back and print it
pub fn inspect(input: PathBuf) -> SheetResult<()> {
    println!("{}", "🔎 Sheetdrop - Inspect workbook".bold().green());
    println!("   File: {}\n", input.display());

    let table = ExcelImporter::new(&input).import()?;
    if table.is_empty() && table.columns.is_empty() {
        println!("{}", "Workbook is empty".yellow());
        return Ok(());
    }

    print!("{}", format_table(&table));
    println!("\n   {} rows", table.row_count());
    Ok(())
}

/// Execute the serve command: run the web front end until interrupted
pub fn serve(config: ApiConfig) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_api_server(config))
}
