use crate::error::Result;
use prettytable::format::consts::FORMAT_BOX_CHARS;
use prettytable::{Cell, Row, Table};
use serde::Serialize;

pub fn output_data<T: Serialize + ?Sized>(data: &T, format: &str) -> Result<()> {
    match format {
        "yaml" => {
            print!("{}", serde_yaml::to_string(data)?);
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

pub fn is_table(format: &str) -> bool {
    format == "table"
}

/// Builds a boxed table with `headers` as titles and an optional footer row
/// appended after the data rows.
pub fn build_table(headers: &[&str], rows: Vec<Vec<String>>, footer: Option<Vec<String>>) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_BOX_CHARS);
    table.set_titles(Row::new(headers.iter().map(|h| Cell::new(h)).collect()));

    for row in rows {
        table.add_row(Row::new(row.iter().map(|c| Cell::new(c)).collect()));
    }

    if let Some(footer) = footer {
        table.add_row(Row::new(
            footer.iter().map(|c| Cell::new(c).style_spec("b")).collect(),
        ));
    }

    table
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>, footer: Option<Vec<String>>) {
    build_table(headers, rows, footer).printstd();
}

/// `Some` values as-is, `None` as an empty cell.
pub fn cell(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31m❌ Error: {}\x1b[0m", message);
}

pub fn print_warning(message: &str) {
    eprintln!("\x1b[33m⚠️  Warning: {}\x1b[0m", message);
}

/// Informational line on stderr, for commands whose stdout is a table.
pub fn print_notice(message: &str) {
    eprintln!("ℹ️  {}", message);
}
