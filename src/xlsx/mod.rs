mod header;

use std::path::Path;

use calamine::{Data, ExcelDateTime, Reader, open_workbook_auto};

pub use header::{FIELD_KEYWORDS, IdCounter, bind_header, extract_assignments, parse_assignments};

use crate::error::Error;
use crate::model::Cell;

pub struct SheetRows {
    pub sheet_name: String,
    pub rows: Vec<Vec<Cell>>,
}

/// Pick the sheet to read: the first whose name mentions both "investor" and
/// "view", otherwise the first sheet.
pub fn select_sheet(names: &[String]) -> Option<usize> {
    if names.is_empty() {
        return None;
    }
    let preferred = names.iter().position(|name| {
        let lower = name.to_lowercase();
        lower.contains("investor") && lower.contains("view")
    });
    Some(preferred.unwrap_or(0))
}

pub fn read_rows(path: &Path) -> Result<SheetRows, Error> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    let idx = select_sheet(&names)
        .ok_or_else(|| Error::Workbook(format!("{} contains no sheets", path.display())))?;
    let sheet_name = names[idx].clone();
    log::info!("Using sheet: {sheet_name}");

    let range = workbook.worksheet_range(&sheet_name)?;
    // Range coordinates start at the first used cell; pad back to absolute
    // positions so row/column indices match what a spreadsheet user sees.
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }
    Ok(SheetRows { sheet_name, rows })
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Text(datetime_text(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Date-formatted cells render the way the sheet shows them: a bare time of
/// day as `14:30:00`, anything with a date part as `2025-03-01 14:30:00`.
fn datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return dt.to_string();
    }
    match dt.as_datetime() {
        Some(value) if dt.as_f64() < 1.0 => value.time().format("%H:%M:%S").to_string(),
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => dt.to_string(),
    }
}
