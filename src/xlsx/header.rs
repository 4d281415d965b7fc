use std::collections::HashMap;

use crate::error::Error;
use crate::model::{Assignment, Cell, Field, HeaderBinding};

/// Header keyword per field, in match priority order. A header cell names the
/// first field whose keyword it contains (lower-cased); that field keeps the
/// leftmost such cell.
pub const FIELD_KEYWORDS: &[(Field, &str)] = &[
    (Field::Fund, "investor (fund)"),
    (Field::Reps, "investor rep"),
    (Field::Room, "room"),
    (Field::Time, "timeslot"),
    (Field::Founder, "founder (company)"),
    (Field::InvestorRunner, "investor runner"),
];

const FIRST_ASSIGNMENT_ID: u32 = 101;

/// Next assignment id. Advances only when a record is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdCounter(u32);

impl Default for IdCounter {
    fn default() -> Self {
        IdCounter(FIRST_ASSIGNMENT_ID)
    }
}

impl IdCounter {
    pub fn starting_at(id: u32) -> Self {
        IdCounter(id)
    }

    pub fn peek(&self) -> u32 {
        self.0
    }

    fn take(&mut self) -> u32 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

fn lowered(row: &[Cell]) -> Vec<String> {
    row.iter().map(|c| c.text().to_lowercase()).collect()
}

fn is_header_row(cells: &[String]) -> bool {
    cells.iter().any(|c| c.contains("investor")) && cells.iter().any(|c| c.contains("fund"))
}

fn bind_columns(cells: &[String]) -> HashMap<Field, usize> {
    let mut columns = HashMap::new();
    for (idx, cell) in cells.iter().enumerate() {
        let Some(&(field, _)) = FIELD_KEYWORDS.iter().find(|(_, keyword)| cell.contains(keyword))
        else {
            continue;
        };
        columns.entry(field).or_insert(idx);
    }
    columns
}

/// Locate the header row and bind fields to columns. The first row mentioning
/// both "investor" and "fund" is the header; it must bind the fund column.
pub fn bind_header(rows: &[Vec<Cell>]) -> Result<HeaderBinding, Error> {
    for (header_row, row) in rows.iter().enumerate() {
        let cells = lowered(row);
        if !is_header_row(&cells) {
            continue;
        }
        let columns = bind_columns(&cells);
        if !columns.contains_key(&Field::Fund) {
            return Err(Error::HeaderNotFound(format!(
                "row {header_row} looks like a header but has no \"Investor (Fund)\" column"
            )));
        }
        return Ok(HeaderBinding {
            header_row,
            columns,
        });
    }
    Err(Error::HeaderNotFound(
        "no row contains both \"investor\" and \"fund\"".into(),
    ))
}

fn cell_text(row: &[Cell], col: Option<usize>) -> String {
    col.and_then(|c| row.get(c)).map(Cell::text).unwrap_or_default()
}

fn split_reps(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect()
}

/// Build assignment records from the rows below the header. Rows without a
/// fund or a time slot are skipped and do not consume an id.
pub fn extract_assignments(
    rows: &[Vec<Cell>],
    binding: &HeaderBinding,
    ids: &mut IdCounter,
) -> Vec<Assignment> {
    let fund_col = binding.column(Field::Fund);
    let mut assignments = Vec::new();

    for row in rows.iter().skip(binding.header_row + 1) {
        let fund = cell_text(row, fund_col);
        if fund.is_empty() {
            continue;
        }
        let time_slot = cell_text(row, binding.column(Field::Time));
        if time_slot.is_empty() {
            continue;
        }
        assignments.push(Assignment {
            id: ids.take(),
            investor_runner: cell_text(row, binding.column(Field::InvestorRunner)),
            fund,
            reps: split_reps(&cell_text(row, binding.column(Field::Reps))),
            investor_room: cell_text(row, binding.column(Field::Room)),
            time_slot,
            founder_company: cell_text(row, binding.column(Field::Founder)),
        });
    }
    assignments
}

/// Bind the header and extract every assignment with a fresh id counter.
pub fn parse_assignments(rows: &[Vec<Cell>]) -> Result<(HeaderBinding, Vec<Assignment>), Error> {
    let binding = bind_header(rows)?;
    let mut ids = IdCounter::default();
    let assignments = extract_assignments(rows, &binding, &mut ids);
    Ok((binding, assignments))
}
