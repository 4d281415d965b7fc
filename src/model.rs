use std::collections::HashMap;

use serde::Serialize;

/// Flat unit of a document body, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Text(String),
    /// Relationship id of an embedded image.
    Image(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Association {
    pub context: String,
    pub asset_filename: String,
}

/// Spreadsheet cell, reduced to what the header binder needs.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Trimmed display text. Integral numbers render without a fraction.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Fund,
    Reps,
    Room,
    Time,
    Founder,
    InvestorRunner,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Fund => "fund",
            Field::Reps => "reps",
            Field::Room => "room",
            Field::Time => "time",
            Field::Founder => "founder",
            Field::InvestorRunner => "investorRunner",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderBinding {
    pub header_row: usize,
    pub columns: HashMap<Field, usize>,
}

impl HeaderBinding {
    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: u32,
    pub investor_runner: String,
    pub fund: String,
    pub reps: Vec<String>,
    pub investor_room: String,
    pub time_slot: String,
    pub founder_company: String,
}
