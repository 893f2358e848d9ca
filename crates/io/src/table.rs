//! Minimal untyped sheet model the loaders consume. Inputs here are flat
//! header-plus-rows tables, so a full grid model is unnecessary.

use chrono::NaiveDate;
use claimflow_pipeline::normalize::{date_from_excel_serial, parse_date_dayfirst};

/// One cell as read from a sheet, before any typing decisions.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Display form, used for pass-through columns. Integers render without
    /// a decimal point, matching how Excel shows them.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }

    /// Numeric value; text is parsed leniently, anything else is missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }

    /// Date with day-first interpretation for text and 1900-system serial
    /// interpretation for numbers. Unparsable is missing, never an error.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::Text(s) => parse_date_dayfirst(s),
            Cell::Number(n) => date_from_excel_serial(*n),
            _ => None,
        }
    }
}

/// A flat table: optional header row plus data rows. Rows may be ragged;
/// `cell` treats out-of-range as empty.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Index of a header, comparing trimmed names.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name.trim())
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Cell::Empty)
    }
}
