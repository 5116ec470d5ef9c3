//! Reader for the host's exported plot tables.
//!
//! A table is a header line followed by whitespace-separated rows, one column
//! per name in the view's column list. Status-like columns stay text, the rest
//! are parsed as numbers (`nan` allowed).

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

use crate::automation::PlotView;

/// Columns kept as text rather than parsed as numbers (compared case-insensitively).
const TEXT_COLUMNS: &[&str] = &[
    "time",
    "si",
    "within_limit",
    "15v",
    "24v",
    "hrci",
    "hrcs",
    "shield",
    "5v_a",
    "5v_b",
];

pub fn is_text_column(name: &str) -> bool {
    TEXT_COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(name))
}

/// Values of one column.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Text(Vec<String>),
    Numeric(Vec<f64>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Numeric(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Formats the value at `index`: text verbatim, numbers with six decimals.
    pub fn format_at(&self, index: usize) -> Option<String> {
        match self {
            ColumnData::Text(v) => v.get(index).cloned(),
            ColumnData::Numeric(v) => v.get(index).map(|x| format_number(*x)),
        }
    }
}

/// Six-decimal formatting with lowercase `nan` and `inf`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{:.6}", value)
    }
}

/// One exported table.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotTable {
    names: Vec<&'static str>,
    columns: Vec<ColumnData>,
    rows: usize,
}

impl PlotTable {
    /// Loads `path` using the column layout of `view`.
    pub fn from_file(path: &Path, view: &PlotView) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to open plot table: {}", path.display()))?;
        Self::parse(&content, view)
            .with_context(|| format!("Failed to parse plot table: {}", path.display()))
    }

    /// Parses table text. The first line is the header and is skipped, as are
    /// blank lines.
    pub fn parse(content: &str, view: &PlotView) -> Result<Self> {
        let mut columns: Vec<ColumnData> = view
            .columns
            .iter()
            .map(|name| {
                if is_text_column(name) {
                    ColumnData::Text(Vec::new())
                } else {
                    ColumnData::Numeric(Vec::new())
                }
            })
            .collect();

        let mut rows = 0;
        for (line_num, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < view.columns.len() {
                return Err(anyhow!(
                    "Line {}: expected {} columns, got {}",
                    line_num + 1,
                    view.columns.len(),
                    fields.len()
                ));
            }

            for ((column, name), field) in columns.iter_mut().zip(view.columns).zip(&fields) {
                match column {
                    ColumnData::Text(values) => values.push(field.to_string()),
                    ColumnData::Numeric(values) => {
                        let value = field.parse::<f64>().with_context(|| {
                            format!("Line {}: invalid {} value \"{}\"", line_num + 1, name, field)
                        })?;
                        values.push(value);
                    }
                }
            }
            rows += 1;
        }

        Ok(Self {
            names: view.columns.to_vec(),
            columns,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|i| &self.columns[i])
    }

    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        match self.column(name)? {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    /// The leading time column.
    pub fn times(&self) -> &[String] {
        match self.columns.first() {
            Some(ColumnData::Text(v)) => v,
            _ => &[],
        }
    }
}

/// Index of the largest non-NaN value.
pub fn nan_argmax(values: &[f64]) -> Option<usize> {
    nan_arg_by(values, |candidate, best| candidate > best)
}

/// Index of the smallest non-NaN value.
pub fn nan_argmin(values: &[f64]) -> Option<usize> {
    nan_arg_by(values, |candidate, best| candidate < best)
}

// First occurrence wins on ties.
fn nan_arg_by(values: &[f64], better: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some(b) if !better(v, values[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}
