//! Table reconstruction and CSV rendering.

use super::cell::cell_text;
use crate::error::Result;
use crate::model::{Block, BlockGraph, BlockType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sparse grid of one table, in first-seen order.
///
/// Rows and columns are never sorted: a row appears where its first cell was
/// met while walking the table's children, and so does each column within a
/// row. Confidence scores are kept flat, in walk order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableGrid {
    rows: IndexMap<u32, IndexMap<u32, String>>,
    scores: Vec<f64>,
}

impl TableGrid {
    /// Walk a TABLE block's CELL children.
    pub fn collect(table: &Block, graph: &BlockGraph) -> Result<Self> {
        let mut grid = Self::default();

        for child_id in table.child_ids() {
            let cell = graph.get(child_id)?;
            if cell.block_type != BlockType::Cell {
                continue;
            }
            let (row, column) = cell.cell_position()?;
            grid.scores.push(cell.cell_confidence()?);
            let text = cell_text(cell, graph)?;
            grid.rows.entry(row).or_default().insert(column, text);
        }

        Ok(grid)
    }

    /// Number of distinct rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Confidence scores in walk order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Text at a row/column label.
    pub fn get(&self, row: u32, column: u32) -> Option<&str> {
        self.rows.get(&row)?.get(&column).map(String::as_str)
    }

    /// Line width used when wrapping scores.
    ///
    /// This is the column count of the last row in grid order, not the widest
    /// row; score lines wrap at that width for the whole table.
    pub fn wrap_width(&self) -> usize {
        self.rows.last().map(|(_, columns)| columns.len()).unwrap_or(0)
    }

    /// Quoted CSV of cell text, one line per row.
    pub fn values_csv(&self) -> String {
        let mut csv = String::new();
        for columns in self.rows.values() {
            let line = columns
                .values()
                .map(|text| quote(text))
                .collect::<Vec<_>>()
                .join(",");
            csv.push_str(&line);
            csv.push('\n');
        }
        csv
    }

    /// Unquoted CSV of confidence scores, wrapped every [`wrap_width`](Self::wrap_width) values.
    ///
    /// A full line ends in a newline. A trailing partial line keeps the comma
    /// after its last value; with a wrap width of zero nothing wraps.
    pub fn scores_csv(&self) -> String {
        let width = self.wrap_width();
        let mut csv = String::new();
        let mut in_line = 0;

        for score in &self.scores {
            csv.push_str(&format_score(*score));
            csv.push(',');
            in_line += 1;
            if width > 0 && in_line == width {
                csv.pop();
                csv.push('\n');
                in_line = 0;
            }
        }
        csv
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Render a confidence score the way the scores files have always carried them:
/// shortest round-trip decimal, with `.0` kept on whole numbers.
///
/// Magnitudes below `1e-4` or from `1e16` up use exponent form with a signed,
/// two-digit exponent (`5e-05`, `1.5e+16`).
pub fn format_score(score: f64) -> String {
    let magnitude = score.abs();
    if score.is_finite() && score != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(score);
    }
    let mut out = score.to_string();
    if score.is_finite() && !out.contains(['.', 'e', 'E']) {
        out.push_str(".0");
    }
    out
}

fn exponent_form(score: f64) -> String {
    let raw = format!("{:e}", score);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => raw,
    }
}

/// Rendered CSV pair for one detected table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCsv {
    /// 1-based position among the document's tables
    pub index: usize,

    /// Quoted cell text grid
    pub values: String,

    /// Confidence scores
    pub scores: String,
}

impl TableCsv {
    /// Reconstruct one TABLE block.
    pub fn from_table(index: usize, table: &Block, graph: &BlockGraph) -> Result<Self> {
        let grid = TableGrid::collect(table, graph)?;
        Ok(Self {
            index,
            values: grid.values_csv(),
            scores: grid.scores_csv(),
        })
    }

    /// `<stem>__table_<index>__values.csv`
    pub fn values_file_name(&self, stem: &str) -> String {
        format!("{}__table_{}__values.csv", stem, self.index)
    }

    /// `<stem>__table_<index>__scores.csv`
    pub fn scores_file_name(&self, stem: &str) -> String {
        format!("{}__table_{}__scores.csv", stem, self.index)
    }
}

/// Reconstruct every table in the graph, numbered from 1 in discovery order.
pub fn render_tables(graph: &BlockGraph) -> Result<Vec<TableCsv>> {
    graph
        .tables()
        .enumerate()
        .map(|(i, table)| TableCsv::from_table(i + 1, table, graph))
        .collect()
}
