//! Rendering module for turning detected tables into CSV text.

mod cell;
mod table;

pub use cell::{cell_text, is_grouped_number, SELECTED_MARKER};
pub use table::{format_score, render_tables, TableCsv, TableGrid};
