//! Cell text assembly.

use crate::error::Result;
use crate::model::{Block, BlockGraph, BlockType};

/// Marker emitted for a checked selection element.
pub const SELECTED_MARKER: &str = "X";

/// Reconstruct a cell's display text from its word and selection children.
///
/// Every token is followed by a single space, so non-empty output always
/// ends with one. Children are visited in service order.
pub fn cell_text(cell: &Block, graph: &BlockGraph) -> Result<String> {
    let mut text = String::new();
    if !cell.has_children() {
        return Ok(text);
    }

    for child_id in cell.child_ids() {
        let child = graph.get(child_id)?;
        match child.block_type {
            BlockType::Word => {
                push_word(&mut text, child.word_text()?);
            }
            BlockType::SelectionElement => {
                if child.is_selected()? {
                    text.push_str(SELECTED_MARKER);
                    text.push(' ');
                }
            }
            _ => {}
        }
    }

    Ok(text)
}

fn push_word(text: &mut String, word: &str) {
    if is_grouped_number(word) {
        text.push('"');
        text.push_str(word);
        text.push('"');
    } else {
        text.push_str(word);
    }
    text.push(' ');
}

/// `1,234` yes; `1234` and `abc,def` no.
///
/// Digits are any Unicode numeric character (`Nd`, `Nl`, `No`). CJK ideographs
/// that only carry a numeric value, such as `一`, are not numeric here.
pub fn is_grouped_number(word: &str) -> bool {
    if !word.contains(',') {
        return false;
    }
    let mut digits = word.chars().filter(|&c| c != ',').peekable();
    digits.peek().is_some() && digits.all(char::is_numeric)
}
