//! Block types as delivered by the extraction service.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One node of the extraction graph.
///
/// Field names follow the service's wire format. Which optional fields are
/// present depends on [`BlockType`]; [`BlockGraph`](super::BlockGraph)
/// checks them once when the graph is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Unique identifier
    pub id: String,

    /// Node kind
    pub block_type: BlockType,

    /// Recognized text (words)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Checkbox state (selection elements)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<SelectionStatus>,

    /// 1-based row label (cells)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-based column label (cells)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Confidence score, 0 to 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Typed edges to other blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl Block {
    /// Create a block with no optional fields set.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: None,
            selection_status: None,
            row_index: None,
            column_index: None,
            confidence: None,
            relationships: Vec::new(),
        }
    }

    /// Create a WORD block.
    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(id, BlockType::Word)
        }
    }

    /// Create a SELECTION_ELEMENT block.
    pub fn selection(id: impl Into<String>, status: SelectionStatus) -> Self {
        Self {
            selection_status: Some(status),
            ..Self::new(id, BlockType::SelectionElement)
        }
    }

    /// Create a CELL block at the given position.
    pub fn cell(id: impl Into<String>, row: u32, column: u32, confidence: f64) -> Self {
        Self {
            row_index: Some(row),
            column_index: Some(column),
            confidence: Some(confidence),
            ..Self::new(id, BlockType::Cell)
        }
    }

    /// Create a TABLE block.
    pub fn table(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::Table)
    }

    /// Append a CHILD relationship and return self.
    pub fn with_children<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.relationships.push(Relationship {
            kind: RelationshipType::Child,
            ids: ids.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Whether the block has at least one CHILD relationship.
    pub fn has_children(&self) -> bool {
        self.relationships
            .iter()
            .any(|r| r.kind == RelationshipType::Child)
    }

    /// Child identifiers across all CHILD relationships, in service order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.kind == RelationshipType::Child)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    /// Word text, or an error if absent.
    pub fn word_text(&self) -> Result<&str> {
        self.text
            .as_deref()
            .ok_or_else(|| Error::malformed(&self.id, "WORD without Text"))
    }

    /// Selection state, or an error if absent.
    pub fn is_selected(&self) -> Result<bool> {
        self.selection_status
            .map(|s| s == SelectionStatus::Selected)
            .ok_or_else(|| Error::malformed(&self.id, "SELECTION_ELEMENT without SelectionStatus"))
    }

    /// `(row, column)` of a cell, or an error if either is absent.
    pub fn cell_position(&self) -> Result<(u32, u32)> {
        match (self.row_index, self.column_index) {
            (Some(row), Some(column)) => Ok((row, column)),
            (None, _) => Err(Error::malformed(&self.id, "CELL without RowIndex")),
            (_, None) => Err(Error::malformed(&self.id, "CELL without ColumnIndex")),
        }
    }

    /// Cell confidence, or an error if absent.
    pub fn cell_confidence(&self) -> Result<f64> {
        self.confidence
            .ok_or_else(|| Error::malformed(&self.id, "CELL without Confidence"))
    }

    /// Check that the fields required by this block's kind are present.
    pub fn validate(&self) -> Result<()> {
        match self.block_type {
            BlockType::Word => self.word_text().map(|_| ()),
            BlockType::SelectionElement => self.is_selected().map(|_| ()),
            BlockType::Cell => {
                self.cell_position()?;
                self.cell_confidence().map(|_| ())
            }
            BlockType::Table | BlockType::Other => Ok(()),
        }
    }
}

/// Kind of a block.
///
/// Kinds this crate does not consume (pages, lines, merged cells, ...)
/// decode as [`BlockType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    /// A recognized word
    Word,
    /// A checkbox or radio button
    SelectionElement,
    /// A table cell
    Cell,
    /// A detected table
    Table,
    /// Any other kind
    #[serde(other)]
    Other,
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BlockType::Word => "WORD",
            BlockType::SelectionElement => "SELECTION_ELEMENT",
            BlockType::Cell => "CELL",
            BlockType::Table => "TABLE",
            BlockType::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// State of a selection element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    /// Checked
    Selected,
    /// Unchecked
    NotSelected,
}

/// A typed edge list from one block to others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Edge type; only CHILD is consumed
    #[serde(rename = "Type")]
    pub kind: RelationshipType,

    /// Target identifiers in reading order
    #[serde(rename = "Ids", default)]
    pub ids: Vec<String>,
}

/// Type of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Parent to child
    Child,
    /// Any other edge (VALUE, MERGED_CELL, TITLE, ...)
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_cell() {
        let json = r#"{
            "Id": "c1",
            "BlockType": "CELL",
            "RowIndex": 2,
            "ColumnIndex": 3,
            "Confidence": 97.5,
            "Relationships": [
                {"Type": "CHILD", "Ids": ["w1", "w2"]},
                {"Type": "MERGED_CELL", "Ids": ["m1"]}
            ]
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.block_type, BlockType::Cell);
        assert_eq!(block.cell_position().unwrap(), (2, 3));
        assert_eq!(block.child_ids().collect::<Vec<_>>(), ["w1", "w2"]);
        assert_eq!(block.relationships[1].kind, RelationshipType::Other);
    }

    #[test]
    fn test_unknown_block_type() {
        let json = r#"{"Id": "p1", "BlockType": "PAGE"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.block_type, BlockType::Other);
        assert!(block.validate().is_ok());
        assert!(!block.has_children());
    }

    #[test]
    fn test_missing_id_fails() {
        let json = r#"{"BlockType": "WORD", "Text": "x"}"#;
        assert!(serde_json::from_str::<Block>(json).is_err());
    }

    #[test]
    fn test_validate_required_fields() {
        assert!(Block::new("w", BlockType::Word).validate().is_err());
        assert!(Block::new("s", BlockType::SelectionElement).validate().is_err());

        let mut cell = Block::cell("c", 1, 1, 90.0);
        cell.confidence = None;
        let err = cell.validate().unwrap_err();
        assert!(err.to_string().contains("Confidence"));

        let mut cell = Block::cell("c", 1, 1, 90.0);
        cell.column_index = None;
        assert!(cell.validate().is_err());
    }

    #[test]
    fn test_selection_state() {
        let checked = Block::selection("s1", SelectionStatus::Selected);
        let unchecked = Block::selection("s2", SelectionStatus::NotSelected);
        assert!(checked.is_selected().unwrap());
        assert!(!unchecked.is_selected().unwrap());

        let json = r#"{"Id": "s3", "BlockType": "SELECTION_ELEMENT", "SelectionStatus": "NOT_SELECTED"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert!(!block.is_selected().unwrap());
    }
}
