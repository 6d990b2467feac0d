//! Integration tests reconstructing tables from service-shaped JSON.

use untable::analysis::load_pages;
use untable::{tables_from_pages, BlockGraph, BlockType, Error};

/// Two-page response: a cost breakdown table split across pages, with the
/// page and line blocks the service also returns.
const RESPONSE: &str = r#"[
  {
    "JobStatus": "SUCCEEDED",
    "DocumentMetadata": {"Pages": 1},
    "NextToken": "page-2",
    "Blocks": [
      {"Id": "page", "BlockType": "PAGE", "Relationships": [{"Type": "CHILD", "Ids": ["line1", "table"]}]},
      {"Id": "line1", "BlockType": "LINE", "Text": "Table 3. Construction Cost Breakdown",
       "Relationships": [{"Type": "CHILD", "Ids": ["w-title"]}]},
      {"Id": "w-title", "BlockType": "WORD", "Text": "Table"},
      {"Id": "w1", "BlockType": "WORD", "Text": "Framing"},
      {"Id": "w2", "BlockType": "WORD", "Text": "$"},
      {"Id": "w3", "BlockType": "WORD", "Text": "68,585"},
      {"Id": "w4", "BlockType": "WORD", "Text": "16.6%"},
      {"Id": "w5", "BlockType": "WORD", "Text": "Roof"},
      {"Id": "w6", "BlockType": "WORD", "Text": "\"shingles\""},
      {"Id": "s1", "BlockType": "SELECTION_ELEMENT", "SelectionStatus": "SELECTED"},
      {"Id": "s2", "BlockType": "SELECTION_ELEMENT", "SelectionStatus": "NOT_SELECTED"}
    ]
  },
  {
    "JobStatus": "SUCCEEDED",
    "Blocks": [
      {"Id": "c11", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1, "Confidence": 95.0,
       "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]},
      {"Id": "c12", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 2, "Confidence": 93.12109375,
       "Relationships": [{"Type": "CHILD", "Ids": ["w2", "w3"]}]},
      {"Id": "c13", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 3, "Confidence": 90.5,
       "Relationships": [{"Type": "CHILD", "Ids": ["w4"]}]},
      {"Id": "c21", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 1, "Confidence": 88.0,
       "Relationships": [{"Type": "CHILD", "Ids": ["s1", "w5", "w6"]}]},
      {"Id": "c22", "BlockType": "CELL", "RowIndex": 2, "ColumnIndex": 2, "Confidence": 87.25,
       "Relationships": [{"Type": "CHILD", "Ids": ["s2"]}]},
      {"Id": "m1", "BlockType": "MERGED_CELL", "RowIndex": 1, "ColumnIndex": 1,
       "Relationships": [{"Type": "CHILD", "Ids": ["c11"]}]},
      {"Id": "table", "BlockType": "TABLE",
       "Relationships": [
         {"Type": "CHILD", "Ids": ["c11", "c12", "c13", "c21", "c22"]},
         {"Type": "MERGED_CELL", "Ids": ["m1"]}
       ]},
      {"Id": "empty", "BlockType": "TABLE"}
    ]
  }
]"#;

#[test]
fn test_reconstruct_cost_breakdown() {
    let pages = load_pages(RESPONSE).unwrap();
    let tables = tables_from_pages(pages).unwrap();

    assert_eq!(tables.len(), 2);
    let breakdown = &tables[0];
    assert_eq!(breakdown.index, 1);
    assert_eq!(
        breakdown.values,
        concat!(
            "\"Framing \",\"$ \"\"68,585\"\" \",\"16.6% \"\n",
            "\"X Roof \"\"shingles\"\" \",\"\"\n",
        )
    );
    // last row has two cells, so scores wrap every two values
    assert_eq!(
        breakdown.scores,
        "95.0,93.12109375\n90.5,88.0\n87.25,"
    );

    let empty = &tables[1];
    assert_eq!(empty.index, 2);
    assert_eq!(empty.values, "");
    assert_eq!(empty.scores, "");
}

#[test]
fn test_reconstruction_is_deterministic() {
    let first = tables_from_pages(load_pages(RESPONSE).unwrap()).unwrap();
    let second = tables_from_pages(load_pages(RESPONSE).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_graph_counts() {
    let blocks = load_pages(RESPONSE)
        .unwrap()
        .into_iter()
        .flat_map(|page| page.blocks)
        .collect();
    let graph = BlockGraph::from_blocks(blocks).unwrap();

    assert_eq!(graph.table_count(), 2);
    assert_eq!(graph.count_of(BlockType::Cell), 5);
    assert_eq!(graph.count_of(BlockType::SelectionElement), 2);
    // PAGE, LINE and MERGED_CELL
    assert_eq!(graph.count_of(BlockType::Other), 3);
}

#[test]
fn test_cell_without_row_index_fails_fast() {
    let response = r#"{
        "JobStatus": "SUCCEEDED",
        "Blocks": [
            {"Id": "c1", "BlockType": "CELL", "ColumnIndex": 1, "Confidence": 90.0},
            {"Id": "t1", "BlockType": "TABLE", "Relationships": [{"Type": "CHILD", "Ids": ["c1"]}]}
        ]
    }"#;
    let result = tables_from_pages(load_pages(response).unwrap());
    match result {
        Err(Error::MalformedBlock { id, reason }) => {
            assert_eq!(id, "c1");
            assert!(reason.contains("RowIndex"));
        }
        other => panic!("expected malformed block, got {:?}", other),
    }
}

#[test]
fn test_block_without_type_is_rejected() {
    let response = r#"{"JobStatus": "SUCCEEDED", "Blocks": [{"Id": "x"}]}"#;
    assert!(matches!(load_pages(response), Err(Error::Json(_))));
}
