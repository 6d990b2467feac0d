//! Identifier-indexed view over a job's blocks.

use super::{Block, BlockType};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// All blocks of one job, indexed by identifier.
///
/// Children are referenced by identifier and resolved through [`BlockGraph::get`].
/// The graph is validated when built, so rendering never meets a block with
/// missing fields or a dangling child reference.
///
/// TABLE blocks are also kept by occurrence, so two tables that share an
/// identifier each render their own cells.
#[derive(Debug, Clone, Default)]
pub struct BlockGraph {
    blocks: HashMap<String, Block>,
    tables: Vec<Block>,
}

impl BlockGraph {
    /// Build a graph from the flattened block list of a finished job.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        let mut graph = Self {
            blocks: HashMap::with_capacity(blocks.len()),
            tables: Vec::new(),
        };

        for block in blocks {
            block.validate()?;
            if block.block_type == BlockType::Table {
                graph.tables.push(block.clone());
            }
            graph.blocks.insert(block.id.clone(), block);
        }

        graph.check_references()?;
        log::debug!(
            "BlockGraph: {} blocks, {} tables",
            graph.blocks.len(),
            graph.tables.len()
        );
        Ok(graph)
    }

    /// Every CHILD reference that rendering follows must resolve.
    fn check_references(&self) -> Result<()> {
        for block in self.blocks.values().chain(&self.tables) {
            if !matches!(block.block_type, BlockType::Table | BlockType::Cell) {
                continue;
            }
            for child in block.child_ids() {
                if !self.blocks.contains_key(child) {
                    return Err(Error::MissingBlock(child.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Resolve an identifier.
    pub fn get(&self, id: &str) -> Result<&Block> {
        self.blocks
            .get(id)
            .ok_or_else(|| Error::MissingBlock(id.to_string()))
    }

    /// TABLE blocks in discovery order.
    pub fn tables(&self) -> impl Iterator<Item = &Block> {
        self.tables.iter()
    }

    /// Number of TABLE blocks.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of distinct blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the graph has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Count blocks of one kind.
    pub fn count_of(&self, block_type: BlockType) -> usize {
        self.blocks
            .values()
            .filter(|b| b.block_type == block_type)
            .count()
    }
}
