//! Ordered block collection with copy-on-write snapshots.
//!
//! Insertion order is z-order: later blocks draw on top and are hit-tested first.
//! Every mutation produces a new collection when a snapshot handed out by
//! [`BlockStore::snapshot`] is still alive, so observers never see a snapshot change.

use crate::types::Block;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by index-based store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The index does not refer to a block in the store
    #[error("block index {index} out of range (store holds {len} blocks)")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of blocks at the time of the request
        len: usize,
    },
}

/// Ordered collection of placed blocks.
#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    blocks: Arc<Vec<Block>>,
}

impl BlockStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if the store holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the block at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Iterates blocks in insertion (z-) order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Immutable snapshot of the current collection.
    ///
    /// Later mutations of the store never affect a snapshot already taken.
    pub fn snapshot(&self) -> Arc<Vec<Block>> {
        Arc::clone(&self.blocks)
    }

    /// Appends a block on top of all others and returns its index.
    pub fn append(&mut self, block: Block) -> usize {
        let blocks = Arc::make_mut(&mut self.blocks);
        blocks.push(block);
        blocks.len() - 1
    }

    /// Replaces the block at `index` with the result of `mutator` applied to a copy of it.
    pub fn update(
        &mut self,
        index: usize,
        mutator: impl FnOnce(&mut Block),
    ) -> Result<(), StoreError> {
        self.check_index(index)?;
        let mut block = self.blocks[index].clone();
        mutator(&mut block);
        Arc::make_mut(&mut self.blocks)[index] = block;
        Ok(())
    }

    /// Removes and returns the block at `index`; later blocks shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<Block, StoreError> {
        self.check_index(index)?;
        Ok(Arc::make_mut(&mut self.blocks).remove(index))
    }

    /// Keeps only the blocks for which `keep` returns true, preserving their order.
    ///
    /// Returns the number of blocks removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&Block) -> bool) -> usize {
        let before = self.blocks.len();
        let kept: Vec<Block> = self.blocks.iter().filter(|b| keep(b)).cloned().collect();
        let removed = before - kept.len();
        if removed > 0 {
            self.blocks = Arc::new(kept);
        }
        removed
    }

    /// Removes every block.
    pub fn clear(&mut self) {
        self.blocks = Arc::new(Vec::new());
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.blocks.len() {
            Ok(())
        } else {
            Err(StoreError::OutOfRange {
                index,
                len: self.blocks.len(),
            })
        }
    }
}
