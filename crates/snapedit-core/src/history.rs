//! Bounded undo/redo history.
//!
//! A linear list of immutable snapshots with a movable cursor. Committing
//! while the cursor is behind the newest entry discards the redo branch.
//! When the list grows past its capacity the oldest snapshot is evicted and
//! can no longer be reached by `undo`.
//!
//! Snapshots are `Arc`-shared so restoring one is a reference-count bump
//! rather than a pixel copy.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::decode::PixelBuffer;

/// Default number of snapshots kept.
pub const DEFAULT_CAPACITY: usize = 20;

/// Snapshot history for one loaded image.
///
/// Never empty: it is created with the freshly loaded image as entry 0.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Arc<PixelBuffer>>,
    index: usize,
    capacity: usize,
}

impl History {
    /// Start a history whose first entry is `initial`.
    ///
    /// A `capacity` of zero is treated as one.
    pub fn new(initial: Arc<PixelBuffer>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            capacity,
        }
    }

    /// Record `snapshot` as the newest entry and move the cursor to it.
    pub fn commit(&mut self, snapshot: Arc<PixelBuffer>) {
        let discarded = self.entries.len() - (self.index + 1);
        if discarded > 0 {
            self.entries.truncate(self.index + 1);
            tracing::debug!(discarded, "discarded redo entries");
        }

        self.entries.push_back(snapshot);

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            tracing::debug!(capacity = self.capacity, "evicted oldest history entry");
        }

        self.index = self.entries.len() - 1;
    }

    /// Step back one entry, returning the snapshot now under the cursor.
    pub fn undo(&mut self) -> Option<Arc<PixelBuffer>> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(Arc::clone(&self.entries[self.index]))
    }

    /// Step forward one entry, returning the snapshot now under the cursor.
    pub fn redo(&mut self) -> Option<Arc<PixelBuffer>> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(Arc::clone(&self.entries[self.index]))
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &Arc<PixelBuffer> {
        &self.entries[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
