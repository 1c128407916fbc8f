//! Per-column prefix sums over item slots via a Fenwick tree.
//!
//! A "slot" is one item's height plus the trailing gap; the offset of
//! item *k* in a column is the sum of the slots before it. The tree
//! answers offset and point queries in O(log n), hit-testing by vertical
//! offset in O(log² n).

/// Fenwick-backed cumulative slot heights for one column.
///
/// 1-indexed internally, 0-indexed API. Append-only within a layout
/// pass; a new pass builds a fresh index.
#[derive(Debug, Clone, Default)]
pub struct OffsetIndex {
    tree: Vec<isize>,
    slots: Vec<usize>,
}

impl OffsetIndex {
    /// Create an index with pre-allocated backing storage.
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Append an item slot (height plus trailing gap).
    pub fn push(&mut self, slot: usize) {
        let idx = self.slots.len();
        self.slots.push(slot);

        if self.slots.len() > self.tree.len() {
            // A grown tree cannot be patched in place: nodes past the
            // old length must cover contributions already recorded
            // below them. Rebuild from the raw slots.
            self.tree = vec![0; self.tree.len().max(1) * 2];
            for (i, &s) in self.slots.iter().enumerate() {
                fenwick::array::update(&mut self.tree, i, s as isize);
            }
        } else {
            fenwick::array::update(&mut self.tree, idx, slot as isize);
        }
    }

    /// Vertical offset of item `index`: the cumulative slots before it.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn offset_of(&self, index: usize) -> usize {
        assert!(
            index < self.slots.len(),
            "index {} out of bounds (len: {})",
            index,
            self.slots.len()
        );
        if index == 0 {
            0
        } else {
            self.prefix_inclusive(index - 1)
        }
    }

    /// Total cumulative height of all slots.
    pub fn total(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.prefix_inclusive(self.slots.len() - 1)
        }
    }

    /// Index of the item whose slot contains the given vertical offset.
    ///
    /// Item *i* covers `[offset_of(i), offset_of(i) + slot_i)`. Returns
    /// `None` when `offset >= total()` or the column is empty.
    pub fn item_at(&self, offset: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        // Binary search for the first index whose inclusive prefix
        // exceeds the offset.
        let mut left = 0;
        let mut right = self.slots.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_inclusive(mid) > offset {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.slots.len()).then_some(left)
    }

    /// Number of item slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no slots have been pushed.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn prefix_inclusive(&self, index: usize) -> usize {
        let sum = fenwick::array::prefix_sum(&self.tree, index);
        sum.max(0) as usize
    }
}
