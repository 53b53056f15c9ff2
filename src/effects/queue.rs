//! Effect queue with tombstoning removal.
//!
//! Squares and tokens that still have something to do after a placement are
//! attached here. A pass visits the live entries from the front, re-reading
//! the length on every step, so entries attached during the pass are visited
//! in that same pass.
//!
//! Passes nest: an effect may install a token, which starts a fresh pass
//! from index 0 before the outer pass continues.
//!
//! ## Removal during a pass
//!
//! While any pass is running, `detach` leaves a tombstone instead of
//! shifting the remaining entries, so the outer cursor never skips or repeats
//! an entry. Tombstones are compacted when the outermost pass ends.

use serde::{Deserialize, Serialize};

/// Ordered, re-entrant notification queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectQueue<T> {
    slots: Vec<Option<T>>,
    depth: u32,
}

impl<T> Default for EffectQueue<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            depth: 0,
        }
    }
}

impl<T: Copy + PartialEq> EffectQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` unless it is already attached.
    ///
    /// Returns `true` when the entry was appended.
    pub fn attach(&mut self, entry: T) -> bool {
        if self.contains(&entry) {
            return false;
        }
        self.slots.push(Some(entry));
        true
    }

    /// Remove `entry`, tombstoning its slot while a pass is running.
    ///
    /// Returns `true` when the entry was attached.
    pub fn detach(&mut self, entry: &T) -> bool {
        let Some(index) = self.slots.iter().position(|slot| slot.as_ref() == Some(entry)) else {
            return false;
        };
        if self.is_draining() {
            self.slots[index] = None;
        } else {
            self.slots.remove(index);
        }
        true
    }

    #[must_use]
    pub fn contains(&self, entry: &T) -> bool {
        self.slots.iter().any(|slot| slot.as_ref() == Some(entry))
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_draining(&self) -> bool {
        self.depth > 0
    }

    /// Live entries in order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Start a pass.
    pub fn begin_pass(&mut self) {
        self.depth += 1;
    }

    /// The slot at `index` during a pass.
    ///
    /// `None` past the end, `Some(None)` for a tombstone.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<Option<T>> {
        self.slots.get(index).copied()
    }

    /// Finish a pass, compacting tombstones once no pass is left running.
    pub fn end_pass(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.slots.retain(Option::is_some);
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.depth = 0;
    }
}
