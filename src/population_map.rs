//! Ordered ARGB → pixel count map.
//!
//! Iteration follows first insertion. Scoring breaks ties and the quantizers
//! emit results in this order, so it has to be stable across runs.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationMap {
    entries: Vec<(u32, usize)>,
    positions: HashMap<u32, usize>,
}

impl PopulationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Adds `count` to `argb`, appending it if unseen.
    pub fn add(&mut self, argb: u32, count: usize) {
        match self.positions.get(&argb) {
            Some(&position) => self.entries[position].1 += count,
            None => {
                self.positions.insert(argb, self.entries.len());
                self.entries.push((argb, count));
            }
        }
    }

    pub fn increment(&mut self, argb: u32) {
        self.add(argb, 1);
    }

    /// Inserts `argb` only if absent. Returns whether it was inserted.
    pub fn insert_first(&mut self, argb: u32, count: usize) -> bool {
        if self.positions.contains_key(&argb) {
            return false;
        }
        self.positions.insert(argb, self.entries.len());
        self.entries.push((argb, count));
        true
    }

    pub fn get(&self, argb: u32) -> Option<usize> {
        self.positions.get(&argb).map(|&position| self.entries[position].1)
    }

    pub fn contains(&self, argb: u32) -> bool {
        self.positions.contains_key(&argb)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(argb, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn colors(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|&(argb, _)| argb)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, count)| count).sum()
    }
}

impl FromIterator<(u32, usize)> for PopulationMap {
    fn from_iter<I: IntoIterator<Item = (u32, usize)>>(iter: I) -> Self {
        let mut map = PopulationMap::new();
        for (argb, count) in iter {
            map.add(argb, count);
        }
        map
    }
}

impl<'a> IntoIterator for &'a PopulationMap {
    type Item = (u32, usize);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (u32, usize)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}
