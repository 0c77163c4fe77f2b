//! Dense variable numbering and enumerated assignments

use crate::model::{Label, Valuation};
use rustc_hash::FxHashMap;
use std::fmt;

/// Interns variable labels to dense indices in first-seen order
#[derive(Debug, Clone)]
pub struct VariableIndex<V: Label> {
    index: FxHashMap<V, usize>,
    labels: Vec<V>,
}

impl<V: Label> Default for VariableIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Label> VariableIndex<V> {
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            labels: Vec::new(),
        }
    }

    /// Index of `label`, allocating the next one if unseen
    pub fn get_or_insert(&mut self, label: &V) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.labels.len();
        self.index.insert(label.clone(), idx);
        self.labels.push(label.clone());
        idx
    }

    pub fn index_of(&self, label: &V) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn label(&self, idx: usize) -> Option<&V> {
        self.labels.get(idx)
    }

    /// Labels in index order
    pub fn labels(&self) -> &[V] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Mask selecting variable `idx` inside an assignment encoding
    ///
    /// The first variable is the most significant bit, so ascending encodings
    /// enumerate assignments in lexicographic order of their value strings.
    pub(crate) fn mask(&self, idx: usize) -> u64 {
        1u64 << (self.labels.len() - 1 - idx)
    }
}

/// One assignment of every solver variable, encoded as an integer
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a, V: Label> {
    variables: &'a VariableIndex<V>,
    encoding: u64,
}

impl<'a, V: Label> Assignment<'a, V> {
    pub(crate) fn new(variables: &'a VariableIndex<V>, encoding: u64) -> Self {
        Self {
            variables,
            encoding,
        }
    }

    pub fn encoding(&self) -> u64 {
        self.encoding
    }

    /// Value of the variable with dense index `idx`
    pub fn value_at(&self, idx: usize) -> u8 {
        u8::from(self.encoding & self.variables.mask(idx) != 0)
    }

    /// Values in dense index order
    pub fn bits(&self) -> Vec<u8> {
        (0..self.variables.len()).map(|idx| self.value_at(idx)).collect()
    }

    /// Variables set to 1
    pub fn active(&self) -> impl Iterator<Item = &'a V> + '_ {
        self.variables
            .labels()
            .iter()
            .enumerate()
            .filter(move |&(idx, _)| self.value_at(idx) == 1)
            .map(|(_, label)| label)
    }
}

impl<V: Label> Valuation<V> for Assignment<'_, V> {
    fn value(&self, var: &V) -> u8 {
        self.variables
            .index_of(var)
            .map(|idx| self.value_at(idx))
            .unwrap_or(0)
    }
}

impl<V: Label> fmt::Display for Assignment<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(labels: &[&'static str]) -> VariableIndex<&'static str> {
        let mut index = VariableIndex::new();
        for label in labels {
            index.get_or_insert(label);
        }
        index
    }

    #[test]
    fn test_interning() {
        let mut idx = VariableIndex::new();
        let a1 = idx.get_or_insert(&"A");
        let b = idx.get_or_insert(&"B");
        let a2 = idx.get_or_insert(&"A");

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.label(b), Some(&"B"));
    }

    #[test]
    fn test_first_variable_is_most_significant() {
        let idx = index(&["A", "B", "C"]);
        let assignment = Assignment::new(&idx, 0b100);

        assert_eq!(assignment.bits(), vec![1, 0, 0]);
        assert_eq!(assignment.value(&"A"), 1);
        assert_eq!(assignment.value(&"C"), 0);
        assert_eq!(assignment.to_string(), "100");
    }

    #[test]
    fn test_unknown_variables_read_as_zero() {
        let idx = index(&["A"]);
        let assignment = Assignment::new(&idx, 1);

        assert_eq!(assignment.value(&"Z"), 0);
    }

    #[test]
    fn test_active() {
        let idx = index(&["A", "B", "C"]);
        let assignment = Assignment::new(&idx, 0b011);
        let active: Vec<_> = assignment.active().copied().collect();

        assert_eq!(active, vec!["B", "C"]);
    }
}
