//! QUBO models: linear and quadratic coefficient tables
//!
//! Tables keep insertion order next to a hash index, the same way a symbol
//! table keeps labels next to their interned ids. Insertion order matters:
//! the brute-force solver numbers variables in first-seen order.

use super::variable::Label;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors raised while importing or exporting models
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Read access to a full variable assignment
pub trait Valuation<V> {
    /// Value (0 or 1) assigned to `var`; variables not covered read as 0
    fn value(&self, var: &V) -> u8;
}

impl<V: Eq + Hash> Valuation<V> for FxHashMap<V, u8> {
    fn value(&self, var: &V) -> u8 {
        self.get(var).copied().unwrap_or(0)
    }
}

/// Unordered pair of variables
///
/// Equality, hashing and ordering ignore orientation, so `(a, b)` and
/// `(b, a)` name the same table entry. The orientation the pair was created
/// with is kept for `first`/`second`, which fixes first-seen numbering.
#[derive(Debug, Clone)]
pub struct VarPair<V>(V, V);

impl<V: Ord> VarPair<V> {
    pub fn new(a: V, b: V) -> Self {
        VarPair(a, b)
    }

    /// Orientation-free key: smaller label first
    fn key(&self) -> (&V, &V) {
        if self.0 <= self.1 {
            (&self.0, &self.1)
        } else {
            (&self.1, &self.0)
        }
    }
}

impl<V> VarPair<V> {
    /// Left label as created
    pub fn first(&self) -> &V {
        &self.0
    }

    /// Right label as created
    pub fn second(&self) -> &V {
        &self.1
    }
}

impl<V: Ord> PartialEq for VarPair<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<V: Ord> Eq for VarPair<V> {}

impl<V: Ord + Hash> Hash for VarPair<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<V: Ord> PartialOrd for VarPair<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord> Ord for VarPair<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl<V: Serialize> Serialize for VarPair<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (&self.0, &self.1).serialize(serializer)
    }
}

impl<'de, V> Deserialize<'de> for VarPair<V>
where
    V: Ord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (a, b) = <(V, V)>::deserialize(deserializer)?;
        Ok(VarPair::new(a, b))
    }
}

/// Coefficient table with stable insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable<K: Label> {
    index: FxHashMap<K, usize>,
    entries: Vec<(K, f64)>,
}

impl<K: Label> Default for CoefficientTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Label> CoefficientTable<K> {
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
        }
    }

    /// Overwrite the coefficient for `key`, keeping its original position
    pub fn set(&mut self, key: K, coeff: f64) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = coeff,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, coeff));
            }
        }
    }

    /// Add `coeff` to the coefficient for `key`
    pub fn add(&mut self, key: K, coeff: f64) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += coeff,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, coeff));
            }
        }
    }

    /// Coefficient for `key`, 0 when absent
    pub fn get(&self, key: &K) -> f64 {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.entries.iter().map(|(k, c)| (k, *c))
    }
}

// Serialized as an ordered list of `[key, coeff]` entries so the insertion
// order survives a round trip.
impl<K: Label + Serialize> Serialize for CoefficientTable<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de, K> Deserialize<'de> for CoefficientTable<K>
where
    K: Label + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(K, f64)>::deserialize(deserializer)?;
        let mut table = CoefficientTable::new();
        for (key, coeff) in entries {
            // repeated keys accumulate
            table.add(key, coeff);
        }
        Ok(table)
    }
}

/// Quadratic pseudo-boolean energy function
///
/// Energy of an assignment `x` is
/// `Σ linear[v]·x[v] + Σ quadratic[(u, v)]·x[u]·x[v]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Label + Serialize",
    deserialize = "V: Label + Deserialize<'de>"
))]
pub struct QuboModel<V: Label> {
    /// Per-variable coefficients
    pub linear: CoefficientTable<V>,

    /// Pairwise coefficients keyed by unordered pair
    pub quadratic: CoefficientTable<VarPair<V>>,
}

impl<V: Label> Default for QuboModel<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Label> QuboModel<V> {
    /// Create an empty model
    pub fn new() -> Self {
        Self {
            linear: CoefficientTable::new(),
            quadratic: CoefficientTable::new(),
        }
    }

    /// Builder-style linear term
    pub fn with_linear(mut self, var: impl Into<V>, coeff: f64) -> Self {
        self.add_linear(var.into(), coeff);
        self
    }

    /// Builder-style quadratic term
    pub fn with_quadratic(mut self, a: impl Into<V>, b: impl Into<V>, coeff: f64) -> Self {
        self.add_quadratic(a.into(), b.into(), coeff);
        self
    }

    pub fn add_linear(&mut self, var: V, coeff: f64) {
        self.linear.add(var, coeff);
    }

    pub fn set_linear(&mut self, var: V, coeff: f64) {
        self.linear.set(var, coeff);
    }

    pub fn add_quadratic(&mut self, a: V, b: V, coeff: f64) {
        self.quadratic.add(VarPair::new(a, b), coeff);
    }

    pub fn set_quadratic(&mut self, a: V, b: V, coeff: f64) {
        self.quadratic.set(VarPair::new(a, b), coeff);
    }

    /// Linear coefficient of `var` (0 when absent)
    pub fn linear_coeff(&self, var: &V) -> f64 {
        self.linear.get(var)
    }

    /// Quadratic coefficient of the unordered pair `{a, b}` (0 when absent)
    pub fn quadratic_coeff(&self, a: &V, b: &V) -> f64 {
        self.quadratic.get(&VarPair::new(a.clone(), b.clone()))
    }

    /// Distinct variables in first-seen order: linear keys, then quadratic
    /// keys left to right
    pub fn variables(&self) -> Vec<V> {
        let mut seen: FxHashSet<&V> = FxHashSet::default();
        let mut ordered = Vec::new();

        let quadratic_vars = self
            .quadratic
            .iter()
            .flat_map(|(pair, _)| [pair.first(), pair.second()]);

        for var in self.linear.iter().map(|(v, _)| v).chain(quadratic_vars) {
            if seen.insert(var) {
                ordered.push(var.clone());
            }
        }

        ordered
    }

    /// Energy of an assignment
    pub fn energy<A: Valuation<V>>(&self, assignment: &A) -> f64 {
        let mut energy = 0.0;

        for (var, coeff) in self.linear.iter() {
            if assignment.value(var) == 1 {
                energy += coeff;
            }
        }

        for (pair, coeff) in self.quadratic.iter() {
            if assignment.value(pair.first()) == 1 && assignment.value(pair.second()) == 1 {
                energy += coeff;
            }
        }

        energy
    }

    /// Relabel every variable, e.g. to export a typed model with string names
    ///
    /// Labels that collide after mapping have their coefficients summed.
    pub fn map_labels<W: Label, F>(&self, mut f: F) -> QuboModel<W>
    where
        F: FnMut(&V) -> W,
    {
        let mut mapped = QuboModel::new();

        for (var, coeff) in self.linear.iter() {
            mapped.add_linear(f(var), coeff);
        }

        for (pair, coeff) in self.quadratic.iter() {
            let a = f(pair.first());
            let b = f(pair.second());
            mapped.add_quadratic(a, b, coeff);
        }

        mapped
    }
}

impl<V: Label + Serialize> QuboModel<V> {
    /// Serialize to JSON string
    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to compact JSON string
    pub fn to_json_compact(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<V> QuboModel<V>
where
    V: Label + for<'de> Deserialize<'de>,
{
    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
