use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Count table with an explicit default: absent keys count as 0. Built
/// during training pass 1, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountTable<K: Eq + Hash> {
    counts: HashMap<K, u64>,
}

impl<K: Eq + Hash> CountTable<K> {
    pub fn new() -> Self {
        CountTable {
            counts: HashMap::new(),
        }
    }

    pub fn increment(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Absent keys are 0 by contract, never an error.
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.contains_key(key)
    }

    /// Number of distinct keys, i.e. the vocabulary size for token keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Probability/weight table derived in training pass 2. Lookups declare
/// their own default for absent keys instead of relying on ambient
/// defaulting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable<K: Eq + Hash> {
    scores: HashMap<K, f64>,
}

impl<K: Eq + Hash> ScoreTable<K> {
    pub fn new() -> Self {
        ScoreTable {
            scores: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: K, value: f64) {
        self.scores.insert(key, value);
    }

    pub fn get_or<Q>(&self, key: &Q, default: f64) -> f64
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.scores.get(key).copied().unwrap_or(default)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.scores.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.scores.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
