use crate::model::{Archetype, Question};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// The canonical, sorted list of traits every vector is indexed by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraitSet {
    names: Vec<String>,
}

impl TraitSet {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        Self {
            names: sorted.into_iter().collect(),
        }
    }

    /// Union of every trait named by any answer score or archetype fingerprint.
    pub fn discover(questions: &[Question], archetypes: &[Archetype]) -> Self {
        let from_answers = questions
            .iter()
            .flat_map(|q| q.answers.iter())
            .flat_map(|a| a.scores.keys());
        let from_archetypes = archetypes.iter().flat_map(|a| a.fingerprint.keys());
        Self::from_names(from_answers.chain(from_archetypes).cloned())
    }

    pub fn from_questions(questions: &[Question]) -> Self {
        Self::discover(questions, &[])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn index_of(&self, trait_name: &str) -> Option<usize> {
        self.names
            .binary_search_by(|n| n.as_str().cmp(trait_name))
            .ok()
    }

    pub fn zeros(&self) -> TraitVector {
        TraitVector::zeros(self.len())
    }
}

/// A dense vector over a [`TraitSet`]. Position `i` belongs to trait `i` of
/// the set it was created from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitVector {
    values: Vec<f64>,
}

impl TraitVector {
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> f64 {
        self.values.get(idx).copied().unwrap_or(0.0)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn add_at(&mut self, idx: usize, delta: f64) {
        if let Some(v) = self.values.get_mut(idx) {
            *v += delta;
        }
    }

    pub fn dot(&self, other: &TraitVector) -> f64 {
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(&self, other: &TraitVector) -> f64 {
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Trait name -> value, for display and serialization.
    pub fn to_map(&self, traits: &TraitSet) -> BTreeMap<String, f64> {
        traits
            .names()
            .iter()
            .cloned()
            .zip(self.values.iter().copied())
            .collect()
    }
}
