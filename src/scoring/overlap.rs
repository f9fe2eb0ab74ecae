use std::collections::HashMap;
use std::hash::Hash;

use crate::types::TokenSequence;

/// Unit of comparison for overlap F1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NgramOrder {
    Unigram,
    Bigram,
}

/// Multiset overlap statistics between a reference and a hypothesis bag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapCounts {
    pub intersection: usize,
    pub reference_total: usize,
    pub hypothesis_total: usize,
}

impl OverlapCounts {
    pub fn precision(&self) -> f64 {
        if self.hypothesis_total == 0 {
            0.0
        } else {
            self.intersection as f64 / self.hypothesis_total as f64
        }
    }

    pub fn recall(&self) -> f64 {
        if self.reference_total == 0 {
            0.0
        } else {
            self.intersection as f64 / self.reference_total as f64
        }
    }

    /// Harmonic mean of precision and recall in [0, 1].
    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            return 0.0;
        }
        2.0 * precision * recall / (precision + recall)
    }
}

/// Occurrence count per distinct item.
pub fn count_items<T, I>(items: I) -> HashMap<T, usize>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Size of the multiset intersection: each shared item is credited up to the
/// smaller of its two multiplicities.
pub fn multiset_intersection<T: Eq + Hash>(
    reference: &HashMap<T, usize>,
    hypothesis: &HashMap<T, usize>,
) -> usize {
    // Walk the smaller map; the sum is symmetric.
    let (small, large) = if reference.len() <= hypothesis.len() {
        (reference, hypothesis)
    } else {
        (hypothesis, reference)
    };
    small
        .iter()
        .filter_map(|(item, &count)| large.get(item).map(|&other| count.min(other)))
        .sum()
}

/// Overlap counts for two bags of arbitrary items.
pub fn overlap_counts<T, R, H>(reference: R, hypothesis: H) -> OverlapCounts
where
    T: Eq + Hash,
    R: IntoIterator<Item = T>,
    H: IntoIterator<Item = T>,
{
    let ref_counts = count_items(reference);
    let hyp_counts = count_items(hypothesis);
    OverlapCounts {
        intersection: multiset_intersection(&ref_counts, &hyp_counts),
        reference_total: ref_counts.values().sum(),
        hypothesis_total: hyp_counts.values().sum(),
    }
}

/// Multiset F1 in percent over unigrams or bigrams.
///
/// Two empty bags are a vacuous perfect match (100); exactly one empty bag
/// scores 0.
pub fn overlap_f1(reference: &TokenSequence, hypothesis: &TokenSequence, order: NgramOrder) -> f64 {
    let counts = match order {
        NgramOrder::Unigram => overlap_counts(
            reference.tokens.iter().map(String::as_str),
            hypothesis.tokens.iter().map(String::as_str),
        ),
        NgramOrder::Bigram => overlap_counts(reference.bigrams(), hypothesis.bigrams()),
    };

    match (counts.reference_total, counts.hypothesis_total) {
        (0, 0) => 100.0,
        (0, _) | (_, 0) => 0.0,
        _ => counts.f1() * 100.0,
    }
}

pub fn bag_of_words_f1(reference: &TokenSequence, hypothesis: &TokenSequence) -> f64 {
    overlap_f1(reference, hypothesis, NgramOrder::Unigram)
}

pub fn bigram_f1(reference: &TokenSequence, hypothesis: &TokenSequence) -> f64 {
    overlap_f1(reference, hypothesis, NgramOrder::Bigram)
}
