use std::collections::HashSet;

use crate::types::TokenSequence;

/// Jaccard similarity in percent over the unique tokens of each side.
///
/// Order and repetition are ignored. Two empty sets score 100, exactly one
/// empty set scores 0.
pub fn jaccard_similarity(reference: &TokenSequence, hypothesis: &TokenSequence) -> f64 {
    let ref_set: HashSet<&str> = reference.tokens.iter().map(String::as_str).collect();
    let hyp_set: HashSet<&str> = hypothesis.tokens.iter().map(String::as_str).collect();

    match (ref_set.is_empty(), hyp_set.is_empty()) {
        (true, true) => return 100.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let intersection = ref_set.intersection(&hyp_set).count();
    let union = ref_set.len() + hyp_set.len() - intersection;
    intersection as f64 / union as f64 * 100.0
}
