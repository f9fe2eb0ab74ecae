use crate::types::TokenSequence;

/// Word-level Levenshtein distance between `reference` and `hypothesis`.
///
/// Substitution, insertion and deletion all cost 1. The full
/// `(|ref|+1) x (|hyp|+1)` matrix is filled row-major; no banding.
pub fn edit_distance<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> usize {
    let r_len = reference.len();
    let h_len = hypothesis.len();
    let width = h_len + 1;
    let mut d = vec![0usize; (r_len + 1) * width];

    for i in 0..=r_len {
        d[i * width] = i;
    }
    for j in 0..=h_len {
        d[j] = j;
    }

    for i in 1..=r_len {
        let row = i * width;
        let prev_row = (i - 1) * width;
        for j in 1..=h_len {
            d[row + j] = if reference[i - 1] == hypothesis[j - 1] {
                d[prev_row + j - 1]
            } else {
                let substitution = d[prev_row + j - 1];
                let insertion = d[row + j - 1];
                let deletion = d[prev_row + j];
                1 + substitution.min(insertion).min(deletion)
            };
        }
    }

    d[r_len * width + h_len]
}

/// Word error rate in percent, capped at 100.
///
/// An empty reference has no classical error rate: it scores 0 against an
/// empty hypothesis and 100 against anything else.
pub fn word_error_rate(reference: &TokenSequence, hypothesis: &TokenSequence) -> f64 {
    if reference.is_empty() {
        return if hypothesis.is_empty() { 0.0 } else { 100.0 };
    }

    let distance = edit_distance(reference.as_slice(), hypothesis.as_slice());
    let wer = distance as f64 / reference.len() as f64 * 100.0;
    wer.min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::tokenization::tokenize;

    fn wer(reference: &str, hypothesis: &str) -> f64 {
        word_error_rate(&tokenize(reference), &tokenize(hypothesis))
    }

    #[test]
    fn distance_of_empty_sides_is_other_length() {
        let empty: [&str; 0] = [];
        assert_eq!(edit_distance(&empty, &empty), 0);
        assert_eq!(edit_distance(&["a", "b"], &empty), 2);
        assert_eq!(edit_distance(&empty, &["a", "b", "c"]), 3);
    }

    #[test]
    fn distance_counts_each_edit_kind() {
        // substitution
        assert_eq!(edit_distance(&["a", "b", "c"], &["a", "x", "c"]), 1);
        // deletion from the hypothesis side
        assert_eq!(edit_distance(&["a", "b", "c"], &["a", "c"]), 1);
        // insertion
        assert_eq!(edit_distance(&["a", "c"], &["a", "b", "c"]), 1);
        // kitten -> sitting at the character level
        let kitten: Vec<char> = "kitten".chars().collect();
        let sitting: Vec<char> = "sitting".chars().collect();
        assert_eq!(edit_distance(&kitten, &sitting), 3);
    }

    #[test]
    fn identical_sequences_have_zero_wer() {
        assert_eq!(wer("hello darkness my old friend", "Hello darkness, my old friend!"), 0.0);
    }

    #[test]
    fn one_deletion_in_six_words() {
        let value = wer("Hello world this is a test", "Hello world this is test");
        assert!((value - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn empty_reference_sentinels() {
        assert_eq!(wer("", ""), 0.0);
        assert_eq!(wer("", "anything at all"), 100.0);
        assert_eq!(wer("...", "!!!"), 0.0);
    }

    #[test]
    fn empty_hypothesis_is_full_error() {
        assert_eq!(wer("one two three", ""), 100.0);
    }

    #[test]
    fn long_hypothesis_is_capped_at_one_hundred() {
        // distance 5 against a 1-word reference would be 500%
        assert_eq!(wer("yeah", "oh yeah yeah yeah yeah yeah"), 100.0);
    }

    #[test]
    fn wer_is_not_symmetric() {
        let forward = wer("a b", "a b c d");
        let backward = wer("a b c d", "a b");
        assert_eq!(forward, 100.0);
        assert_eq!(backward, 50.0);
    }
}
