fn word_accuracy_clause(wer: f64) -> &'static str {
    if wer <= 20.0 {
        "Excellent word accuracy"
    } else if wer <= 40.0 {
        "Good word accuracy"
    } else if wer <= 60.0 {
        "Moderate word accuracy"
    } else {
        "Low word accuracy"
    }
}

fn vocabulary_clause(bow_f1: f64) -> &'static str {
    if bow_f1 >= 80.0 {
        "strong vocabulary match"
    } else if bow_f1 >= 60.0 {
        "good vocabulary match"
    } else if bow_f1 >= 40.0 {
        "moderate vocabulary match"
    } else {
        "weak vocabulary match"
    }
}

fn phrase_clause(bigram_f1: f64) -> &'static str {
    if bigram_f1 >= 70.0 {
        "good phrase structure"
    } else if bigram_f1 >= 40.0 {
        "moderate phrase structure"
    } else {
        "weak phrase structure"
    }
}

/// Short qualitative summary built from three independent threshold ladders.
///
/// Only the first character of the joined text is upper-cased.
pub fn narrate(wer: f64, bow_f1: f64, bigram_f1: f64) -> String {
    let joined = [
        word_accuracy_clause(wer),
        vocabulary_clause(bow_f1),
        phrase_clause(bigram_f1),
    ]
    .join(", ");
    capitalize_first(&joined)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
