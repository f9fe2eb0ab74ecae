use std::fmt;

use serde::{Serialize, Serializer};

/// Case-folded, punctuation-stripped word unit.
pub type Token = String;

/// Ordered pair of adjacent tokens.
pub type Bigram<'a> = (&'a str, &'a str);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    pub tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Adjacent pairs in order; sequences shorter than two tokens have none.
    pub fn bigrams(&self) -> Vec<Bigram<'_>> {
        self.tokens
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
            .collect()
    }
}

/// Outcome of comparing one transcription against one reference.
///
/// Every percentage field lies in [0, 100]. Field names are part of the
/// serialized contract consumed by presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub wer: f64,
    pub bow_f1: f64,
    pub bigram_f1: f64,
    pub semantic_similarity: f64,
    pub overall_score: f64,
    pub detailed_analysis: String,
    pub word_count_ref: usize,
    pub word_count_hyp: usize,
}

impl ComparisonResult {
    pub fn grade(&self) -> Grade {
        Grade::from_score(self.overall_score)
    }

    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_score(self.overall_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    F,
}

impl Grade {
    /// All grades from best to worst.
    pub const ALL: [Grade; 12] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::F,
    ];

    // Lower bound (inclusive) for every grade except F, best first.
    const THRESHOLDS: [(f64, Grade); 11] = [
        (90.0, Grade::APlus),
        (85.0, Grade::A),
        (80.0, Grade::AMinus),
        (75.0, Grade::BPlus),
        (70.0, Grade::B),
        (65.0, Grade::BMinus),
        (60.0, Grade::CPlus),
        (55.0, Grade::C),
        (50.0, Grade::CMinus),
        (45.0, Grade::DPlus),
        (40.0, Grade::D),
    ];

    pub fn from_score(overall_score: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(floor, _)| overall_score >= *floor)
            .map(|&(_, grade)| grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Coarse encouragement bucket shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl PerformanceTier {
    pub fn from_score(overall_score: f64) -> Self {
        if overall_score >= 80.0 {
            Self::Excellent
        } else if overall_score >= 60.0 {
            Self::Good
        } else if overall_score >= 40.0 {
            Self::Fair
        } else {
            Self::NeedsPractice
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent performance!",
            Self::Good => "Good job!",
            Self::Fair => "Not bad, keep practicing!",
            Self::NeedsPractice => "Keep trying, you'll get better!",
        }
    }
}
