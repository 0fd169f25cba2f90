// Polarity classification for open-ended survey responses.

use std::collections::HashSet;

use log::debug;

/// Tone buckets for the open-ended view.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

/// Scores free text on a polarity scale from -1.0 (negative) to 1.0
/// (positive). The dashboard only relies on the sign of the score, so any
/// scoring backend can be plugged in here.
pub trait SentimentScorer {
    fn polarity(&self, text: &str) -> f64;
}

/// Tone of a polarity score: strictly positive scores are positive,
/// strictly negative scores are negative, exactly zero is neutral.
pub fn classify(score: f64) -> Tone {
    if score > 0.0 {
        Tone::Positive
    } else if score < 0.0 {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "amazing",
    "best",
    "clear",
    "engaging",
    "enjoy",
    "enjoyed",
    "excellent",
    "good",
    "great",
    "happy",
    "helpful",
    "interesting",
    "love",
    "loved",
    "supportive",
    "useful",
    "well",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "boring",
    "confusing",
    "difficult",
    "disappointing",
    "hard",
    "hate",
    "lacking",
    "late",
    "poor",
    "rushed",
    "slow",
    "unclear",
    "worst",
];

/// A small bundled word-list scorer.
///
/// The score is the difference between positive and negative token hits
/// over the number of hits, which keeps it in [-1.0, 1.0]. Text with no
/// scored token is neutral.
pub struct WordListScorer {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
}

impl WordListScorer {
    pub fn new() -> WordListScorer {
        WordListScorer {
            positive: POSITIVE_WORDS.iter().cloned().collect(),
            negative: NEGATIVE_WORDS.iter().cloned().collect(),
        }
    }
}

impl Default for WordListScorer {
    fn default() -> WordListScorer {
        WordListScorer::new()
    }
}

impl SentimentScorer for WordListScorer {
    fn polarity(&self, text: &str) -> f64 {
        let mut positives: u32 = 0;
        let mut negatives: u32 = 0;
        for token in text
            .split(|c: char| !c.is_alphabetic())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            if self.positive.contains(token.as_str()) {
                positives += 1;
            } else if self.negative.contains(token.as_str()) {
                negatives += 1;
            }
        }
        let hits = positives + negatives;
        if hits == 0 {
            return 0.0;
        }
        (positives as f64 - negatives as f64) / hits as f64
    }
}

/// One scored free-text response.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoredResponse {
    pub text: String,
    pub score: f64,
}

/// The open-ended responses split by tone.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct TonePartition {
    pub positive: Vec<ScoredResponse>,
    pub neutral: Vec<ScoredResponse>,
    pub negative: Vec<ScoredResponse>,
}

/// Splits the non-blank responses of a free-text column into tone buckets.
/// Missing and blank responses are skipped entirely: absence is not a
/// response.
pub fn partition_responses(
    scorer: &impl SentimentScorer,
    responses: &[Option<String>],
) -> TonePartition {
    let mut partition = TonePartition::default();
    for response in responses.iter() {
        let text = match response {
            Some(t) if !t.trim().is_empty() => t.clone(),
            _ => continue,
        };
        let score = scorer.polarity(&text);
        debug!("partition_responses: score {:?} for {:?}", score, text);
        let scored = ScoredResponse { text, score };
        match classify(score) {
            Tone::Positive => partition.positive.push(scored),
            Tone::Neutral => partition.neutral.push(scored),
            Tone::Negative => partition.negative.push(scored),
        }
    }
    partition
}
