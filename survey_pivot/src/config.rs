// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The fixed 5-point satisfaction scale used by rating-style questions,
/// in scale order.
pub const SATISFACTION_SCALE: &[&str] = &["Very Poor", "Poor", "Average", "Good", "Very Good"];

/// The fixed 5-point knowledge-improvement scale used by the
/// program-experience questions, in scale order.
pub const KNOWLEDGE_SCALE: &[&str] = &[
    "I did not improve my knowledge",
    "I somewhat improved my knowledge",
    "I already knew this",
    "I improved my knowledge",
    "I hugely improved my knowledge",
];

/// An ordered set of allowed answer categories for a rating-style question.
///
/// The ordering is contractual: chart axis order, color mapping and the
/// cumulative series all depend on it. Categories are always addressed by
/// name, never by raw column position.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Vocabulary {
    categories: Vec<String>,
}

impl Vocabulary {
    pub fn new(categories: &[&str]) -> Vocabulary {
        Vocabulary {
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// The satisfaction scale (Very Poor .. Very Good).
    pub fn satisfaction() -> Vocabulary {
        Vocabulary::new(SATISFACTION_SCALE)
    }

    /// The knowledge-improvement scale.
    pub fn knowledge() -> Vocabulary {
        Vocabulary::new(KNOWLEDGE_SCALE)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Position of a category in scale order, if it belongs to this
    /// vocabulary.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.position(category).is_some()
    }
}

/// Category colors for the satisfaction scale, in scale order. Passed as a
/// value to whatever renders the tables; there is no shared color state.
pub fn satisfaction_palette() -> Vec<(String, String)> {
    let colors = ["red", "orange", "lightgrey", "lightblue", "green"];
    SATISFACTION_SCALE
        .iter()
        .zip(colors.iter())
        .map(|(cat, col)| (cat.to_string(), col.to_string()))
        .collect()
}

/// Category colors for the knowledge-improvement scale, in scale order.
pub fn knowledge_palette() -> Vec<(String, String)> {
    let colors = ["orange", "yellow", "lightgrey", "lightgreen", "green"];
    KNOWLEDGE_SCALE
        .iter()
        .zip(colors.iter())
        .map(|(cat, col)| (cat.to_string(), col.to_string()))
        .collect()
}

/// One respondent's answers, aligned with the question columns of the table
/// that owns the row. A missing answer is `None` and never reaches the
/// tabulation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseRow {
    pub student_id: String,
    pub answers: Vec<Option<String>>,
}

/// A wide canonical response table: one row per respondent, one column per
/// question. Column names are expected to be canonical identifiers already
/// (the readers in the command line interface take care of that).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseTable {
    /// Name of the respondent identifier column (`Students_Id` for the
    /// survey exports).
    pub id_column: String,
    pub questions: Vec<String>,
    pub rows: Vec<ResponseRow>,
}

impl ResponseTable {
    /// All answers recorded under one question column, missing cells
    /// included. An unknown column is an explicit error, not an empty list.
    pub fn column(&self, question: &str) -> Result<Vec<Option<String>>, TallyError> {
        let idx = self
            .questions
            .iter()
            .position(|q| q == question)
            .ok_or_else(|| TallyError::QuestionNotFound(question.to_string()))?;
        Ok(self
            .rows
            .iter()
            .map(|r| r.answers.get(idx).cloned().flatten())
            .collect())
    }
}

/// One long-form record: a single non-missing answer by one respondent.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseRecord {
    pub student_id: String,
    pub question: String,
    pub answer: String,
}

// ******** Output data structures *********

/// One pivot row: a question and its per-category counts, in the order of
/// the vocabulary of the table that owns the row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FrequencyRow {
    pub variable: String,
    pub counts: Vec<u64>,
}

impl FrequencyRow {
    /// Number of respondents recorded for this question.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// A per-question frequency-count table with a fixed, ordered category set.
///
/// Every category of the vocabulary is present in every row, zero-filled
/// when unobserved. Row order is grouping order over the input records;
/// callers that need a particular sort ask for it explicitly.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FrequencyTable {
    pub vocabulary: Vocabulary,
    pub rows: Vec<FrequencyRow>,
}

/// Errors raised by the tabulation pipeline.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyError {
    /// The table has no question columns.
    EmptyTable,
    /// A row does not line up with the question columns.
    ColumnMismatch { expected: usize, found: usize },
    /// The requested question is not present.
    QuestionNotFound(String),
    /// The requested category is not part of the vocabulary.
    UnknownCategory(String),
    /// A relative series was requested for a question with no recorded
    /// answers.
    NoRespondents(String),
}

impl Error for TallyError {}

impl Display for TallyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyError::EmptyTable => write!(f, "response table has no question columns"),
            TallyError::ColumnMismatch { expected, found } => {
                write!(f, "row has {} answers but the table has {} questions", found, expected)
            }
            TallyError::QuestionNotFound(q) => write!(f, "question not found: {}", q),
            TallyError::UnknownCategory(c) => write!(f, "category not in the vocabulary: {}", c),
            TallyError::NoRespondents(q) => write!(f, "no recorded answers for question: {}", q),
        }
    }
}
