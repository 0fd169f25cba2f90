mod config;
use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;

pub mod builder;
pub mod manual;
pub mod quick_start;

// **** Reshaping ****

/// Reshapes a wide canonical table into long form.
///
/// One record is produced per (respondent, question) pair with a present
/// answer. Missing answers produce no record at all, so they can never be
/// counted as a category downstream. The identifier column is the pivot
/// anchor and never appears as a question.
pub fn melt(table: &ResponseTable) -> Vec<ResponseRecord> {
    let mut records: Vec<ResponseRecord> = Vec::new();
    for row in table.rows.iter() {
        for (idx, question) in table.questions.iter().enumerate() {
            if let Some(Some(answer)) = row.answers.get(idx) {
                records.push(ResponseRecord {
                    student_id: row.student_id.clone(),
                    question: question.clone(),
                    answer: answer.clone(),
                });
            }
        }
    }
    debug!(
        "melt: {:?} records from {:?} respondents over {:?} questions",
        records.len(),
        table.rows.len(),
        table.questions.len()
    );
    records
}

// **** Tabulation ****

/// Tabulates long-form records into a frequency table for the given
/// vocabulary.
///
/// Respondents are counted at most once per (question, answer) group. Every
/// category of the vocabulary appears in the output, zero-filled when
/// unobserved, in vocabulary order. Answers outside the vocabulary are not
/// carried into the table. Row order is grouping order over the input
/// records; no sort is applied here.
pub fn tabulate(records: &[ResponseRecord], vocabulary: &Vocabulary) -> FrequencyTable {
    info!(
        "tabulate: processing {:?} records over {:?} categories",
        records.len(),
        vocabulary.len()
    );
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<HashSet<String>>> = HashMap::new();
    for r in records.iter() {
        let entry = groups.entry(r.question.clone()).or_insert_with(|| {
            order.push(r.question.clone());
            vec![HashSet::new(); vocabulary.len()]
        });
        match vocabulary.position(&r.answer) {
            Some(pos) => {
                entry[pos].insert(r.student_id.clone());
            }
            None => {
                debug!(
                    "tabulate: answer {:?} for {:?} is outside the vocabulary",
                    r.answer, r.question
                );
            }
        }
    }

    let rows: Vec<FrequencyRow> = order
        .iter()
        .map(|q| FrequencyRow {
            variable: q.clone(),
            counts: groups[q].iter().map(|s| s.len() as u64).collect(),
        })
        .collect();
    FrequencyTable {
        vocabulary: vocabulary.clone(),
        rows,
    }
}

/// Melts a canonical response table and tabulates it in one pass.
pub fn pivot_table(
    table: &ResponseTable,
    vocabulary: &Vocabulary,
) -> Result<FrequencyTable, TallyError> {
    if table.questions.is_empty() {
        return Err(TallyError::EmptyTable);
    }
    let records = melt(table);
    Ok(tabulate(&records, vocabulary))
}

impl FrequencyTable {
    /// Section subset: the rows whose question starts with the given
    /// prefix. Rows and columns are carried over unchanged.
    pub fn section(&self, prefix: &str) -> FrequencyTable {
        FrequencyTable {
            vocabulary: self.vocabulary.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| r.variable.starts_with(prefix))
                .cloned()
                .collect(),
        }
    }

    /// Looks up a single question row. A name absent from the table is an
    /// explicit error, not an empty result.
    pub fn row(&self, question: &str) -> Result<&FrequencyRow, TallyError> {
        self.rows
            .iter()
            .find(|r| r.variable == question)
            .ok_or_else(|| TallyError::QuestionNotFound(question.to_string()))
    }

    /// Single-cell lookup by question name and category name.
    pub fn count_for(&self, question: &str, category: &str) -> Result<u64, TallyError> {
        let row = self.row(question)?;
        let pos = self
            .vocabulary
            .position(category)
            .ok_or_else(|| TallyError::UnknownCategory(category.to_string()))?;
        Ok(row.counts[pos])
    }

    /// Rows sorted by the summed counts of the given categories,
    /// descending. Tabulation itself never sorts; consumers opt in here.
    pub fn sorted_descending_by(&self, categories: &[&str]) -> Result<FrequencyTable, TallyError> {
        let mut positions: Vec<usize> = Vec::new();
        for c in categories.iter() {
            positions.push(
                self.vocabulary
                    .position(c)
                    .ok_or_else(|| TallyError::UnknownCategory(c.to_string()))?,
            );
        }
        let mut rows = self.rows.clone();
        rows.sort_by_key(|r| std::cmp::Reverse(positions.iter().map(|&i| r.counts[i]).sum::<u64>()));
        Ok(FrequencyTable {
            vocabulary: self.vocabulary.clone(),
            rows,
        })
    }
}

// **** Derived series ****

/// Running sum of a row's counts, in vocabulary order. Non-decreasing; the
/// final value is the row total.
pub fn cumulative_frequency(row: &FrequencyRow) -> Vec<u64> {
    let mut acc: u64 = 0;
    row.counts
        .iter()
        .map(|&c| {
            acc += c;
            acc
        })
        .collect()
}

/// Cumulative percentage of the running sum against the row total.
///
/// A row with no recorded answers has no defined percentage and is rejected
/// with [`TallyError::NoRespondents`] instead of dividing by zero.
pub fn cumulative_percentage(row: &FrequencyRow) -> Result<Vec<f64>, TallyError> {
    let cumulative = cumulative_frequency(row);
    let total = match cumulative.last() {
        Some(&t) if t > 0 => t,
        _ => return Err(TallyError::NoRespondents(row.variable.clone())),
    };
    Ok(cumulative
        .iter()
        .map(|&c| 100.0 * c as f64 / total as f64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    fn satisfaction_table() -> ResponseTable {
        let mut builder = Builder::new("Students_Id")
            .unwrap()
            .questions(&["Business_Accounting".to_string(), "Technology_Coding".to_string()])
            .unwrap();
        builder
            .add_row_simple("1", &["Good".to_string(), "Average".to_string()])
            .unwrap();
        builder
            .add_row_simple("2", &["Good".to_string(), "".to_string()])
            .unwrap();
        builder
            .add_row_simple("3", &["Very Poor".to_string(), "Good".to_string()])
            .unwrap();
        builder
            .add_row_simple("4", &["".to_string(), "Good".to_string()])
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn melt_drops_missing_answers() {
        let table = satisfaction_table();
        let records = melt(&table);
        assert_eq!(records.len(), 6);
        assert!(records
            .iter()
            .all(|r| r.question != "Students_Id" && !r.answer.is_empty()));
        // Respondent 4 answered nothing under the business question.
        assert!(!records
            .iter()
            .any(|r| r.student_id == "4" && r.question == "Business_Accounting"));
    }

    #[test]
    fn tabulate_completes_all_categories() {
        let table = satisfaction_table();
        let pivot = pivot_table(&table, &Vocabulary::satisfaction()).unwrap();
        assert_eq!(pivot.rows.len(), 2);
        for row in pivot.rows.iter() {
            assert_eq!(row.counts.len(), SATISFACTION_SCALE.len());
        }
        // Grouping order follows the first appearance in the records.
        assert_eq!(pivot.rows[0].variable, "Business_Accounting");
        assert_eq!(pivot.rows[1].variable, "Technology_Coding");
    }

    #[test]
    fn concrete_satisfaction_scenario() {
        // students 1 and 2 answered Good, student 3 Very Poor, student 4
        // did not answer.
        let table = satisfaction_table();
        let pivot = pivot_table(&table, &Vocabulary::satisfaction()).unwrap();
        let row = pivot.row("Business_Accounting").unwrap();
        assert_eq!(row.counts, vec![1, 0, 0, 2, 0]);
        assert_eq!(row.total(), 3);
        assert_eq!(cumulative_frequency(row), vec![1, 1, 1, 3, 3]);
        let pct = cumulative_percentage(row).unwrap();
        let rounded: Vec<f64> = pct.iter().map(|p| (p * 10.0).round() / 10.0).collect();
        assert_eq!(rounded, vec![33.3, 33.3, 33.3, 100.0, 100.0]);
    }

    #[test]
    fn count_conservation() {
        let table = satisfaction_table();
        let records = melt(&table);
        let pivot = pivot_table(&table, &Vocabulary::satisfaction()).unwrap();
        for row in pivot.rows.iter() {
            let expected = records.iter().filter(|r| r.question == row.variable).count() as u64;
            assert_eq!(row.total(), expected);
        }
    }

    #[test]
    fn cumulative_frequency_is_monotone() {
        let table = satisfaction_table();
        let pivot = pivot_table(&table, &Vocabulary::satisfaction()).unwrap();
        for row in pivot.rows.iter() {
            let cumulative = cumulative_frequency(row);
            assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(*cumulative.last().unwrap(), row.total());
        }
    }

    #[test]
    fn knowledge_vocabulary_zero_fills() {
        let records = vec![ResponseRecord {
            student_id: "1".to_string(),
            question: "Program_Experience_Technology_Data_Analytics".to_string(),
            answer: "I improved my knowledge".to_string(),
        }];
        let pivot = tabulate(&records, &Vocabulary::knowledge());
        let row = pivot
            .row("Program_Experience_Technology_Data_Analytics")
            .unwrap();
        assert_eq!(row.counts, vec![0, 0, 0, 1, 0]);
        assert_eq!(
            pivot
                .count_for(
                    "Program_Experience_Technology_Data_Analytics",
                    "I did not improve my knowledge"
                )
                .unwrap(),
            0
        );
    }

    #[test]
    fn out_of_vocabulary_answers_are_not_carried() {
        let records = vec![
            ResponseRecord {
                student_id: "1".to_string(),
                question: "Business_Accounting".to_string(),
                answer: "Good".to_string(),
            },
            ResponseRecord {
                student_id: "2".to_string(),
                question: "Business_Accounting".to_string(),
                answer: "No opinion".to_string(),
            },
        ];
        let pivot = tabulate(&records, &Vocabulary::satisfaction());
        let row = pivot.row("Business_Accounting").unwrap();
        assert_eq!(row.total(), 1);
    }

    #[test]
    fn duplicate_student_counts_once_per_group() {
        let record = ResponseRecord {
            student_id: "1".to_string(),
            question: "Business_Accounting".to_string(),
            answer: "Good".to_string(),
        };
        let pivot = tabulate(&[record.clone(), record], &Vocabulary::satisfaction());
        assert_eq!(pivot.count_for("Business_Accounting", "Good").unwrap(), 1);
    }

    #[test]
    fn section_filter_preserves_rows() {
        let table = satisfaction_table();
        let pivot = pivot_table(&table, &Vocabulary::satisfaction()).unwrap();
        let business = pivot.section("Business");
        assert_eq!(business.rows.len(), 1);
        assert_eq!(business.rows[0], *pivot.row("Business_Accounting").unwrap());
        assert_eq!(business.vocabulary, pivot.vocabulary);
        assert!(pivot.section("Soft_Skill").rows.is_empty());
    }

    #[test]
    fn row_lookup_fails_explicitly() {
        let table = satisfaction_table();
        let pivot = pivot_table(&table, &Vocabulary::satisfaction()).unwrap();
        assert_eq!(
            pivot.row("Business_Marketing"),
            Err(TallyError::QuestionNotFound("Business_Marketing".to_string()))
        );
        assert_eq!(
            pivot.count_for("Business_Accounting", "Fine"),
            Err(TallyError::UnknownCategory("Fine".to_string()))
        );
    }

    #[test]
    fn zero_respondents_has_no_percentage() {
        let records = vec![ResponseRecord {
            student_id: "1".to_string(),
            question: "Business_Accounting".to_string(),
            answer: "No opinion".to_string(),
        }];
        let pivot = tabulate(&records, &Vocabulary::satisfaction());
        let row = pivot.row("Business_Accounting").unwrap();
        assert_eq!(cumulative_frequency(row), vec![0, 0, 0, 0, 0]);
        assert_eq!(
            cumulative_percentage(row),
            Err(TallyError::NoRespondents("Business_Accounting".to_string()))
        );
    }

    #[test]
    fn explicit_sort_by_named_categories() {
        let table = satisfaction_table();
        let pivot = pivot_table(&table, &Vocabulary::satisfaction()).unwrap();
        let sorted = pivot
            .sorted_descending_by(&["Average", "Good", "Very Good"])
            .unwrap();
        assert_eq!(sorted.rows[0].variable, "Technology_Coding");
        assert_eq!(
            pivot.sorted_descending_by(&["Great"]),
            Err(TallyError::UnknownCategory("Great".to_string()))
        );
    }

    #[test]
    fn builder_rejects_misaligned_rows() {
        let mut builder = Builder::new("Students_Id")
            .unwrap()
            .questions(&["Business_Accounting".to_string()])
            .unwrap();
        assert_eq!(
            builder.add_row_simple("1", &["Good".to_string(), "Poor".to_string()]),
            Err(TallyError::ColumnMismatch {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn palettes_follow_scale_order() {
        let palette = satisfaction_palette();
        let categories: Vec<&str> = palette.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(categories, SATISFACTION_SCALE);
        assert_eq!(knowledge_palette().len(), KNOWLEDGE_SCALE.len());
    }
}
