pub use crate::config::*;

/// A builder for assembling a wide response table.
///
/// Using the builder should be considered by the readers of raw survey
/// exports.
///
/// ```
/// pub use survey_pivot::builder::Builder;
/// # use survey_pivot::TallyError;
///
/// let mut builder = Builder::new("Students_Id")?
///     .questions(&["Business_Accounting".to_string()])?;
///
/// builder.add_row_simple("1", &["Good".to_string()])?;
/// builder.add_row_simple("2", &["".to_string()])?;
///
/// let table = builder.build()?;
/// assert_eq!(table.rows.len(), 2);
/// # Ok::<(), TallyError>(())
/// ```
pub struct Builder {
    pub(crate) _id_column: String,
    pub(crate) _questions: Option<Vec<String>>,
    pub(crate) _rows: Vec<ResponseRow>,
}

impl Builder {
    pub fn new(id_column: &str) -> Result<Builder, TallyError> {
        Ok(Builder {
            _id_column: id_column.to_string(),
            _questions: None,
            _rows: Vec::new(),
        })
    }

    /// Declares the question columns. Rows added afterwards must line up
    /// with these columns.
    pub fn questions(self, names: &[String]) -> Result<Builder, TallyError> {
        Ok(Builder {
            _id_column: self._id_column,
            _questions: Some(names.to_vec()),
            _rows: Vec::new(),
        })
    }

    /// Adds a respondent's answers. Blank answers are treated as missing.
    ///
    /// It is the simplest use case for most cases.
    pub fn add_row_simple(&mut self, student_id: &str, answers: &[String]) -> Result<(), TallyError> {
        let answers: Vec<Option<String>> = answers
            .iter()
            .map(|s| if s.is_empty() { None } else { Some(s.clone()) })
            .collect();
        self.add_row(student_id, &answers)
    }

    /// Adds a respondent's answers with missing cells already marked.
    pub fn add_row(&mut self, student_id: &str, answers: &[Option<String>]) -> Result<(), TallyError> {
        match &self._questions {
            None => Err(TallyError::EmptyTable),
            Some(qs) if qs.len() != answers.len() => Err(TallyError::ColumnMismatch {
                expected: qs.len(),
                found: answers.len(),
            }),
            Some(_) => {
                self._rows.push(ResponseRow {
                    student_id: student_id.to_string(),
                    answers: answers.to_vec(),
                });
                Ok(())
            }
        }
    }

    pub fn build(self) -> Result<ResponseTable, TallyError> {
        let questions = self._questions.ok_or(TallyError::EmptyTable)?;
        Ok(ResponseTable {
            id_column: self._id_column,
            questions,
            rows: self._rows,
        })
    }
}
