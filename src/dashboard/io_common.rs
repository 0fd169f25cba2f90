// Primitives shared by the survey export readers.

use std::io::Read;

use csv::ReaderBuilder;
use log::{debug, warn};
use snafu::prelude::*;

use survey_pivot::builder::Builder;
use survey_pivot::ResponseTable;

use crate::dashboard::*;

/// An ordered literal rewrite rule. Rules are applied front to back; later
/// rules may match forms produced by earlier ones.
pub type RewriteRule = (&'static str, &'static str);

/// Canonical name of the respondent identifier column.
pub const STUDENTS_ID: &str = "Students_Id";

/// Generic punctuation and whitespace cleanup, applied to every header
/// after the phase-specific phrase rules. The space collapses run longest
/// first, before the final space-to-underscore pass.
pub const SCRUB_RULES: &[RewriteRule] = &[
    ("[", ""),
    ("]", ""),
    (")", ""),
    ("(", ""),
    (",", ""),
    ("-", "_"),
    ("?", ""),
    ("&", ""),
    ("    ", " "),
    ("   ", " "),
    ("  ", " "),
    (" ", "_"),
];

/// Section prefixes a canonical name is expected to start with.
pub const SECTION_PREFIXES: &[&str] = &[
    "Business",
    "Technology",
    "Communication",
    "Marketing_Communications",
    "Soft_Skill",
    "Program_Evaluation",
    "Program_Aspect_Rating",
    "Program_Experience",
    "Teaching_Fellow_Evaluation",
    "Leading_Fellow_Evaluation",
    "If_any",
    STUDENTS_ID,
];

/// Applies an ordered list of literal substring replacements.
pub fn apply_rules(name: &str, rules: &[RewriteRule]) -> String {
    let mut out = name.to_string();
    for (pattern, replacement) in rules.iter() {
        out = out.replace(pattern, replacement);
    }
    out
}

/// True when the canonical name starts with a recognized section prefix.
pub fn has_known_prefix(canonical: &str) -> bool {
    SECTION_PREFIXES.iter().any(|p| canonical.starts_with(p))
}

/// Reads a wide survey export, rewriting each header through `normalize`.
///
/// Empty cells become missing answers. A header that normalizes to a name
/// with no recognized section prefix is kept (the tabulator will treat it
/// as a question of its own) but logged, since it usually means the source
/// question wording drifted.
pub fn read_wide_export<R: Read>(
    reader: R,
    path: &str,
    normalize: impl Fn(&str) -> String,
) -> DashResult<ResponseTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr.headers().context(ReadingCsvSnafu { path })?.clone();
    let canonical: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
    debug!("read_wide_export: canonical headers: {:?}", canonical);

    for name in canonical.iter() {
        if !has_known_prefix(name) {
            warn!(
                "read_wide_export: header {:?} has no recognized section prefix",
                name
            );
        }
    }

    let id_idx = canonical
        .iter()
        .position(|c| c == STUDENTS_ID)
        .context(MissingIdentifierSnafu {
            path,
            expected: STUDENTS_ID,
        })?;

    let question_idxs: Vec<usize> = (0..canonical.len()).filter(|&i| i != id_idx).collect();
    let questions: Vec<String> = question_idxs.iter().map(|&i| canonical[i].clone()).collect();

    let mut builder = Builder::new(STUDENTS_ID)
        .context(TabulationSnafu {})?
        .questions(&questions)
        .context(TabulationSnafu {})?;

    for (idx, record) in rdr.records().enumerate() {
        // The header occupies the first line of the file.
        let lineno = idx + 2;
        let record = record.context(CsvRecordParseSnafu { path, lineno })?;
        let student_id = match record.get(id_idx) {
            Some(s) => s.to_string(),
            None => whatever!("Record {} of {} is too short", lineno, path),
        };
        let answers: Vec<Option<String>> = question_idxs
            .iter()
            .map(|&i| match record.get(i) {
                Some(s) if !s.is_empty() => Some(s.to_string()),
                _ => None,
            })
            .collect();
        builder
            .add_row(&student_id, &answers)
            .context(TabulationSnafu {})?;
    }

    let table = builder.build().context(TabulationSnafu {})?;
    debug!(
        "read_wide_export: {:?}: {:?} respondents, {:?} questions",
        path,
        table.rows.len(),
        table.questions.len()
    );
    Ok(table)
}
