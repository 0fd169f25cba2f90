// Header rules and reader for the pre-program survey export.

use std::fs::File;
use std::io::Read;

use snafu::prelude::*;

use survey_pivot::ResponseTable;

use crate::dashboard::io_common::{apply_rules, read_wide_export, RewriteRule, SCRUB_RULES};
use crate::dashboard::*;

/// Phrase rules for the pre-program export, applied before the generic
/// scrub. The first rule strips the lead-in of the skills matrix; the other
/// two match full question texts and must therefore run before any
/// punctuation is removed.
pub const PRE_PHRASE_RULES: &[RewriteRule] = &[
    (
        "Before the EIT program, how would you rate your skills and knowledge in these areas?",
        "",
    ),
    (
        "How would you rate your proficiency in the following soft skills?",
        "Soft_Skills",
    ),
    (
        "How would you evaluate the following components of the program?",
        "Program_Evaluation",
    ),
];

/// Canonical form of a raw pre-program header.
pub fn normalize_pre_header(raw: &str) -> String {
    let stripped = apply_rules(raw, PRE_PHRASE_RULES);
    apply_rules(&stripped, SCRUB_RULES)
}

pub fn read_pre_program_export(path: &str) -> DashResult<ResponseTable> {
    let file = File::open(path).context(OpeningExportSnafu { path })?;
    read_pre_program_records(file, path)
}

/// Reader-based variant, used directly by the tests.
pub fn read_pre_program_records<R: Read>(reader: R, path: &str) -> DashResult<ResponseTable> {
    read_wide_export(reader, path, normalize_pre_header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::io_common::has_known_prefix;

    #[test]
    fn identifier_header() {
        assert_eq!(normalize_pre_header("Students Id"), "Students_Id");
    }

    #[test]
    fn skills_matrix_headers() {
        assert_eq!(
            normalize_pre_header(
                "Before the EIT program, how would you rate your skills and knowledge in these areas?[Business Model Canvas]"
            ),
            "Business_Model_Canvas"
        );
        assert_eq!(
            normalize_pre_header(
                "Before the EIT program, how would you rate your skills and knowledge in these areas?[Technology Data Analysis & Visualization]"
            ),
            "Technology_Data_Analysis_Visualization"
        );
        assert_eq!(
            normalize_pre_header(
                "Before the EIT program, how would you rate your skills and knowledge in these areas?[Communication (Public Speaking)]"
            ),
            "Communication_Public_Speaking"
        );
        assert_eq!(
            normalize_pre_header(
                "Before the EIT program, how would you rate your skills and knowledge in these areas?[Technology Problem-Solving]"
            ),
            "Technology_Problem_Solving"
        );
    }

    #[test]
    fn soft_skills_header() {
        assert_eq!(
            normalize_pre_header(
                "How would you rate your proficiency in the following soft skills? [Communication]"
            ),
            "Soft_Skills_Communication"
        );
    }

    #[test]
    fn program_evaluation_header() {
        assert_eq!(
            normalize_pre_header(
                "How would you evaluate the following components of the program? [Quality of Content]"
            ),
            "Program_Evaluation_Quality_of_Content"
        );
    }

    #[test]
    fn unknown_header_passes_through_generic_rules() {
        // No phrase rule matches: only punctuation and whitespace cleanup
        // applies, and the name is accepted as-is.
        assert_eq!(
            normalize_pre_header("If any, what further assistance would you have preferred?"),
            "If_any_what_further_assistance_would_you_have_preferred"
        );
    }

    #[test]
    fn known_headers_land_on_known_prefixes() {
        let raws = [
            "Students Id",
            "Before the EIT program, how would you rate your skills and knowledge in these areas?[Business Model Canvas]",
            "How would you rate your proficiency in the following soft skills? [Teamwork]",
            "How would you evaluate the following components of the program? [Mentorship]",
            "If any, what further assistance would you have preferred?",
        ];
        for raw in raws.iter() {
            assert!(has_known_prefix(&normalize_pre_header(raw)), "{}", raw);
        }
    }
}
