// Header rules and reader for the mid-program survey export.

use std::fs::File;
use std::io::Read;

use snafu::prelude::*;

use survey_pivot::ResponseTable;

use crate::dashboard::io_common::{apply_rules, read_wide_export, RewriteRule, SCRUB_RULES};
use crate::dashboard::*;

/// Phrase rules for the mid-program export, applied before the generic
/// scrub. The identifier rewrites come first so that both raw spellings
/// land on the canonical name.
pub const MID_PHRASE_RULES: &[RewriteRule] = &[
    ("Student_Id", "Students_Id"),
    ("Student Id", "Students_Id"),
    (
        " Evaluate your proficiency and understanding in the area of",
        "",
    ),
    (
        "Have you experienced an improvement in your skills and knowledge after participating in the sessions on",
        " Program Experience ",
    ),
    (
        "How would you assess your comprehension of the following soft skills at this point?",
        "Soft_Skills",
    ),
    (
        "How would you evaluate the teaching fellows who have been conducting the sessions so far?",
        "Teaching Fellow Evaluation",
    ),
    (
        "How would you assess the teaching fellows leading the sessions so far?",
        "Leading Fellow Evaluation",
    ),
    (
        "Up to this point, how would you rate the following aspects of the EIT Program",
        "Program Aspect Rating",
    ),
];

/// Repairs applied after the scrub. The first three relocate the
/// `Program_Experience` marker to prefix position; the last three fix
/// malformed aspect-rating tokens left by the generic rules. The underscore
/// insertions must run before the `Rate` upgrade.
pub const MID_REPAIR_RULES: &[RewriteRule] = &[
    ("Business_Program_Experience", "Program_Experience_Business"),
    (
        "Marketing_Communications_Program_Experience",
        "Program_Experience_Marketing_Communications",
    ),
    ("Technology_Program_Experience", "Program_Experience_Technology"),
    (
        "Program_Aspect_RatePeer_Learning_and_Collaboration",
        "Program_Aspect_Rate_Peer_Learning_and_Collaboration",
    ),
    ("RatingPeer", "Rating_Peer"),
    ("Program_Aspect_Rate", "Program_Aspect_Rating"),
];

/// Canonical form of a raw mid-program header.
pub fn normalize_mid_header(raw: &str) -> String {
    let stripped = apply_rules(raw, MID_PHRASE_RULES);
    let scrubbed = apply_rules(&stripped, SCRUB_RULES);
    apply_rules(&scrubbed, MID_REPAIR_RULES)
}

pub fn read_mid_program_export(path: &str) -> DashResult<ResponseTable> {
    let file = File::open(path).context(OpeningExportSnafu { path })?;
    read_mid_program_records(file, path)
}

/// Reader-based variant, used directly by the tests.
pub fn read_mid_program_records<R: Read>(reader: R, path: &str) -> DashResult<ResponseTable> {
    read_wide_export(reader, path, normalize_mid_header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::io_common::has_known_prefix;

    #[test]
    fn identifier_headers() {
        assert_eq!(normalize_mid_header("Student_Id"), "Students_Id");
        assert_eq!(normalize_mid_header("Student Id"), "Students_Id");
    }

    #[test]
    fn proficiency_headers() {
        assert_eq!(
            normalize_mid_header(
                "Business Evaluate your proficiency and understanding in the area of [Financial Literacy]"
            ),
            "Business_Financial_Literacy"
        );
        assert_eq!(
            normalize_mid_header(
                "Technology Evaluate your proficiency and understanding in the area of [Web Development]"
            ),
            "Technology_Web_Development"
        );
        assert_eq!(
            normalize_mid_header(
                "Marketing & Communications Evaluate your proficiency and understanding in the area of [Brand Management]"
            ),
            "Marketing_Communications_Brand_Management"
        );
    }

    #[test]
    fn program_experience_marker_is_relocated() {
        assert_eq!(
            normalize_mid_header(
                "Technology Have you experienced an improvement in your skills and knowledge after participating in the sessions on [Data Analytics]"
            ),
            "Program_Experience_Technology_Data_Analytics"
        );
        assert_eq!(
            normalize_mid_header(
                "Business Have you experienced an improvement in your skills and knowledge after participating in the sessions on [Business Model Canvas]"
            ),
            "Program_Experience_Business_Business_Model_Canvas"
        );
        assert_eq!(
            normalize_mid_header(
                "Marketing & Communications Have you experienced an improvement in your skills and knowledge after participating in the sessions on [Digital Marketing]"
            ),
            "Program_Experience_Marketing_Communications_Digital_Marketing"
        );
    }

    #[test]
    fn soft_skills_header() {
        assert_eq!(
            normalize_mid_header(
                "How would you assess your comprehension of the following soft skills at this point? [Teamwork]"
            ),
            "Soft_Skills_Teamwork"
        );
    }

    #[test]
    fn fellow_evaluation_headers() {
        assert_eq!(
            normalize_mid_header(
                "How would you evaluate the teaching fellows who have been conducting the sessions so far? [Abena Ofori]"
            ),
            "Teaching_Fellow_Evaluation_Abena_Ofori"
        );
        assert_eq!(
            normalize_mid_header(
                "How would you assess the teaching fellows leading the sessions so far? [Eugene Frimpong]"
            ),
            "Leading_Fellow_Evaluation_Eugene_Frimpong"
        );
    }

    #[test]
    fn aspect_rating_headers() {
        assert_eq!(
            normalize_mid_header(
                "Up to this point, how would you rate the following aspects of the EIT Program [Quality of Sessions]"
            ),
            "Program_Aspect_Rating_Quality_of_Sessions"
        );
        // A glued bracket fuses the token; the repair rules split it back.
        assert_eq!(
            normalize_mid_header(
                "Up to this point, how would you rate the following aspects of the EIT Program[Peer Learning and Collaboration]"
            ),
            "Program_Aspect_Rating_Peer_Learning_and_Collaboration"
        );
    }

    #[test]
    fn truncated_aspect_headers_are_repaired() {
        // Some exports carry a pre-shortened wording; the repairs bring the
        // token back to the canonical section prefix.
        assert_eq!(
            normalize_mid_header("Program Aspect Rate [Peer Learning and Collaboration]"),
            "Program_Aspect_Rating_Peer_Learning_and_Collaboration"
        );
        assert_eq!(
            normalize_mid_header("Program Aspect Rate[Peer Learning and Collaboration]"),
            "Program_Aspect_Rating_Peer_Learning_and_Collaboration"
        );
    }

    #[test]
    fn known_headers_land_on_known_prefixes() {
        let raws = [
            "Student Id",
            "Business Evaluate your proficiency and understanding in the area of [Financial Literacy]",
            "Technology Have you experienced an improvement in your skills and knowledge after participating in the sessions on [Data Analytics]",
            "How would you assess your comprehension of the following soft skills at this point? [Teamwork]",
            "How would you evaluate the teaching fellows who have been conducting the sessions so far? [Abena Ofori]",
            "Up to this point, how would you rate the following aspects of the EIT Program [Quality of Sessions]",
        ];
        for raw in raws.iter() {
            assert!(has_known_prefix(&normalize_mid_header(raw)), "{}", raw);
        }
    }
}
