use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_pivot::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::dashboard::config_reader::*;

pub mod io_common;
pub mod io_mid;
pub mod io_pre;
pub mod sentiment;

/// Which survey export a file contains. The two phases carry different raw
/// headers and different section prefixes, each with its own rewrite table.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SurveyPhase {
    PreProgram,
    MidProgram,
}

impl SurveyPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SurveyPhase::PreProgram => "pre_program",
            SurveyPhase::MidProgram => "mid_program",
        }
    }
}

#[derive(Debug, Snafu)]
pub enum DashboardError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the header of {path}"))]
    ReadingCsv { source: csv::Error, path: String },
    #[snafu(display("Error parsing record {lineno} of {path}"))]
    CsvRecordParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("No {expected} column found in {path}"))]
    MissingIdentifier { path: String, expected: String },
    #[snafu(display(""))]
    OpeningJson { source: std::io::Error },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display(""))]
    MissingParentDir {},
    #[snafu(display("Tabulation failed: {source}"))]
    Tabulation { source: TallyError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashboardError>;

pub mod config_reader {
    use log::debug;
    use serde::{Deserialize, Serialize};
    use serde_json::Value as JSValue;
    use snafu::prelude::*;
    use std::fs;

    use crate::dashboard::*;

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct OutputSettings {
        #[serde(rename = "dashboardName")]
        pub dashboard_name: String,
        #[serde(rename = "outputDirectory")]
        pub output_directory: Option<String>,
        #[serde(rename = "surveyDate")]
        pub survey_date: Option<String>,
        #[serde(rename = "programName")]
        pub program_name: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct OutputConfig {
        pub dashboard: String,
        pub date: Option<String>,
        pub program: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct FileSource {
        pub provider: String,
        #[serde(rename = "filePath")]
        pub file_path: String,
        #[serde(rename = "openEndedColumns")]
        pub open_ended_columns: Option<Vec<String>>,
    }

    impl FileSource {
        pub fn phase(&self) -> DashResult<SurveyPhase> {
            match self.provider.as_str() {
                "pre_program" => Ok(SurveyPhase::PreProgram),
                "mid_program" => Ok(SurveyPhase::MidProgram),
                x => whatever!("Provider not implemented {:?}", x),
            }
        }
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct DashboardConfig {
        #[serde(rename = "outputSettings")]
        pub output_settings: OutputSettings,
        #[serde(rename = "responseFileSources")]
        pub response_file_sources: Vec<FileSource>,
    }

    pub fn read_summary(path: String) -> DashResult<JSValue> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
        debug!("read content: {:?}", contents);
        let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        Ok(js)
    }
}

/// One chartable view of a dashboard: a display title, the section prefix
/// that scopes the pivot rows, and the scale its questions are rated on.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SectionPlan {
    pub title: &'static str,
    pub prefix: &'static str,
    pub knowledge_scale: bool,
}

pub fn section_plans(phase: SurveyPhase) -> Vec<SectionPlan> {
    let plans: &[(&'static str, &'static str, bool)] = match phase {
        SurveyPhase::PreProgram => &[
            ("Business Skills", "Business", false),
            ("Technology Skills", "Technology", false),
            ("Marketing & Communications Skills", "Communication", false),
            ("Soft Skills", "Soft_Skill", false),
            ("Program Experience", "Program", false),
        ],
        SurveyPhase::MidProgram => &[
            ("Teaching Fellow Evaluation", "Teaching_Fellow_Evaluation", false),
            ("Leading Fellow Evaluation", "Leading_Fellow_Evaluation", false),
            ("Business", "Business", false),
            ("Technology", "Technology", false),
            ("Marketing & Communications", "Marketing_Communications", false),
            ("Soft Skills", "Soft_Skills", false),
            ("Program Aspect Rating", "Program_Aspect_Rating", false),
            ("Program Experience", "Program_Experience", true),
        ],
    };
    plans
        .iter()
        .map(|&(title, prefix, knowledge_scale)| SectionPlan {
            title,
            prefix,
            knowledge_scale,
        })
        .collect()
}

// The categories counted as the approving side when ordering a section's
// rows, per scale. The charts list the strongest questions first.
fn approving_side(knowledge_scale: bool) -> &'static [&'static str] {
    if knowledge_scale {
        &[
            "I already knew this",
            "I improved my knowledge",
            "I hugely improved my knowledge",
        ]
    } else {
        &["Average", "Good", "Very Good"]
    }
}

fn palette_to_json(palette: &[(String, String)]) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (category, color) in palette.iter() {
        m.insert(category.clone(), json!(color));
    }
    JSValue::Object(m)
}

fn table_to_json(table: &FrequencyTable) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for row in table.rows.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (category, count) in table.vocabulary.categories().iter().zip(row.counts.iter()) {
            tally.insert(category.clone(), json!(count.to_string()));
        }
        let cumulative = cumulative_frequency(row);
        // A question nobody answered has no defined percentage series.
        let cumulative_pct: JSValue = match cumulative_percentage(row) {
            Ok(pct) => json!(pct
                .iter()
                .map(|p| format!("{:.1}", p))
                .collect::<Vec<String>>()),
            Err(_) => JSValue::Null,
        };
        let js = json!({
            "variable": row.variable,
            "tally": tally,
            "total": row.total().to_string(),
            "cumulative": cumulative,
            "cumulativePercent": cumulative_pct,
        });
        l.push(js);
    }
    l
}

fn scored_to_json(responses: &[sentiment::ScoredResponse]) -> Vec<JSValue> {
    responses
        .iter()
        .map(|r| json!({"text": r.text, "score": format!("{:.2}", r.score)}))
        .collect()
}

/// Builds the summary of one dashboard: per-section pivot tables and the
/// open-ended sentiment partition. Also returns the satisfaction pivot of
/// the whole export for the pre-vs-mid comparison.
fn build_phase_summary(
    phase: SurveyPhase,
    table: &ResponseTable,
    open_ended: &[String],
) -> DashResult<(JSValue, FrequencyTable)> {
    let satisfaction = pivot_table(table, &Vocabulary::satisfaction()).context(TabulationSnafu {})?;
    let knowledge = pivot_table(table, &Vocabulary::knowledge()).context(TabulationSnafu {})?;

    let mut sections: Vec<JSValue> = Vec::new();
    for plan in section_plans(phase).iter() {
        let source = if plan.knowledge_scale {
            &knowledge
        } else {
            &satisfaction
        };
        let subset = source
            .section(plan.prefix)
            .sorted_descending_by(approving_side(plan.knowledge_scale))
            .context(TabulationSnafu {})?;
        let palette = if plan.knowledge_scale {
            knowledge_palette()
        } else {
            satisfaction_palette()
        };
        sections.push(json!({
            "section": plan.title,
            "prefix": plan.prefix,
            "palette": palette_to_json(&palette),
            "table": table_to_json(&subset),
        }));
    }

    let scorer = sentiment::WordListScorer::new();
    let mut open_json: Vec<JSValue> = Vec::new();
    for column in open_ended.iter() {
        let answers = table.column(column).context(TabulationSnafu {})?;
        let partition = sentiment::partition_responses(&scorer, &answers);
        open_json.push(json!({
            "question": column,
            "positive": scored_to_json(&partition.positive),
            "neutral": scored_to_json(&partition.neutral),
            "negative": scored_to_json(&partition.negative),
        }));
    }

    debug!(
        "build_phase_summary: {:?}: {:?} sections, {:?} open-ended questions",
        phase.name(),
        sections.len(),
        open_json.len()
    );
    let js = json!({
        "phase": phase.name(),
        "sections": sections,
        "openEnded": open_json,
    });
    Ok((js, satisfaction))
}

// Section prefixes the two phases share: display title, pre-program
// prefix, mid-program prefix.
const COMPARISON_SECTIONS: &[(&str, &str, &str)] = &[
    ("Business", "Business", "Business"),
    ("Technology", "Technology", "Technology"),
    ("Marketing & Communications", "Communication", "Marketing_Communications"),
    ("Soft Skills", "Soft_Skill", "Soft_Skill"),
];

/// Side-by-side section subsets for the sections both phases rate on the
/// satisfaction scale.
fn comparison_to_json(pre: &FrequencyTable, mid: &FrequencyTable) -> JSValue {
    let mut l: Vec<JSValue> = Vec::new();
    for (title, pre_prefix, mid_prefix) in COMPARISON_SECTIONS.iter() {
        l.push(json!({
            "section": title,
            "preProgram": table_to_json(&pre.section(pre_prefix)),
            "midProgram": table_to_json(&mid.section(mid_prefix)),
        }));
    }
    JSValue::Array(l)
}

fn read_survey_export(root_path: String, cfs: &FileSource) -> DashResult<ResponseTable> {
    let p: PathBuf = [root_path, cfs.file_path.clone()].iter().collect();
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read survey export {:?}", p2);
    match cfs.phase()? {
        SurveyPhase::PreProgram => io_pre::read_pre_program_export(&p2),
        SurveyPhase::MidProgram => io_mid::read_mid_program_export(&p2),
    }
}

fn build_summary_js(
    config: &DashboardConfig,
    dashboards: &[JSValue],
    pre: &Option<FrequencyTable>,
    mid: &Option<FrequencyTable>,
) -> JSValue {
    let c = OutputConfig {
        dashboard: config.output_settings.dashboard_name.clone(),
        date: config.output_settings.survey_date.clone(),
        program: config.output_settings.program_name.clone(),
    };
    let comparison = match (pre, mid) {
        (Some(pre), Some(mid)) => comparison_to_json(pre, mid),
        _ => JSValue::Null,
    };
    json!({
        "config": c,
        "dashboards": dashboards,
        "comparison": comparison,
    })
}

fn write_summary(pretty: &str, out_path: &Option<String>) -> DashResult<()> {
    match out_path.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty);
        }
        Some(p) => {
            fs::write(p, pretty).context(OpeningJsonSnafu {})?;
            info!("Summary written to {:?}", p);
        }
    }
    Ok(())
}

pub fn run_dashboard(
    config_path: String,
    check_summary_path: Option<String>,
    out_path: Option<String>,
) -> DashResult<()> {
    let config_p = Path::new(config_path.as_str());
    let config_str = fs::read_to_string(config_path.clone()).context(OpeningJsonSnafu {})?;
    let config: DashboardConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    info!("config: {:?}", config);

    if config.response_file_sources.is_empty() {
        whatever!("no response file sources detected");
    }

    let root_p = config_p.parent().context(MissingParentDirSnafu {})?;

    let mut dashboards: Vec<JSValue> = Vec::new();
    let mut pre_pivot: Option<FrequencyTable> = None;
    let mut mid_pivot: Option<FrequencyTable> = None;
    for cfs in config.response_file_sources.iter() {
        let phase = cfs.phase()?;
        let table = read_survey_export(root_p.as_os_str().to_str().unwrap().to_string(), cfs)?;
        let open_ended = cfs.open_ended_columns.clone().unwrap_or_default();
        let (summary, satisfaction) = build_phase_summary(phase, &table, &open_ended)?;
        match phase {
            SurveyPhase::PreProgram => pre_pivot = Some(satisfaction),
            SurveyPhase::MidProgram => mid_pivot = Some(satisfaction),
        }
        dashboards.push(summary);
    }

    let result_js = build_summary_js(&config, &dashboards, &pre_pivot, &mid_pivot);

    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_summary(&pretty_js_stats, &out_path)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        info!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

pub fn run_single(
    input_path: String,
    input_type: Option<String>,
    out_path: Option<String>,
) -> DashResult<()> {
    let phase = match input_type.as_deref() {
        None | Some("pre_program") => SurveyPhase::PreProgram,
        Some("mid_program") => SurveyPhase::MidProgram,
        Some(x) => whatever!("Input type not implemented {:?}", x),
    };
    let table = match phase {
        SurveyPhase::PreProgram => io_pre::read_pre_program_export(&input_path)?,
        SurveyPhase::MidProgram => io_mid::read_mid_program_export(&input_path)?,
    };
    let (summary, _) = build_phase_summary(phase, &table, &[])?;
    let result_js = json!({ "dashboards": [summary] });
    let pretty = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_summary(&pretty, &out_path)
}
