use clap::Parser;

/// This is a survey tabulation and dashboard program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the dashboards to build: output
    /// settings and the survey response exports to load. For more information about the
    /// file format, read the documentation at
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference summary in JSON format. If provided, survdash will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the dashboards will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) A single survey export to tabulate without a configuration
    /// file. The phase of the export is given with --input-type.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default pre_program) The phase of the input export: pre_program or mid_program.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
