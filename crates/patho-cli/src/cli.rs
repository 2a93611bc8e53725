//! CLI argument definitions for `patho`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "patho",
    version,
    about = "Pathology lab-result classification and QC review",
    long_about = "Classify lab results against demographic reference ranges,\n\
                  compute QC control-run deviations, and review pathology reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (TOML). Falls back to $PATHO_CONFIG, then built-in defaults.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient names, values and comments to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dashboard counts: normal, abnormal and unevaluated results, report statuses.
    Stats(StatsArgs),

    /// Show reports with abnormal results flagged and their audit trail.
    Report(ReportArgs),

    /// Annotate every result in a results file.
    Classify(ClassifyArgs),

    /// Compute QC deviations and apply the acceptance policy.
    Qc(QcArgs),

    /// Approve or reject reports.
    Review(ReviewArgs),

    /// Add a pathologist comment to one test result.
    Comment(CommentArgs),
}

#[derive(Args)]
pub struct OutputArgs {
    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("inputs")
        .required(true)
        .multiple(true)
        .args(["results", "reports"])
))]
pub struct StatsArgs {
    /// Lab results file (.csv or .json).
    #[arg(long = "results", value_name = "FILE")]
    pub results: Option<PathBuf>,

    /// Reports file (.json); their test results are counted too.
    #[arg(long = "reports", value_name = "FILE")]
    pub reports: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Reports file (.json).
    #[arg(value_name = "REPORTS")]
    pub reports: PathBuf,

    /// Only show these reports (repeatable). Shows all when omitted.
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Lab results file (.csv or .json).
    #[arg(value_name = "RESULTS")]
    pub results: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct QcArgs {
    /// QC samples file (.csv or .json).
    #[arg(
        value_name = "SAMPLES",
        required_unless_present_all = ["expected", "observed"],
        conflicts_with_all = ["expected", "observed"]
    )]
    pub samples: Option<PathBuf>,

    /// Expected value of a single control run.
    #[arg(long = "expected", requires = "observed", allow_negative_numbers = true)]
    pub expected: Option<f64>,

    /// Observed value of a single control run.
    #[arg(long = "observed", requires = "expected", allow_negative_numbers = true)]
    pub observed: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ReviewArgs {
    /// Reports file (.json), updated in place unless --output is given.
    #[arg(value_name = "REPORTS")]
    pub reports: PathBuf,

    /// Reports to update (repeatable).
    #[arg(long = "id", value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// New status.
    #[arg(long = "status", value_enum)]
    pub status: ReviewStatusArg,

    /// Reviewer name recorded in the audit trail.
    #[arg(long = "user", value_name = "NAME")]
    pub user: String,

    /// Review comments.
    #[arg(long = "comments")]
    pub comments: Option<String>,

    /// Rejection reason (only used with --status rejected).
    #[arg(long = "reason")]
    pub reason: Option<String>,

    /// Write the updated reports here instead of overwriting REPORTS.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub format: OutputArgs,
}

#[derive(Args)]
pub struct CommentArgs {
    /// Reports file (.json), updated in place unless --output is given.
    #[arg(value_name = "REPORTS")]
    pub reports: PathBuf,

    /// Report holding the test result.
    #[arg(long = "id", value_name = "ID")]
    pub id: String,

    /// Test result to comment on.
    #[arg(long = "test", value_name = "TEST_ID")]
    pub test: String,

    /// Pathologist name recorded in the audit trail.
    #[arg(long = "user", value_name = "NAME")]
    pub user: String,

    /// Comment text.
    #[arg(long = "text")]
    pub text: String,

    /// Write the updated reports here instead of overwriting REPORTS.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Review outcomes accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum ReviewStatusArg {
    Approved,
    Rejected,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
