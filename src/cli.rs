use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lead-scorer",
    version,
    about = "Weighted lead scoring and offline schema inventory CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a batch of leads, highest score first
    Score(ScoreCommand),
    /// Score a batch and print aggregate counts
    Summary(SummaryCommand),
    /// Inventory field types in a saved Firestore REST response
    Schema(SchemaCommand),
    /// Load and print the scoring configuration
    Check(CheckCommand),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Scoring configuration (default: $LEAD_SCORER_CONFIG, then ./scoring_config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// JSON file with lead records or a Firestore REST response
    pub leads: PathBuf,
    #[command(flatten)]
    pub config_args: ConfigArgs,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Keep only the N highest-scoring leads (applied after filtering)
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Keep leads with this flag (repeatable)
    #[arg(long = "flag", value_enum)]
    pub flags: Vec<FlagArg>,
    /// Keep leads whose setor is this value (repeatable, case-insensitive)
    #[arg(long = "sector")]
    pub sectors: Vec<String>,
    /// Keep leads whose receitaAnual is this value (repeatable)
    #[arg(long = "revenue")]
    pub revenues: Vec<String>,
    /// Keep leads whose nivelMaturidadeSelecionado is this value (repeatable)
    #[arg(long = "maturity")]
    pub maturity_levels: Vec<String>,
    /// Keep leads whose nome, empresa or email contains this text
    #[arg(long)]
    pub search: Option<String>,
    /// Lowest score to keep (inclusive)
    #[arg(long)]
    pub min_score: Option<f64>,
    /// Highest score to keep (inclusive)
    #[arg(long)]
    pub max_score: Option<f64>,
}

#[derive(Args)]
pub struct SummaryCommand {
    pub leads: PathBuf,
    #[command(flatten)]
    pub config_args: ConfigArgs,
    /// First day to include (dd/mm/yyyy or yyyy-mm-dd)
    #[arg(long)]
    pub since: Option<String>,
    /// Last day to include (dd/mm/yyyy or yyyy-mm-dd)
    #[arg(long)]
    pub until: Option<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SchemaCommand {
    pub dump: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub config_args: ConfigArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FlagArg {
    Hot,
    Warm,
    Cold,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
