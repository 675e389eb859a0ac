mod cli;
mod config;
mod error;
mod filter;
mod metrics;
mod report;
mod schema;
mod scoring;
mod source;
mod types;

use crate::error::ScorerError;
use crate::types::lead::Flag;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const CONFIG_FAILURE: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn lead_filter(args: cli::FilterArgs) -> filter::LeadFilter {
    filter::LeadFilter {
        flags: args
            .flags
            .iter()
            .map(|flag| match flag {
                cli::FlagArg::Hot => Flag::Hot,
                cli::FlagArg::Warm => Flag::Warm,
                cli::FlagArg::Cold => Flag::Cold,
            })
            .collect(),
        sectors: args.sectors,
        revenues: args.revenues,
        maturity_levels: args.maturity_levels,
        search: args.search,
        min_score: args.min_score,
        max_score: args.max_score,
    }
}

fn run(cli: cli::Cli) -> Result<i32, ScorerError> {
    match cli.command {
        cli::Commands::Score(cmd) => {
            let leads = source::load_leads(&cmd.leads)?;
            let config_path = config::resolve_config_path(cmd.config_args.config.as_deref());
            let scored = scoring::score_batch_from_path(&leads, &config_path)?;
            let mut scored = lead_filter(cmd.filter).apply(scored);
            if let Some(top) = cmd.top {
                scored.truncate(top);
            }

            let rendered = report::render_scored(&scored, output_format(&cmd.format))?;
            report::emit(&rendered, cmd.output.as_deref())?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Summary(cmd) => {
            let window = metrics::DateWindow {
                since: cmd.since.as_deref().map(metrics::parse_cli_date).transpose()?,
                until: cmd.until.as_deref().map(metrics::parse_cli_date).transpose()?,
            };
            let leads = source::load_leads(&cmd.leads)?;
            let config_path = config::resolve_config_path(cmd.config_args.config.as_deref());
            let scored = scoring::score_batch_from_path(&leads, &config_path)?;

            if !window.is_open() {
                info!(since = ?window.since, until = ?window.until, "applying date window");
            }
            let summary = metrics::summarize(&scored, window);
            let rendered = report::render_summary(&summary, output_format(&cmd.format))?;
            report::emit(&rendered, cmd.output.as_deref())?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Schema(cmd) => {
            let documents = source::load_documents(&cmd.dump)?;
            let inventory = schema::introspect(&documents);
            let rendered = report::render_schema(&inventory, output_format(&cmd.format))?;
            report::emit(&rendered, cmd.output.as_deref())?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check(cmd) => {
            let config_path = config::resolve_config_path(cmd.config_args.config.as_deref());
            let loaded = config::load_config(&config_path)?;
            println!("config: {}", config_path.display());
            println!("{}", report::json::to_json(&loaded)?);

            let warnings = loaded.warnings();
            if warnings.is_empty() {
                return Ok(exit_code::SUCCESS);
            }
            for warning in &warnings {
                eprintln!("warning: {warning}");
            }
            Ok(exit_code::WARNINGS)
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_config() {
                exit_code::CONFIG_FAILURE
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
