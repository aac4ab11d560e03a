use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use edgeswipe_core::SwipeConfig;
use tracing_subscriber::EnvFilter;

use crate::data::sample_categories;
use crate::error::{DemoError, Result};
use crate::replay::Replay;
use crate::script::Script;

#[derive(Debug, Parser)]
#[command(
    name = "edgeswipe-demo",
    about = "Replay scripted touch sessions against the edge swipe category switcher",
    version
)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long = "log-level", global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a touch script and print a transcript.
    Replay(ReplayArgs),

    /// List the built-in categories.
    Categories,

    /// Print the effective configuration as TOML.
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// JSON script to replay. The built-in tour runs when omitted.
    pub script: Option<PathBuf>,

    /// TOML or JSON gesture configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Category shown when the replay starts.
    #[arg(long, default_value_t = 0)]
    pub initial: usize,

    /// Height of the content pane, in pixels.
    #[arg(long, default_value_t = 640.0)]
    pub viewport: f64,

    /// Print the replay report as JSON after the transcript.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Configuration file to load and validate.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

pub fn run_with_output(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => run_replay(&args, out),
        Commands::Categories => print_categories(out),
        Commands::Config(args) => {
            let config = load_config(args.config.as_deref())?;
            write!(out, "{}", config.to_toml_string()?)?;
            Ok(())
        }
    }
}

/// Install the fmt subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|err| DemoError::invalid(format!("bad log level {level:?}: {err}")))?,
    };
    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

pub fn load_config(path: Option<&Path>) -> Result<SwipeConfig> {
    match path {
        Some(path) => Ok(SwipeConfig::from_file(path)?),
        None => Ok(SwipeConfig::default()),
    }
}

fn run_replay(args: &ReplayArgs, out: &mut impl Write) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let categories = sample_categories();
    if args.initial >= categories.len() {
        return Err(DemoError::invalid(format!(
            "--initial {} is out of range (have {} categories)",
            args.initial,
            categories.len()
        )));
    }
    let script = match &args.script {
        Some(path) => Script::from_file(path)?,
        None => Script::builtin()?,
    };

    let mut replay = Replay::new(categories, config, args.initial, args.viewport)?;
    let report = replay.run(&script, out)?;
    writeln!(
        out,
        "done: {} steps, {} switches, {} suppressed moves, active category {}",
        report.steps,
        report.switches.len(),
        report.suppressed_moves,
        report.final_index
    )?;
    if args.json {
        let switches: Vec<serde_json::Value> = report
            .switches
            .iter()
            .map(|s| {
                serde_json::json!({
                    "at_ms": s.at_ms,
                    "from": s.from,
                    "to": s.to,
                    "cause": s.cause.to_string(),
                })
            })
            .collect();
        let summary = serde_json::json!({
            "steps": report.steps,
            "final_index": report.final_index,
            "suppressed_moves": report.suppressed_moves,
            "switches": switches,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    }
    Ok(())
}

fn print_categories(out: &mut impl Write) -> Result<()> {
    for (i, category) in sample_categories().iter().enumerate() {
        writeln!(
            out,
            "{i}  {:<16} {:>3} items  {:>5} px",
            category.label,
            category.items.len(),
            category.content_height()
        )?;
    }
    Ok(())
}
