//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::Colorize;
use colored::control;

use audio_scope_helper::core::config::Config;
use audio_scope_helper::core::errors::{Result, ScopeError};
use audio_scope_helper::dash;
use audio_scope_helper::logger;
use audio_scope_helper::logger::jsonl::JsonlConfig;
use audio_scope_helper::meter::filter::{DB_FLOOR, db_from_vu, instantaneous_load};
use audio_scope_helper::render::palette::Palette;
use audio_scope_helper::snapshot::poller::SnapshotPoller;
use audio_scope_helper::snapshot::telemetry::TelemetrySnapshot;

/// ascope — live dashboards for a running audio engine.
#[derive(Debug, Parser)]
#[command(
    name = "ascope",
    author,
    version,
    about = "Audio Scope Helper - engine telemetry and listing dashboards",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode (status only).
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Live telemetry meters dashboard.
    Meters(MetersArgs),
    /// Live active-listings dashboard.
    Listings(ListingsArgs),
    /// One-shot summary of the current telemetry snapshot.
    Status(StatusArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct MetersArgs {
    /// Telemetry snapshot file (overrides config).
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Poll interval override in milliseconds.
    #[arg(long, value_name = "MS")]
    refresh_ms: Option<u64>,
}

#[derive(Debug, Clone, Args, Default)]
struct ListingsArgs {
    /// Listing snapshot file (overrides config).
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Telemetry snapshot file carrying the Mute/Verbose view keys.
    #[arg(long, value_name = "PATH")]
    telemetry_file: Option<PathBuf>,
    /// Poll interval override in milliseconds.
    #[arg(long, value_name = "MS")]
    refresh_ms: Option<u64>,
}

#[derive(Debug, Clone, Args, Default)]
struct StatusArgs {}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: CompletionShell,
}

/// Dispatch the parsed CLI.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.no_color {
        control::set_override(false);
    }
    let palette = if cli.no_color {
        Palette::monochrome()
    } else {
        Palette::default()
    };

    match &cli.command {
        Command::Meters(args) => {
            reject_json(cli, "meters")?;
            let mut config = Config::load(cli.config.as_deref())?;
            if let Some(file) = &args.file {
                config.files.telemetry_file = file.clone();
            }
            if let Some(ms) = args.refresh_ms {
                config.meters.poll_interval_ms = ms.max(1);
            }
            let diag = logger::open_shared(JsonlConfig::from(&config.log));
            dash::meters::run(&config, palette, &diag)
        }
        Command::Listings(args) => {
            reject_json(cli, "listings")?;
            let mut config = Config::load(cli.config.as_deref())?;
            if let Some(file) = &args.file {
                config.files.listing_file = file.clone();
            }
            if let Some(file) = &args.telemetry_file {
                config.files.telemetry_file = file.clone();
            }
            if let Some(ms) = args.refresh_ms {
                config.listings.poll_interval_ms = ms.max(1);
            }
            let diag = logger::open_shared(JsonlConfig::from(&config.log));
            dash::listings::run(&config, palette, &diag)
        }
        Command::Status(StatusArgs {}) => {
            let config = Config::load(cli.config.as_deref())?;
            run_status(&config, cli.json)
        }
        Command::Completions(args) => {
            generate(args.shell, &mut Cli::command(), "ascope", &mut io::stdout());
            Ok(())
        }
    }
}

fn reject_json(cli: &Cli, command: &str) -> Result<()> {
    if cli.json {
        return Err(ScopeError::InvalidConfig {
            details: format!("{command} does not support --json output"),
        });
    }
    Ok(())
}

fn run_status(config: &Config, json: bool) -> Result<()> {
    let poller = SnapshotPoller::<TelemetrySnapshot>::new(config.files.telemetry_file.clone());
    let snap = poller.read()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snap).map_err(ScopeError::from)?);
        return Ok(());
    }

    let db = db_from_vu(snap.vu_level);
    let load = if snap.active {
        instantaneous_load(snap.load_nanos, snap.sample_rate)
    } else {
        0.0
    };

    println!("{}", "ascope status".bold());

    let engine = if !snap.active {
        "inactive".dimmed()
    } else if snap.paused {
        "PAUSED".yellow().bold()
    } else {
        "ACTIVE".green().bold()
    };
    println!("  engine:   {engine}");
    println!(
        "  channel:  {} @ {:.0} Hz, {}-bit",
        snap.channel_label, snap.sample_rate, snap.bit_format
    );

    let clip = if snap.clipping {
        format!("  {}", "CLIP".red().bold())
    } else {
        String::new()
    };
    if db <= DB_FLOOR {
        println!("  level:    {}{clip}", "silent".dimmed());
    } else {
        println!("  level:    {db:.1} dB{clip}");
    }

    let load_text = format!("{load:.2}");
    let load_cell = if load > 1.0 {
        load_text.as_str().red().bold()
    } else if load > 0.9 {
        load_text.as_str().yellow()
    } else {
        load_text.as_str().normal()
    };
    println!("  load:     {load_cell}");

    println!(
        "  sync:     {}",
        if snap.sync_active {
            "yes".normal()
        } else {
            "no".dimmed()
        }
    );
    if snap.gain_reduction_active {
        println!(
            "  gain red: {}",
            format!("{}", snap.gain_reduction_level).as_str().yellow()
        );
    }
    if !snap.info_message.is_empty() {
        println!("  message:  {}", snap.info_message);
    }
    Ok(())
}
