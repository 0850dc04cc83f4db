use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use replay::{PlayerLog, SplatLog, Team};
use serde::Serialize;
use tagpro_tools::{
    decode_input, decode_map, format_map_grid, format_map_pretty, format_player_pretty,
    format_splats_pretty,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tagpro-tools",
    version,
    about = "TagPro replay log decoding tools"
)]
struct Cli {
    /// Log decoder progress (equivalent to RUST_LOG=debug).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Input {
    /// Path to the log file.
    file: PathBuf,
    /// Treat the file as base64 text.
    #[arg(long)]
    base64: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a player log into events.
    Player {
        #[command(flatten)]
        input: Input,
        /// Team the player started on.
        #[arg(long, value_enum)]
        team: TeamArg,
        /// Game duration in frames; the end event is placed here.
        #[arg(long)]
        duration: u64,
        /// Output format.
        #[arg(long, value_enum, default_value_t = EventFormat::Json)]
        format: EventFormat,
    },
    /// Decode a map log into tiles.
    Map {
        #[command(flatten)]
        input: Input,
        /// Map width in tiles.
        #[arg(long)]
        width: u32,
        /// Output format.
        #[arg(long, value_enum, default_value_t = MapFormat::Json)]
        format: MapFormat,
    },
    /// Decode a splat log into per-step splats.
    Splats {
        #[command(flatten)]
        input: Input,
        /// Map width in tiles.
        #[arg(long)]
        width: u32,
        /// Map height in tiles.
        #[arg(long)]
        height: u32,
        /// Output format.
        #[arg(long, value_enum, default_value_t = EventFormat::Json)]
        format: EventFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TeamArg {
    Red,
    Blue,
    None,
}

impl TeamArg {
    const fn team(self) -> Option<Team> {
        match self {
            Self::Red => Some(Team::Red),
            Self::Blue => Some(Team::Blue),
            Self::None => None,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EventFormat {
    Json,
    Pretty,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MapFormat {
    Json,
    Pretty,
    Grid,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Player {
            input,
            team,
            duration,
            format,
        } => {
            let bytes = read_input(&input)?;
            let log = PlayerLog::new(&bytes, team.team(), duration).context("open player log")?;
            let events = log.decode();
            match format {
                EventFormat::Json => print_json(&events)?,
                EventFormat::Pretty => println!("{}", format_player_pretty(&events)),
            }
        }
        Command::Map {
            input,
            width,
            format,
        } => {
            let bytes = read_input(&input)?;
            let grid = decode_map(&bytes, width)?;
            match format {
                MapFormat::Json => print_json(&grid)?,
                MapFormat::Pretty => print!("{}", format_map_pretty(&grid)),
                MapFormat::Grid => print!("{}", format_map_grid(&grid)),
            }
        }
        Command::Splats {
            input,
            width,
            height,
            format,
        } => {
            let bytes = read_input(&input)?;
            let log = SplatLog::new(&bytes, width, height).context("open splat log")?;
            let events = log.decode();
            match format {
                EventFormat::Json => print_json(&events)?,
                EventFormat::Pretty => println!("{}", format_splats_pretty(&events)),
            }
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: &Input) -> Result<Vec<u8>> {
    let bytes = fs::read(&input.file)
        .with_context(|| format!("read log {}", input.file.display()))?;
    let bytes = decode_input(&bytes, input.base64)?;
    tracing::debug!(path = %input.file.display(), bytes = bytes.len(), "read log");
    Ok(bytes)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{json}");
    Ok(())
}
