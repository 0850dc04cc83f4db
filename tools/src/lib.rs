//! Formatting and input helpers for the `tagpro-tools` CLI.
//!
//! The binary decodes a log with the `replay` crate and hands the events to
//! the helpers here:
//!
//! - Read raw or base64 log input
//! - Render player, map and splat events as human-readable text
//! - Summarize a player's events by kind
//!
//! # Design Principles
//!
//! - **Human-readable output** - Make it easy to see what a log contains.
//! - **No decoding here** - All bit-level work stays in `replay`.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use replay::{
    Flag, MapLog, PlayerEvent, PlayerEventKind, Power, Powers, SplatEvent, Team, Tile, TileGrid,
};
use serde::Serialize;

/// Returns the log bytes, decoding base64 text when `base64` is set.
///
/// Whitespace in base64 input is ignored so wrapped text can be pasted as is.
pub fn decode_input(bytes: &[u8], base64: bool) -> Result<Vec<u8>> {
    if !base64 {
        return Ok(bytes.to_vec());
    }
    let text: Vec<u8> = bytes
        .iter()
        .copied()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    general_purpose::STANDARD
        .decode(text)
        .context("decode base64 input")
}

/// Per-kind event counts for one player log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub events: usize,
    pub joins: usize,
    pub quits: usize,
    pub switches: usize,
    pub grabs: usize,
    pub captures: usize,
    pub flagless_captures: usize,
    pub drops: usize,
    pub pops: usize,
    pub returns: usize,
    pub tags: usize,
    pub power_ups: usize,
    /// Time of the final event.
    pub end_time: u64,
}

/// Counts the events of a decoded player log.
pub fn summarize_player(events: &[PlayerEvent]) -> PlayerSummary {
    let mut summary = PlayerSummary {
        events: events.len(),
        ..PlayerSummary::default()
    };
    for event in events {
        let counter = match event.kind {
            PlayerEventKind::Join => &mut summary.joins,
            PlayerEventKind::Quit => &mut summary.quits,
            PlayerEventKind::Switch => &mut summary.switches,
            PlayerEventKind::Grab => &mut summary.grabs,
            PlayerEventKind::Capture => &mut summary.captures,
            PlayerEventKind::FlaglessCapture => &mut summary.flagless_captures,
            PlayerEventKind::Drop => &mut summary.drops,
            PlayerEventKind::Pop => &mut summary.pops,
            PlayerEventKind::Return => &mut summary.returns,
            PlayerEventKind::Tag => &mut summary.tags,
            PlayerEventKind::PowerUp(_) => &mut summary.power_ups,
            _ => continue,
        };
        *counter += 1;
    }
    summary.end_time = events.last().map_or(0, |event| event.time);
    summary
}

/// Renders player events one per line, followed by a summary.
pub fn format_player_pretty(events: &[PlayerEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let _ = writeln!(
            out,
            "{:>8}  {:<18} team={:<4} flag={:<15} powers={}",
            event.time,
            kind_name(event.kind),
            team_name(event.team),
            flag_name(event.flag),
            powers_name(event.powers),
        );
    }
    let summary = summarize_player(events);
    let _ = write!(
        out,
        "{} events: {} captures ({} flagless), {} grabs, {} drops, {} pops, {} returns, {} tags",
        summary.events,
        summary.captures,
        summary.flagless_captures,
        summary.grabs,
        summary.drops,
        summary.pops,
        summary.returns,
        summary.tags,
    );
    out
}

fn kind_name(kind: PlayerEventKind) -> String {
    match kind {
        PlayerEventKind::PowerUp(power) => format!("power_up({})", power_name(power)),
        PlayerEventKind::PowerDown(power) => format!("power_down({})", power_name(power)),
        other => {
            let name = format!("{other:?}");
            let mut snake = String::with_capacity(name.len() + 4);
            for (i, ch) in name.chars().enumerate() {
                if ch.is_ascii_uppercase() && i > 0 {
                    snake.push('_');
                }
                snake.push(ch.to_ascii_lowercase());
            }
            snake
        }
    }
}

const fn team_name(team: Option<Team>) -> &'static str {
    match team {
        Some(Team::Red) => "red",
        Some(Team::Blue) => "blue",
        None => "-",
    }
}

const fn flag_name(flag: Option<Flag>) -> &'static str {
    match flag {
        Some(Flag::Opponent) => "opponent",
        Some(Flag::OpponentPotato) => "opponent_potato",
        Some(Flag::Neutral) => "neutral",
        Some(Flag::NeutralPotato) => "neutral_potato",
        Some(Flag::Temporary) => "temporary",
        None => "-",
    }
}

const fn power_name(power: Power) -> &'static str {
    match power {
        Power::JukeJuice => "juke_juice",
        Power::RollingBomb => "rolling_bomb",
        Power::TagPro => "tag_pro",
        Power::TopSpeed => "top_speed",
    }
}

fn powers_name(powers: Powers) -> String {
    if powers.is_empty() {
        return "-".to_string();
    }
    powers.iter().map(power_name).collect::<Vec<_>>().join(",")
}

/// Decodes a map log into a grid, enforcing the default tile limit.
///
/// Every map output format goes through here so they all reject the same
/// oversized logs.
pub fn decode_map(bytes: &[u8], width: u32) -> Result<TileGrid> {
    let log = MapLog::new(bytes, width).context("open map log")?;
    log.grid().context("decode map grid")
}

/// Renders a tile grid as one line per row of tile-code runs.
pub fn format_map_pretty(grid: &TileGrid) -> String {
    let mut out = String::new();
    for (row, tiles) in grid.rows().enumerate() {
        let mut runs: Vec<(Tile, u32)> = Vec::new();
        for &tile in tiles {
            match runs.last_mut() {
                Some((last, count)) if *last == tile => *count += 1,
                _ => runs.push((tile, 1)),
            }
        }
        let runs: Vec<String> = runs
            .iter()
            .map(|(tile, count)| format!("{count}x{}", tile.code()))
            .collect();
        let _ = writeln!(out, "row {row:>3}: {}", runs.join(" "));
    }
    out
}

/// Returns a single-character glyph for a tile.
pub const fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Empty => ' ',
        Tile::SquareWall => '#',
        Tile::LowerLeftDiagonalWall => '\\',
        Tile::UpperLeftDiagonalWall => '/',
        Tile::UpperRightDiagonalWall => '\\',
        Tile::LowerRightDiagonalWall => '/',
        Tile::NeutralFloor => '.',
        Tile::RedFlag => 'R',
        Tile::BlueFlag => 'B',
        Tile::NeutralFlag | Tile::TemporaryFlag => 'F',
        Tile::NeutralSpeedpad | Tile::RedSpeedpad | Tile::BlueSpeedpad => '@',
        Tile::Powerup
        | Tile::JukeJuicePowerup
        | Tile::RollingBombPowerup
        | Tile::TagProPowerup
        | Tile::TopSpeedPowerup => 'P',
        Tile::Spike => '*',
        Tile::Button => 'o',
        Tile::OpenGate => '-',
        Tile::ClosedGate => '=',
        Tile::RedGate => 'r',
        Tile::BlueGate => 'b',
        Tile::Bomb => 'X',
        Tile::RedFloor => ',',
        Tile::BlueFloor => ';',
        Tile::EntryPortal => 'O',
        Tile::ExitPortal => 'Q',
        Tile::RedEndzone => '<',
        Tile::BlueEndzone => '>',
        Tile::Reserved(_) => '?',
    }
}

/// Draws a tile grid with one glyph per tile.
pub fn format_map_grid(grid: &TileGrid) -> String {
    let mut out = String::with_capacity(grid.tiles().len() + grid.height() as usize);
    for row in grid.rows() {
        out.extend(row.iter().map(|&tile| tile_glyph(tile)));
        out.push('\n');
    }
    out
}

/// Renders splat events one time step per line.
pub fn format_splats_pretty(events: &[SplatEvent]) -> String {
    let mut out = String::new();
    let mut total = 0;
    for event in events {
        total += event.splats.len();
        let splats: Vec<String> = event
            .splats
            .iter()
            .map(|splat| format!("({}, {})", splat.x, splat.y))
            .collect();
        let _ = writeln!(out, "{:>8}  {}", event.time_index, splats.join(" "));
    }
    let _ = write!(out, "{total} splats in {} steps", events.len());
    out
}
