//! Player, map and splat log decoders for TagPro replays.
//!
//! This crate turns the bit-packed logs recorded for a match into ordered,
//! timestamped events. It builds on the `bitstream` cursor and adds the
//! format knowledge for the three log kinds:
//!
//! - [`PlayerLog`] - per-player action frames expanded into [`PlayerEvent`]s
//! - [`MapLog`] - run-length encoded tile grid as [`MapEvent`]s
//! - [`SplatLog`] - per-time-step paint splats as [`SplatEvent`]s
//!
//! # Design Principles
//!
//! - **Lazy decoding** - Constructors validate parameters only; events are
//!   produced on demand by iterators.
//! - **Permissive input** - Truncated or malformed logs decode to some event
//!   sequence rather than an error.
//! - **Deterministic** - Same inputs produce same outputs; no global state.
//!
//! # Example
//!
//! ```
//! use replay::{PlayerEventKind, PlayerLog, Team};
//!
//! let log = PlayerLog::new(&[], Some(Team::Red), 3600).unwrap();
//! let events = log.decode();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].kind, PlayerEventKind::End);
//! assert_eq!(events[0].time, 3600);
//! ```

mod error;
mod limits;
mod map;
mod player;
mod splat;
mod tile;
mod types;

pub use error::{Axis, ReplayError, ReplayResult};
pub use limits::{ReplayLimits, MAX_SPLAT_DIMENSION};
pub use map::{MapEvent, MapEvents, MapLog, TileGrid};
pub use player::{PlayerEvent, PlayerEventKind, PlayerEvents, PlayerLog};
pub use splat::{encode_splat_log, Splat, SplatAxis, SplatEvent, SplatEvents, SplatLog, TILE_SIZE};
pub use tile::{Tile, MAX_RAW_TILE};
pub use types::{Flag, Power, Powers, Team};
