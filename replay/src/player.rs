//! Player log decoding.
//!
//! A player log is a sequence of frames. Each frame records what changed for
//! one player since the previous frame (team, flag, returns, tags, captures,
//! power-ups, held keys) followed by a footer-encoded time delta. The decoder
//! keeps the running player state and expands every frame into events in a
//! fixed order.

use std::collections::VecDeque;

use bitstream::BitReader;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::ReplayResult;
use crate::limits::ReplayLimits;
use crate::types::{Flag, Power, Powers, Team};

/// What happened in a [`PlayerEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum PlayerEventKind {
    /// Spectator joined a team.
    Join,
    /// Returned an enemy flag carrier.
    Return,
    /// Tagged an enemy player.
    Tag,
    /// Grabbed a flag.
    Grab,
    /// Captured while carrying the flag, which is then cleared.
    Capture,
    /// Capture not attributed to a carried flag (flag kept or none held).
    FlaglessCapture,
    /// A power-up expired.
    PowerDown(Power),
    /// A power-up was picked up.
    PowerUp(Power),
    StartPrevent,
    StopPrevent,
    StartButton,
    StopButton,
    StartBlock,
    StopBlock,
    /// Dropped the carried flag.
    Drop,
    /// Popped without a flag.
    Pop,
    /// Left the game.
    Quit,
    /// Switched to the other team.
    Switch,
    /// End of the log, stamped with the match duration.
    End,
}

/// A decoded player event with the player context at the time it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PlayerEvent {
    /// Game time of the event.
    pub time: u64,
    /// Event kind.
    pub kind: PlayerEventKind,
    /// Team of the player. For [`PlayerEventKind::Switch`] this is the new team.
    pub team: Option<Team>,
    /// Flag carried at the time of the event.
    pub flag: Option<Flag>,
    /// Power-ups held at the time of the event.
    pub powers: Powers,
}

/// A player log buffer with its out-of-band parameters.
///
/// Creating a `PlayerLog` does not decode anything; call
/// [`events`](Self::events) or [`decode`](Self::decode).
#[derive(Debug, Clone, Copy)]
pub struct PlayerLog<'a> {
    data: &'a [u8],
    team: Option<Team>,
    duration: u64,
}

impl<'a> PlayerLog<'a> {
    /// Creates a player log with default limits.
    ///
    /// `team` is the team the player started on (`None` for spectators) and
    /// `duration` is the match length used to stamp the end event.
    pub fn new(data: &'a [u8], team: Option<Team>, duration: u64) -> ReplayResult<Self> {
        Self::with_limits(data, team, duration, &ReplayLimits::default())
    }

    /// Creates a player log, checking the buffer against `limits`.
    pub fn with_limits(
        data: &'a [u8],
        team: Option<Team>,
        duration: u64,
        limits: &ReplayLimits,
    ) -> ReplayResult<Self> {
        limits.check_log(data)?;
        Ok(Self {
            data,
            team,
            duration,
        })
    }

    /// Returns a lazy iterator over the events of this log.
    #[must_use]
    pub fn events(&self) -> PlayerEvents<'a> {
        tracing::debug!(
            bytes = self.data.len(),
            team = ?self.team,
            duration = self.duration,
            "decoding player log"
        );
        PlayerEvents {
            reader: BitReader::new(self.data),
            state: PlayerState::new(self.team),
            duration: self.duration,
            pending: VecDeque::new(),
            frames: 0,
            finished: false,
        }
    }

    /// Decodes the whole log into a vector.
    #[must_use]
    pub fn decode(&self) -> Vec<PlayerEvent> {
        self.events().collect()
    }
}

/// Running state of one player across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlayerState {
    time: u64,
    team: Option<Team>,
    flag: Option<Flag>,
    powers: Powers,
    prevent: bool,
    button: bool,
    block: bool,
}

impl PlayerState {
    const fn new(team: Option<Team>) -> Self {
        Self {
            time: 0,
            team,
            flag: None,
            powers: Powers::NONE,
            prevent: false,
            button: false,
            block: false,
        }
    }
}

/// Field values of one frame, read before any state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    new_team: Option<Team>,
    drop_or_pop: bool,
    returns: u64,
    tags: u64,
    /// Flag taken this frame, if any.
    grab: Option<Flag>,
    captures: u64,
    keep: bool,
    powers_down: Powers,
    powers_up: Powers,
    toggle_prevent: bool,
    toggle_button: bool,
    toggle_block: bool,
    time: u64,
}

/// An event queued `count` times.
#[derive(Debug, Clone, Copy)]
struct Repeated {
    event: PlayerEvent,
    count: u64,
}

/// Lazy iterator over the events of a [`PlayerLog`].
///
/// Events of one frame are queued together; runs of identical events
/// (returns, tags, flagless captures) are queued once with a repeat count.
#[derive(Debug, Clone)]
pub struct PlayerEvents<'a> {
    reader: BitReader<'a>,
    state: PlayerState,
    duration: u64,
    pending: VecDeque<Repeated>,
    frames: u64,
    finished: bool,
}

impl PlayerEvents<'_> {
    /// Returns the number of frames decoded so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    fn read_frame(&mut self) -> Frame {
        let reader = &mut self.reader;
        let state = &self.state;

        let new_team = if reader.read_bit() {
            match state.team {
                Some(_) if reader.read_bit() => None,
                Some(team) => Some(team.other()),
                None if reader.read_bit() => Some(Team::Blue),
                None => Some(Team::Red),
            }
        } else {
            state.team
        };
        let drop_or_pop = reader.read_bit();
        let returns = reader.read_tally();
        let tags = reader.read_tally();
        let grabbed = state.flag.is_none() && reader.read_bit();
        let captures = reader.read_tally();
        let keep = !drop_or_pop
            && new_team.is_some()
            && (new_team == state.team || state.team.is_none())
            && (captures == 0 || (state.flag.is_none() && !grabbed) || reader.read_bit());
        let grab = grabbed.then(|| {
            if keep {
                Flag::from_bits(reader.read_bits(2))
            } else {
                Flag::Temporary
            }
        });

        let mut grants = reader.read_tally();
        let mut powers_down = Powers::NONE;
        let mut powers_up = Powers::NONE;
        for power in Power::ALL {
            if state.powers.contains(power) {
                if reader.read_bit() {
                    powers_down = powers_down.with(power);
                }
            } else if grants > 0 && reader.read_bit() {
                powers_up = powers_up.with(power);
                grants -= 1;
            }
        }

        let toggle_prevent = reader.read_bit();
        let toggle_button = reader.read_bit();
        let toggle_block = reader.read_bit();
        let time = state
            .time
            .saturating_add(1)
            .saturating_add(reader.read_footer());

        Frame {
            new_team,
            drop_or_pop,
            returns,
            tags,
            grab,
            captures,
            keep,
            powers_down,
            powers_up,
            toggle_prevent,
            toggle_button,
            toggle_block,
            time,
        }
    }

    fn push(&mut self, kind: PlayerEventKind, count: u64) {
        self.push_as(kind, self.state.team, count);
    }

    fn push_as(&mut self, kind: PlayerEventKind, team: Option<Team>, count: u64) {
        if count == 0 {
            return;
        }
        let event = PlayerEvent {
            time: self.state.time,
            kind,
            team,
            flag: self.state.flag,
            powers: self.state.powers,
        };
        self.pending.push_back(Repeated { event, count });
    }

    fn apply_frame(&mut self, frame: Frame) {
        self.state.time = frame.time;

        if self.state.team.is_none() && frame.new_team.is_some() {
            self.state.team = frame.new_team;
            self.push(PlayerEventKind::Join, 1);
        }

        self.push(PlayerEventKind::Return, frame.returns);
        self.push(PlayerEventKind::Tag, frame.tags);

        if let Some(flag) = frame.grab {
            self.state.flag = Some(flag);
            self.push(PlayerEventKind::Grab, 1);
        }

        if frame.captures > 0 {
            if frame.keep || self.state.flag.is_none() {
                self.push(PlayerEventKind::FlaglessCapture, frame.captures);
            } else {
                self.push(PlayerEventKind::Capture, 1);
                self.state.flag = None;
                self.push(PlayerEventKind::FlaglessCapture, frame.captures - 1);
            }
        }

        for power in Power::ALL {
            if frame.powers_down.contains(power) {
                self.state.powers = self.state.powers.without(power);
                self.push(PlayerEventKind::PowerDown(power), 1);
            } else if frame.powers_up.contains(power) {
                self.state.powers = self.state.powers.with(power);
                self.push(PlayerEventKind::PowerUp(power), 1);
            }
        }

        if frame.toggle_prevent {
            let kind = if self.state.prevent {
                PlayerEventKind::StopPrevent
            } else {
                PlayerEventKind::StartPrevent
            };
            self.push(kind, 1);
            self.state.prevent = !self.state.prevent;
        }
        if frame.toggle_button {
            let kind = if self.state.button {
                PlayerEventKind::StopButton
            } else {
                PlayerEventKind::StartButton
            };
            self.push(kind, 1);
            self.state.button = !self.state.button;
        }
        if frame.toggle_block {
            let kind = if self.state.block {
                PlayerEventKind::StopBlock
            } else {
                PlayerEventKind::StartBlock
            };
            self.push(kind, 1);
            self.state.block = !self.state.block;
        }

        if frame.drop_or_pop {
            if self.state.flag.is_some() {
                self.push(PlayerEventKind::Drop, 1);
                self.state.flag = None;
            } else {
                self.push(PlayerEventKind::Pop, 1);
            }
        }

        if frame.new_team != self.state.team {
            if frame.new_team.is_none() {
                self.push(PlayerEventKind::Quit, 1);
                self.state.powers = Powers::NONE;
            } else {
                self.push_as(PlayerEventKind::Switch, frame.new_team, 1);
            }
            self.state.flag = None;
            self.state.team = frame.new_team;
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.state.time = self.duration;
        self.push(PlayerEventKind::End, 1);
        tracing::debug!(
            frames = self.frames,
            bits = self.reader.bit_position(),
            team = ?self.state.team,
            "player log exhausted"
        );
    }
}

impl Iterator for PlayerEvents<'_> {
    type Item = PlayerEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(front) = self.pending.front_mut() {
                let event = front.event;
                front.count -= 1;
                if front.count == 0 {
                    self.pending.pop_front();
                }
                return Some(event);
            }
            if self.finished {
                return None;
            }
            if self.reader.is_end() {
                self.finish();
                continue;
            }
            let frame = self.read_frame();
            self.frames += 1;
            tracing::trace!(
                time = frame.time,
                returns = frame.returns,
                tags = frame.tags,
                captures = frame.captures,
                grab = ?frame.grab,
                "player frame"
            );
            self.apply_frame(frame);
        }
    }
}
