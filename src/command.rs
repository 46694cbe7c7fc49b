//! Text command parsing for the serial control channel.
//!
//! Commands arrive one per line in `PARAM:VALUE` form. The grammar is strict:
//! the whole line must match a known command or it is rejected, so a garbled
//! line can never half-apply.

use winnow::ascii::dec_uint;
use winnow::combinator::{alt, preceded};
use winnow::prelude::*;

use crate::types::Mode;

/// A parsed control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `RED:<ms>` sets the red hold duration.
    SetRedDuration(u32),
    /// `YELLOW:<ms>` sets the yellow hold duration.
    SetYellowDuration(u32),
    /// `GREEN:<ms>` sets the green hold duration.
    SetGreenDuration(u32),
    /// `MODE:<NAME>` requests a mode transition.
    SetMode(Mode),
}

/// Errors that can occur when parsing a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// The line is not a recognized `PARAM:VALUE` command.
    Unrecognized,
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::Unrecognized => write!(f, "unrecognized command line"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

impl Command {
    /// Parses one line from the control channel.
    ///
    /// Leading and trailing whitespace (including the line terminator) is
    /// ignored. Parameter and mode names are case sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unrecognized`] for anything that is not
    /// exactly one well-formed command, including out-of-range durations.
    pub fn parse_line(line: &str) -> Result<Self, CommandError> {
        command
            .parse(line.trim())
            .map_err(|_| CommandError::Unrecognized)
    }
}

fn command(input: &mut &str) -> ModalResult<Command> {
    alt((
        preceded(("RED", ':'), dec_uint).map(Command::SetRedDuration),
        preceded(("YELLOW", ':'), dec_uint).map(Command::SetYellowDuration),
        preceded(("GREEN", ':'), dec_uint).map(Command::SetGreenDuration),
        preceded(("MODE", ':'), mode_name).map(Command::SetMode),
    ))
    .parse_next(input)
}

fn mode_name(input: &mut &str) -> ModalResult<Mode> {
    alt((
        "NORMAL".value(Mode::Normal),
        "EMERGENCY".value(Mode::Emergency),
        "BLINKING".value(Mode::Blinking),
        "OFF".value(Mode::Off),
    ))
    .parse_next(input)
}
