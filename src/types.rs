//! Core types shared across the controller.

use crate::time::TimeDuration;

/// Default red hold duration in milliseconds.
pub const DEFAULT_RED_MS: u64 = 2000;

/// Default yellow hold duration in milliseconds.
pub const DEFAULT_YELLOW_MS: u64 = 500;

/// Default green hold duration in milliseconds.
pub const DEFAULT_GREEN_MS: u64 = 2000;

/// Top-level operating state of the controller.
///
/// Exactly one mode is active at any time. The mode is owned by
/// [`TrafficController`](crate::TrafficController) and changes only through
/// its `set_mode` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Repeating red/yellow/green phase sequence.
    Normal,
    /// Steady red, held until the mode changes again.
    Emergency,
    /// All three lamps blinking in unison.
    Blinking,
    /// All lamps dark, nothing scheduled.
    Off,
}

impl Mode {
    /// Wire name used by the `MODE:` status line and command values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Emergency => "EMERGENCY",
            Mode::Blinking => "BLINKING",
            Mode::Off => "OFF",
        }
    }
}

/// Identity of a physical control button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Toggles between EMERGENCY and NORMAL.
    Emergency,
    /// Toggles between BLINKING and NORMAL.
    Blinking,
    /// Toggles between OFF and NORMAL.
    Power,
}

/// Logical intensity triple for the three signal lamps, 0-255 per channel.
///
/// These are pre-brightness values; the
/// [`OutputDriver`](crate::output::OutputDriver) scales them before they
/// reach hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LampLevels {
    /// Red lamp intensity.
    pub red: u8,
    /// Yellow lamp intensity.
    pub yellow: u8,
    /// Green lamp intensity.
    pub green: u8,
}

impl LampLevels {
    /// All lamps dark.
    pub const OFF: Self = Self::new(0, 0, 0);

    /// Red lamp at full intensity, others dark.
    pub const RED: Self = Self::new(255, 0, 0);

    /// Yellow lamp at full intensity, others dark.
    pub const YELLOW: Self = Self::new(0, 255, 0);

    /// Green lamp at full intensity, others dark.
    pub const GREEN: Self = Self::new(0, 0, 255);

    /// Every lamp at full intensity.
    pub const ALL: Self = Self::new(255, 255, 255);

    /// Creates a level triple.
    #[inline]
    pub const fn new(red: u8, yellow: u8, green: u8) -> Self {
        Self { red, yellow, green }
    }
}

/// Mutable hold durations for the sequenced phases.
///
/// Durations are read at tick time, so a change takes effect the next time
/// the affected phase is scheduled; an already-pending hold is never
/// stretched or shortened retroactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig<D: TimeDuration> {
    /// Hold duration for the red phase.
    pub red: D,
    /// Hold duration for both yellow phases.
    pub yellow: D,
    /// Hold duration for the green phase.
    pub green: D,
}

impl<D: TimeDuration> Default for TimingConfig<D> {
    fn default() -> Self {
        Self {
            red: D::from_millis(DEFAULT_RED_MS),
            yellow: D::from_millis(DEFAULT_YELLOW_MS),
            green: D::from_millis(DEFAULT_GREEN_MS),
        }
    }
}
