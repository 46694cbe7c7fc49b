//! NORMAL-mode phase sequencing.
//!
//! The sequence is fixed: red, yellow, green, a green-blink interlude, then
//! yellow again before wrapping back to red. Yellow showing twice per cycle
//! (once leaving red, once leaving the blink interlude) is intentional.

use crate::status::StatusEvent;
use crate::time::TimeDuration;
use crate::types::{LampLevels, TimingConfig};

/// Cadence of the green-blink sub-phase in milliseconds.
pub const GREEN_BLINK_PERIOD_MS: u64 = 166;

/// Number of full on/off toggles in the green-blink sub-phase.
pub const GREEN_BLINK_TOGGLES: u8 = 3;

/// One step of the repeating NORMAL-mode sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Steady red, held for the configured red duration.
    Red,
    /// Yellow between red and green.
    Yellow,
    /// Steady green, held for the configured green duration.
    Green,
    /// Green flashing at the fixed blink cadence.
    GreenBlink,
    /// Yellow again on the way back to red.
    YellowReturn,
}

/// What one sequencer tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTick<D: TimeDuration> {
    /// Lamp levels to show.
    pub levels: LampLevels,
    /// How long to hold them before the next tick.
    pub hold: D,
    /// Status event describing the step.
    pub event: StatusEvent,
}

/// Advances the fixed phase cycle, one step per call.
///
/// The sequencer owns nothing but its position: the phase the next tick will
/// show plus the blink bookkeeping inside the green-blink sub-phase.
/// [`advance`](Self::advance) reads hold durations from the timing
/// configuration at tick time, so a changed duration is picked up the next
/// time its phase comes around and an already-running hold is unaffected.
#[derive(Debug)]
pub struct PhaseSequencer {
    phase: Phase,
    blink_lit: bool,
    blinks_done: u8,
}

impl PhaseSequencer {
    /// Creates a sequencer positioned at the start of the cycle.
    pub fn new() -> Self {
        Self {
            phase: Phase::Red,
            blink_lit: true,
            blinks_done: 0,
        }
    }

    /// Rewinds to the start of the cycle.
    ///
    /// The next tick shows red and the blink bookkeeping is cleared, so a
    /// re-armed sequence always replays identically.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the phase the next [`advance`](Self::advance) call will show.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Emits the current phase and moves the cycle forward.
    pub fn advance<D: TimeDuration>(&mut self, timing: &TimingConfig<D>) -> PhaseTick<D> {
        match self.phase {
            Phase::Red => {
                self.phase = Phase::Yellow;
                PhaseTick {
                    levels: LampLevels::RED,
                    hold: timing.red,
                    event: StatusEvent::PhaseRed,
                }
            }
            Phase::Yellow => {
                self.phase = Phase::Green;
                PhaseTick {
                    levels: LampLevels::YELLOW,
                    hold: timing.yellow,
                    event: StatusEvent::PhaseYellow,
                }
            }
            Phase::Green => {
                self.phase = Phase::GreenBlink;
                PhaseTick {
                    levels: LampLevels::GREEN,
                    hold: timing.green,
                    event: StatusEvent::PhaseGreen,
                }
            }
            Phase::GreenBlink => {
                let hold = D::from_millis(GREEN_BLINK_PERIOD_MS);

                if self.blink_lit {
                    self.blink_lit = false;
                    PhaseTick {
                        levels: LampLevels::GREEN,
                        hold,
                        event: StatusEvent::GreenBlinkOn,
                    }
                } else {
                    self.blink_lit = true;
                    self.blinks_done += 1;

                    if self.blinks_done == GREEN_BLINK_TOGGLES {
                        self.blinks_done = 0;
                        self.phase = Phase::YellowReturn;
                    }

                    PhaseTick {
                        levels: LampLevels::OFF,
                        hold,
                        event: StatusEvent::GreenBlinkOff,
                    }
                }
            }
            Phase::YellowReturn => {
                self.phase = Phase::Red;
                PhaseTick {
                    levels: LampLevels::YELLOW,
                    hold: timing.yellow,
                    event: StatusEvent::PhaseYellow,
                }
            }
        }
    }
}

impl Default for PhaseSequencer {
    fn default() -> Self {
        Self::new()
    }
}
