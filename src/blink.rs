//! BLINKING-mode all-lamp flasher.

use crate::types::LampLevels;

/// Cadence of the all-lamp flash in milliseconds.
pub const BLINK_ALL_PERIOD_MS: u64 = 500;

/// Toggles every lamp together at a fixed cadence.
///
/// Each [`toggle`](Self::toggle) call returns the levels to show for the next
/// half-period. A fresh or [`reset`](Self::reset) flasher always starts with
/// the lit half, so entering BLINKING mode is immediately visible.
#[derive(Debug)]
pub struct BlinkAll {
    lit: bool,
}

impl BlinkAll {
    /// Creates a flasher whose first toggle lights every lamp.
    pub fn new() -> Self {
        Self { lit: true }
    }

    /// Restarts the flash with the lit half.
    pub fn reset(&mut self) {
        self.lit = true;
    }

    /// Returns the levels for the next half-period and flips the state.
    pub fn toggle(&mut self) -> LampLevels {
        let levels = if self.lit {
            LampLevels::ALL
        } else {
            LampLevels::OFF
        };
        self.lit = !self.lit;
        levels
    }
}

impl Default for BlinkAll {
    fn default() -> Self {
        Self::new()
    }
}
