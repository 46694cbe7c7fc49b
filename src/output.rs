//! Lamp hardware abstraction and brightness-scaled output driving.

use crate::types::LampLevels;

/// Trait for abstracting the three-lamp signal head hardware.
///
/// Implement this for your output stage (PWM channels, GPIO pins, a shift
/// register, etc.) to let the controller drive it. Levels are 0-255 per
/// lamp; hardware without intensity control can treat any non-zero level as
/// on. Handle hardware errors internally - this method cannot fail.
pub trait SignalLamps {
    /// Drives the three lamps to the given levels.
    fn set_levels(&mut self, levels: LampLevels);
}

/// Applies the global brightness factor and writes lamp levels to hardware.
///
/// The driver remembers the last logical levels it was asked to show. A
/// brightness change therefore re-drives the hardware immediately instead of
/// waiting for the next phase tick, which keeps a held state (steady
/// emergency red, lamps off) tracking the sensor too.
pub struct OutputDriver<L: SignalLamps> {
    lamps: L,
    brightness: u8,
    current: LampLevels,
}

impl<L: SignalLamps> OutputDriver<L> {
    /// Creates a driver at full brightness with all lamps dark.
    pub fn new(mut lamps: L) -> Self {
        lamps.set_levels(LampLevels::OFF);

        Self {
            lamps,
            brightness: 255,
            current: LampLevels::OFF,
        }
    }

    /// Drives the lamps to `levels`, scaled by the current brightness.
    pub fn set_channels(&mut self, levels: LampLevels) {
        self.current = levels;
        self.apply();
    }

    /// Convenience for `set_channels(LampLevels::OFF)`.
    pub fn all_off(&mut self) {
        self.set_channels(LampLevels::OFF);
    }

    /// Updates the brightness factor, re-driving the last levels with it.
    pub fn set_brightness(&mut self, brightness: u8) {
        if brightness != self.brightness {
            self.brightness = brightness;
            self.apply();
        }
    }

    /// Returns the current brightness factor.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Returns the logical levels last requested, before brightness scaling.
    pub fn current_levels(&self) -> LampLevels {
        self.current
    }

    fn apply(&mut self) {
        self.lamps.set_levels(LampLevels::new(
            scale(self.current.red, self.brightness),
            scale(self.current.yellow, self.brightness),
            scale(self.current.green, self.brightness),
        ));
    }
}

/// Scales one channel level by a 0-255 brightness factor.
#[inline]
fn scale(level: u8, brightness: u8) -> u8 {
    ((level as u16 * brightness as u16) / 255) as u8
}
