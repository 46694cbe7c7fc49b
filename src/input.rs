//! Input conditioning for buttons, interrupt lines and the light sensor.
//!
//! These types turn raw pin and ADC readings into clean events. They are
//! deliberately freestanding so an application can sample them from a timer
//! loop, an interrupt handler or a test harness.

use portable_atomic::{AtomicBool, Ordering};

use crate::time::{TimeDuration, TimeInstant};

/// Debounce window applied to button presses, in milliseconds.
pub const DEBOUNCE_WINDOW_MS: u64 = 50;

/// Full-scale raw reading of the ambient light sensor.
pub const SENSOR_RAW_MAX: u16 = 1023;

/// Default minimum brightness the sensor mapping will report.
pub const DEFAULT_BRIGHTNESS_FLOOR: u8 = 10;

/// Default change in mapped brightness required before a new value is
/// reported.
pub const DEFAULT_SENSOR_DEADBAND: u8 = 4;

/// A debounced button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// The button went from released to pressed.
    Pressed,
    /// The button went from pressed to released.
    Released,
}

/// Debounces one button by locking out repeat presses.
///
/// A rising edge is reported immediately, then further presses are ignored
/// until the debounce window has passed. Releases are reported without any
/// delay. Sampled at a scan period no shorter than the window, a single
/// physical press produces exactly one [`Edge::Pressed`] no matter how much
/// the contacts chatter.
pub struct Debouncer<I: TimeInstant> {
    pressed: bool,
    last_press: Option<I>,
    window: I::Duration,
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer with the default window.
    pub fn new() -> Self {
        Self::with_window(I::Duration::from_millis(DEBOUNCE_WINDOW_MS))
    }

    /// Creates a debouncer with a custom lockout window.
    pub fn with_window(window: I::Duration) -> Self {
        Self {
            pressed: false,
            last_press: None,
            window,
        }
    }

    /// Feeds one raw sample and returns the transition it completed, if any.
    ///
    /// Call this at a scan period no shorter than the lockout window; a
    /// faster scan can see a genuine re-press while the lockout still holds
    /// and swallow it.
    pub fn sample(&mut self, raw_pressed: bool, now: I) -> Option<Edge> {
        if raw_pressed && !self.pressed {
            let quiet = match self.last_press {
                Some(last) => now.duration_since(last).as_millis() >= self.window.as_millis(),
                None => true,
            };

            if quiet {
                self.pressed = true;
                self.last_press = Some(now);
                return Some(Edge::Pressed);
            }
        } else if !raw_pressed && self.pressed {
            self.pressed = false;
            return Some(Edge::Released);
        }

        None
    }

    /// Returns whether the button is currently held down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl<I: TimeInstant> Default for Debouncer<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A one-shot flag set from interrupt context and drained from the run loop.
///
/// [`notify`](Self::notify) is safe to call from an interrupt handler;
/// [`take`](Self::take) consumes the flag. Multiple notifications before a
/// take collapse into one.
#[derive(Debug)]
pub struct EdgeLatch {
    pending: AtomicBool,
}

impl EdgeLatch {
    /// Creates a cleared latch. Usable in `static` initializers.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Records that the edge occurred.
    pub fn notify(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Clears the latch, returning whether it was set.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Returns whether a notification is waiting, without clearing it.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Tuning for the ambient light mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    /// Lowest brightness the mapping will produce, keeping lamps visible in
    /// the dark.
    pub floor: u8,
    /// Change in mapped brightness required before
    /// [`BrightnessSensor::update`] reports a new value.
    pub deadband: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            floor: DEFAULT_BRIGHTNESS_FLOOR,
            deadband: DEFAULT_SENSOR_DEADBAND,
        }
    }
}

/// Maps raw ambient light readings to a lamp brightness level.
///
/// The mapping is linear from the configured floor at a dark reading up to
/// full brightness at [`SENSOR_RAW_MAX`]. Readings are filtered through a
/// deadband so ADC noise does not cause a stream of tiny brightness updates.
#[derive(Debug)]
pub struct BrightnessSensor {
    config: SensorConfig,
    reported: u8,
}

impl BrightnessSensor {
    /// Creates a sensor with the default configuration, reporting full
    /// brightness until the first reading.
    pub fn new() -> Self {
        Self::with_config(SensorConfig::default())
    }

    /// Creates a sensor with custom floor and deadband values.
    pub fn with_config(config: SensorConfig) -> Self {
        Self {
            config,
            reported: u8::MAX,
        }
    }

    /// Feeds one raw reading and returns the new brightness if it moved
    /// outside the deadband.
    pub fn update(&mut self, raw: u16) -> Option<u8> {
        let mapped = self.map(raw);

        if self.reported.abs_diff(mapped) >= self.config.deadband {
            self.reported = mapped;
            Some(mapped)
        } else {
            None
        }
    }

    /// Returns the most recently reported brightness.
    pub fn brightness(&self) -> u8 {
        self.reported
    }

    fn map(&self, raw: u16) -> u8 {
        let raw = u32::from(raw.min(SENSOR_RAW_MAX));
        let span = u32::from(u8::MAX - self.config.floor);
        self.config.floor + ((raw * span) / u32::from(SENSOR_RAW_MAX)) as u8
    }
}

impl Default for BrightnessSensor {
    fn default() -> Self {
        Self::new()
    }
}
