//! The top-level traffic light controller.
//!
//! [`TrafficController`] ties the pieces together: it owns the mode state
//! machine, the phase sequencer, the all-lamp flasher, the output driver and
//! the activity schedule. The application supplies the hardware seams (lamps,
//! status sink, time source), feeds it debounced button presses, command
//! lines and sensor readings, and calls [`service`](TrafficController::service)
//! from its run loop.

use crate::blink::{BLINK_ALL_PERIOD_MS, BlinkAll};
use crate::command::{Command, CommandError};
use crate::input::BrightnessSensor;
use crate::output::{OutputDriver, SignalLamps};
use crate::phase::{Phase, PhaseSequencer};
use crate::schedule::Scheduler;
use crate::status::{StatusEvent, StatusSink};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{ButtonId, DEFAULT_RED_MS, LampLevels, Mode, TimingConfig};

/// Suggested scan period for polling buttons, in milliseconds.
///
/// Matches the debounce window, so one physical press is never sampled as
/// more than one clean edge.
pub const BUTTON_SCAN_PERIOD_MS: u64 = 50;

/// Suggested scan period for the ambient light sensor, in milliseconds.
pub const SENSOR_SCAN_PERIOD_MS: u64 = 100;

/// Suggested poll period for the command channel, in milliseconds.
pub const COMMAND_POLL_PERIOD_MS: u64 = 100;

const SCHEDULE_SLOTS: usize = 2;

/// The controller's internally scheduled activities.
///
/// Only work that drives the lamps is scheduled here. Input polling belongs
/// to the application loop, so disabling these never deafens the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActivityId {
    /// Advances the NORMAL-mode phase sequence.
    PhaseTick,
    /// Toggles the BLINKING-mode flash.
    BlinkTick,
}

/// State machine and scheduler for a three-lamp traffic signal.
///
/// The controller starts dormant with the lamps dark. Calling
/// [`start`](Self::start) announces the startup banner and enters NORMAL
/// mode; from then on the mode changes through button presses and `MODE:`
/// commands. Each mode transition tears down the scheduled work of the
/// previous mode before arming its own, so exactly one visual behavior is
/// ever active.
///
/// All timing flows through the supplied [`TimeSource`], which makes the
/// controller driveable from a hardware timer or a test clock alike.
///
/// # Type Parameters
///
/// * `I` - Instant type of the driving clock
/// * `L` - Lamp hardware implementation
/// * `S` - Status line receiver
/// * `T` - Time source providing current instants
pub struct TrafficController<'t, I: TimeInstant, L: SignalLamps, S: StatusSink, T: TimeSource<I>> {
    output: OutputDriver<L>,
    sink: S,
    time_source: &'t T,
    mode: Mode,
    timing: TimingConfig<I::Duration>,
    sequencer: PhaseSequencer,
    blink: BlinkAll,
    schedule: Scheduler<ActivityId, I, SCHEDULE_SLOTS>,
    sensor: BrightnessSensor,
}

impl<'t, I: TimeInstant, L: SignalLamps, S: StatusSink, T: TimeSource<I>>
    TrafficController<'t, I, L, S, T>
{
    /// Creates a dormant controller with default phase timing.
    ///
    /// The lamps are driven dark immediately. Nothing is scheduled and no
    /// status line is emitted until [`start`](Self::start).
    pub fn new(lamps: L, sink: S, time_source: &'t T) -> Self {
        Self::with_config(lamps, sink, time_source, TimingConfig::default())
    }

    /// Creates a dormant controller with custom phase timing.
    pub fn with_config(
        lamps: L,
        sink: S,
        time_source: &'t T,
        timing: TimingConfig<I::Duration>,
    ) -> Self {
        let mut schedule = Scheduler::new();
        // Two slots for two distinct ids: registration cannot fail.
        let _ = schedule.add(
            ActivityId::PhaseTick,
            I::Duration::from_millis(DEFAULT_RED_MS),
        );
        let _ = schedule.add(
            ActivityId::BlinkTick,
            I::Duration::from_millis(BLINK_ALL_PERIOD_MS),
        );

        Self {
            output: OutputDriver::new(lamps),
            sink,
            time_source,
            mode: Mode::Off,
            timing,
            sequencer: PhaseSequencer::new(),
            blink: BlinkAll::new(),
            schedule,
            sensor: BrightnessSensor::new(),
        }
    }

    /// Announces startup and enters NORMAL mode.
    ///
    /// Emits the banner line followed by `MODE:NORMAL`; the first
    /// [`service`](Self::service) call after this shows the red phase.
    pub fn start(&mut self) {
        self.sink.emit(StatusEvent::Started);
        self.set_mode(Mode::Normal);
    }

    /// Transitions to the given mode.
    ///
    /// Re-entering the current mode is a no-op: nothing is re-armed and no
    /// status line is emitted. A real transition disables the previous
    /// mode's scheduled work, arms the new mode's behavior from a clean
    /// state and emits `MODE:<NAME>`.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }

        let now = self.time_source.now();
        self.schedule.disable(ActivityId::PhaseTick);
        self.schedule.disable(ActivityId::BlinkTick);

        match mode {
            Mode::Normal => {
                // The sequence always restarts from red.
                self.sequencer.reset();
                self.schedule.enable(ActivityId::PhaseTick, now);
            }
            Mode::Emergency => {
                self.output.set_channels(LampLevels::RED);
            }
            Mode::Blinking => {
                // The flash always restarts with the lit half.
                self.blink.reset();
                self.schedule.enable(ActivityId::BlinkTick, now);
            }
            Mode::Off => {
                self.output.all_off();
            }
        }

        self.mode = mode;
        self.sink.emit(StatusEvent::ModeChanged(mode));
    }

    /// Applies a debounced button press.
    ///
    /// Each button toggles between its dedicated mode and NORMAL. Pressing a
    /// button while some third mode is active switches straight to the
    /// button's mode.
    pub fn handle_button_press(&mut self, button: ButtonId) {
        let target = match button {
            ButtonId::Emergency if self.mode == Mode::Emergency => Mode::Normal,
            ButtonId::Emergency => Mode::Emergency,
            ButtonId::Blinking if self.mode == Mode::Blinking => Mode::Normal,
            ButtonId::Blinking => Mode::Blinking,
            ButtonId::Power if self.mode == Mode::Off => Mode::Normal,
            ButtonId::Power => Mode::Off,
        };

        self.set_mode(target);
    }

    /// Parses and applies one line from the command channel.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unrecognized`] for a malformed line. A
    /// rejected line changes no state and emits nothing.
    pub fn handle_line(&mut self, line: &str) -> Result<(), CommandError> {
        let command = Command::parse_line(line)?;
        self.handle_command(command);
        Ok(())
    }

    /// Applies an already-parsed command.
    ///
    /// Duration updates are echoed (`RED_DURATION:<ms>` and friends) and
    /// take effect the next time the affected phase is scheduled. Mode
    /// commands go through [`set_mode`](Self::set_mode).
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetRedDuration(ms) => {
                self.timing.red = I::Duration::from_millis(u64::from(ms));
                self.sink.emit(StatusEvent::RedDuration(ms));
            }
            Command::SetYellowDuration(ms) => {
                self.timing.yellow = I::Duration::from_millis(u64::from(ms));
                self.sink.emit(StatusEvent::YellowDuration(ms));
            }
            Command::SetGreenDuration(ms) => {
                self.timing.green = I::Duration::from_millis(u64::from(ms));
                self.sink.emit(StatusEvent::GreenDuration(ms));
            }
            Command::SetMode(mode) => self.set_mode(mode),
        }
    }

    /// Feeds one raw ambient light reading.
    ///
    /// When the mapped brightness moves outside the sensor deadband, the
    /// new level is applied to the lamps (rescaling whatever they currently
    /// show) and reported as a `Brightness:` line.
    pub fn update_brightness(&mut self, raw: u16) {
        if let Some(level) = self.sensor.update(raw) {
            self.output.set_brightness(level);
            self.sink.emit(StatusEvent::Brightness(level));
        }
    }

    /// Runs all due scheduled work and returns the time until the next due.
    ///
    /// Call this from the run loop. `None` means nothing is scheduled (OFF
    /// and EMERGENCY hold a static picture); the application still polls
    /// its inputs at its own cadence.
    pub fn service(&mut self) -> Option<I::Duration> {
        let now = self.time_source.now();

        while let Some(id) = self.schedule.take_due(now) {
            match id {
                ActivityId::PhaseTick => {
                    let tick = self.sequencer.advance(&self.timing);
                    self.output.set_channels(tick.levels);
                    self.sink.emit(tick.event);
                    self.schedule.reschedule(ActivityId::PhaseTick, tick.hold);
                }
                ActivityId::BlinkTick => {
                    let levels = self.blink.toggle();
                    self.output.set_channels(levels);
                }
            }
        }

        self.schedule.idle_time(now)
    }

    /// Returns the active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the current phase hold durations.
    pub fn timing(&self) -> TimingConfig<I::Duration> {
        self.timing
    }

    /// Returns the phase the next NORMAL-mode tick will show.
    pub fn pending_phase(&self) -> Phase {
        self.sequencer.phase()
    }

    /// Returns the brightness factor currently applied to the lamps.
    pub fn brightness(&self) -> u8 {
        self.output.brightness()
    }

    /// Returns the logical levels currently shown, before brightness
    /// scaling.
    pub fn current_levels(&self) -> LampLevels {
        self.output.current_levels()
    }
}
