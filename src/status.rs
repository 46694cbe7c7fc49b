//! The observable status-line protocol.
//!
//! Every mode transition, phase change, configuration echo and brightness
//! report becomes a [`StatusEvent`] delivered through a [`StatusSink`]. The
//! `Display` impl of each event is its exact wire line, so external tooling
//! can parse the output of `writeln!(serial, "{}", event)` directly.

use crate::types::Mode;

/// One observable event emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    /// `Traffic Light System Started` - emitted once during startup.
    Started,
    /// `MODE:<NAME>` - a mode transition completed.
    ModeChanged(Mode),
    /// `RED` - the red phase began.
    PhaseRed,
    /// `YELLOW` - either yellow phase began.
    PhaseYellow,
    /// `GREEN` - the green phase began.
    PhaseGreen,
    /// `GREEN_BLINK_ON` - the green blink sub-phase lit the lamp.
    GreenBlinkOn,
    /// `GREEN_BLINK_OFF` - the green blink sub-phase darkened the lamp.
    GreenBlinkOff,
    /// `RED_DURATION:<ms>` - echo of a red duration command.
    RedDuration(u32),
    /// `YELLOW_DURATION:<ms>` - echo of a yellow duration command.
    YellowDuration(u32),
    /// `GREEN_DURATION:<ms>` - echo of a green duration command.
    GreenDuration(u32),
    /// `Brightness: <n>` - the brightness factor changed.
    Brightness(u8),
}

impl core::fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatusEvent::Started => write!(f, "Traffic Light System Started"),
            StatusEvent::ModeChanged(mode) => write!(f, "MODE:{}", mode.as_str()),
            StatusEvent::PhaseRed => write!(f, "RED"),
            StatusEvent::PhaseYellow => write!(f, "YELLOW"),
            StatusEvent::PhaseGreen => write!(f, "GREEN"),
            StatusEvent::GreenBlinkOn => write!(f, "GREEN_BLINK_ON"),
            StatusEvent::GreenBlinkOff => write!(f, "GREEN_BLINK_OFF"),
            StatusEvent::RedDuration(ms) => write!(f, "RED_DURATION:{}", ms),
            StatusEvent::YellowDuration(ms) => write!(f, "YELLOW_DURATION:{}", ms),
            StatusEvent::GreenDuration(ms) => write!(f, "GREEN_DURATION:{}", ms),
            StatusEvent::Brightness(value) => write!(f, "Brightness: {}", value),
        }
    }
}

/// Receives status events as they happen.
///
/// Implement this for your reporting channel (UART, RTT, USB serial, a test
/// recorder). A typical hardware implementation is one line per event:
/// `writeln!(serial, "{}", event)`. Handle transport errors internally -
/// this method cannot fail.
pub trait StatusSink {
    /// Delivers one status event.
    fn emit(&mut self, event: StatusEvent);
}
