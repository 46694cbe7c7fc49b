#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TrafficController`**: Owns the mode state machine and drives the lamps from your run loop
//! - **`Mode`**: Top-level operating state (`Normal`, `Emergency`, `Blinking`, `Off`)
//! - **`PhaseSequencer`**: The fixed red/yellow/green/green-blink cycle of NORMAL mode
//! - **`Scheduler`**: Cooperative fixed-capacity scheduler for periodic activities
//! - **`Debouncer`** / **`EdgeLatch`**: Turn raw button and interrupt inputs into clean events
//! - **`BrightnessSensor`**: Maps ambient light readings to a lamp brightness factor
//! - **`Command`**: Parsed `PARAM:VALUE` lines from the serial control channel
//! - **`StatusEvent`**: Observable status lines (`MODE:NORMAL`, `RED`, `GREEN_BLINK_ON`, ...)
//! - **`SignalLamps`**: Trait to implement for your lamp hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Lamp intensities are logical 0-255 values per channel. The output driver
//! scales them by the current brightness factor before they reach your
//! `SignalLamps` implementation, so hardware only ever sees the final duty
//! values.

pub mod time;
pub mod types;
pub mod output;
pub mod phase;
pub mod blink;
pub mod schedule;
pub mod input;
pub mod command;
pub mod status;
pub mod controller;

pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{ButtonId, LampLevels, Mode, TimingConfig};
pub use output::{OutputDriver, SignalLamps};
pub use phase::{GREEN_BLINK_PERIOD_MS, GREEN_BLINK_TOGGLES, Phase, PhaseSequencer, PhaseTick};
pub use blink::{BLINK_ALL_PERIOD_MS, BlinkAll};
pub use schedule::{Scheduler, SchedulerError};
pub use input::{
    BrightnessSensor, DEBOUNCE_WINDOW_MS, Debouncer, Edge, EdgeLatch, SENSOR_RAW_MAX, SensorConfig,
};
pub use command::{Command, CommandError};
pub use status::{StatusEvent, StatusSink};
pub use controller::{
    BUTTON_SCAN_PERIOD_MS, COMMAND_POLL_PERIOD_MS, SENSOR_SCAN_PERIOD_MS, TrafficController,
};
