//! Shared test infrastructure for traffic-light-controller integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use traffic_light_controller::{
    LampLevels, SignalLamps, StatusEvent, StatusSink, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Lamps
// ============================================================================

/// Mock lamp hardware that records every write.
///
/// Clones share the same recording, so a handle kept by the test stays
/// readable after the controller takes ownership of another.
#[derive(Clone, Default)]
pub struct MockLamps {
    writes: Rc<RefCell<Vec<LampLevels>>>,
}

impl MockLamps {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent write, i.e. what the hardware currently shows
    pub fn last(&self) -> Option<LampLevels> {
        self.writes.borrow().last().copied()
    }

    /// Every write in order
    pub fn history(&self) -> Vec<LampLevels> {
        self.writes.borrow().clone()
    }

    pub fn clear(&self) {
        self.writes.borrow_mut().clear();
    }
}

impl SignalLamps for MockLamps {
    fn set_levels(&mut self, levels: LampLevels) {
        self.writes.borrow_mut().push(levels);
    }
}

// ============================================================================
// Mock Status Sink
// ============================================================================

/// Mock status sink that records every emitted event.
///
/// Shares its recording across clones like [`MockLamps`].
#[derive(Clone, Default)]
pub struct MockSink {
    events: Rc<RefCell<Vec<StatusEvent>>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event in emission order
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.borrow().clone()
    }

    /// Every event rendered as its wire line, in emission order
    pub fn lines(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|event| event.to_string())
            .collect()
    }

    pub fn last(&self) -> Option<StatusEvent> {
        self.events.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl StatusSink for MockSink {
    fn emit(&mut self, event: StatusEvent) {
        self.events.borrow_mut().push(event);
    }
}
