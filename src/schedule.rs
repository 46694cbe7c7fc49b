//! Cooperative scheduling of periodic activities.
//!
//! An activity is an identifier plus a period. The scheduler tracks when each
//! enabled activity is next due; the caller polls [`Scheduler::take_due`] from
//! its run loop and dispatches on the returned identifier. Nothing here
//! blocks, sleeps or interrupts.

use heapless::Vec;

use crate::time::{TimeDuration, TimeInstant};

/// Errors that can occur when registering activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// The scheduler's fixed capacity is already full.
    CapacityExceeded,
    /// An activity with this identifier is already registered.
    DuplicateActivity,
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::CapacityExceeded => {
                write!(f, "scheduler capacity exceeded")
            }
            SchedulerError::DuplicateActivity => {
                write!(f, "activity already registered")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedulerError {}

/// A registered periodic activity.
struct Activity<Id, I: TimeInstant> {
    id: Id,
    period: I::Duration,
    /// Time the current gap is measured from. `None` while disabled.
    armed_at: Option<I>,
    /// Wait before the next fire. Usually `period`, but enabling zeroes it
    /// and [`Scheduler::reschedule`] can override it for one fire.
    gap: I::Duration,
}

/// Fixed-capacity scheduler for cooperative periodic activities.
///
/// Activities are registered disabled. Enabling one makes it due on the very
/// next [`take_due`](Self::take_due) poll. After each fire the activity
/// re-arms at its registered period unless [`reschedule`](Self::reschedule)
/// overrides the next gap.
///
/// # Type Parameters
///
/// * `Id` - Activity identifier, typically a small enum
/// * `I` - Instant type of the driving clock
/// * `N` - Maximum number of registered activities
pub struct Scheduler<Id, I, const N: usize>
where
    Id: Copy + PartialEq,
    I: TimeInstant,
{
    slots: Vec<Activity<Id, I>, N>,
}

impl<Id, I, const N: usize> Scheduler<Id, I, N>
where
    Id: Copy + PartialEq,
    I: TimeInstant,
{
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Registers an activity with its regular period. It starts disabled.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::DuplicateActivity`] if the identifier is
    /// already registered, or [`SchedulerError::CapacityExceeded`] if all
    /// `N` slots are taken.
    pub fn add(&mut self, id: Id, period: I::Duration) -> Result<(), SchedulerError> {
        if self.slots.iter().any(|slot| slot.id == id) {
            return Err(SchedulerError::DuplicateActivity);
        }

        let activity = Activity {
            id,
            period,
            armed_at: None,
            gap: period,
        };

        if self.slots.push(activity).is_err() {
            return Err(SchedulerError::CapacityExceeded);
        }

        Ok(())
    }

    /// Enables an activity, making it due immediately.
    ///
    /// Returns `false` if the identifier is not registered. Enabling an
    /// already-enabled activity re-arms it, so its next fire is also
    /// immediate.
    pub fn enable(&mut self, id: Id, now: I) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.armed_at = Some(now);
                slot.gap = I::Duration::ZERO;
                true
            }
            None => false,
        }
    }

    /// Disables an activity. Returns `false` if it is not registered.
    ///
    /// A disabled activity keeps its registration and period but never
    /// fires; re-enabling starts it fresh rather than resuming.
    pub fn disable(&mut self, id: Id) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.armed_at = None;
                true
            }
            None => false,
        }
    }

    /// Returns whether an activity is currently enabled.
    pub fn is_enabled(&self, id: Id) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.id == id && slot.armed_at.is_some())
    }

    /// Returns whether any activity is currently enabled.
    pub fn any_enabled(&self) -> bool {
        self.slots.iter().any(|slot| slot.armed_at.is_some())
    }

    /// Returns one due activity and re-arms it, or `None` if nothing is due.
    ///
    /// The re-armed gap is the registered period; a pending
    /// [`reschedule`](Self::reschedule) override is consumed by the fire it
    /// delayed. Callers drain due work by looping until `None`.
    pub fn take_due(&mut self, now: I) -> Option<Id> {
        for slot in self.slots.iter_mut() {
            let Some(armed_at) = slot.armed_at else {
                continue;
            };

            let elapsed = now.duration_since(armed_at);
            if elapsed.as_millis() >= slot.gap.as_millis() {
                slot.armed_at = Some(now);
                slot.gap = slot.period;
                return Some(slot.id);
            }
        }

        None
    }

    /// Overrides the gap before an enabled activity's next fire.
    ///
    /// The override lasts for exactly one fire, after which the activity
    /// returns to its registered period. Returns `false` if the activity is
    /// not registered or not enabled.
    pub fn reschedule(&mut self, id: Id, gap: I::Duration) -> bool {
        match self.slot_mut(id) {
            Some(slot) if slot.armed_at.is_some() => {
                slot.gap = gap;
                true
            }
            _ => false,
        }
    }

    /// Returns the time until the earliest enabled activity is due.
    ///
    /// `None` means nothing is enabled and the caller can sleep indefinitely.
    /// A zero duration means work is already due.
    pub fn idle_time(&self, now: I) -> Option<I::Duration> {
        let mut earliest: Option<I::Duration> = None;

        for slot in self.slots.iter() {
            let Some(armed_at) = slot.armed_at else {
                continue;
            };

            let elapsed = now.duration_since(armed_at);
            let remaining = slot.gap.saturating_sub(elapsed);

            earliest = Some(match earliest {
                Some(current) if current.as_millis() <= remaining.as_millis() => current,
                _ => remaining,
            });
        }

        earliest
    }

    fn slot_mut(&mut self, id: Id) -> Option<&mut Activity<Id, I>> {
        self.slots.iter_mut().find(|slot| slot.id == id)
    }
}

impl<Id, I, const N: usize> Default for Scheduler<Id, I, N>
where
    Id: Copy + PartialEq,
    I: TimeInstant,
{
    fn default() -> Self {
        Self::new()
    }
}
