//! Fixed-interval animation timer.
//!
//! The scheduler never sleeps or spawns anything. The host asks for
//! [`Scheduler::next_deadline`], waits until then, and calls back in with the
//! current time; the scheduler runs the cycle it is given and re-arms.

use log::{trace, warn};
use std::time::{Duration, Instant};

/// Identifies one armed run of the scheduler. Ids are never reused, so a
/// timer from a stopped run can't fire again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickTimer {
    pub id: TimerId,
    pub deadline: Instant,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running(TickTimer),
}

const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    state: RunState,
    next_id: u64,
}

impl Scheduler {
    /// Intervals shorter than a millisecond are raised to one.
    pub fn new(interval: Duration) -> Self {
        if interval < MIN_INTERVAL {
            warn!("tick interval {interval:?} raised to {MIN_INTERVAL:?}");
        }
        Self {
            interval: interval.max(MIN_INTERVAL),
            state: RunState::Idle,
            next_id: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running(_))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            RunState::Running(timer) => Some(timer.deadline),
            RunState::Idle => None,
        }
    }

    /// Runs one cycle right away, then arms the timer. Does nothing if
    /// already running.
    pub fn start<F: FnOnce()>(&mut self, now: Instant, cycle: F) -> Option<TimerId> {
        if self.is_running() {
            return None;
        }
        cycle();
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.state = RunState::Running(TickTimer {
            id,
            deadline: now + self.interval,
        });
        Some(id)
    }

    pub fn stop(&mut self) {
        self.state = RunState::Idle;
    }

    /// Fires the current timer if it is due.
    pub fn poll<F: FnOnce()>(&mut self, now: Instant, cycle: F) -> bool {
        match self.state {
            RunState::Running(timer) => self.fire(timer.id, now, cycle),
            RunState::Idle => false,
        }
    }

    /// Runs one cycle if `id` is the armed timer and its deadline has passed,
    /// then re-arms for the next slot after `now`. Missed slots are dropped
    /// rather than replayed.
    pub fn fire<F: FnOnce()>(&mut self, id: TimerId, now: Instant, cycle: F) -> bool {
        let RunState::Running(timer) = self.state else {
            return false;
        };
        if timer.id != id || now < timer.deadline {
            return false;
        }

        cycle();

        let late = now - timer.deadline;
        let into_slot = late.as_nanos() % self.interval.as_nanos();
        let deadline = now + (self.interval - Duration::from_nanos(into_slot as u64));
        trace!("tick at {:?} late, next in {:?}", now - timer.deadline, deadline - now);
        self.state = RunState::Running(TickTimer { id, deadline });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const INTERVAL: Duration = Duration::from_millis(200);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn start_runs_a_cycle_and_arms() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(INTERVAL);
        let cycles = Cell::new(0);

        assert!(scheduler.start(now, || cycles.set(cycles.get() + 1)).is_some());
        assert_eq!(cycles.get(), 1);
        assert!(scheduler.is_running());
        assert_eq!(scheduler.next_deadline(), Some(now + INTERVAL));
    }

    #[test]
    fn start_while_running_is_a_no_op() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(INTERVAL);
        let cycles = Cell::new(0);
        scheduler.start(now, || cycles.set(cycles.get() + 1));
        let state = scheduler.state();

        assert_eq!(scheduler.start(now + ms(50), || cycles.set(cycles.get() + 1)), None);
        assert_eq!(cycles.get(), 1);
        assert_eq!(scheduler.state(), state);
    }

    #[test]
    fn poll_waits_for_the_deadline() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(INTERVAL);
        let cycles = Cell::new(0);
        scheduler.start(now, || {});

        assert!(!scheduler.poll(now + ms(199), || cycles.set(cycles.get() + 1)));
        assert!(scheduler.poll(now + ms(200), || cycles.set(cycles.get() + 1)));
        assert_eq!(cycles.get(), 1);
        assert_eq!(scheduler.next_deadline(), Some(now + ms(400)));
    }

    #[test]
    fn late_fire_skips_missed_slots() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(INTERVAL);
        let cycles = Cell::new(0);
        scheduler.start(now, || {});

        assert!(scheduler.poll(now + ms(750), || cycles.set(cycles.get() + 1)));
        assert_eq!(cycles.get(), 1);
        assert_eq!(scheduler.next_deadline(), Some(now + ms(800)));
        assert!(!scheduler.poll(now + ms(799), || cycles.set(cycles.get() + 1)));
    }

    #[test]
    fn very_late_fire_lands_on_the_next_slot() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(INTERVAL);
        scheduler.start(now, || {});

        assert!(scheduler.poll(now + ms(3_600_000 + 130), || {}));
        assert_eq!(scheduler.next_deadline(), Some(now + ms(3_600_200)));
    }

    #[test]
    fn zero_interval_is_raised_and_still_re_arms() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(Duration::ZERO);
        assert_eq!(scheduler.interval(), MIN_INTERVAL);
        scheduler.start(now, || {});

        assert!(scheduler.poll(now + MIN_INTERVAL, || {}));
        assert_eq!(scheduler.next_deadline(), Some(now + MIN_INTERVAL * 2));
        assert!(!scheduler.poll(now + MIN_INTERVAL, || {}));
    }

    #[test]
    fn stop_cancels_pending_timer() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(INTERVAL);
        scheduler.start(now, || {});
        scheduler.stop();

        assert_eq!(scheduler.state(), RunState::Idle);
        assert_eq!(scheduler.next_deadline(), None);
        assert!(!scheduler.poll(now + ms(1000), || panic!("stopped timer fired")));
        scheduler.stop();
        assert!(!scheduler.is_running());
    }

    #[test]
    fn stale_timer_id_never_fires() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new(INTERVAL);
        let first = scheduler.start(now, || {}).unwrap();
        scheduler.stop();
        let second = scheduler.start(now, || {}).unwrap();

        assert_ne!(first, second);
        assert!(!scheduler.fire(first, now + ms(1000), || panic!("stale timer fired")));
        assert!(scheduler.fire(second, now + ms(1000), || {}));
    }
}
