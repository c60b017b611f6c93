//! Virtual-time scheduler shared by every motion component
//!
//! All animation progress in Lantern is driven by scheduled callbacks on one
//! thread. The scheduler never calls back into components itself: advancing
//! it returns the firings in chronological order and the caller dispatches
//! them, so ownership of every component stays with its controller.

use lantern_core::{IdAllocator, Millis, TimerId};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy)]
enum TimerKind {
    Timeout,
    Interval { period: Millis },
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: Millis,
    kind: TimerKind,
}

/// One timer firing, reported by [`Scheduler::advance_to`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    /// The virtual time the timer was due, not the time it was observed
    pub at: Millis,
}

/// Deterministic timer wheel over virtual milliseconds
pub struct Scheduler {
    now: Millis,
    ids: IdAllocator,
    timers: HashMap<TimerId, Timer>,
    /// Pending firings ordered by (due, id)
    queue: BTreeSet<(Millis, TimerId)>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now: 0,
            ids: IdAllocator::new(),
            timers: HashMap::new(),
            queue: BTreeSet::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Arm a one-shot timer firing `delay` ms from now
    pub fn set_timeout(&mut self, delay: Millis) -> TimerId {
        self.arm(delay, TimerKind::Timeout)
    }

    /// Arm a repeating timer. The first firing is one period from now.
    /// Periods below 1 ms are clamped to 1 ms.
    pub fn set_interval(&mut self, period: Millis) -> TimerId {
        let period = period.max(1);
        self.arm(period, TimerKind::Interval { period })
    }

    fn arm(&mut self, delay: Millis, kind: TimerKind) -> TimerId {
        let id: TimerId = self.ids.next();
        let due = self.now.saturating_add(delay);
        self.timers.insert(id, Timer { due, kind });
        self.queue.insert((due, id));
        id
    }

    /// Cancel a timer. Returns `false` (and does nothing) if the timer has
    /// already fired, was already cancelled, or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.remove(&id) {
            Some(timer) => {
                self.queue.remove(&(timer.due, id));
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of armed timers
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Move virtual time forward to `to`, returning every firing due at or
    /// before it in chronological order (ties broken by arming order).
    ///
    /// Intervals re-arm one period after their due time, so a long advance
    /// reports each missed firing. Moving backwards is a no-op.
    pub fn advance_to(&mut self, to: Millis) -> Vec<Fired> {
        let mut fired = Vec::new();
        if to < self.now {
            return fired;
        }

        while let Some(&(due, id)) = self.queue.first() {
            if due > to {
                break;
            }
            self.queue.pop_first();
            fired.push(Fired { id, at: due });

            let Some(timer) = self.timers.get_mut(&id) else {
                continue;
            };
            match timer.kind {
                TimerKind::Timeout => {
                    self.timers.remove(&id);
                }
                TimerKind::Interval { period } => {
                    timer.due = due.saturating_add(period);
                    self.queue.insert((timer.due, id));
                }
            }
        }

        self.now = to;
        fired
    }

    /// Cancel every armed timer, returning how many were cancelled
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        self.queue.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_fires_once() {
        let mut sched = Scheduler::new();
        let id = sched.set_timeout(2000);

        assert!(sched.advance_to(1999).is_empty());
        let fired = sched.advance_to(2000);
        assert_eq!(fired, vec![Fired { id, at: 2000 }]);
        assert!(!sched.is_active(id));
        assert!(sched.advance_to(10_000).is_empty());
    }

    #[test]
    fn test_interval_reports_every_firing() {
        let mut sched = Scheduler::new();
        let id = sched.set_interval(100);

        let fired = sched.advance_to(1000);
        assert_eq!(fired.len(), 10);
        assert_eq!(fired[0].at, 100);
        assert_eq!(fired[9].at, 1000);
        assert!(fired.iter().all(|f| f.id == id));
        assert!(sched.is_active(id));
    }

    #[test]
    fn test_firings_are_chronological_across_timers() {
        let mut sched = Scheduler::new();
        let interval = sched.set_interval(300);
        let timeout = sched.set_timeout(500);

        let fired = sched.advance_to(900);
        let order: Vec<(TimerId, Millis)> = fired.iter().map(|f| (f.id, f.at)).collect();
        assert_eq!(
            order,
            vec![(interval, 300), (timeout, 500), (interval, 600), (interval, 900)]
        );
    }

    #[test]
    fn test_cancel_twice_is_noop() {
        let mut sched = Scheduler::new();
        let id = sched.set_interval(100);
        assert!(sched.cancel(id));
        assert!(!sched.cancel(id));
        assert_eq!(sched.active_count(), 0);
        assert!(sched.advance_to(1000).is_empty());
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let mut sched = Scheduler::new();
        let id = sched.set_timeout(10);
        sched.advance_to(10);
        assert!(!sched.cancel(id));
    }

    #[test]
    fn test_time_never_moves_backwards() {
        let mut sched = Scheduler::new();
        sched.advance_to(500);
        assert!(sched.advance_to(100).is_empty());
        assert_eq!(sched.now(), 500);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut sched = Scheduler::new();
        sched.set_interval(0);
        assert_eq!(sched.advance_to(5).len(), 5);
    }

    #[test]
    fn test_cancel_all() {
        let mut sched = Scheduler::new();
        sched.set_interval(100);
        sched.set_timeout(100);
        assert_eq!(sched.cancel_all(), 2);
        assert_eq!(sched.active_count(), 0);
        assert_eq!(sched.cancel_all(), 0);
    }
}
