//=========================================================================
// Scheduler
//=========================================================================
//
// Deferred task queue driven by the scene clock.
//
// Controllers schedule tasks here when a transition starts. The scene
// controller drains due tasks at the start of each tick, before the frame
// is computed, so their effects are visible to that frame and no other.
//
// Every task carries the generation of the transition that scheduled it.
// Owners compare it against their current generation on fire and drop
// superseded tasks instead of applying them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Generation ==========================================================

/// Monotonic version tag attached to a scheduled task.
///
/// Bumped by the owner whenever an in-flight transition is superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Returns the next generation.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value (for logging).
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

//=== Scheduled ===========================================================

/// A task waiting for the scene clock to reach `due`.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheduled<T> {
    /// Clock time at which the task fires.
    pub due: Duration,

    /// Generation of the transition that scheduled the task.
    pub generation: Generation,

    /// Task payload, interpreted by the owner.
    pub task: T,
}

//=== Scheduler ===========================================================

/// Time-ordered queue of deferred tasks.
///
/// Tasks fire in due-time order; tasks with the same due time fire in
/// insertion order.
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    /// Creates a new empty scheduler.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Schedules `task` to fire once the clock reaches `due`.
    pub fn schedule(&mut self, due: Duration, generation: Generation, task: T) {
        // Stable insertion: after every task due at or before `due`
        let pos = self.queue.partition_point(|s| s.due <= due);
        self.queue.insert(pos, Scheduled { due, generation, task });
    }

    /// Removes and returns every task due at or before `now`, in firing order.
    pub fn take_due(&mut self, now: Duration) -> Vec<Scheduled<T>> {
        let split = self.queue.partition_point(|s| s.due <= now);
        self.queue.drain(..split).collect()
    }

    /// Returns true if no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of pending tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drops all pending tasks.
    pub fn clear(&mut self) {
        self.queue.clear()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn new_scheduler_is_empty() {
        let scheduler: Scheduler<u8> = Scheduler::new();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.len(), 0);
    }

    #[test]
    fn take_due_returns_only_elapsed_tasks() {
        let mut scheduler = Scheduler::new();
        let gen = Generation::default();
        scheduler.schedule(ms(1000), gen, "commit");
        scheduler.schedule(ms(2000), gen, "finish");

        assert!(scheduler.take_due(ms(999)).is_empty());

        let fired = scheduler.take_due(ms(1000));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].task, "commit");
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.take_due(ms(2000))[0].task, "finish");
    }

    #[test]
    fn tasks_fire_in_due_order_regardless_of_insertion() {
        let mut scheduler = Scheduler::new();
        let gen = Generation::default();
        scheduler.schedule(ms(300), gen, 3);
        scheduler.schedule(ms(100), gen, 1);
        scheduler.schedule(ms(200), gen, 2);

        let order: Vec<_> = scheduler.take_due(ms(500)).into_iter().map(|s| s.task).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn equal_due_times_keep_insertion_order() {
        let mut scheduler = Scheduler::new();
        let gen = Generation::default();
        scheduler.schedule(ms(100), gen, 'a');
        scheduler.schedule(ms(100), gen, 'b');
        scheduler.schedule(ms(100), gen, 'c');

        let order: Vec<_> = scheduler.take_due(ms(100)).into_iter().map(|s| s.task).collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
    }

    #[test]
    fn generation_is_carried_with_task() {
        let mut scheduler = Scheduler::new();
        let stale = Generation::default();
        let current = stale.next();
        scheduler.schedule(ms(10), stale, ());
        scheduler.schedule(ms(10), current, ());

        let fired = scheduler.take_due(ms(10));
        assert_eq!(fired[0].generation, stale);
        assert_eq!(fired[1].generation, current);
        assert_ne!(stale, current);
    }

    #[test]
    fn clear_drops_pending_tasks() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), Generation::default(), ());
        scheduler.clear();
        assert!(scheduler.is_empty());
        assert!(scheduler.take_due(ms(100)).is_empty());
    }
}
