//! Debounced autosave scheduling.
//!
//! Repeated mutations within the delay window collapse into one downstream
//! save: scheduling under a key cancels that key's pending save and starts
//! the clock again (last writer wins at the scheduling layer — the save
//! itself reads whatever state is current at fire time).
//!
//! The scheduler is an owned object, typically one per interactive session,
//! keyed by file id. It is not a process-wide singleton.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Delay before a scheduled save fires.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug)]
pub struct AutosaveScheduler {
    delay: Duration,
    pending: HashMap<String, JoinHandle<()>>,
}

impl Default for AutosaveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AutosaveScheduler {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_AUTOSAVE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Schedule `save` to run after the delay, replacing any save still
    /// pending under the same key.
    pub fn schedule<F>(&mut self, key: &str, save: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel_pending(key);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            save.await;
        });
        self.pending.insert(key.to_string(), handle);
    }

    /// Cancel the pending save for `key`, if any. Returns whether one was
    /// still pending.
    pub fn cancel_pending(&mut self, key: &str) -> bool {
        match self.pending.remove(key) {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }

    pub fn has_pending(&self, key: &str) -> bool {
        self.pending.get(key).is_some_and(|h| !h.is_finished())
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Paused-clock tests: sleeping in the test auto-advances time, and the
    // runtime runs any scheduler task whose timer fires first.

    fn counter_save(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_the_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut sched = AutosaveScheduler::with_delay(Duration::from_millis(2000));

        sched.schedule("f1", counter_save(&fired));
        sleep(Duration::from_millis(1999)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_collapses_a_burst_into_one_save() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut sched = AutosaveScheduler::with_delay(Duration::from_millis(2000));

        sched.schedule("f1", counter_save(&fired));
        sleep(Duration::from_millis(1500)).await;
        sched.schedule("f1", counter_save(&fired));
        sleep(Duration::from_millis(1500)).await;
        sched.schedule("f1", counter_save(&fired));

        // The first two were cancelled before firing.
        sleep(Duration::from_millis(2001)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn keys_are_independent() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut sched = AutosaveScheduler::with_delay(Duration::from_millis(2000));

        sched.schedule("f1", counter_save(&fired));
        sched.schedule("f2", counter_save(&fired));
        sleep(Duration::from_millis(2001)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_pending_prevents_the_save() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut sched = AutosaveScheduler::with_delay(Duration::from_millis(2000));

        sched.schedule("f1", counter_save(&fired));
        assert!(sched.has_pending("f1"));
        assert!(sched.cancel_pending("f1"));
        assert!(!sched.has_pending("f1"));

        sleep(Duration::from_millis(3000)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!sched.cancel_pending("f1"));
    }
}
