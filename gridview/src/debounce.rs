//! Keyed debouncing of filter input.
//!
//! Each key has at most one pending timer. Scheduling again for the same key
//! aborts the pending timer before arming a new one, so only the last call
//! of a burst runs. Keys are independent: typing into one column's filter
//! never delays another's.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Which filter input a debounced update belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKey {
    /// The global search box.
    Global,
    /// A column's filter input, by column key.
    Column(String),
}

impl FilterKey {
    /// Key for a column's filter input.
    pub fn column(key: impl Into<String>) -> Self {
        FilterKey::Column(key.into())
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKey::Global => f.write_str("global"),
            FilterKey::Column(key) => write!(f, "column:{key}"),
        }
    }
}

/// Cancellable single-shot timers, one per key.
///
/// Timers run on the current tokio runtime. With a zero delay, or when no
/// runtime is available, actions run immediately instead of being dropped.
/// Dropping the debouncer aborts every pending timer.
///
/// # Example
///
/// ```ignore
/// let mut debouncer = Debouncer::new(Duration::from_millis(150));
/// debouncer.schedule(FilterKey::Global, move || apply("ah"));
/// ```
pub struct Debouncer<K> {
    delay: Duration,
    pending: HashMap<K, JoinHandle<()>>,
}

impl<K> Debouncer<K>
where
    K: Clone + Eq + Hash + fmt::Display,
{
    /// Create a debouncer with a fixed delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// The delay between the last call for a key and its action.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `action` once `delay` has passed without another call for `key`.
    ///
    /// Any pending action for the same key is cancelled first.
    pub fn schedule<F>(&mut self, key: K, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending.retain(|_, handle| !handle.is_finished());
        self.cancel(&key);

        if self.delay.is_zero() {
            action();
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            log::warn!("No tokio runtime for debounce timer '{key}', applying immediately");
            action();
            return;
        };

        let delay = self.delay;
        log::trace!("Arming debounce timer '{key}' ({delay:?})");
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        self.pending.insert(key, handle);
    }

    /// Cancel the pending action for a key. Returns true if one was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.pending.remove(key) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                log::trace!("Cancelled debounce timer '{key}'");
                true
            }
            _ => false,
        }
    }

    /// Cancel every pending action. Returns how many were pending.
    pub fn cancel_all(&mut self) -> usize {
        let mut cancelled = 0;
        for (_, handle) in self.pending.drain() {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            log::debug!("Cancelled {cancelled} pending debounce timers");
        }
        cancelled
    }

    /// Whether an action is pending for a key.
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of pending actions.
    pub fn pending(&self) -> usize {
        self.pending
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Debouncer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.keys().collect::<Vec<_>>())
            .finish()
    }
}
