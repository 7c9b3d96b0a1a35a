//! Clock drivers that deliver periodic ticks to subscribers

use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, warn};

/// Callback invoked once per tick
pub type TickCallback = Arc<dyn Fn() + Send + Sync>;

/// Opaque handle identifying one live subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

/// A cancellable source of fixed-interval ticks
///
/// Implementations must never have more than one callback invocation in
/// flight per handle, and must stop scheduling ticks once `unsubscribe`
/// returns.
pub trait ClockDriver: Send + Sync {
    fn subscribe(&self, interval: Duration, on_tick: TickCallback) -> SubscriptionHandle;
    fn unsubscribe(&self, handle: SubscriptionHandle);
}

/// Clock backed by one tokio task per subscription
#[derive(Debug, Default)]
pub struct TokioClock {
    next_id: AtomicU64,
    tasks: Mutex<HashMap<SubscriptionHandle, JoinHandle<()>>>,
}

impl TokioClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscriptions with a live task
    pub fn active_subscriptions(&self) -> usize {
        self.tasks.lock().map(|tasks| tasks.len()).unwrap_or(0)
    }
}

impl ClockDriver for TokioClock {
    fn subscribe(&self, interval: Duration, on_tick: TickCallback) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_id.fetch_add(1, Ordering::Relaxed));

        // Ticks run inside the task, one at a time. Burst replays every
        // missed interval after a stall instead of folding them into one.
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticker.tick().await;
                on_tick();
            }
        });

        match self.tasks.lock() {
            Ok(mut tasks) => {
                tasks.insert(handle, task);
                debug!("Clock subscription {:?} started", handle);
            }
            Err(e) => {
                warn!("Failed to lock clock tasks, cancelling subscription: {}", e);
                task.abort();
            }
        }
        handle
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        let task = match self.tasks.lock() {
            Ok(mut tasks) => tasks.remove(&handle),
            Err(e) => {
                warn!("Failed to lock clock tasks: {}", e);
                None
            }
        };
        if let Some(task) = task {
            task.abort();
            debug!("Clock subscription {:?} cancelled", handle);
        }
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        if let Ok(tasks) = self.tasks.get_mut() {
            for (_, task) in tasks.drain() {
                task.abort();
            }
        }
    }
}

/// Clock that only ticks when told to
///
/// Used to drive timers deterministically in tests.
#[derive(Default)]
pub struct ManualClock {
    next_id: AtomicU64,
    subscriptions: Mutex<BTreeMap<SubscriptionHandle, TickCallback>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one tick to every live subscription, oldest first.
    /// Returns how many callbacks ran.
    pub fn fire(&self) -> usize {
        // Callbacks may unsubscribe, so they run without the map locked.
        let callbacks: Vec<TickCallback> = match self.subscriptions.lock() {
            Ok(subscriptions) => subscriptions.values().cloned().collect(),
            Err(_) => return 0,
        };
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Fire `n` ticks in a row
    pub fn fire_n(&self, n: usize) {
        for _ in 0..n {
            self.fire();
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// The callback registered for `handle`, if still subscribed
    pub fn callback(&self, handle: SubscriptionHandle) -> Option<TickCallback> {
        self.subscriptions
            .lock()
            .ok()
            .and_then(|subscriptions| subscriptions.get(&handle).cloned())
    }

    /// Handles of all live subscriptions, oldest first
    pub fn handles(&self) -> Vec<SubscriptionHandle> {
        self.subscriptions
            .lock()
            .map(|subscriptions| subscriptions.keys().copied().collect())
            .unwrap_or_default()
    }
}

impl ClockDriver for ManualClock {
    fn subscribe(&self, _interval: Duration, on_tick: TickCallback) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut subscriptions) = self.subscriptions.lock() {
            subscriptions.insert(handle, on_tick);
        }
        handle
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        if let Ok(mut subscriptions) = self.subscriptions.lock() {
            subscriptions.remove(&handle);
        }
    }
}
