//! Rest timer controller
//!
//! Pairs a `TimerState` with its clock subscription. After every operation
//! the timer is subscribed exactly when it is running. Each subscription gets
//! a fresh generation number, and a tick is applied only if its generation is
//! still the live one, so a callback already in flight when the timer is
//! paused, reset, finished or dropped cannot change anything.

use std::{
    num::NonZeroU32,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tracing::{debug, info, warn};

use super::TimerState;
use crate::{
    error::AppError,
    tasks::clock::{ClockDriver, SubscriptionHandle, TickCallback},
};

#[derive(Debug, Clone, Copy)]
struct Subscription {
    handle: SubscriptionHandle,
    generation: u64,
}

#[derive(Debug, Default)]
struct Inner {
    state: TimerState,
    subscription: Option<Subscription>,
    next_generation: u64,
}

/// A mounted rest timer
///
/// Dropping it releases the clock subscription.
pub struct RestTimer {
    inner: Arc<Mutex<Inner>>,
    clock: Arc<dyn ClockDriver>,
    tick_interval: Duration,
}

impl RestTimer {
    pub fn new(clock: Arc<dyn ClockDriver>, tick_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            clock,
            tick_interval,
        }
    }

    /// Current state
    pub fn snapshot(&self) -> Result<TimerState, AppError> {
        Ok(self.lock()?.state.clone())
    }

    /// Whether a clock subscription is currently held
    pub fn is_subscribed(&self) -> Result<bool, AppError> {
        Ok(self.lock()?.subscription.is_some())
    }

    pub fn start(&self) -> Result<TimerState, AppError> {
        self.transition("start", |state| state.start())
    }

    pub fn pause(&self) -> Result<TimerState, AppError> {
        self.transition("pause", |state| state.pause())
    }

    pub fn reset(&self) -> Result<TimerState, AppError> {
        self.transition("reset", |state| state.reset())
    }

    /// Restart toward `duration`. The tick cadence restarts too, so the first
    /// tick lands one full interval after selection.
    pub fn select_preset(&self, duration: NonZeroU32) -> Result<TimerState, AppError> {
        let mut inner = self.lock()?;
        self.release(&mut inner);
        inner.state.select_preset(duration);
        info!("Preset selected: {}s", duration);
        self.sync_subscription(&mut inner);
        Ok(inner.state.clone())
    }

    fn transition<F>(&self, action: &str, apply: F) -> Result<TimerState, AppError>
    where
        F: FnOnce(&mut TimerState) -> bool,
    {
        let mut inner = self.lock()?;
        if apply(&mut inner.state) {
            info!("Timer {}: now {:?} at {}", action, inner.state.status(), inner.state.format_display());
        } else {
            debug!("Timer {} ignored in {:?}", action, inner.state.status());
        }
        self.sync_subscription(&mut inner);
        Ok(inner.state.clone())
    }

    fn sync_subscription(&self, inner: &mut Inner) {
        match (inner.state.is_running(), inner.subscription) {
            (true, None) => {
                let generation = inner.next_generation;
                inner.next_generation += 1;

                let shared = Arc::downgrade(&self.inner);
                let clock = Arc::downgrade(&self.clock);
                let on_tick: TickCallback = Arc::new(move || deliver_tick(&shared, &clock, generation));

                let handle = self.clock.subscribe(self.tick_interval, on_tick);
                inner.subscription = Some(Subscription { handle, generation });
            }
            (false, Some(_)) => self.release(inner),
            _ => {}
        }
    }

    fn release(&self, inner: &mut Inner) {
        if let Some(subscription) = inner.subscription.take() {
            self.clock.unsubscribe(subscription.handle);
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AppError> {
        self.inner.lock().map_err(|_| AppError::StatePoisoned("timer state"))
    }
}

impl Drop for RestTimer {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        self.release(&mut inner);
    }
}

fn deliver_tick(shared: &Weak<Mutex<Inner>>, clock: &Weak<dyn ClockDriver>, generation: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let Ok(mut inner) = shared.lock() else {
        return;
    };

    match inner.subscription {
        Some(live) if live.generation == generation => {}
        _ => {
            warn!("Dropping stale tick from generation {}", generation);
            return;
        }
    }

    inner.state.on_tick();
    debug!("Tick: {}", inner.state.format_display());

    if !inner.state.is_running() {
        info!("Rest timer finished at {}", inner.state.format_display());
        if let Some(subscription) = inner.subscription.take() {
            if let Some(clock) = clock.upgrade() {
                clock.unsubscribe(subscription.handle);
            }
        }
    }
}
