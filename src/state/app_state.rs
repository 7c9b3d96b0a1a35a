//! Registry of mounted timers and gates

use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

use super::{PremiumGate, PresetCatalog, RestTimer, TimerState};
use crate::{
    error::AppError,
    services::{ChannelNavigator, EntitlementSource, UpgradeNavigator, UpgradeRequest},
    tasks::clock::ClockDriver,
};

/// Owns every mounted screen component
///
/// Each timer and gate belongs to exactly one mount; unmounting drops it and,
/// for timers, releases the clock subscription.
pub struct AppState {
    timers: Mutex<HashMap<Uuid, RestTimer>>,
    gates: Mutex<HashMap<Uuid, PremiumGate>>,
    clock: Arc<dyn ClockDriver>,
    tick_interval: Duration,
    presets: PresetCatalog,
    entitlements: Arc<dyn EntitlementSource>,
    navigator: Arc<dyn UpgradeNavigator>,
    /// Channel for upgrade requests leaving through the navigator
    pub upgrade_tx: broadcast::Sender<UpgradeRequest>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        clock: Arc<dyn ClockDriver>,
        tick_interval: Duration,
        presets: PresetCatalog,
        entitlements: Arc<dyn EntitlementSource>,
    ) -> Self {
        let (upgrade_tx, _) = broadcast::channel(100);
        let navigator = Arc::new(ChannelNavigator::new(upgrade_tx.clone()));

        Self {
            timers: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            clock,
            tick_interval,
            presets,
            entitlements,
            navigator,
            upgrade_tx,
            start_time: Instant::now(),
        }
    }

    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    // Timers

    /// Mount a new idle timer
    pub fn mount_timer(&self) -> Result<(Uuid, TimerState), AppError> {
        let timer = RestTimer::new(Arc::clone(&self.clock), self.tick_interval);
        let snapshot = timer.snapshot()?;
        let id = Uuid::new_v4();
        self.timers()?.insert(id, timer);
        info!("Mounted timer {}", id);
        Ok((id, snapshot))
    }

    /// Unmount a timer, stopping its clock
    pub fn unmount_timer(&self, id: Uuid) -> Result<(), AppError> {
        let timer = self.timers()?.remove(&id).ok_or(AppError::TimerNotFound(id))?;
        drop(timer);
        info!("Unmounted timer {}", id);
        Ok(())
    }

    pub fn timer_snapshot(&self, id: Uuid) -> Result<TimerState, AppError> {
        self.with_timer(id, RestTimer::snapshot)
    }

    pub fn start_timer(&self, id: Uuid) -> Result<TimerState, AppError> {
        self.with_timer(id, RestTimer::start)
    }

    pub fn pause_timer(&self, id: Uuid) -> Result<TimerState, AppError> {
        self.with_timer(id, RestTimer::pause)
    }

    pub fn reset_timer(&self, id: Uuid) -> Result<TimerState, AppError> {
        self.with_timer(id, RestTimer::reset)
    }

    /// Select a preset duration; zero is rejected
    pub fn select_preset(&self, id: Uuid, seconds: u32) -> Result<TimerState, AppError> {
        let duration = NonZeroU32::new(seconds).ok_or(AppError::InvalidDuration)?;
        self.with_timer(id, |timer| timer.select_preset(duration))
    }

    pub fn timer_count(&self) -> Result<usize, AppError> {
        Ok(self.timers()?.len())
    }

    fn with_timer<T, F>(&self, id: Uuid, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&RestTimer) -> Result<T, AppError>,
    {
        let timers = self.timers()?;
        let timer = timers.get(&id).ok_or(AppError::TimerNotFound(id))?;
        op(timer)
    }

    fn timers(&self) -> Result<MutexGuard<'_, HashMap<Uuid, RestTimer>>, AppError> {
        self.timers.lock().map_err(|_| AppError::StatePoisoned("timer registry"))
    }

    // Gates

    /// Mount a gate for `user_id`, querying entitlement for this mount only
    pub fn mount_gate(&self, user_id: &str) -> Result<(Uuid, PremiumGate), AppError> {
        let gate = PremiumGate::new(self.entitlements.has_premium_access(user_id));
        let id = Uuid::new_v4();
        self.gates()?.insert(id, gate.clone());
        info!("Mounted gate {} for user {} (visible={})", id, user_id, gate.is_visible());
        Ok((id, gate))
    }

    pub fn unmount_gate(&self, id: Uuid) -> Result<(), AppError> {
        self.gates()?.remove(&id).ok_or(AppError::GateNotFound(id))?;
        info!("Unmounted gate {}", id);
        Ok(())
    }

    pub fn gate_snapshot(&self, id: Uuid) -> Result<PremiumGate, AppError> {
        self.gates()?.get(&id).cloned().ok_or(AppError::GateNotFound(id))
    }

    pub fn dismiss_gate(&self, id: Uuid) -> Result<PremiumGate, AppError> {
        let mut gates = self.gates()?;
        let gate = gates.get_mut(&id).ok_or(AppError::GateNotFound(id))?;
        gate.dismiss();
        info!("Dismissed gate {}", id);
        Ok(gate.clone())
    }

    /// Hand off to the subscription offer without touching visibility
    pub fn request_upgrade(&self, id: Uuid) -> Result<PremiumGate, AppError> {
        let gate = self.gate_snapshot(id)?;
        gate.request_upgrade(id, self.navigator.as_ref());
        Ok(gate)
    }

    fn gates(&self) -> Result<MutexGuard<'_, HashMap<Uuid, PremiumGate>>, AppError> {
        self.gates.lock().map_err(|_| AppError::StatePoisoned("gate registry"))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
