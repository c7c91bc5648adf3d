use std::time::{Duration, Instant};

use crate::perf::BoostHandle;

/// Interaction boost bookkeeping, kept across hint calls.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    /// `None` until the first accepted boost; the first hint is never debounced.
    pub last_boost_time: Option<Instant>,
    pub last_boost_duration: Duration,
    pub request: Option<BoostHandle>,
}

impl InteractionState {
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.last_boost_time.map(|t| now.saturating_duration_since(t))
    }
}

/// Launch boost bookkeeping. A launch cycle is open exactly while a request is held.
#[derive(Clone, Debug, Default)]
pub struct LaunchState {
    pub request: Option<BoostHandle>,
}

impl LaunchState {
    pub fn is_active(&self) -> bool {
        self.request.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct RouterState {
    pub interaction: InteractionState,
    pub launch: LaunchState,
}

impl RouterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of boost requests currently held.
    pub fn outstanding(&self) -> usize {
        self.interaction.request.is_some() as usize + self.launch.request.is_some() as usize
    }
}
