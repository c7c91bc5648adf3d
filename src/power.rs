//! Power hint routing: interaction/launch hints to vendor boost requests.
//!
//! The router owns its state and backend behind one mutex, so the debounce
//! check, the release of the previous request and the issue of the next one
//! happen as a single step even when the host delivers hints from several
//! binder threads.

use std::time::{Duration, Instant};

use log::{debug, error};
use parking_lot::Mutex;

use crate::{
    config::ms,
    perf::{BoostBackend, BoostSubtype, VendorHint},
    state::RouterState,
    user_config::PowerTuning,
};

pub const POWER_HINT_INTERACTION: u32 = 0x0000_0002;
pub const POWER_HINT_LAUNCH: u32 = 0x0000_0008;

/// Inbound hint as delivered by the power HAL framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerHint {
    /// Touch/scroll interaction; the payload is the requested duration in ms.
    Interaction { duration_ms: Option<i32> },
    /// Activity launch; `started == false` means the launch finished.
    Launch { started: bool },
    Other(u32),
}

impl PowerHint {
    pub fn from_raw(hint: u32, payload: Option<i32>) -> Self {
        match hint {
            POWER_HINT_INTERACTION => PowerHint::Interaction { duration_ms: payload },
            POWER_HINT_LAUNCH => PowerHint::Launch { started: payload.is_some() },
            other => PowerHint::Other(other),
        }
    }
}

/// Result handed back to the host. Raw codes are part of the HAL contract.
///
/// A rejected backend request maps to `NotHandled`; the stock power-6150 HAL
/// returns `HINT_NONE` there. The host only distinguishes `Handled`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintStatus {
    Handled,
    NotHandled,
    /// Hint kind is not supported here; the host should use its default path.
    None,
}

impl HintStatus {
    pub fn code(self) -> i32 {
        match self {
            HintStatus::Handled => 0,
            HintStatus::None => -1,
            HintStatus::NotHandled => -2,
        }
    }

    pub fn is_handled(self) -> bool {
        self == HintStatus::Handled
    }
}

struct Inner<B> {
    backend: B,
    state: RouterState,
}

pub struct PowerHintRouter<B> {
    tuning: PowerTuning,
    inner: Mutex<Inner<B>>,
}

impl<B: BoostBackend> PowerHintRouter<B> {
    pub fn new(backend: B, tuning: PowerTuning) -> Self {
        Self {
            tuning,
            inner: Mutex::new(Inner { backend, state: RouterState::new() }),
        }
    }

    pub fn tuning(&self) -> &PowerTuning {
        &self.tuning
    }

    /// Routes one hint, reading the clock once the router lock is held.
    pub fn dispatch(&self, hint: PowerHint) -> HintStatus {
        self.route(hint, None)
    }

    /// Routes one hint using `now` as the monotonic timestamp.
    pub fn dispatch_at(&self, hint: PowerHint, now: Instant) -> HintStatus {
        self.route(hint, Some(now))
    }

    fn route(&self, hint: PowerHint, now: Option<Instant>) -> HintStatus {
        match hint {
            PowerHint::Interaction { duration_ms } => self.interaction(duration_ms, now),
            PowerHint::Launch { started: true } => self.launch_start(),
            PowerHint::Launch { started: false } => self.launch_end(),
            PowerHint::Other(id) => {
                debug!("HINT: {:#x} not supported", id);
                HintStatus::None
            }
        }
    }

    /// Resolved boost length for a requested interaction duration.
    pub fn interaction_duration(&self, requested_ms: Option<i32>) -> Duration {
        let min = self.tuning.min_interaction_ms;
        let max = self.tuning.max_interaction_ms;
        let d = match requested_ms {
            Some(v) if i64::from(v) > i64::from(min) => (v as u32).min(max),
            _ => min,
        };
        ms(d)
    }

    fn interaction(&self, requested_ms: Option<i32>, now: Option<Instant>) -> HintStatus {
        let duration = self.interaction_duration(requested_ms);

        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let now = now.unwrap_or_else(Instant::now);

        // Skip short boosts inside the window; a fling-length request still goes through.
        if let Some(elapsed) = inner.state.interaction.elapsed(now) {
            if elapsed < ms(self.tuning.debounce_window_ms)
                && duration <= ms(self.tuning.fling_threshold_ms)
            {
                return HintStatus::Handled;
            }
        }

        let st = &mut inner.state.interaction;
        // never rewind: a stale caller may still pass the fling check
        st.last_boost_time = Some(st.last_boost_time.map_or(now, |prev| prev.max(now)));
        st.last_boost_duration = duration;

        if let Some(prev) = st.request.take() {
            inner.backend.release(prev);
        }

        match inner
            .backend
            .enable_hint(VendorHint::ScrollBoost, duration, BoostSubtype::ScrollVertical)
        {
            Ok(handle) => {
                debug!("HINT: interaction boost {}ms", duration.as_millis());
                st.request = Some(handle);
                HintStatus::Handled
            }
            Err(e) => {
                error!("Failed to perform interaction boost: {}", e);
                HintStatus::NotHandled
            }
        }
    }

    fn launch_start(&self) -> HintStatus {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if inner.state.launch.is_active() {
            return HintStatus::Handled;
        }

        match inner.backend.enable_hint(
            VendorHint::FirstLaunchBoost,
            ms(self.tuning.launch_duration_ms),
            BoostSubtype::LaunchBoostV1,
        ) {
            Ok(handle) => {
                debug!("HINT: launch boost on");
                inner.state.launch.request = Some(handle);
                HintStatus::Handled
            }
            Err(e) => {
                error!("Failed to perform launch boost: {}", e);
                HintStatus::NotHandled
            }
        }
    }

    fn launch_end(&self) -> HintStatus {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some(handle) = inner.state.launch.request.take() {
            inner.backend.release(handle);
            debug!("HINT: launch boost off");
        }
        HintStatus::Handled
    }

    /// Copy of the current router state.
    pub fn snapshot(&self) -> RouterState {
        self.inner.lock().state.clone()
    }

    pub fn with_backend<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&self.inner.lock().backend)
    }
}
