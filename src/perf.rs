use std::{num::NonZeroU32, time::Duration};

use log::{debug, info};

use crate::error::BoostError;

/// Vendor perf hint ids understood by the QTI perf HAL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VendorHint {
    ScrollBoost,
    FirstLaunchBoost,
}

impl VendorHint {
    pub fn id(self) -> u32 {
        match self {
            VendorHint::ScrollBoost => 0x0000_1080,
            VendorHint::FirstLaunchBoost => 0x0000_1081,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoostSubtype {
    ScrollVertical,
    LaunchBoostV1,
}

impl BoostSubtype {
    pub fn id(self) -> i32 {
        match self {
            BoostSubtype::ScrollVertical => 1,
            BoostSubtype::LaunchBoostV1 => 1,
        }
    }
}

/// Outstanding boost request. Backends only ever hand out positive handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoostHandle(NonZeroU32);

impl BoostHandle {
    /// Maps a raw backend return value; anything `<= 0` is a failed request.
    pub fn from_raw(raw: i32) -> Option<Self> {
        if raw <= 0 {
            return None;
        }
        NonZeroU32::new(raw as u32).map(BoostHandle)
    }

    pub fn raw(self) -> i32 {
        self.0.get() as i32
    }
}

pub trait BoostBackend: Send {
    fn enable_hint(
        &mut self,
        hint: VendorHint,
        duration: Duration,
        subtype: BoostSubtype,
    ) -> Result<BoostHandle, BoostError>;

    fn release(&mut self, handle: BoostHandle);
}

/// Dry-run backend: logs every request and hands out sequential handles.
#[derive(Debug)]
pub struct LoggingBackend {
    next: i32,
    active: usize,
}

impl LoggingBackend {
    pub fn new() -> Self {
        Self { next: 1, active: 0 }
    }

    pub fn active(&self) -> usize {
        self.active
    }
}

impl Default for LoggingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BoostBackend for LoggingBackend {
    fn enable_hint(
        &mut self,
        hint: VendorHint,
        duration: Duration,
        subtype: BoostSubtype,
    ) -> Result<BoostHandle, BoostError> {
        let handle = BoostHandle::from_raw(self.next).ok_or(BoostError::Unavailable)?;
        self.next = self.next.wrapping_add(1).max(1);
        self.active += 1;
        info!(
            "PERF: {:?} {}ms type {} -> handle {}",
            hint,
            duration.as_millis(),
            subtype.id(),
            handle.raw()
        );
        Ok(handle)
    }

    fn release(&mut self, handle: BoostHandle) {
        self.active = self.active.saturating_sub(1);
        debug!("PERF: release {}", handle.raw());
    }
}

#[cfg(target_os = "android")]
pub use qti::QtiPerfBackend;

#[cfg(target_os = "android")]
mod qti {
    use std::{ffi::c_int, time::Duration};

    use super::{BoostBackend, BoostHandle, BoostSubtype, VendorHint};
    use crate::error::BoostError;

    #[link(name = "qti-perfd-client")]
    extern "C" {
        fn perf_hint(hint_id: c_int, pkg: *const std::ffi::c_char, duration: c_int, type_: c_int) -> c_int;
        fn perf_lock_rel(handle: c_int) -> c_int;
    }

    /// Backend over libqti-perfd-client.
    #[derive(Debug, Default)]
    pub struct QtiPerfBackend;

    impl BoostBackend for QtiPerfBackend {
        fn enable_hint(
            &mut self,
            hint: VendorHint,
            duration: Duration,
            subtype: BoostSubtype,
        ) -> Result<BoostHandle, BoostError> {
            let ms = duration.as_millis().min(c_int::MAX as u128) as c_int;
            // SAFETY: plain integer arguments; a null package name is accepted by perfd.
            let ret = unsafe { perf_hint(hint.id() as c_int, std::ptr::null(), ms, subtype.id()) };
            BoostHandle::from_raw(ret).ok_or(BoostError::Rejected { hint: hint.id(), code: ret })
        }

        fn release(&mut self, handle: BoostHandle) {
            // SAFETY: handle was returned by perf_hint and is released once.
            unsafe {
                perf_lock_rel(handle.raw());
            }
        }
    }
}
