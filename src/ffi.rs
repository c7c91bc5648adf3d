//! C entry points for the init and power HAL link-ins.

use std::{
    ffi::{c_int, c_void},
    path::Path,
    sync::OnceLock,
};

use crate::{
    config::{LOG_TAG, MEMINFO},
    mem::read_mem_total_bytes,
    overrides,
    perf::QtiPerfBackend,
    power::{PowerHint, PowerHintRouter},
    sysprop::SystemPropertyStore,
    user_config::PowerTuning,
};

static ROUTER: OnceLock<PowerHintRouter<QtiPerfBackend>> = OnceLock::new();

fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag(LOG_TAG)
            .with_max_level(log::LevelFilter::Info),
    );
}

/// Called by init's property loader.
#[no_mangle]
pub extern "C" fn vendor_load_properties() {
    init_logging();
    let total_ram = read_mem_total_bytes(Path::new(MEMINFO));
    overrides::vendor_load_properties(&mut SystemPropertyStore, total_ram);
}

/// Power HAL override hook. `data` is an `int*` duration for interaction
/// hints; for launch hints only its presence matters.
///
/// # Safety
///
/// `data` must be null or point to a readable `int` for interaction hints.
#[no_mangle]
pub unsafe extern "C" fn power_hint_override(hint: c_int, data: *mut c_void) -> c_int {
    let router = ROUTER.get_or_init(|| {
        init_logging();
        // The HAL runs before /data is mounted; stick to built-in timings.
        PowerHintRouter::new(QtiPerfBackend, PowerTuning::default())
    });

    let hint = hint as u32;
    let payload = if data.is_null() {
        None
    } else if hint == crate::power::POWER_HINT_INTERACTION {
        // SAFETY: caller guarantees an int behind non-null interaction data.
        Some(unsafe { *(data as *const c_int) })
    } else {
        Some(1)
    };

    router.dispatch(PowerHint::from_raw(hint, payload)).code()
}
