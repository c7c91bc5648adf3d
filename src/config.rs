use std::time::Duration;

pub const CONFIG_PATH: &str = "/data/vendor/sweet_board/config.json";
pub const LOG_TAG: &str = "sweet-board";

// Sysfs / procfs paths
pub const DC_DIMMING_NODE: &str = "/sys/devices/platform/soc/soc:qcom,dsi-display/msm_fb_ea_enable";
pub const MEMINFO: &str = "/proc/meminfo";

// Region / SKU selectors
pub const REGION_PROP: &str = "ro.boot.hwc";
pub const REGION_DEFAULT: &str = "GLOBAL";
pub const SKU_PROP: &str = "ro.boot.product.hardware.sku";
pub const SKU_DEFAULT: &str = "pro";

// Interaction / launch boost timings (ms)
pub const MIN_INTERACTION_MS: u32 = 100;
pub const MAX_INTERACTION_MS: u32 = 2000;
pub const DEBOUNCE_WINDOW_MS: u32 = 250;
pub const FLING_THRESHOLD_MS: u32 = 750;
pub const MAX_LAUNCH_MS: u32 = 3000;

// Dalvik heap profile split
pub const DALVIK_LARGE_RAM_BYTES: u64 = 6144 * 1024 * 1024;

pub fn ms(v: u32) -> Duration {
    Duration::from_millis(v as u64)
}
