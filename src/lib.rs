//! Board support glue for the Redmi Note 10 Pro (sweet) vendor tree.
//!
//! Two unrelated adapters live here:
//! - [`overrides`] rewrites build/product identification properties from init;
//! - [`power`] routes power HAL interaction/launch hints to vendor boost requests.

pub mod boot;
pub mod config;
pub mod dalvik;
pub mod error;
pub mod mem;
pub mod overrides;
pub mod perf;
pub mod power;
pub mod props;
pub mod replay;
pub mod state;
pub mod sysfs;
pub mod user_config;

#[cfg(target_os = "android")]
pub mod ffi;
#[cfg(target_os = "android")]
pub mod sysprop;

pub use error::{BoostError, Error, Result};
pub use perf::{BoostBackend, BoostHandle, BoostSubtype, LoggingBackend, VendorHint};
pub use power::{HintStatus, PowerHint, PowerHintRouter};
pub use props::{property_override, DryRunStore, MemoryPropertyStore, PropertyStore};
pub use user_config::{BoardConfig, PowerTuning};
