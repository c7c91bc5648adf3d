use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::{
    config::{
        DEBOUNCE_WINDOW_MS, FLING_THRESHOLD_MS, MAX_INTERACTION_MS, MAX_LAUNCH_MS, MIN_INTERACTION_MS,
    },
    error::{Error, Result},
};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardConfig {
    #[serde(default)]
    pub power: PowerTuning,

    /// Written to the panel's DC dimming node once boot completes.
    #[serde(default)]
    pub dc_dimming_enable: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Interaction/launch boost timings, all in milliseconds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PowerTuning {
    pub min_interaction_ms: u32,
    pub max_interaction_ms: u32,
    pub debounce_window_ms: u32,
    pub fling_threshold_ms: u32,
    pub launch_duration_ms: u32,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for PowerTuning {
    fn default() -> Self {
        Self {
            min_interaction_ms: MIN_INTERACTION_MS,
            max_interaction_ms: MAX_INTERACTION_MS,
            debounce_window_ms: DEBOUNCE_WINDOW_MS,
            fling_threshold_ms: FLING_THRESHOLD_MS,
            launch_duration_ms: MAX_LAUNCH_MS,
            extra: BTreeMap::new(),
        }
    }
}

impl BoardConfig {
    pub fn normalize(&mut self) {
        let p = &mut self.power;
        p.min_interaction_ms = p.min_interaction_ms.clamp(1, i32::MAX as u32);
        if p.max_interaction_ms < p.min_interaction_ms {
            warn!(
                "CFG: max_interaction_ms {} < min {}, raising",
                p.max_interaction_ms, p.min_interaction_ms
            );
            p.max_interaction_ms = p.min_interaction_ms;
        }
        p.launch_duration_ms = p.launch_duration_ms.max(1);
    }
}

pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Loads the config, falling back to (and persisting) defaults when the file
/// is missing, unreadable or unparsable. Fails only when the defaults cannot
/// be written back.
pub fn load_or_init(path: &Path) -> Result<BoardConfig> {
    let cfg = match fs::read_to_string(path) {
        Ok(s) => match serde_json::from_str::<BoardConfig>(&s) {
            Ok(mut cfg) => {
                cfg.normalize();
                return Ok(cfg);
            }
            Err(e) => {
                warn!("CFG: failed to parse {}: {} (reset to default)", path.display(), e);
                BoardConfig::default()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => BoardConfig::default(),
        Err(e) => {
            warn!("CFG: cannot read {}: {} (reset to default)", path.display(), e);
            BoardConfig::default()
        }
    };

    write_config_atomic(path, &cfg).map_err(|e| Error::io(path, e))?;
    Ok(cfg)
}

pub fn write_config_atomic(path: &Path, cfg: &BoardConfig) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    let data = serde_json::to_string_pretty(cfg)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(&tmp, data.as_bytes())?;
    fs::rename(&tmp, path)?;
    Ok(())
}
