use std::path::Path;

use log::{info, warn};

use crate::{
    error::{Error, Result},
    sysfs,
    user_config::BoardConfig,
};

/// Boot-completed hook: push the saved DC dimming state to the panel.
pub fn on_boot_completed(cfg: &BoardConfig, dc_node: &Path) -> Result<()> {
    let val = if cfg.dc_dimming_enable { "1" } else { "0" };
    let wrote = sysfs::write_line(dc_node, val).map_err(|e| Error::io(dc_node, e))?;
    if wrote {
        info!("BOOT: dc dimming {}", val);
    } else {
        warn!("BOOT: {} missing, dc dimming skipped", dc_node.display());
    }
    Ok(())
}
