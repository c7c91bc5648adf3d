use std::{fs, io, path::Path};

pub fn read_to_string(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Writes `value` plus a newline. Returns `Ok(false)` when the node does not exist.
pub fn write_line(path: &Path, value: &str) -> io::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::write(path, format!("{}\n", value).as_bytes())?;
    Ok(true)
}
