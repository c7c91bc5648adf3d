use std::path::Path;

use crate::sysfs;

/// Total RAM in bytes from the `MemTotal:` line of a meminfo file.
pub fn read_mem_total_bytes(meminfo: &Path) -> Option<u64> {
    let s = sysfs::read_to_string(meminfo)?;
    parse_mem_total_bytes(&s)
}

pub fn parse_mem_total_bytes(meminfo: &str) -> Option<u64> {
    for line in meminfo.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            let kb = rest
                .split_whitespace()
                .next()
                .and_then(|x| x.parse::<u64>().ok())?;
            return kb.checked_mul(1024);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mem_total() {
        let s = "MemTotal:        5711692 kB\nMemFree:          211428 kB\n";
        assert_eq!(parse_mem_total_bytes(s), Some(5_711_692 * 1024));
    }

    #[test]
    fn missing_or_garbled_line() {
        assert_eq!(parse_mem_total_bytes("MemFree: 12 kB\n"), None);
        assert_eq!(parse_mem_total_bytes("MemTotal: lots\n"), None);
    }
}
