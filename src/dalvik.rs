use log::{info, warn};

use crate::{
    config::DALVIK_LARGE_RAM_BYTES,
    props::{property_override, PropertyStore},
};

/// Heap sizing for one RAM class (phone-xhdpi-*-dalvik-heap.mk).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeapProfile {
    pub name: &'static str,
    pub heapstartsize: &'static str,
    pub heapgrowthlimit: &'static str,
    pub heapsize: &'static str,
    pub heapmaxfree: &'static str,
}

pub const HEAP_6GB: HeapProfile = HeapProfile {
    name: "6144",
    heapstartsize: "16m",
    heapgrowthlimit: "256m",
    heapsize: "512m",
    heapmaxfree: "32m",
};

pub const HEAP_8GB: HeapProfile = HeapProfile {
    name: "8192",
    heapstartsize: "32m",
    heapgrowthlimit: "512m",
    heapsize: "768m",
    heapmaxfree: "64m",
};

/// Unknown RAM size picks the smaller heaps.
pub fn select_heap_profile(total_ram: Option<u64>) -> HeapProfile {
    match total_ram {
        Some(bytes) if bytes >= DALVIK_LARGE_RAM_BYTES => HEAP_8GB,
        Some(_) => HEAP_6GB,
        None => {
            warn!("PROP: total RAM unknown, using {} MB heap profile", HEAP_6GB.name);
            HEAP_6GB
        }
    }
}

pub fn load_dalvik_properties<S: PropertyStore + ?Sized>(store: &mut S, total_ram: Option<u64>) {
    let p = select_heap_profile(total_ram);
    info!("PROP: dalvik heap profile {}", p.name);

    property_override(store, "dalvik.vm.heapstartsize", p.heapstartsize, true);
    property_override(store, "dalvik.vm.heapgrowthlimit", p.heapgrowthlimit, true);
    property_override(store, "dalvik.vm.heapsize", p.heapsize, true);
    property_override(store, "dalvik.vm.heapmaxfree", p.heapmaxfree, true);

    property_override(store, "dalvik.vm.heaptargetutilization", "0.5", true);
    property_override(store, "dalvik.vm.heapminfree", "8m", true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::MemoryPropertyStore;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn profile_split_at_6144_mib() {
        assert_eq!(select_heap_profile(Some(6144 * MIB - 1)), HEAP_6GB);
        assert_eq!(select_heap_profile(Some(6144 * MIB)), HEAP_8GB);
        assert_eq!(select_heap_profile(Some(8 * 1024 * MIB)), HEAP_8GB);
        assert_eq!(select_heap_profile(None), HEAP_6GB);
    }

    #[test]
    fn writes_all_six_properties() {
        let mut s = MemoryPropertyStore::new();
        load_dalvik_properties(&mut s, Some(5 * 1024 * MIB));

        assert_eq!(s.len(), 6);
        assert_eq!(s.value("dalvik.vm.heapstartsize"), Some("16m"));
        assert_eq!(s.value("dalvik.vm.heapgrowthlimit"), Some("256m"));
        assert_eq!(s.value("dalvik.vm.heapsize"), Some("512m"));
        assert_eq!(s.value("dalvik.vm.heapmaxfree"), Some("32m"));
        assert_eq!(s.value("dalvik.vm.heaptargetutilization"), Some("0.5"));
        assert_eq!(s.value("dalvik.vm.heapminfree"), Some("8m"));
    }
}
