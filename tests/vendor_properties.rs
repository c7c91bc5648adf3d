use sweet_board::{
    overrides::{
        vendor_load_properties, PROFILE_GLOBAL, PROFILE_INDIA_PRO, PROFILE_INDIA_STD, SNET_DESCRIPTION,
        SNET_FINGERPRINT,
    },
    DryRunStore, MemoryPropertyStore,
};

const GIB: u64 = 1024 * 1024 * 1024;

/// Props a stock sweet build carries before init rewrites them.
fn stock_store(region: Option<&'static str>, sku: Option<&'static str>) -> MemoryPropertyStore {
    let mut pairs = vec![
        ("ro.build.fingerprint", "Redmi/sweet/sweet:11/stock"),
        ("ro.vendor.build.fingerprint", "Redmi/sweet/sweet:11/stock"),
        ("ro.system.build.fingerprint", "Redmi/sweet/sweet:11/stock"),
        ("ro.product.vendor.device", "sweet"),
        ("ro.product.system.device", "sweet"),
        ("ro.product.vendor.model", "stock"),
        ("ro.product.odm.model", "stock"),
        ("ro.debuggable", "1"),
        ("ro.boot.verifiedbootstate", "orange"),
    ];
    if let Some(r) = region {
        pairs.push(("ro.boot.hwc", r));
    }
    if let Some(s) = sku {
        pairs.push(("ro.boot.product.hardware.sku", s));
    }
    MemoryPropertyStore::from_pairs(pairs)
}

#[test]
fn global_defaults_when_selectors_missing() {
    let mut s = stock_store(None, None);
    vendor_load_properties(&mut s, Some(6 * GIB));

    assert_eq!(s.value("ro.product.vendor.model"), Some(PROFILE_GLOBAL.model));
    assert_eq!(s.value("ro.product.odm.model"), Some(PROFILE_GLOBAL.model));
    assert_eq!(s.value("ro.product.vendor.device"), Some("sweet"));
    assert_eq!(s.value("ro.product.marketname"), Some("Redmi Note 10 Pro"));
    assert_eq!(s.value("ro.product.mod_device"), Some("sweet_eea_global"));
    assert_eq!(s.value("dalvik.vm.heapsize"), Some("768m"));
}

#[test]
fn fingerprint_override_wins_for_every_profile() {
    let cases = [
        (Some("GLOBAL"), Some("pro"), PROFILE_GLOBAL),
        (Some("INDIA"), Some("std"), PROFILE_INDIA_STD),
        (Some("INDIA"), Some("pro"), PROFILE_INDIA_PRO),
        (Some("JAPAN"), None, PROFILE_GLOBAL),
    ];

    for (region, sku, profile) in cases {
        let mut s = stock_store(region, sku);
        vendor_load_properties(&mut s, Some(4 * GIB));

        for name in ["ro.build.fingerprint", "ro.vendor.build.fingerprint", "ro.system.build.fingerprint"] {
            assert_eq!(s.value(name), Some(SNET_FINGERPRINT), "{:?} {}", region, name);
        }
        assert_eq!(s.value("ro.build.description"), Some(SNET_DESCRIPTION));
        assert_eq!(s.value("ro.product.vendor.model"), Some(profile.model));
        assert_eq!(s.value("ro.product.system.device"), Some(profile.device));
        assert_eq!(s.value("ro.product.marketname"), Some(profile.marketname));
        assert_eq!(s.value("ro.product.mod_device"), Some(profile.mod_device));
    }
}

#[test]
fn partition_props_are_not_invented() {
    let mut s = stock_store(Some("INDIA"), Some("std"));
    vendor_load_properties(&mut s, Some(4 * GIB));

    assert_eq!(s.value("ro.odm.build.fingerprint"), None);
    assert_eq!(s.value("ro.bootimage.build.fingerprint"), None);
    assert_eq!(s.value("ro.product.model"), None);
    assert_eq!(s.value("ro.product.device"), None);
    assert_eq!(s.value("ro.product.odm.device"), None);
}

#[test]
fn integrity_props_and_small_heap() {
    let mut s = stock_store(Some("GLOBAL"), None);
    vendor_load_properties(&mut s, Some(4 * GIB));

    assert_eq!(s.value("ro.debuggable"), Some("0"));
    assert_eq!(s.value("ro.boot.verifiedbootstate"), Some("green"));
    assert_eq!(s.value("ro.boot.flash.locked"), Some("1"));
    assert_eq!(s.value("ro.build.tags"), Some("release-keys"));
    assert_eq!(s.value("dalvik.vm.heapstartsize"), Some("16m"));
    assert_eq!(s.value("dalvik.vm.heaptargetutilization"), Some("0.5"));
}

#[test]
fn dry_run_reports_partition_writes() {
    let live = stock_store(Some("GLOBAL"), Some("pro"));
    let mut dry = DryRunStore::new(live.clone());
    vendor_load_properties(&mut dry, Some(6 * GIB));

    let writes: Vec<(&str, &str)> = dry.writes().collect();
    for (name, value) in [
        ("ro.product.vendor.model", PROFILE_GLOBAL.model),
        ("ro.product.odm.model", PROFILE_GLOBAL.model),
        ("ro.product.vendor.device", PROFILE_GLOBAL.device),
        ("ro.product.system.device", PROFILE_GLOBAL.device),
        ("ro.vendor.build.fingerprint", SNET_FINGERPRINT),
        ("ro.system.build.fingerprint", SNET_FINGERPRINT),
    ] {
        assert!(writes.contains(&(name, value)), "missing {}", name);
    }
    assert!(!writes.iter().any(|(k, _)| *k == "ro.product.odm.device"));
    assert_eq!(dry.into_inner(), live);
}
