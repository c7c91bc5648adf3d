//! Build/product property overrides applied from `init`.

use log::info;

use crate::{
    config::{REGION_DEFAULT, REGION_PROP, SKU_DEFAULT, SKU_PROP},
    dalvik::load_dalvik_properties,
    props::{get_or, property_override, PropertyStore},
};

/// Partition prefixes, in the order init resolves `ro.*` sources.
pub const RO_PROPS_SOURCE_ORDER: &[&str] =
    &["", "bootimage.", "odm.", "product.", "system.", "system_ext.", "vendor."];

pub struct PropTweak {
    pub key: &'static str,
    pub value: &'static str,
}

/// Props that integrity checks read to detect unlocked or debug builds.
pub const SNET_PROPS: &[PropTweak] = &[
    PropTweak { key: "ro.boot.vbmeta.device_state", value: "locked" },
    PropTweak { key: "ro.boot.verifiedbootstate", value: "green" },
    PropTweak { key: "ro.boot.flash.locked", value: "1" },
    PropTweak { key: "ro.boot.veritymode", value: "enforcing" },
    PropTweak { key: "ro.boot.warranty_bit", value: "0" },
    PropTweak { key: "ro.warranty_bit", value: "0" },
    PropTweak { key: "ro.debuggable", value: "0" },
    PropTweak { key: "ro.secure", value: "1" },
    PropTweak { key: "ro.build.type", value: "user" },
    PropTweak { key: "ro.build.tags", value: "release-keys" },
    PropTweak { key: "ro.build.selinux", value: "1" },
];

/// Certified fingerprint reported regardless of region.
pub const SNET_FINGERPRINT: &str =
    "Xiaomi/dipper/dipper:8.1.0/OPM1.171019.011/V9.5.5.0.OEAMIFA:user/release-keys";
pub const SNET_DESCRIPTION: &str = "dipper-user 8.1.0 OPM1.171019.011 V9.5.5.0.OEAMIFA release-keys";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceProfile {
    pub model: &'static str,
    pub device: &'static str,
    pub fingerprint: &'static str,
    pub description: &'static str,
    pub marketname: &'static str,
    pub mod_device: &'static str,
}

pub const PROFILE_GLOBAL: DeviceProfile = DeviceProfile {
    model: "M2101K6G",
    device: "sweet",
    fingerprint: "Redmi/sweet_eea/sweet:11/RKQ1.200826.002/V12.5.1.0.RKFEUXM:user/release-keys",
    description: "sweet_eea-user 11 RKQ1.200826.002 V12.5.1.0.RKFEUXM release-keys",
    marketname: "Redmi Note 10 Pro",
    mod_device: "sweet_eea_global",
};

pub const PROFILE_INDIA_STD: DeviceProfile = DeviceProfile {
    model: "M2101K6P",
    device: "sweetin",
    fingerprint: "Redmi/sweetin/sweetin:11/RKQ1.200826.002/V12.0.6.0.RKFINXM:user/release-keys",
    description: "sweetin-user 11 RKQ1.200826.002 V12.0.6.0.RKFINXM release-keys",
    marketname: "Redmi Note 10 Pro",
    mod_device: "sweetin_in_global",
};

pub const PROFILE_INDIA_PRO: DeviceProfile = DeviceProfile {
    model: "M2101K6I",
    device: "sweetin",
    fingerprint: "Redmi/sweetinpro/sweetin:11/RKQ1.200826.002/V12.0.6.0.RKFINXM:user/release-keys",
    description: "sweetinpro-user 11 RKQ1.200826.002 V12.0.6.0.RKFINXM release-keys",
    marketname: "Redmi Note 10 Pro Max",
    mod_device: "sweetin_in_global",
};

/// Unrecognized regions get the global identity.
pub fn select_profile(region: &str, sku: &str) -> DeviceProfile {
    match (region, sku) {
        ("INDIA", "std") => PROFILE_INDIA_STD,
        ("INDIA", _) => PROFILE_INDIA_PRO,
        _ => PROFILE_GLOBAL,
    }
}

/// Writes `ro.<source>build.<prop>` for every source; only the bare name is created.
pub fn set_ro_build_prop<S: PropertyStore + ?Sized>(store: &mut S, prop: &str, value: &str) {
    for source in RO_PROPS_SOURCE_ORDER {
        let name = format!("ro.{}build.{}", source, prop);
        property_override(store, &name, value, source.is_empty());
    }
}

/// Writes `ro.product.<source><prop>` where it already exists.
pub fn set_ro_product_prop<S: PropertyStore + ?Sized>(store: &mut S, prop: &str, value: &str) {
    for source in RO_PROPS_SOURCE_ORDER {
        let name = format!("ro.product.{}{}", source, prop);
        property_override(store, &name, value, false);
    }
}

pub fn workaround_snet_properties<S: PropertyStore + ?Sized>(store: &mut S) {
    for t in SNET_PROPS {
        property_override(store, t.key, t.value, true);
    }
}

/// Identity actually written: the region profile with the certified
/// fingerprint and description swapped in.
pub fn effective_profile(region: &str, sku: &str) -> DeviceProfile {
    DeviceProfile {
        fingerprint: SNET_FINGERPRINT,
        description: SNET_DESCRIPTION,
        ..select_profile(region, sku)
    }
}

pub fn vendor_load_properties<S: PropertyStore + ?Sized>(store: &mut S, total_ram: Option<u64>) {
    let region = get_or(store, REGION_PROP, REGION_DEFAULT);
    let sku = get_or(store, SKU_PROP, SKU_DEFAULT);
    let p = effective_profile(&region, &sku);
    info!("PROP: region {} sku {} -> {} ({})", region, sku, p.model, p.device);

    workaround_snet_properties(store);

    set_ro_build_prop(store, "fingerprint", p.fingerprint);
    set_ro_product_prop(store, "device", p.device);
    set_ro_product_prop(store, "model", p.model);
    property_override(store, "ro.product.marketname", p.marketname, true);
    property_override(store, "ro.build.description", p.description, true);
    if !p.mod_device.is_empty() {
        property_override(store, "ro.product.mod_device", p.mod_device, true);
    }

    load_dalvik_properties(store, total_ram);
}
