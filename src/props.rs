//! Property store seam and the best-effort override primitive.

use std::{collections::BTreeMap, process::Command};

use log::{debug, warn};

use crate::error::{Error, Result};

/// Host key/value property registry (`__system_property_*` on device).
pub trait PropertyStore {
    type Handle;

    fn find(&self, name: &str) -> Option<Self::Handle>;
    fn update(&mut self, handle: &Self::Handle, value: &str) -> Result<()>;
    fn add(&mut self, name: &str, value: &str) -> Result<()>;
    fn get(&self, name: &str) -> Option<String>;
}

pub fn get_or<S: PropertyStore + ?Sized>(store: &S, name: &str, default: &str) -> String {
    match store.get(name) {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

/// Updates `name` in place, or adds it when absent and `add` is set.
///
/// Never fails: a rejected write is logged and the boot sequence continues.
/// Returns whether the store was written.
pub fn property_override<S: PropertyStore + ?Sized>(
    store: &mut S,
    name: &str,
    value: &str,
    add: bool,
) -> bool {
    let res = match store.find(name) {
        Some(handle) => store.update(&handle, value),
        None if add => store.add(name, value),
        None => {
            debug!("PROP: {} absent, skipped", name);
            return false;
        }
    };

    match res {
        Ok(()) => true,
        Err(e) => {
            warn!("PROP: {}", e);
            false
        }
    }
}

/// In-memory store used for dry runs and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryPropertyStore {
    props: BTreeMap<String, String>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            props: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl PropertyStore for MemoryPropertyStore {
    type Handle = String;

    fn find(&self, name: &str) -> Option<String> {
        self.props.contains_key(name).then(|| name.to_string())
    }

    fn update(&mut self, handle: &String, value: &str) -> Result<()> {
        match self.props.get_mut(handle) {
            Some(v) => {
                *v = value.to_string();
                Ok(())
            }
            None => Err(Error::property(handle, "stale handle")),
        }
    }

    fn add(&mut self, name: &str, value: &str) -> Result<()> {
        self.props.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, name: &str) -> Option<String> {
        self.props.get(name).cloned()
    }
}

/// Recording overlay for dry runs: reads fall through to `inner`, writes are
/// kept in memory and never reach it.
#[derive(Debug)]
pub struct DryRunStore<S> {
    inner: S,
    writes: BTreeMap<String, String>,
}

impl<S: PropertyStore> DryRunStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, writes: BTreeMap::new() }
    }

    /// Every property the run would have set, with its final value.
    pub fn writes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.writes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: PropertyStore> PropertyStore for DryRunStore<S> {
    type Handle = String;

    fn find(&self, name: &str) -> Option<String> {
        if self.writes.contains_key(name) || self.inner.find(name).is_some() {
            Some(name.to_string())
        } else {
            None
        }
    }

    fn update(&mut self, handle: &String, value: &str) -> Result<()> {
        self.writes.insert(handle.clone(), value.to_string());
        Ok(())
    }

    fn add(&mut self, name: &str, value: &str) -> Result<()> {
        self.writes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, name: &str) -> Option<String> {
        self.writes.get(name).cloned().or_else(|| self.inner.get(name))
    }
}

/// Store backed by the `getprop`/`setprop` tools, for running from a shell.
///
/// `setprop` cannot rewrite `ro.*` properties that are already set; those
/// writes are reported as failures and skipped.
#[derive(Debug, Default)]
pub struct SetpropStore;

impl SetpropStore {
    fn setprop(name: &str, value: &str) -> Result<()> {
        let output = Command::new("setprop")
            .arg(name)
            .arg(value)
            .output()
            .map_err(|e| Error::property(name, format!("setprop: {}", e)))?;
        if output.status.success() {
            Ok(())
        } else {
            Err(Error::property(name, format!("setprop failed: {}", output.status)))
        }
    }
}

impl PropertyStore for SetpropStore {
    type Handle = String;

    fn find(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).map(|_| name.to_string())
    }

    fn update(&mut self, handle: &String, value: &str) -> Result<()> {
        Self::setprop(handle, value)
    }

    fn add(&mut self, name: &str, value: &str) -> Result<()> {
        Self::setprop(name, value)
    }

    fn get(&self, name: &str) -> Option<String> {
        let out = Command::new("getprop").arg(name).output().ok()?;
        if !out.status.success() {
            return None;
        }
        let s = String::from_utf8(out.stdout).ok()?;
        Some(s.replace('\r', "").trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_updates_existing() {
        let mut s = MemoryPropertyStore::from_pairs([("ro.secure", "0")]);
        assert!(property_override(&mut s, "ro.secure", "1", false));
        assert_eq!(s.value("ro.secure"), Some("1"));
    }

    #[test]
    fn override_adds_only_when_allowed() {
        let mut s = MemoryPropertyStore::new();
        assert!(!property_override(&mut s, "ro.odm.build.fingerprint", "x", false));
        assert!(s.is_empty());

        assert!(property_override(&mut s, "ro.build.fingerprint", "x", true));
        assert_eq!(s.value("ro.build.fingerprint"), Some("x"));
    }

    #[test]
    fn get_or_falls_back_on_missing_and_empty() {
        let s = MemoryPropertyStore::from_pairs([("ro.boot.hwc", "")]);
        assert_eq!(get_or(&s, "ro.boot.hwc", "GLOBAL"), "GLOBAL");
        assert_eq!(get_or(&s, "ro.boot.product.hardware.sku", "pro"), "pro");
    }

    #[test]
    fn dry_run_records_writes_without_touching_inner() {
        let live = MemoryPropertyStore::from_pairs([("ro.product.vendor.model", "stock")]);
        let mut dry = DryRunStore::new(live.clone());

        assert!(property_override(&mut dry, "ro.product.vendor.model", "M2101K6G", false));
        assert!(!property_override(&mut dry, "ro.product.odm.model", "M2101K6G", false));
        assert!(property_override(&mut dry, "ro.product.marketname", "Redmi Note 10 Pro", true));

        assert_eq!(dry.get("ro.product.vendor.model").as_deref(), Some("M2101K6G"));
        assert_eq!(
            dry.writes().collect::<Vec<_>>(),
            vec![
                ("ro.product.marketname", "Redmi Note 10 Pro"),
                ("ro.product.vendor.model", "M2101K6G"),
            ]
        );
        assert_eq!(dry.into_inner(), live);
    }

    struct Rejecting;

    impl PropertyStore for Rejecting {
        type Handle = ();

        fn find(&self, _name: &str) -> Option<()> {
            Some(())
        }

        fn update(&mut self, _handle: &(), _value: &str) -> Result<()> {
            Err(Error::property("ro.x", "denied"))
        }

        fn add(&mut self, name: &str, _value: &str) -> Result<()> {
            Err(Error::property(name, "denied"))
        }

        fn get(&self, _name: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn rejected_writes_are_absorbed() {
        assert!(!property_override(&mut Rejecting, "ro.x", "1", true));
    }
}
