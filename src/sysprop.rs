//! Bionic `__system_property_*` store. Writing `ro.*` in place only works
//! from init, before the property service starts.

use std::{
    ffi::{c_char, c_int, c_uint, c_void, CStr, CString},
    ptr::NonNull,
};

use crate::{
    error::{Error, Result},
    props::PropertyStore,
};

const PROP_VALUE_MAX: usize = 92;

extern "C" {
    fn __system_property_find(name: *const c_char) -> *const c_void;
    fn __system_property_update(pi: *mut c_void, value: *const c_char, len: c_uint) -> c_int;
    fn __system_property_add(
        name: *const c_char,
        namelen: c_uint,
        value: *const c_char,
        valuelen: c_uint,
    ) -> c_int;
    fn __system_property_get(name: *const c_char, value: *mut c_char) -> c_int;
}

/// Opaque `prop_info` pointer owned by bionic's property area.
pub struct PropInfo(NonNull<c_void>);

#[derive(Debug, Default)]
pub struct SystemPropertyStore;

fn cstring(name: &str, s: &str) -> Result<CString> {
    CString::new(s).map_err(|_| Error::property(name, "interior nul"))
}

impl PropertyStore for SystemPropertyStore {
    type Handle = PropInfo;

    fn find(&self, name: &str) -> Option<PropInfo> {
        let c = CString::new(name).ok()?;
        // SAFETY: `c` is a valid nul-terminated string for the duration of the call.
        let pi = unsafe { __system_property_find(c.as_ptr()) };
        NonNull::new(pi as *mut c_void).map(PropInfo)
    }

    fn update(&mut self, handle: &PropInfo, value: &str) -> Result<()> {
        let v = cstring("<update>", value)?;
        // SAFETY: handle came from __system_property_find and prop_info entries are never freed.
        let ret = unsafe { __system_property_update(handle.0.as_ptr(), v.as_ptr(), value.len() as c_uint) };
        if ret == 0 {
            Ok(())
        } else {
            Err(Error::property("<update>", format!("__system_property_update ret {}", ret)))
        }
    }

    fn add(&mut self, name: &str, value: &str) -> Result<()> {
        let n = cstring(name, name)?;
        let v = cstring(name, value)?;
        // SAFETY: both strings are valid for the call; lengths exclude the nul.
        let ret = unsafe {
            __system_property_add(n.as_ptr(), name.len() as c_uint, v.as_ptr(), value.len() as c_uint)
        };
        if ret == 0 {
            Ok(())
        } else {
            Err(Error::property(name, format!("__system_property_add ret {}", ret)))
        }
    }

    fn get(&self, name: &str) -> Option<String> {
        let c = CString::new(name).ok()?;
        let mut buf = [0u8; PROP_VALUE_MAX];
        // SAFETY: buf holds PROP_VALUE_MAX bytes, the documented maximum including the nul.
        unsafe { __system_property_get(c.as_ptr(), buf.as_mut_ptr() as *mut c_char) };
        let v = CStr::from_bytes_until_nul(&buf).ok()?;
        Some(v.to_string_lossy().into_owned())
    }
}
