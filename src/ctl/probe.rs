//! Capability probe for the allocator control symbol
//!
//! The control interface is an optional symbol: jemalloc may or may not
//! be linked into (or preloaded under) the current process. The probe
//! asks the dynamic linker once at startup; the whole exposed surface is
//! gated on the answer, so absence never shows up as a per-call failure.

use core::ffi::c_void;

use super::CtlFn;

const CONTROL_SYMBOL: &[u8] = b"mallctl\0";

pub(super) fn find_control_symbol() -> Option<CtlFn> {
    resolve().map(|ptr| unsafe { core::mem::transmute::<*mut c_void, CtlFn>(ptr) })
}

#[cfg(unix)]
fn resolve() -> Option<*mut c_void> {
    use core::ffi::c_char;

    // RTLD_DEFAULT searches the images already mapped into the process,
    // which is what makes a weakly-bound allocator symbol discoverable
    // without loading anything new.
    let ptr = unsafe { libc::dlsym(libc::RTLD_DEFAULT, CONTROL_SYMBOL.as_ptr() as *const c_char) };
    if ptr.is_null() {
        None
    } else {
        Some(ptr)
    }
}

#[cfg(windows)]
fn resolve() -> Option<*mut c_void> {
    extern "system" {
        fn GetModuleHandleW(name: *const u16) -> *mut c_void;
        fn GetProcAddress(module: *mut c_void, name: *const u8) -> *mut c_void;
    }

    unsafe {
        let module = GetModuleHandleW(core::ptr::null());
        if module.is_null() {
            return None;
        }
        let ptr = GetProcAddress(module, CONTROL_SYMBOL.as_ptr());
        if ptr.is_null() {
            None
        } else {
            Some(ptr)
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn resolve() -> Option<*mut c_void> {
    None
}
