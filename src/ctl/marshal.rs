//! Typed marshaling over the raw control call
//!
//! Design: one generic read path and one generic write path, specialized
//! per native type. Scalar buffers live on the stack; string values are
//! passed as a pointer-sized cell holding a pointer to a NUL-terminated
//! buffer that outlives the native call. Every buffer is call-scoped and
//! released on all exit paths by ordinary ownership, so an error partway
//! through a conversion cannot leak.

use core::ffi::{c_char, c_uint, c_void};
use core::mem;
use core::ptr;
use std::ffi::CStr;
use std::ffi::CString;

use crate::error::{CtlError, CtlResult};
use crate::logging;

use super::{key_cstring, Ctl};

impl Ctl {
    // ----- read mode -----

    /// Read a platform-size unsigned value.
    pub fn read_size(&self, key: &str) -> CtlResult<usize> {
        self.read_scalar(key)
    }

    /// Read a platform-size signed value.
    pub fn read_ssize(&self, key: &str) -> CtlResult<isize> {
        self.read_scalar(key)
    }

    /// Read a 32-bit unsigned value.
    pub fn read_u32(&self, key: &str) -> CtlResult<u32> {
        self.read_scalar(key)
    }

    /// Read a 64-bit unsigned value.
    pub fn read_u64(&self, key: &str) -> CtlResult<u64> {
        self.read_scalar(key)
    }

    /// Read a native `unsigned int` value.
    pub fn read_unsigned(&self, key: &str) -> CtlResult<c_uint> {
        self.read_scalar(key)
    }

    /// Read a boolean value.
    pub fn read_bool(&self, key: &str) -> CtlResult<bool> {
        self.read_scalar(key)
    }

    /// Read a string key.
    ///
    /// The native side hands back a pointer to NUL-terminated storage it
    /// owns, so the output buffer is the pointer itself. A null pointer
    /// reads as the empty string; non-UTF-8 bytes convert lossily.
    pub fn read_str(&self, key: &str) -> CtlResult<String> {
        let name = key_cstring(key)?;
        logging::log_read(key);

        let mut out: *const c_char = ptr::null();
        let mut len = mem::size_of::<*const c_char>();
        let code = self.operate(
            &name,
            &mut out as *mut *const c_char as *mut c_void,
            &mut len,
            ptr::null_mut(),
            0,
        );
        if code != 0 {
            return Err(CtlError::Native { code });
        }
        if out.is_null() {
            return Ok(String::new());
        }
        Ok(unsafe { CStr::from_ptr(out) }.to_string_lossy().into_owned())
    }

    /// Read with no output buffer - the read-shaped form of a command.
    pub fn read_void(&self, key: &str) -> CtlResult<()> {
        let name = key_cstring(key)?;
        logging::log_read(key);

        let code = self.operate(&name, ptr::null_mut(), ptr::null_mut(), ptr::null_mut(), 0);
        if code != 0 {
            return Err(CtlError::Native { code });
        }
        Ok(())
    }

    fn read_scalar<T: Copy + Default>(&self, key: &str) -> CtlResult<T> {
        let name = key_cstring(key)?;
        logging::log_read(key);

        let mut out = T::default();
        let mut len = mem::size_of::<T>();
        let code = self.operate(
            &name,
            &mut out as *mut T as *mut c_void,
            &mut len,
            ptr::null_mut(),
            0,
        );
        if code != 0 {
            return Err(CtlError::Native { code });
        }
        Ok(out)
    }

    // ----- write mode -----

    /// Write a platform-size unsigned value.
    pub fn write_size(&self, key: &str, value: usize) -> CtlResult<()> {
        self.write_scalar(key, value)
    }

    /// Write a platform-size signed value.
    pub fn write_ssize(&self, key: &str, value: isize) -> CtlResult<()> {
        self.write_scalar(key, value)
    }

    /// Write a 64-bit unsigned value.
    pub fn write_u64(&self, key: &str, value: u64) -> CtlResult<()> {
        self.write_scalar(key, value)
    }

    /// Write a native `unsigned int` value.
    pub fn write_unsigned(&self, key: &str, value: c_uint) -> CtlResult<()> {
        self.write_scalar(key, value)
    }

    /// Write a boolean value.
    pub fn write_bool(&self, key: &str, value: bool) -> CtlResult<()> {
        self.write_scalar(key, value)
    }

    /// Write a string value.
    ///
    /// String-typed parameters take a pointer-sized cell: the new-value
    /// buffer holds the pointer to the NUL-terminated bytes, never the
    /// bytes inline, and the input length is the pointer width.
    pub fn write_str(&self, key: &str, value: &str) -> CtlResult<()> {
        let name = key_cstring(key)?;
        let value = CString::new(value).map_err(|_| CtlError::Type {
            expected: "str without NUL bytes",
            got: "str",
        })?;
        logging::log_write(key);

        let mut cell: *const c_char = value.as_ptr();
        let code = self.operate(
            &name,
            ptr::null_mut(),
            ptr::null_mut(),
            &mut cell as *mut *const c_char as *mut c_void,
            mem::size_of::<*const c_char>(),
        );
        // `value` is still alive here, on success and error alike
        if code != 0 {
            return Err(CtlError::Native { code });
        }
        Ok(())
    }

    /// Fire a command: no output buffer, no input buffer.
    pub fn command(&self, key: &str) -> CtlResult<()> {
        let name = key_cstring(key)?;
        logging::log_command(key);

        let code = self.operate(&name, ptr::null_mut(), ptr::null_mut(), ptr::null_mut(), 0);
        if code != 0 {
            return Err(CtlError::Native { code });
        }
        Ok(())
    }

    fn write_scalar<T: Copy>(&self, key: &str, mut value: T) -> CtlResult<()> {
        let name = key_cstring(key)?;
        logging::log_write(key);

        let code = self.operate(
            &name,
            ptr::null_mut(),
            ptr::null_mut(),
            &mut value as *mut T as *mut c_void,
            mem::size_of::<T>(),
        );
        if code != 0 {
            return Err(CtlError::Native { code });
        }
        Ok(())
    }
}
