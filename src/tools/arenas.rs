//! Arena layout constants

use core::ffi::c_uint;

use crate::ctl::Ctl;
use crate::error::CtlResult;

/// Arena configuration view over a control interface.
#[derive(Debug, Clone, Copy)]
pub struct Arenas<'a> {
    ctl: &'a Ctl,
}

impl<'a> Arenas<'a> {
    pub(super) fn new(ctl: &'a Ctl) -> Self {
        Self { ctl }
    }

    /// Number of automatically managed arenas.
    pub fn narenas(&self) -> CtlResult<c_uint> {
        self.ctl.read_unsigned("arenas.narenas")
    }

    /// Allocation quantum in bytes.
    pub fn quantum(&self) -> CtlResult<usize> {
        self.ctl.read_size("arenas.quantum")
    }

    /// Page size in bytes.
    pub fn page(&self) -> CtlResult<usize> {
        self.ctl.read_size("arenas.page")
    }

    /// Largest size class cached per thread.
    pub fn tcache_max(&self) -> CtlResult<usize> {
        self.ctl.read_size("arenas.tcache_max")
    }

    /// Number of small-size bins.
    pub fn nbins(&self) -> CtlResult<c_uint> {
        self.ctl.read_unsigned("arenas.nbins")
    }

    /// Number of cached size classes.
    pub fn nhbins(&self) -> CtlResult<c_uint> {
        self.ctl.read_unsigned("arenas.nhbins")
    }
}
