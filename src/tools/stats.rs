//! Global and per-arena statistics
//!
//! Statistics are snapshots as of the last epoch advance; call
//! [`Ctl::advance_epoch`](crate::ctl::Ctl) first (or use
//! [`heap_usage`](super::heap_usage)) when freshness matters.

use core::ffi::c_uint;

use crate::ctl::Ctl;
use crate::error::CtlResult;

/// Statistics view over a control interface.
#[derive(Debug, Clone, Copy)]
pub struct Stats<'a> {
    ctl: &'a Ctl,
}

/// Background purging thread counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundThreadStats {
    pub num_threads: usize,
    pub num_runs: u64,
    /// Average run interval in nanoseconds.
    pub run_interval: u64,
}

/// Per-arena counters, one `stats.arenas.<i>.*` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaStats {
    pub pactive: usize,
    pub pdirty: usize,
    pub pmuzzy: usize,
    pub mapped: usize,
    pub retained: usize,
    pub base: usize,
    pub internal: usize,
    pub resident: usize,
    pub dirty_npurge: u64,
    pub dirty_nmadvise: u64,
    pub dirty_purged: u64,
    pub muzzy_npurge: u64,
    pub muzzy_nmadvise: u64,
    pub muzzy_purged: u64,
    pub nthreads: c_uint,
    pub uptime: u64,
    pub extent_avail: usize,
    pub small_allocated: usize,
    pub large_allocated: usize,
    pub large_nmalloc: u64,
    pub large_ndalloc: u64,
    pub large_nrequests: u64,
    pub large_nfills: u64,
    pub large_nflushes: u64,
}

impl<'a> Stats<'a> {
    pub(super) fn new(ctl: &'a Ctl) -> Self {
        Self { ctl }
    }

    /// Bytes allocated by the application.
    pub fn allocated(&self) -> CtlResult<usize> {
        self.ctl.read_size("stats.allocated")
    }

    /// Bytes in active pages, a multiple of the page size.
    pub fn active(&self) -> CtlResult<usize> {
        self.ctl.read_size("stats.active")
    }

    /// Bytes in physically resident pages.
    pub fn resident(&self) -> CtlResult<usize> {
        self.ctl.read_size("stats.resident")
    }

    /// Bytes in active extents mapped by the allocator.
    pub fn mapped(&self) -> CtlResult<usize> {
        self.ctl.read_size("stats.mapped")
    }

    /// Bytes retained rather than returned to the OS.
    pub fn retained(&self) -> CtlResult<usize> {
        self.ctl.read_size("stats.retained")
    }

    /// Bytes dedicated to allocator metadata.
    pub fn metadata(&self) -> CtlResult<usize> {
        self.ctl.read_size("stats.metadata")
    }

    pub fn background_thread(&self) -> CtlResult<BackgroundThreadStats> {
        Ok(BackgroundThreadStats {
            num_threads: self.ctl.read_size("stats.background_thread.num_threads")?,
            num_runs: self.ctl.read_u64("stats.background_thread.num_runs")?,
            run_interval: self.ctl.read_u64("stats.background_thread.run_interval")?,
        })
    }

    /// The full counter family for one arena.
    pub fn arena(&self, index: usize) -> CtlResult<ArenaStats> {
        let prefix = format!("stats.arenas.{}", index);
        let size = |suffix: &str| self.ctl.read_size(&format!("{}.{}", prefix, suffix));
        let wide = |suffix: &str| self.ctl.read_u64(&format!("{}.{}", prefix, suffix));

        Ok(ArenaStats {
            pactive: size("pactive")?,
            pdirty: size("pdirty")?,
            pmuzzy: size("pmuzzy")?,
            mapped: size("mapped")?,
            retained: size("retained")?,
            base: size("base")?,
            internal: size("internal")?,
            resident: size("resident")?,
            dirty_npurge: wide("dirty_npurge")?,
            dirty_nmadvise: wide("dirty_nmadvise")?,
            dirty_purged: wide("dirty_purged")?,
            muzzy_npurge: wide("muzzy_npurge")?,
            muzzy_nmadvise: wide("muzzy_nmadvise")?,
            muzzy_purged: wide("muzzy_purged")?,
            nthreads: self.ctl.read_unsigned(&format!("{}.nthreads", prefix))?,
            uptime: wide("uptime")?,
            extent_avail: size("extent_avail")?,
            small_allocated: size("small.allocated")?,
            large_allocated: size("large.allocated")?,
            large_nmalloc: wide("large.nmalloc")?,
            large_ndalloc: wide("large.ndalloc")?,
            large_nrequests: wide("large.nrequests")?,
            large_nfills: wide("large.nfills")?,
            large_nflushes: wide("large.nflushes")?,
        })
    }
}
