//! High-level allocator tools over the control bridge
//!
//! Design: typed convenience wrappers for the keys worth reaching for by
//! hand, grouped into focused submodules. Each group is a borrowed view
//! over a [`Ctl`], so the same wrappers work against the probed process
//! allocator and against any bridged interface. The free functions here
//! go through the process-wide interface and fail with
//! [`CtlError::Unavailable`] when the probe found no allocator.

mod arenas;
mod prof;
mod stats;
mod tuning;

#[cfg(test)]
mod tests;

pub use arenas::Arenas;
pub use prof::Prof;
pub use stats::{ArenaStats, BackgroundThreadStats, Stats};
pub use tuning::Tuning;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::ctl::Ctl;
use crate::error::{CtlError, CtlResult};

/// A coarse heap snapshot: bytes the application uses vs. bytes the
/// allocator holds on to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapUsage {
    /// Bytes allocated by the application.
    pub used: usize,
    /// Mapped plus retained bytes - what the process is really holding.
    pub total: usize,
}

fn process_ctl() -> CtlResult<&'static Ctl> {
    crate::ctl().ok_or(CtlError::Unavailable)
}

impl Ctl {
    /// Decay and background-thread tunables.
    pub fn tuning(&self) -> Tuning<'_> {
        Tuning::new(self)
    }

    /// Heap profiling controls.
    pub fn prof(&self) -> Prof<'_> {
        Prof::new(self)
    }

    /// Global and per-arena statistics.
    pub fn stats(&self) -> Stats<'_> {
        Stats::new(self)
    }

    /// Arena layout constants.
    pub fn arenas(&self) -> Arenas<'_> {
        Arenas::new(self)
    }

    /// The allocator's version string.
    pub fn version(&self) -> CtlResult<String> {
        self.read_str("version")
    }

    /// Flush the calling thread's cache back to the arenas.
    pub fn flush_thread_cache(&self) -> CtlResult<()> {
        self.command("thread.tcache.flush")
    }

    /// Advance the statistics epoch so subsequent reads are fresh.
    pub fn advance_epoch(&self) -> CtlResult<()> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        self.write_u64("epoch", now)
    }

    /// Fresh used/total heap numbers in one call.
    pub fn heap_usage(&self) -> CtlResult<HeapUsage> {
        self.advance_epoch()?;
        let stats = self.stats();
        Ok(HeapUsage {
            used: stats.allocated()?,
            total: stats.mapped()? + stats.retained()?,
        })
    }
}

// ----- process-wide conveniences -----

pub fn version() -> CtlResult<String> {
    process_ctl()?.version()
}

pub fn tuning() -> CtlResult<Tuning<'static>> {
    Ok(process_ctl()?.tuning())
}

pub fn prof() -> CtlResult<Prof<'static>> {
    Ok(process_ctl()?.prof())
}

pub fn stats() -> CtlResult<Stats<'static>> {
    Ok(process_ctl()?.stats())
}

pub fn arenas() -> CtlResult<Arenas<'static>> {
    Ok(process_ctl()?.arenas())
}

pub fn flush_thread_cache() -> CtlResult<()> {
    process_ctl()?.flush_thread_cache()
}

pub fn advance_epoch() -> CtlResult<()> {
    process_ctl()?.advance_epoch()
}

pub fn heap_usage() -> CtlResult<HeapUsage> {
    process_ctl()?.heap_usage()
}
