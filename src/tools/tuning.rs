//! Decay and background-thread tunables
//!
//! The usual knobs for trading memory footprint against CPU: shorter
//! decay returns pages to the OS sooner, the background thread moves
//! purging off application threads.

use crate::ctl::Ctl;
use crate::error::CtlResult;

/// Tunables view over a control interface.
#[derive(Debug, Clone, Copy)]
pub struct Tuning<'a> {
    ctl: &'a Ctl,
}

impl<'a> Tuning<'a> {
    pub(super) fn new(ctl: &'a Ctl) -> Self {
        Self { ctl }
    }

    pub fn background_thread(&self) -> CtlResult<bool> {
        self.ctl.read_bool("background_thread")
    }

    pub fn set_background_thread(&self, enabled: bool) -> CtlResult<()> {
        self.ctl.write_bool("background_thread", enabled)
    }

    /// Milliseconds before dirty pages are purged; -1 disables purging.
    pub fn dirty_decay_ms(&self) -> CtlResult<isize> {
        self.ctl.read_ssize("arenas.dirty_decay_ms")
    }

    pub fn set_dirty_decay_ms(&self, ms: isize) -> CtlResult<()> {
        self.ctl.write_ssize("arenas.dirty_decay_ms", ms)
    }

    /// Milliseconds before muzzy pages are purged; -1 disables purging.
    pub fn muzzy_decay_ms(&self) -> CtlResult<isize> {
        self.ctl.read_ssize("arenas.muzzy_decay_ms")
    }

    pub fn set_muzzy_decay_ms(&self, ms: isize) -> CtlResult<()> {
        self.ctl.write_ssize("arenas.muzzy_decay_ms", ms)
    }
}
