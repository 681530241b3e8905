//! Heap profiling controls
//!
//! Thin wrappers over the `prof.*` key family. The dump and reset
//! operations come in two shapes: parameterized (a string or size write)
//! and bare (a command with no value).

use parking_lot::Mutex;

use crate::ctl::Ctl;
use crate::error::CtlResult;

// The allocator has no getter for prof.prefix, so the last written value
// is remembered here and opt.prof_prefix only serves as the fallback.
static LAST_PREFIX: Mutex<Option<String>> = Mutex::new(None);

/// Profiling view over a control interface.
#[derive(Debug, Clone, Copy)]
pub struct Prof<'a> {
    ctl: &'a Ctl,
}

impl<'a> Prof<'a> {
    pub(super) fn new(ctl: &'a Ctl) -> Self {
        Self { ctl }
    }

    /// Whether profiling was compiled in and enabled at startup.
    pub fn enabled(&self) -> CtlResult<bool> {
        self.ctl.read_bool("opt.prof")
    }

    pub fn active(&self) -> CtlResult<bool> {
        self.ctl.read_bool("prof.active")
    }

    pub fn set_active(&self, active: bool) -> CtlResult<()> {
        self.ctl.write_bool("prof.active", active)
    }

    pub fn gdump(&self) -> CtlResult<bool> {
        self.ctl.read_bool("prof.gdump")
    }

    pub fn set_gdump(&self, enabled: bool) -> CtlResult<()> {
        self.ctl.write_bool("prof.gdump", enabled)
    }

    /// Dump a heap profile, to `filename` or to the configured prefix.
    pub fn dump(&self, filename: Option<&str>) -> CtlResult<()> {
        match filename {
            Some(filename) => self.ctl.write_str("prof.dump", filename),
            None => self.ctl.command("prof.dump"),
        }
    }

    /// Reset profile data, optionally changing the sample rate.
    pub fn reset(&self, sample_rate: Option<usize>) -> CtlResult<()> {
        match sample_rate {
            Some(rate) => self.ctl.write_size("prof.reset", rate),
            None => self.ctl.command("prof.reset"),
        }
    }

    pub fn prefix(&self) -> CtlResult<String> {
        if let Some(prefix) = LAST_PREFIX.lock().clone() {
            return Ok(prefix);
        }
        self.ctl.read_str("opt.prof_prefix")
    }

    pub fn set_prefix(&self, prefix: &str) -> CtlResult<()> {
        self.ctl.write_str("prof.prefix", prefix)?;
        *LAST_PREFIX.lock() = Some(prefix.to_owned());
        Ok(())
    }

    /// Base-2 logarithm of the average sample interval.
    pub fn lg_sample(&self) -> CtlResult<usize> {
        self.ctl.read_size("prof.lg_sample")
    }

    /// Average byte interval between automatic dumps; 0 disables them.
    pub fn interval(&self) -> CtlResult<u64> {
        self.ctl.read_u64("prof.interval")
    }
}
