//! malloc-tools - typed bridge to jemalloc's mallctl control interface
//!
//! jemalloc exposes a string-keyed control tree for reading statistics,
//! tuning runtime parameters, and triggering maintenance actions. This
//! crate marshals those operations for a dynamically-typed host: a closed
//! namespace of type-specialized entry points over a single probed native
//! symbol, plus typed convenience wrappers for the common keys.
//!
//! Layering, bottom up:
//! - `ctl` - the probed symbol, the raw call shape, per-type marshaling,
//!   and errno-to-symbol translation
//! - `namespace` - the host-facing entry table with arity/type validation
//! - `tools` - tuning, profiling, and statistics wrappers
//!
//! The allocator is optional: when the startup probe finds no `mallctl`
//! in the process image, [`ctl()`] and [`namespace()`] return `None` and
//! the whole surface is simply absent.

pub mod ctl;
pub mod logging;
pub mod namespace;
pub mod tools;

mod error;
mod value;

pub use ctl::{errno_symbol, Ctl, CtlFn};
pub use error::{CtlError, CtlResult};
pub use namespace::{CtlType, Direction, Entry, EntryDescriptor, Intermediate, Namespace};
pub use tools::HeapUsage;
pub use value::Value;

use once_cell::sync::Lazy;

static CONTROL: Lazy<Option<Ctl>> = Lazy::new(|| {
    let probed = Ctl::probe();
    logging::log_probe(probed.is_some());
    probed
});

static NAMESPACE: Lazy<Option<Namespace>> = Lazy::new(|| ctl().copied().map(Namespace::new));

/// The process allocator's control interface, if the probe found one.
pub fn ctl() -> Option<&'static Ctl> {
    CONTROL.as_ref()
}

/// The host-facing entry surface, if the probe found an allocator.
pub fn namespace() -> Option<&'static Namespace> {
    NAMESPACE.as_ref()
}

/// Whether the control interface is present in this process.
pub fn available() -> bool {
    ctl().is_some()
}

/// Initialize logging and run the capability probe eagerly.
///
/// Optional - every accessor probes lazily on first use - but calling it
/// early puts the probe outcome in the logs at a predictable time.
pub fn init() {
    logging::init_logging();
    if namespace().is_some() {
        logging::info!("allocator control interface bridged");
    } else {
        logging::info!("allocator control interface not found; surface disabled");
    }
}
