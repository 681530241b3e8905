//! Namespace builder - the closed, type-specialized entry surface
//!
//! Design: a fixed descriptor table dispatched by entry name. Each entry
//! validates arity and argument types at the boundary, then hands off to
//! the typed marshal layer. Unknown entry names are a lookup miss, not an
//! error value - the host is expected to probe for existence, exactly as
//! it probes for the namespace itself.

mod table;


pub use table::{CtlType, Direction, EntryDescriptor, Intermediate};

use std::collections::HashMap;

use crate::ctl::Ctl;
use crate::error::{CtlError, CtlResult};
use crate::value::Value;

/// The exposed control surface: name -> type-specialized entry point.
///
/// Built once over a resolved control interface and immutable from then
/// on. The process-wide instance lives behind [`crate::namespace()`] and
/// is absent entirely when the probe found no allocator.
pub struct Namespace {
    ctl: Ctl,
    entries: HashMap<&'static str, &'static EntryDescriptor>,
}

impl Namespace {
    pub fn new(ctl: Ctl) -> Self {
        let entries = table::ENTRIES.iter().map(|desc| (desc.name, desc)).collect();
        Self { ctl, entries }
    }

    /// The control interface this surface dispatches into.
    pub fn ctl(&self) -> &Ctl {
        &self.ctl
    }

    /// All entry names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Look up an entry point by name.
    pub fn entry(&self, name: &str) -> Option<Entry<'_>> {
        self.entries.get(name).copied().map(|desc| Entry {
            ctl: &self.ctl,
            desc,
        })
    }

    /// Look up and invoke in one step.
    ///
    /// `None` means the entry name does not exist; errors from the entry
    /// itself come back inside the `Some`.
    pub fn call(&self, name: &str, args: &[Value]) -> Option<CtlResult<Value>> {
        self.entry(name).map(|entry| entry.call(args))
    }
}

impl core::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Namespace")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// A single named, type-specialized entry point.
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    ctl: &'a Ctl,
    desc: &'static EntryDescriptor,
}

impl Entry<'_> {
    pub fn descriptor(&self) -> &'static EntryDescriptor {
        self.desc
    }

    /// Invoke with positional host arguments.
    ///
    /// Reads and commands take exactly one argument (the key); writes
    /// take the key and a value. Key arguments must be strings. Value
    /// arguments are type-checked for boolean and string entries only;
    /// numeric entries coerce through the 64-bit signed intermediate
    /// (see [`Value::as_i64_lossy`]).
    pub fn call(&self, args: &[Value]) -> CtlResult<Value> {
        let expected = match self.desc.direction {
            Direction::Read | Direction::Command => 1,
            Direction::Write => 2,
        };
        if args.len() != expected {
            return Err(CtlError::Arity {
                expected,
                got: args.len(),
            });
        }
        let key = match &args[0] {
            Value::Str(key) => key.as_str(),
            other => {
                return Err(CtlError::Type {
                    expected: "str",
                    got: other.type_name(),
                })
            }
        };

        match self.desc.direction {
            Direction::Read => read_entry(self.ctl, self.desc.ty, key),
            Direction::Write => write_entry(self.ctl, self.desc.ty, key, &args[1]),
            Direction::Command => {
                self.ctl.command(key)?;
                Ok(Value::Nil)
            }
        }
    }
}

fn read_entry(ctl: &Ctl, ty: CtlType, key: &str) -> CtlResult<Value> {
    let value = match ty {
        CtlType::Size => Value::Int(ctl.read_size(key)? as i64),
        CtlType::SSize => Value::Int(ctl.read_ssize(key)? as i64),
        CtlType::U32 => Value::Int(ctl.read_u32(key)? as i64),
        // values past i64::MAX come back reinterpreted, the mirror image
        // of the write-side narrowing
        CtlType::U64 => Value::Int(ctl.read_u64(key)? as i64),
        CtlType::Unsigned => Value::Int(ctl.read_unsigned(key)? as i64),
        CtlType::Bool => Value::Bool(ctl.read_bool(key)?),
        CtlType::Str => Value::Str(ctl.read_str(key)?),
        CtlType::Void => {
            ctl.read_void(key)?;
            Value::Nil
        }
    };
    Ok(value)
}

fn write_entry(ctl: &Ctl, ty: CtlType, key: &str, value: &Value) -> CtlResult<Value> {
    match ty {
        CtlType::Bool => match value {
            Value::Bool(flag) => ctl.write_bool(key, *flag)?,
            other => {
                return Err(CtlError::Type {
                    expected: "bool",
                    got: other.type_name(),
                })
            }
        },
        CtlType::Str => match value {
            Value::Str(text) => ctl.write_str(key, text)?,
            other => {
                return Err(CtlError::Type {
                    expected: "str",
                    got: other.type_name(),
                })
            }
        },
        CtlType::Size => ctl.write_size(key, value.as_i64_lossy() as usize)?,
        CtlType::SSize => ctl.write_ssize(key, value.as_i64_lossy() as isize)?,
        CtlType::U64 => ctl.write_u64(key, value.as_i64_lossy() as u64)?,
        CtlType::Unsigned => ctl.write_unsigned(key, value.as_i64_lossy() as core::ffi::c_uint)?,
        // the descriptor table registers no write entries for these
        CtlType::U32 | CtlType::Void => {
            return Err(CtlError::Type {
                expected: "writable entry",
                got: "read-only type",
            })
        }
    }
    Ok(Value::Nil)
}
