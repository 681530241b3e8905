//! Statically-enumerated entry descriptors
//!
//! The exposed surface is a closed set: each entry is bound to exactly
//! one (direction, native type) pair when the table is built and is never
//! re-typed afterwards. No runtime reflection - adding an entry means
//! adding a row here.

/// Which way a registry entry moves data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
    /// Write-shaped call with no value at all.
    Command,
}

/// Native value type of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtlType {
    /// Platform-width unsigned size.
    Size,
    /// Platform-width signed size.
    SSize,
    U32,
    U64,
    /// Native `unsigned int` width.
    Unsigned,
    Bool,
    /// NUL-terminated byte string.
    Str,
    /// No payload.
    Void,
}

/// Host-side intermediate a numeric write narrows through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intermediate {
    /// 64-bit signed; the only intermediate the surface uses.
    I64,
}

/// One row of the registry: name, direction, native type, narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryDescriptor {
    pub name: &'static str,
    pub direction: Direction,
    pub ty: CtlType,
    pub intermediate: Option<Intermediate>,
}

const fn read(name: &'static str, ty: CtlType) -> EntryDescriptor {
    EntryDescriptor {
        name,
        direction: Direction::Read,
        ty,
        intermediate: None,
    }
}

const fn write(name: &'static str, ty: CtlType, intermediate: Option<Intermediate>) -> EntryDescriptor {
    EntryDescriptor {
        name,
        direction: Direction::Write,
        ty,
        intermediate,
    }
}

pub(crate) static ENTRIES: [EntryDescriptor; 14] = [
    read("readSize", CtlType::Size),
    read("readSSize", CtlType::SSize),
    read("readU32", CtlType::U32),
    read("readU64", CtlType::U64),
    read("readString", CtlType::Str),
    read("readBool", CtlType::Bool),
    read("readUnsigned", CtlType::Unsigned),
    write("writeSize", CtlType::Size, Some(Intermediate::I64)),
    write("writeSSize", CtlType::SSize, Some(Intermediate::I64)),
    write("writeU64", CtlType::U64, Some(Intermediate::I64)),
    write("writeUnsigned", CtlType::Unsigned, Some(Intermediate::I64)),
    write("writeString", CtlType::Str, None),
    write("writeBool", CtlType::Bool, None),
    EntryDescriptor {
        name: "ctlCommand",
        direction: Direction::Command,
        ty: CtlType::Void,
        intermediate: None,
    },
];
