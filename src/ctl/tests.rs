//! Marshal layer tests against the mock control interface
//!
//! Organized by path:
//! - Read: one test per native type specialization
//! - Write: one test per native type specialization
//! - Command: the no-buffer call shape
//! - Errors: unknown keys, size mismatches, read-only keys, bad keys

use super::mock::{self, mock_mallctl};
use super::Ctl;
use crate::error::CtlError;

fn bridge() -> Ctl {
    Ctl::from_fn(mock_mallctl)
}

// ===== Read path =====

#[test]
fn read_string_returns_owned_version() {
    let ctl = bridge();
    assert_eq!(ctl.read_str("version").unwrap(), "5.3.0-0-mock");
}

#[test]
fn read_size_and_ssize() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    assert_eq!(ctl.read_size("arenas.quantum").unwrap(), 16);
    assert_eq!(ctl.read_ssize("arenas.dirty_decay_ms").unwrap(), 10_000);
}

#[test]
fn read_fixed_width_integers() {
    let ctl = bridge();
    assert_eq!(ctl.read_u32("arenas.bin.0.nregs").unwrap(), 512);
    assert_eq!(ctl.read_u64("prof.interval").unwrap(), 0);
    assert_eq!(ctl.read_unsigned("arenas.narenas").unwrap(), 4);
}

#[test]
fn read_bool_option_key() {
    let ctl = bridge();
    assert!(!ctl.read_bool("opt.prof").unwrap());
}

#[test]
fn read_void_invokes_without_buffers() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    let before = mock::tcache_flushes();
    ctl.read_void("thread.tcache.flush").unwrap();
    assert_eq!(mock::tcache_flushes(), before + 1);
}

// ===== Write path =====

#[test]
fn write_bool_round_trips() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    ctl.write_bool("prof.active", true).unwrap();
    assert!(ctl.read_bool("prof.active").unwrap());
    ctl.write_bool("prof.active", false).unwrap();
    assert!(!ctl.read_bool("prof.active").unwrap());
}

#[test]
fn write_ssize_round_trips() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    ctl.write_ssize("arenas.muzzy_decay_ms", -1).unwrap();
    assert_eq!(ctl.read_ssize("arenas.muzzy_decay_ms").unwrap(), -1);
    ctl.write_ssize("arenas.muzzy_decay_ms", 10_000).unwrap();
}

#[test]
fn write_u64_round_trips() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    ctl.write_u64("epoch", 7).unwrap();
    assert_eq!(ctl.read_u64("epoch").unwrap(), 7);
}

#[test]
fn write_unsigned_round_trips() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    ctl.write_unsigned("thread.arena", 3).unwrap();
    assert_eq!(ctl.read_unsigned("thread.arena").unwrap(), 3);
}

#[test]
fn write_size_records_reset_rate() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    ctl.write_size("prof.reset", 8).unwrap();
    assert_eq!(mock::last_reset_rate(), 8);
}

#[test]
fn write_string_passes_pointer_sized_cell() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    // The mock dereferences the pointer it receives, so the whole path
    // (pointer cell, NUL termination, lifetime across the call) is covered.
    ctl.write_str("prof.prefix", "/tmp/heap-profile").unwrap();
    assert_eq!(mock::prof_prefix().as_deref(), Some("/tmp/heap-profile"));

    let long = "x".repeat(4096);
    ctl.write_str("prof.prefix", &long).unwrap();
    assert_eq!(mock::prof_prefix().as_deref(), Some(long.as_str()));
}

#[test]
fn write_string_dump_carries_filename() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    ctl.write_str("prof.dump", "dump.out").unwrap();
    assert_eq!(mock::last_dump().as_deref(), Some("dump.out"));
}

// ===== Command path =====

#[test]
fn command_fires_without_value() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    let before = mock::tcache_flushes();
    ctl.command("thread.tcache.flush").unwrap();
    assert_eq!(mock::tcache_flushes(), before + 1);
}

#[test]
fn command_dump_uses_default_sink() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    ctl.command("prof.dump").unwrap();
    assert_eq!(mock::last_dump().as_deref(), Some("<default>"));
}

// ===== Error paths =====

#[test]
fn unknown_key_is_enoent() {
    let ctl = bridge();
    let err = ctl.read_size("no.such.key").unwrap_err();
    assert_eq!(err.symbol(), Some("ENOENT"));
    assert_eq!(err.to_string(), "ENOENT");
}

#[test]
fn unknown_key_on_every_shape() {
    let ctl = bridge();
    assert_eq!(
        ctl.write_bool("no.such.key", true).unwrap_err().symbol(),
        Some("ENOENT")
    );
    assert_eq!(
        ctl.command("no.such.key").unwrap_err().symbol(),
        Some("ENOENT")
    );
    assert_eq!(
        ctl.read_str("no.such.key").unwrap_err().symbol(),
        Some("ENOENT")
    );
}

#[test]
fn size_mismatch_is_einval() {
    let ctl = bridge();
    // epoch is 8 bytes; asking for 4 trips the length check
    let err = ctl.read_u32("epoch").unwrap_err();
    assert_eq!(err.symbol(), Some("EINVAL"));
}

#[test]
fn read_only_key_rejects_writes() {
    let ctl = bridge();
    let err = ctl.write_bool("opt.prof", true).unwrap_err();
    assert_eq!(err.symbol(), Some("EPERM"));
}

#[test]
fn interior_nul_in_key_is_a_type_error() {
    let ctl = bridge();
    let err = ctl.read_size("stats\0allocated").unwrap_err();
    assert!(matches!(err, CtlError::Type { .. }));
}

#[test]
fn interior_nul_in_string_value_is_a_type_error() {
    let ctl = bridge();
    let err = ctl.write_str("prof.prefix", "bad\0prefix").unwrap_err();
    assert!(matches!(err, CtlError::Type { .. }));
}

#[test]
fn failed_read_returns_no_partial_value() {
    let _guard = mock::lock_state();
    let ctl = bridge();
    ctl.write_u64("epoch", 99).unwrap();
    // A failing read (wrong width) must not disturb subsequent reads.
    assert!(ctl.read_u32("epoch").is_err());
    assert_eq!(ctl.read_u64("epoch").unwrap(), 99);
}
