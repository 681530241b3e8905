//! In-process stand-in for the native control interface
//!
//! An `extern "C"` function over a small fixed key table, close enough to
//! the real allocator's contract to exercise every marshal path: buffer
//! size checks (EINVAL), unknown keys (ENOENT), and a read-only key
//! (EPERM). Mutable state is process-global, so tests that observe it
//! serialize through `lock_state`.

use core::ffi::{c_char, c_int, c_uint, c_void};
use core::mem;
use std::ffi::CStr;
use std::sync::atomic::{AtomicBool, AtomicIsize, AtomicU32, AtomicU64, AtomicUsize, Ordering};

use parking_lot::{Mutex, MutexGuard};

use super::codes::{EINVAL, ENOENT, EPERM};

static STATE_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that mutate or observe mock state.
pub(crate) fn lock_state() -> MutexGuard<'static, ()> {
    STATE_LOCK.lock()
}

static BACKGROUND_THREAD: AtomicBool = AtomicBool::new(false);
static PROF_ACTIVE: AtomicBool = AtomicBool::new(false);
static PROF_GDUMP: AtomicBool = AtomicBool::new(false);
static DIRTY_DECAY_MS: AtomicIsize = AtomicIsize::new(10_000);
static MUZZY_DECAY_MS: AtomicIsize = AtomicIsize::new(10_000);
static EPOCH: AtomicU64 = AtomicU64::new(0);
static THREAD_ARENA: AtomicU32 = AtomicU32::new(0);
static TCACHE_FLUSHES: AtomicUsize = AtomicUsize::new(0);
static PROF_RESETS: AtomicUsize = AtomicUsize::new(0);
static LAST_RESET_RATE: AtomicUsize = AtomicUsize::new(0);
static LAST_DUMP: Mutex<Option<String>> = Mutex::new(None);
static PROF_PREFIX: Mutex<Option<String>> = Mutex::new(None);

const VERSION: &[u8] = b"5.3.0-0-mock\0";

pub(crate) fn tcache_flushes() -> usize {
    TCACHE_FLUSHES.load(Ordering::SeqCst)
}

pub(crate) fn prof_resets() -> usize {
    PROF_RESETS.load(Ordering::SeqCst)
}

pub(crate) fn last_reset_rate() -> usize {
    LAST_RESET_RATE.load(Ordering::SeqCst)
}

pub(crate) fn last_dump() -> Option<String> {
    LAST_DUMP.lock().clone()
}

pub(crate) fn prof_prefix() -> Option<String> {
    PROF_PREFIX.lock().clone()
}

pub(crate) fn epoch() -> u64 {
    EPOCH.load(Ordering::SeqCst)
}

/// The mock control entry, shaped exactly like `mallctl`.
pub(crate) extern "C" fn mock_mallctl(
    name: *const c_char,
    oldp: *mut c_void,
    oldlenp: *mut usize,
    newp: *mut c_void,
    newlen: usize,
) -> c_int {
    if name.is_null() {
        return EINVAL;
    }
    let key = match unsafe { CStr::from_ptr(name) }.to_str() {
        Ok(key) => key,
        Err(_) => return EINVAL,
    };
    unsafe { dispatch(key, oldp, oldlenp, newp, newlen) }
}

unsafe fn dispatch(
    key: &str,
    oldp: *mut c_void,
    oldlenp: *mut usize,
    newp: *mut c_void,
    newlen: usize,
) -> c_int {
    match key {
        "version" => read_out(oldp, oldlenp, VERSION.as_ptr() as *const c_char),

        "background_thread" => rw_bool(&BACKGROUND_THREAD, oldp, oldlenp, newp, newlen),
        "prof.active" => rw_bool(&PROF_ACTIVE, oldp, oldlenp, newp, newlen),
        "prof.gdump" => rw_bool(&PROF_GDUMP, oldp, oldlenp, newp, newlen),
        "opt.prof" => {
            // option snapshot, fixed for the lifetime of the process
            if !newp.is_null() {
                return EPERM;
            }
            read_out(oldp, oldlenp, false)
        }

        "arenas.dirty_decay_ms" => rw_isize(&DIRTY_DECAY_MS, oldp, oldlenp, newp, newlen),
        "arenas.muzzy_decay_ms" => rw_isize(&MUZZY_DECAY_MS, oldp, oldlenp, newp, newlen),
        "epoch" => rw_u64(&EPOCH, oldp, oldlenp, newp, newlen),
        "thread.arena" => rw_u32(&THREAD_ARENA, oldp, oldlenp, newp, newlen),

        "arenas.narenas" => read_out::<c_uint>(oldp, oldlenp, 4),
        "arenas.nbins" => read_out::<c_uint>(oldp, oldlenp, 36),
        "arenas.nhbins" => read_out::<c_uint>(oldp, oldlenp, 8),
        "arenas.quantum" => read_out::<usize>(oldp, oldlenp, 16),
        "arenas.page" => read_out::<usize>(oldp, oldlenp, 4096),
        "arenas.tcache_max" => read_out::<usize>(oldp, oldlenp, 32 * 1024),
        "arenas.bin.0.nregs" => read_out::<u32>(oldp, oldlenp, 512),

        "stats.allocated" => read_out::<usize>(oldp, oldlenp, 1 << 20),
        "stats.active" => read_out::<usize>(oldp, oldlenp, 5 << 18),
        "stats.resident" => read_out::<usize>(oldp, oldlenp, 6 << 18),
        "stats.mapped" => read_out::<usize>(oldp, oldlenp, 4 << 20),
        "stats.retained" => read_out::<usize>(oldp, oldlenp, 1 << 20),
        "stats.metadata" => read_out::<usize>(oldp, oldlenp, 1 << 16),
        "stats.background_thread.num_threads" => read_out::<usize>(oldp, oldlenp, 1),
        "stats.background_thread.num_runs" => read_out::<u64>(oldp, oldlenp, 42),
        "stats.background_thread.run_interval" => read_out::<u64>(oldp, oldlenp, 10_000_000),

        "prof.lg_sample" => read_out::<usize>(oldp, oldlenp, 19),
        "prof.interval" => read_out::<u64>(oldp, oldlenp, 0),
        "prof.dump" => prof_dump(oldp, newp, newlen),
        "prof.reset" => prof_reset(oldp, newp, newlen),
        "prof.prefix" => prof_prefix_write(oldp, newp, newlen),

        "thread.tcache.flush" => {
            if !oldp.is_null() || !newp.is_null() {
                return EINVAL;
            }
            TCACHE_FLUSHES.fetch_add(1, Ordering::SeqCst);
            0
        }

        _ => match key.strip_prefix("stats.arenas.0.") {
            Some(suffix) => arena_stat(suffix, oldp, oldlenp),
            None => ENOENT,
        },
    }
}

unsafe fn arena_stat(suffix: &str, oldp: *mut c_void, oldlenp: *mut usize) -> c_int {
    match suffix {
        "pactive" => read_out::<usize>(oldp, oldlenp, 100),
        "pdirty" => read_out::<usize>(oldp, oldlenp, 10),
        "pmuzzy" => read_out::<usize>(oldp, oldlenp, 5),
        "mapped" => read_out::<usize>(oldp, oldlenp, 1 << 20),
        "retained" => read_out::<usize>(oldp, oldlenp, 1 << 18),
        "base" => read_out::<usize>(oldp, oldlenp, 4096),
        "internal" => read_out::<usize>(oldp, oldlenp, 2048),
        "resident" => read_out::<usize>(oldp, oldlenp, 1 << 19),
        "extent_avail" => read_out::<usize>(oldp, oldlenp, 3),
        "dirty_npurge" => read_out::<u64>(oldp, oldlenp, 7),
        "dirty_nmadvise" => read_out::<u64>(oldp, oldlenp, 8),
        "dirty_purged" => read_out::<u64>(oldp, oldlenp, 9),
        "muzzy_npurge" => read_out::<u64>(oldp, oldlenp, 1),
        "muzzy_nmadvise" => read_out::<u64>(oldp, oldlenp, 2),
        "muzzy_purged" => read_out::<u64>(oldp, oldlenp, 3),
        "nthreads" => read_out::<c_uint>(oldp, oldlenp, 2),
        "uptime" => read_out::<u64>(oldp, oldlenp, 123_456),
        "small.allocated" => read_out::<usize>(oldp, oldlenp, 600_000),
        "large.allocated" => read_out::<usize>(oldp, oldlenp, 400_000),
        "large.nmalloc" => read_out::<u64>(oldp, oldlenp, 11),
        "large.ndalloc" => read_out::<u64>(oldp, oldlenp, 10),
        "large.nrequests" => read_out::<u64>(oldp, oldlenp, 12),
        "large.nfills" => read_out::<u64>(oldp, oldlenp, 5),
        "large.nflushes" => read_out::<u64>(oldp, oldlenp, 4),
        _ => ENOENT,
    }
}

unsafe fn prof_dump(oldp: *mut c_void, newp: *mut c_void, newlen: usize) -> c_int {
    if !oldp.is_null() {
        return EINVAL;
    }
    if newp.is_null() {
        if newlen != 0 {
            return EINVAL;
        }
        *LAST_DUMP.lock() = Some("<default>".to_owned());
        return 0;
    }
    let ptr: *const c_char = match take_in(newp, newlen) {
        Ok(ptr) => ptr,
        Err(code) => return code,
    };
    if ptr.is_null() {
        return EINVAL;
    }
    *LAST_DUMP.lock() = Some(CStr::from_ptr(ptr).to_string_lossy().into_owned());
    0
}

unsafe fn prof_reset(oldp: *mut c_void, newp: *mut c_void, newlen: usize) -> c_int {
    if !oldp.is_null() {
        return EINVAL;
    }
    if !newp.is_null() {
        let rate: usize = match take_in(newp, newlen) {
            Ok(rate) => rate,
            Err(code) => return code,
        };
        LAST_RESET_RATE.store(rate, Ordering::SeqCst);
    } else if newlen != 0 {
        return EINVAL;
    }
    PROF_RESETS.fetch_add(1, Ordering::SeqCst);
    0
}

unsafe fn prof_prefix_write(oldp: *mut c_void, newp: *mut c_void, newlen: usize) -> c_int {
    if !oldp.is_null() || newp.is_null() {
        return EINVAL;
    }
    let ptr: *const c_char = match take_in(newp, newlen) {
        Ok(ptr) => ptr,
        Err(code) => return code,
    };
    if ptr.is_null() {
        return EINVAL;
    }
    *PROF_PREFIX.lock() = Some(CStr::from_ptr(ptr).to_string_lossy().into_owned());
    0
}

// ----- buffer helpers, matching the real interface's size checks -----

unsafe fn read_out<T: Copy>(oldp: *mut c_void, oldlenp: *mut usize, value: T) -> c_int {
    if oldp.is_null() || oldlenp.is_null() {
        return EINVAL;
    }
    if *oldlenp != mem::size_of::<T>() {
        return EINVAL;
    }
    *(oldp as *mut T) = value;
    0
}

unsafe fn take_in<T: Copy>(newp: *mut c_void, newlen: usize) -> Result<T, c_int> {
    if newp.is_null() || newlen != mem::size_of::<T>() {
        return Err(EINVAL);
    }
    Ok(*(newp as *const T))
}

unsafe fn rw_bool(
    cell: &AtomicBool,
    oldp: *mut c_void,
    oldlenp: *mut usize,
    newp: *mut c_void,
    newlen: usize,
) -> c_int {
    if !oldp.is_null() {
        let code = read_out(oldp, oldlenp, cell.load(Ordering::SeqCst));
        if code != 0 {
            return code;
        }
    }
    if !newp.is_null() {
        match take_in::<bool>(newp, newlen) {
            Ok(value) => cell.store(value, Ordering::SeqCst),
            Err(code) => return code,
        }
    }
    0
}

unsafe fn rw_isize(
    cell: &AtomicIsize,
    oldp: *mut c_void,
    oldlenp: *mut usize,
    newp: *mut c_void,
    newlen: usize,
) -> c_int {
    if !oldp.is_null() {
        let code = read_out(oldp, oldlenp, cell.load(Ordering::SeqCst));
        if code != 0 {
            return code;
        }
    }
    if !newp.is_null() {
        match take_in::<isize>(newp, newlen) {
            Ok(value) => cell.store(value, Ordering::SeqCst),
            Err(code) => return code,
        }
    }
    0
}

unsafe fn rw_u64(
    cell: &AtomicU64,
    oldp: *mut c_void,
    oldlenp: *mut usize,
    newp: *mut c_void,
    newlen: usize,
) -> c_int {
    if !oldp.is_null() {
        let code = read_out(oldp, oldlenp, cell.load(Ordering::SeqCst));
        if code != 0 {
            return code;
        }
    }
    if !newp.is_null() {
        match take_in::<u64>(newp, newlen) {
            Ok(value) => cell.store(value, Ordering::SeqCst),
            Err(code) => return code,
        }
    }
    0
}

unsafe fn rw_u32(
    cell: &AtomicU32,
    oldp: *mut c_void,
    oldlenp: *mut usize,
    newp: *mut c_void,
    newlen: usize,
) -> c_int {
    if !oldp.is_null() {
        let code = read_out(oldp, oldlenp, cell.load(Ordering::SeqCst) as c_uint);
        if code != 0 {
            return code;
        }
    }
    if !newp.is_null() {
        match take_in::<c_uint>(newp, newlen) {
            Ok(value) => cell.store(value, Ordering::SeqCst),
            Err(code) => return code,
        }
    }
    0
}
