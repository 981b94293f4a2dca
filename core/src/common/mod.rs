//!
//! # Common components
//!
//! Runtime configuration shared by every map instance.
//!


use once_cell::sync::Lazy;
use parking_lot::Mutex;
use ruc::*;
use std::env;

/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

/// Upper bound accepted for the default capacity, in entries.
pub const MAX_DEFAULT_CAPACITY: usize = 16 * MB;

const DEFAULT_CAPACITY_VAR: &str = "EMAP_DEFAULT_CAPACITY";

static EMAP_DEFAULT_CAPACITY: Lazy<Mutex<usize>> =
    Lazy::new(|| Mutex::new(load_default_capacity()));

/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

fn load_default_capacity() -> usize {
    let raw = match env::var(DEFAULT_CAPACITY_VAR) {
        Ok(v) => v,
        Err(_) => return 0,
    };

    match emap_parse_default_capacity(&raw) {
        Ok(n) => {
            tracing::debug!(capacity = n, "loaded ${}", DEFAULT_CAPACITY_VAR);
            n
        }
        Err(e) => {
            tracing::warn!(value = %raw, error = ?e, "ignoring invalid ${}", DEFAULT_CAPACITY_VAR);
            0
        }
    }
}

/// Parses a value of ${EMAP_DEFAULT_CAPACITY}.
pub fn emap_parse_default_capacity(raw: &str) -> Result<usize> {
    let n = raw.trim().parse::<usize>().c(d!("not an unsigned integer"))?;
    if n > MAX_DEFAULT_CAPACITY {
        return Err(eg!(format!(
            "capacity {} exceeds the limit {}",
            n, MAX_DEFAULT_CAPACITY
        )));
    }
    Ok(n)
}

/// ${EMAP_DEFAULT_CAPACITY}
#[inline(always)]
pub fn emap_get_default_capacity() -> usize {
    *EMAP_DEFAULT_CAPACITY.lock()
}

/// Set ${EMAP_DEFAULT_CAPACITY} manually,
/// affects maps created by `OrderedMap::new` afterwards.
#[inline(always)]
pub fn emap_set_default_capacity(n: usize) -> Result<()> {
    if n > MAX_DEFAULT_CAPACITY {
        return Err(eg!(format!(
            "capacity {} exceeds the limit {}",
            n, MAX_DEFAULT_CAPACITY
        )));
    }
    *EMAP_DEFAULT_CAPACITY.lock() = n;
    Ok(())
}
