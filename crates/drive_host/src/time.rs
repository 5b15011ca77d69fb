//! Time and id helpers.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_ENTRY_ID_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a new entry id derived from the clock.
///
/// Ids are strictly increasing within the current process even when the clock does not advance.
pub fn next_entry_id() -> String {
    let now = unix_time_ms_now();
    let next = LAST_ENTRY_ID_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    });
    next.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_ids_are_unique_and_increasing() {
        let ids: Vec<u64> = (0..100)
            .map(|_| next_entry_id().parse().expect("numeric id"))
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
