//! Platform abstraction layer
//!
//! Handles browser/native differences for wall-clock time. Storage lives in
//! [`crate::persistence`].

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a new run when none is configured
pub fn entropy_seed() -> u64 {
    let millis = now_millis() as u64;
    millis.wrapping_mul(2654435761).rotate_left(17) ^ 0x9e37_79b9_7f4a_7c15
}
