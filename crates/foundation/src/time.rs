use chrono::DateTime;

/// Milliseconds since the Unix epoch from the host clock.
///
/// Uses `Date.now()` in the browser; the system clock elsewhere.
pub fn now_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// `YYYY-MM-DD HH:MM:SS UTC` for a Unix timestamp in milliseconds, or `None`
/// when it is outside chrono's range.
pub fn format_utc(ms: u64) -> Option<String> {
    let ms = i64::try_from(ms).ok()?;
    DateTime::from_timestamp_millis(ms).map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}
