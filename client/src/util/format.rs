//! Display formatting for article rows.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::{OffsetDateTime, UtcOffset};

/// Format `ts` as `YYYY-MM-DD` in the given offset.
#[must_use]
pub fn format_ymd(ts: OffsetDateTime, offset: UtcOffset) -> String {
    let date = ts.to_offset(offset).date();
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Browser-local UTC offset at `ts`. UTC outside the browser.
#[must_use]
pub fn local_offset_at(ts: OffsetDateTime) -> UtcOffset {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_precision_loss)]
        let millis = (ts.unix_timestamp_nanos() / 1_000_000) as f64;
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(millis));
        // getTimezoneOffset is minutes *behind* UTC.
        #[allow(clippy::cast_possible_truncation)]
        let seconds = (-date.get_timezone_offset() * 60.0) as i32;
        UtcOffset::from_whole_seconds(seconds).unwrap_or(UtcOffset::UTC)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ts;
        UtcOffset::UTC
    }
}

/// Row date label in the viewer's local time.
#[must_use]
pub fn display_date(ts: OffsetDateTime) -> String {
    format_ymd(ts, local_offset_at(ts))
}

/// Inline image source for a base64 PNG thumbnail; empty when absent.
#[must_use]
pub fn thumb_src(thumb: Option<&str>) -> String {
    match thumb {
        Some(data) if !data.is_empty() => format!("data:image/png;base64,{data}"),
        _ => String::new(),
    }
}
