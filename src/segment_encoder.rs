use crate::error::Result;
use crate::segments::Segment;

/// A streaming encoder for transcript segments.
///
/// Encoders write one segment at a time so callers can stream output while
/// upstream stages are still producing. `close` finalizes the output and is
/// idempotent; writing after `close` is an error.
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

/// Format seconds as `HH:MM:SS<sep>mmm`.
///
/// `decimal_separator` is `,` for SRT and `.` for WebVTT/TSV.
///
/// Rounding policy:
/// - We round to the nearest millisecond to reduce drift when converting from `f32`.
pub(crate) fn format_timestamp(seconds: f32, decimal_separator: char) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02}{decimal_separator}{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_timestamp_rounds_to_nearest_millisecond() {
        assert_eq!(format_timestamp(0.0004, '.'), "00:00:00.000");
        assert_eq!(format_timestamp(0.0005, '.'), "00:00:00.001");
        assert_eq!(format_timestamp(1.9995, '.'), "00:00:02.000");
    }

    #[test]
    fn format_timestamp_carries_into_hours() {
        assert_eq!(format_timestamp(3661.5, ','), "01:01:01,500");
    }
}
