//! Time display helpers

/// Format a millisecond count as `minutes:seconds`.
///
/// Minutes are unpadded, seconds are zero-padded to two digits, and
/// sub-second remainders are truncated rather than rounded. Minutes keep
/// growing past one hour rather than rolling over.
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minute_second_pairs() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(5000), "0:05");
        assert_eq!(format_time(59000), "0:59");
        assert_eq!(format_time(60000), "1:00");
        assert_eq!(format_time(65000), "1:05");
    }

    #[test]
    fn minutes_grow_past_an_hour() {
        assert_eq!(format_time(3_661_000), "61:01");
    }

    #[test]
    fn truncates_sub_second_remainders() {
        assert_eq!(format_time(999), "0:00");
        assert_eq!(format_time(64_999), "1:04");
    }
}
