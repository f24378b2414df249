//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Get the number of milliseconds since the unix epoch truncated to 32 bits.
///
/// Used for the wrapping millisecond timestamps of the FCU link.
pub fn millis_u32(stamp: &chrono::DateTime<chrono::Utc>) -> u32 {
    stamp.timestamp_millis() as u32
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_duration_to_seconds() {
        assert_eq!(
            duration_to_seconds(chrono::Duration::milliseconds(1500)),
            Some(1.5)
        );
    }

    #[test]
    fn test_millis_u32() {
        assert_eq!(millis_u32(&Utc.timestamp(12, 345_000_000)), 12_345);

        // 2^32 ms after the epoch wraps back to zero
        let wrapped = Utc.timestamp_millis(1 << 32);
        assert_eq!(millis_u32(&wrapped), 0);
    }
}
