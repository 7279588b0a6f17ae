//! Playback rate table
//!
//! The player offers a fixed ordered set of rates and a single control
//! that advances through them, wrapping from the last back to the first.

/// The fixed ordered rate set, in cycling order
pub const PLAYBACK_RATES: [f32; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Rate applied before the user ever touches the control
pub const DEFAULT_RATE: f32 = 1.0;

/// Advance to the next rate in the table.
///
/// Wraps from the last entry back to the first. A rate that is not in the
/// table (which normal operation never produces) restarts the cycle at
/// the first entry.
pub fn next_rate(current: f32) -> f32 {
    match PLAYBACK_RATES.iter().position(|r| *r == current) {
        Some(i) => PLAYBACK_RATES[(i + 1) % PLAYBACK_RATES.len()],
        None => PLAYBACK_RATES[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_in_table_order() {
        assert_eq!(next_rate(0.5), 0.75);
        assert_eq!(next_rate(0.75), 1.0);
        assert_eq!(next_rate(1.0), 1.25);
        assert_eq!(next_rate(1.25), 1.5);
        assert_eq!(next_rate(1.5), 2.0);
    }

    #[test]
    fn wraps_from_last_to_first() {
        assert_eq!(next_rate(2.0), 0.5);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        for start in PLAYBACK_RATES {
            let mut rate = start;
            for _ in 0..PLAYBACK_RATES.len() {
                rate = next_rate(rate);
            }
            assert_eq!(rate, start);
        }
    }

    #[test]
    fn unknown_rate_restarts_the_cycle() {
        assert_eq!(next_rate(3.0), 0.5);
    }

    #[test]
    fn default_rate_is_in_the_table() {
        assert!(PLAYBACK_RATES.contains(&DEFAULT_RATE));
    }
}
