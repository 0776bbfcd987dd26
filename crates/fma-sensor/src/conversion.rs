//! Transfer functions from the datasheet, count to physical unit.

use crate::config::{Scale, TransferSpan};

/// 14 bit output, 100% of the transfer function
pub const FORCE_MAX_COUNT: f64 = 16384.0;
pub const FORCE_90_COUNT: f64 = 14745.6;
pub const FORCE_80_COUNT: f64 = 13107.2;
pub const FORCE_20_COUNT: f64 = 3276.8;
pub const FORCE_10_COUNT: f64 = 1638.4;

const TEMP_MAX_COUNT: f64 = 2047.0;
const TEMP_SPAN_CELSIUS: f64 = 200.0;
const TEMP_MIN_CELSIUS: f64 = -50.0;

/// Force in Newton before any zero offset is removed.
pub fn force_newtons(counts: u16, span: TransferSpan, scale: Scale) -> f64 {
    let lower = span.lower_count();
    let upper = span.upper_count();
    (f64::from(counts) - lower) / (upper - lower) * scale.newtons()
}

pub fn temperature_celsius(counts: u16) -> f64 {
    f64::from(counts) / TEMP_MAX_COUNT * TEMP_SPAN_CELSIUS + TEMP_MIN_CELSIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn bands_are_percentages_of_full_scale() {
        assert!((FORCE_10_COUNT - FORCE_MAX_COUNT * 0.1).abs() < 1e-6);
        assert!((FORCE_20_COUNT - FORCE_MAX_COUNT * 0.2).abs() < 1e-6);
        assert!((FORCE_80_COUNT - FORCE_MAX_COUNT * 0.8).abs() < 1e-6);
        assert!((FORCE_90_COUNT - FORCE_MAX_COUNT * 0.9).abs() < 1e-6);
    }

    #[test]
    fn band_edges_map_to_zero_and_full_scale() {
        for span in [TransferSpan::TenToNinety, TransferSpan::TwentyToEighty] {
            let lower = span.lower_count().ceil() as u16;
            assert!(force_newtons(lower, span, Scale::N25).abs() < 0.01);
        }

        // 13107 is 0.2 counts below the 80% point
        let full = force_newtons(13107, TransferSpan::TwentyToEighty, Scale::N5);
        assert!((full - 5.0).abs() < 0.001, "{full}");
    }

    #[test]
    fn twenty_to_eighty_is_linear() {
        for counts in [0u16, 289, 3277, 8192, 13107, 0x3FFF] {
            let expected = 15.0 * (f64::from(counts) - 3276.8) / 9830.4;
            let got = force_newtons(counts, TransferSpan::TwentyToEighty, Scale::N15);
            assert!((got - expected).abs() < TOLERANCE, "{counts}: {got} != {expected}");
        }
    }

    #[test]
    fn ten_to_ninety_is_linear() {
        let expected = 25.0 * (8192.0 - 1638.4) / (14745.6 - 1638.4);
        let got = force_newtons(8192, TransferSpan::TenToNinety, Scale::N25);
        assert!((got - expected).abs() < TOLERANCE);
    }

    #[test]
    fn temperature_range() {
        assert!((temperature_celsius(0) + 50.0).abs() < TOLERANCE);
        assert!((temperature_celsius(2047) - 150.0).abs() < TOLERANCE);
        let expected = 200.0 * 1235.0 / 2047.0 - 50.0;
        assert!((temperature_celsius(1235) - expected).abs() < TOLERANCE);
    }
}
