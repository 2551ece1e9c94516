//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{Bearing, KNOTS_PER_MS, LocationId, WaveBand, WindBand, knots};
use proptest::prelude::*;

// ============================================================================
// Bearing Property Tests
// ============================================================================

mod bearing_tests {
    use super::*;

    proptest! {
        #[test]
        fn bearing_is_always_in_range(deg in -1.0e6f64..1.0e6f64) {
            let b = Bearing::new(deg);
            prop_assert!(b.degrees() >= 0.0);
            prop_assert!(b.degrees() < 360.0);
        }

        #[test]
        fn bearing_is_congruent_to_input(deg in -1.0e5f64..1.0e5f64) {
            let b = Bearing::new(deg);
            let diff = (b.degrees() - deg) / 360.0;
            prop_assert!((diff - diff.round()).abs() < 1e-9);
        }

        #[test]
        fn offset_is_congruent_to_sum(deg in -720.0f64..720.0f64, offset in -720.0f64..720.0f64) {
            let b = Bearing::new(deg).with_offset(offset);
            let diff = (b.degrees() - (deg + offset)) / 360.0;
            prop_assert!((diff - diff.round()).abs() < 1e-9);
        }

        #[test]
        fn compass_sector_is_valid(deg in -1000.0f64..1000.0f64) {
            prop_assert!(Bearing::new(deg).sector() < 16);
        }
    }
}

// ============================================================================
// Speed Property Tests
// ============================================================================

mod speed_tests {
    use super::*;

    proptest! {
        #[test]
        fn knots_is_linear(ms in 0.0f64..100.0f64) {
            prop_assert!((knots(ms) - ms * KNOTS_PER_MS).abs() < 1e-9);
        }

        #[test]
        fn wind_band_is_monotonic(a in 0.0f64..50.0f64, b in 0.0f64..50.0f64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(WindBand::from_knots(lo) <= WindBand::from_knots(hi));
        }

        #[test]
        fn wave_band_is_monotonic(a in 0.0f64..10.0f64, b in 0.0f64..10.0f64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(WaveBand::from_height(Some(lo)) <= WaveBand::from_height(Some(hi)));
        }
    }
}

// ============================================================================
// LocationId Property Tests
// ============================================================================

mod location_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn location_id_display_parses_back(id in any::<u64>()) {
            let loc = LocationId::new(id);
            let parsed: LocationId = loc.to_string().parse().unwrap();
            prop_assert_eq!(parsed, loc);
        }
    }
}
