use forecast_chart::core::{BandScale, PowScale};
use proptest::prelude::*;

proptest! {
    #[test]
    fn price_scale_is_monotonically_non_increasing(
        low in -50.0f64..500.0,
        span in 1.0f64..1_000.0,
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0
    ) {
        let high = low + span;
        let scale = PowScale::new((low, high), (360.0, 10.0), 0.5, true).expect("scale");

        prop_assert!(scale.value_to_pixel(low).expect("low") > scale.value_to_pixel(high).expect("high"));

        let (lo_factor, hi_factor) = if a <= b { (a, b) } else { (b, a) };
        let y_lo = scale.value_to_pixel(low + lo_factor * span).expect("y lo");
        let y_hi = scale.value_to_pixel(low + hi_factor * span).expect("y hi");
        prop_assert!(y_lo >= y_hi);
        prop_assert_eq!(y_lo, y_lo.round());
    }

    #[test]
    fn rounded_bands_never_overlap(
        width in 200u32..4_000,
        count in 1usize..20
    ) {
        let scale = BandScale::new(count, 30.0, f64::from(width), 0.1, true).expect("bands");
        for index in 1..count {
            let previous_end = scale.position(index - 1).expect("previous") + scale.bandwidth();
            prop_assert!(previous_end <= scale.position(index).expect("current"));
        }
        let last_end = scale.position(count - 1).expect("last") + scale.bandwidth();
        prop_assert!(last_end <= f64::from(width) + 0.5);
    }
}
