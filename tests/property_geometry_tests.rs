use forecast_chart::core::{
    ForecastRequest, InputSeries, PatternKind, Possibility, PriceRange, SlotPrices, TimeSlot,
    build_geometry, confidence_factor,
};
use proptest::prelude::*;

const SLOT: usize = 3;

fn possibility_with(range: (f64, f64)) -> Possibility {
    let mut ranges = vec![PriceRange::exact(100.0).expect("flat"); 13];
    ranges[SLOT] = PriceRange::new(range.0, range.1).expect("range");
    Possibility::new(
        PatternKind::Fluctuating,
        "fluctuating",
        0.5,
        SlotPrices::from_slots(&ranges).expect("prices"),
    )
    .expect("possibility")
}

fn merged_spans(ranges: &[(f64, f64)]) -> Vec<(usize, f64, f64)> {
    let flat = vec![PriceRange::exact(100.0).expect("flat"); 13];
    let request = ForecastRequest::new(
        InputSeries::default().with_baseline(100.0),
        SlotPrices::from_slots(&flat).expect("baseline"),
        ranges.iter().copied().map(possibility_with).collect(),
    );
    let geometry = build_geometry(&request, 52.0, 5).expect("geometry");
    geometry
        .patterns
        .first()
        .map(|group| {
            group
                .ranges
                .iter()
                .map(|r| (r.slot.index(), r.min(), r.max()))
                .collect()
        })
        .unwrap_or_default()
}

/// Reference union: sort by start and sweep.
fn reference_union(ranges: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut spans: Vec<(f64, f64)> = ranges.iter().copied().filter(|(lo, hi)| lo < hi).collect();
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut out: Vec<(f64, f64)> = Vec::new();
    for (lo, hi) in spans {
        match out.last_mut() {
            Some(last) if last.1 >= lo => last.1 = last.1.max(hi),
            _ => out.push((lo, hi)),
        }
    }
    out
}

fn span_strategy() -> impl Strategy<Value = (f64, f64)> {
    (0u32..60, 0u32..15).prop_map(|(lo, len)| (f64::from(lo), f64::from(lo + len)))
}

proptest! {
    #[test]
    fn merged_ranges_equal_the_interval_union(
        spans in prop::collection::vec(span_strategy(), 1..12)
    ) {
        let merged: Vec<(f64, f64)> = merged_spans(&spans)
            .into_iter()
            .map(|(slot, lo, hi)| {
                assert_eq!(slot, SLOT);
                (lo, hi)
            })
            .collect();
        prop_assert_eq!(merged, reference_union(&spans));
    }

    #[test]
    fn merge_ignores_processing_order(
        spans in prop::collection::vec(span_strategy(), 1..12),
        rotation in 0usize..12
    ) {
        let mut permuted = spans.clone();
        permuted.reverse();
        let len = permuted.len();
        permuted.rotate_left(rotation % len);
        prop_assert_eq!(merged_spans(&spans), merged_spans(&permuted));
    }

    #[test]
    fn confidence_is_always_a_fifth_step(
        max in 0.001f64..=1.0,
        ratio in 0.0f64..=1.0
    ) {
        let factor = confidence_factor(max * ratio, max, 5);
        let tier = factor * 5.0;
        prop_assert!((tier - tier.round()).abs() <= 1e-9);
        prop_assert!((0.2 - 1e-12..=1.0).contains(&factor));
        prop_assert_eq!(confidence_factor(max, max, 5), 1.0);
    }

    #[test]
    fn input_markers_match_known_slots(
        known in prop::collection::vec(prop::option::of(1.0f64..700.0), 13)
    ) {
        let input = InputSeries::from_slots(&known).expect("input");
        let flat = vec![PriceRange::exact(100.0).expect("flat"); 13];
        let request = ForecastRequest::new(
            input,
            SlotPrices::from_slots(&flat).expect("baseline"),
            Vec::new(),
        );
        let geometry = build_geometry(&request, 52.0, 5).expect("geometry");
        let expected: Vec<usize> = known
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|_| i))
            .collect();
        let actual: Vec<usize> = geometry.inputs.iter().map(|m| m.slot.index()).collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(geometry.inputs.iter().all(|m| TimeSlot::new(m.slot.index()).is_ok()));
    }
}
