use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::pattern::PatternKind;
use crate::core::possibility::{ForecastRequest, validate_probability};
use crate::core::price::PriceRange;
use crate::core::slot::TimeSlot;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// The scaled ratio is snapped to this grid before rounding up to a tier,
/// so float noise such as `0.6 * 5.0 == 3.0000000000000004` stays on its tier.
const TIER_GRID: f64 = 1e12;

/// Union of overlapping predictions for one slot of one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergedRange {
    pub slot: TimeSlot,
    #[serde(flatten)]
    pub range: PriceRange,
}

impl MergedRange {
    #[must_use]
    pub fn min(self) -> f64 {
        self.range.min()
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.range.max()
    }
}

/// All bars of one pattern, ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternGroup {
    pub pattern: PatternKind,
    pub description: String,
    pub probability: f64,
    pub draw_rank: usize,
    pub color: Color,
    pub color_fg: Color,
    /// Quantized probability relative to the most likely pattern.
    pub confidence: f64,
    /// Horizontal inset applied on both sides of each bar.
    pub x_pad: f64,
    pub ranges: Vec<MergedRange>,
}

/// Min/max bracket of the baseline prediction for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayExtent {
    pub slot: TimeSlot,
    pub min: f64,
    pub max: f64,
}

/// Known price for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputMarker {
    pub slot: TimeSlot,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub pattern: PatternKind,
    pub description: String,
    pub probability: f64,
    pub color: Color,
    pub color_fg: Color,
}

/// Drawable data derived from one forecast request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    /// Pattern groups in back-to-front draw order.
    pub patterns: Vec<PatternGroup>,
    pub extents: Vec<DayExtent>,
    pub inputs: Vec<InputMarker>,
    /// Legend entries, most probable first.
    pub legend: Vec<LegendEntry>,
}

/// Quantizes `probability / max_probability` up to the next of `steps` tiers.
///
/// The result is always in `{1/steps, 2/steps, ..., 1}` and is exactly `1`
/// for the most probable pattern.
#[must_use]
pub fn confidence_factor(probability: f64, max_probability: f64, steps: u32) -> f64 {
    let steps = f64::from(steps.max(1));
    if probability >= max_probability {
        return 1.0;
    }
    let scaled = probability / max_probability * steps;
    let tier = ((scaled * TIER_GRID).round() / TIER_GRID)
        .ceil()
        .clamp(1.0, steps);
    tier / steps
}

/// Adds `range` at `slot`, merging it with every overlapping range already
/// recorded for that slot. Degenerate ranges are skipped.
pub fn merge_range(merged: &mut Vec<MergedRange>, slot: TimeSlot, range: PriceRange) {
    if range.is_degenerate() {
        return;
    }

    let mut union = range;
    merged.retain(|existing| {
        if existing.slot == slot && existing.range.overlaps(range) {
            union = union.union(existing.range);
            false
        } else {
            true
        }
    });
    trace!(slot = slot.index(), min = union.min(), max = union.max(), "merge range");
    merged.push(MergedRange { slot, range: union });
}

fn sort_ranges(ranges: &mut [MergedRange]) {
    ranges.sort_by(|a, b| {
        a.slot
            .cmp(&b.slot)
            .then_with(|| OrderedFloat(a.min()).cmp(&OrderedFloat(b.min())))
    });
}

struct GroupAccumulator {
    description: String,
    probability: f64,
    ranges: Vec<MergedRange>,
}

/// Groups possibilities by pattern and derives bars, extents, input markers
/// and legend entries.
///
/// `bandwidth` is the pixel width of one slot band; it drives each group's
/// inset. `confidence_steps` is the number of confidence tiers.
pub fn build_geometry(
    request: &ForecastRequest,
    bandwidth: f64,
    confidence_steps: u32,
) -> ChartResult<ChartGeometry> {
    if !bandwidth.is_finite() || bandwidth < 0.0 {
        return Err(ChartError::InvalidData(
            "band width must be finite and >= 0".to_owned(),
        ));
    }
    request.input.validate()?;

    let mut groups: IndexMap<PatternKind, GroupAccumulator> = IndexMap::new();
    for possibility in &request.possibilities {
        validate_probability(possibility.probability)?;
        let group = groups
            .entry(possibility.pattern)
            .or_insert_with(|| GroupAccumulator {
                description: possibility.description.clone(),
                probability: possibility.probability,
                ranges: Vec::new(),
            });
        if group.probability != possibility.probability {
            return Err(ChartError::InvalidData(format!(
                "pattern {} has inconsistent probabilities {} and {}",
                possibility.pattern.number(),
                group.probability,
                possibility.probability
            )));
        }
        for (slot, range) in possibility.prices.iter_predicted() {
            merge_range(&mut group.ranges, slot, range);
        }
    }

    let max_probability = groups
        .values()
        .map(|group| OrderedFloat(group.probability))
        .max()
        .map_or(0.0, OrderedFloat::into_inner);

    let mut patterns: Vec<PatternGroup> = groups
        .into_iter()
        .map(|(pattern, mut group)| {
            sort_ranges(&mut group.ranges);
            let confidence =
                confidence_factor(group.probability, max_probability, confidence_steps);
            PatternGroup {
                pattern,
                description: group.description,
                probability: group.probability,
                draw_rank: pattern.draw_rank(),
                color: pattern.fill_color(),
                color_fg: pattern.foreground_color(),
                confidence,
                x_pad: (1.0 - confidence) * bandwidth / 2.0,
                ranges: group.ranges,
            }
        })
        .collect();

    let mut legend: Vec<LegendEntry> = patterns
        .iter()
        .map(|group| LegendEntry {
            pattern: group.pattern,
            description: group.description.clone(),
            probability: group.probability,
            color: group.color,
            color_fg: group.color_fg,
        })
        .collect();
    legend.sort_by(|a, b| OrderedFloat(b.probability).cmp(&OrderedFloat(a.probability)));
    patterns.sort_by_key(|group| group.draw_rank);

    let extents: Vec<DayExtent> = request
        .baseline
        .iter_predicted()
        .filter(|(_, range)| !range.is_degenerate())
        .map(|(slot, range)| DayExtent {
            slot,
            min: range.min(),
            max: range.max(),
        })
        .collect();

    let inputs: Vec<InputMarker> = request
        .input
        .iter_known()
        .map(|(slot, value)| InputMarker { slot, value })
        .collect();

    debug!(
        patterns = patterns.len(),
        extents = extents.len(),
        inputs = inputs.len(),
        max_probability,
        "built chart geometry"
    );

    Ok(ChartGeometry {
        patterns,
        extents,
        inputs,
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::{MergedRange, confidence_factor, merge_range};
    use crate::core::price::PriceRange;
    use crate::core::slot::TimeSlot;

    fn slot(index: usize) -> TimeSlot {
        TimeSlot::new(index).expect("slot")
    }

    fn range(min: f64, max: f64) -> PriceRange {
        PriceRange::new(min, max).expect("range")
    }

    #[test]
    fn confidence_rounds_up_to_fifths() {
        assert_eq!(confidence_factor(1.0, 1.0, 5), 1.0);
        assert_eq!(confidence_factor(0.5, 1.0, 5), 3.0 / 5.0);
        assert_eq!(confidence_factor(0.3, 1.0, 5), 2.0 / 5.0);
        assert_eq!(confidence_factor(0.1, 1.0, 5), 1.0 / 5.0);
        assert_eq!(confidence_factor(0.6, 1.0, 5), 3.0 / 5.0);
    }

    #[test]
    fn ratio_just_above_a_boundary_takes_the_next_tier() {
        assert_eq!(confidence_factor(0.200_000_000_1, 1.0, 5), 2.0 / 5.0);
        assert_eq!(confidence_factor(0.2, 1.0, 5), 1.0 / 5.0);
    }

    #[test]
    fn zero_probability_keeps_the_narrowest_tier() {
        assert_eq!(confidence_factor(0.0, 0.8, 5), 1.0 / 5.0);
        assert_eq!(confidence_factor(0.0, 0.0, 5), 1.0);
    }

    #[test]
    fn degenerate_ranges_are_not_recorded() {
        let mut merged = Vec::new();
        merge_range(&mut merged, slot(2), range(100.0, 100.0));
        assert!(merged.is_empty());
    }

    #[test]
    fn bridging_range_collapses_neighbours() {
        let mut merged = Vec::new();
        merge_range(&mut merged, slot(4), range(1.0, 2.0));
        merge_range(&mut merged, slot(4), range(5.0, 6.0));
        merge_range(&mut merged, slot(4), range(2.0, 5.0));
        assert_eq!(
            merged,
            vec![MergedRange {
                slot: slot(4),
                range: range(1.0, 6.0)
            }]
        );
    }

    #[test]
    fn ranges_at_different_slots_stay_apart() {
        let mut merged = Vec::new();
        merge_range(&mut merged, slot(1), range(90.0, 110.0));
        merge_range(&mut merged, slot(2), range(90.0, 110.0));
        assert_eq!(merged.len(), 2);
    }
}
