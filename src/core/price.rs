use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::core::slot::{PREDICTED_SLOT_COUNT, SLOT_COUNT, TimeSlot};
use crate::error::{ChartError, ChartResult};

/// Predicted price interval for one slot.
///
/// Invariants:
/// - both bounds are finite
/// - `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ChartError::MalformedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn from_decimal(min: Decimal, max: Decimal) -> ChartResult<Self> {
        Self::new(decimal_to_f64(min, "min")?, decimal_to_f64(max, "max")?)
    }

    /// Single-valued range, used for known prices.
    pub fn exact(price: f64) -> ChartResult<Self> {
        Self::new(price, price)
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    /// `true` when the range carries no spread and must not be drawn as a bar.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }

    /// Inclusive overlap test; touching ranges overlap.
    #[must_use]
    pub fn overlaps(self, other: PriceRange) -> bool {
        self.min <= other.max && self.max >= other.min
    }

    #[must_use]
    pub fn union(self, other: PriceRange) -> PriceRange {
        PriceRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Per-slot price ranges of one trajectory, with the baseline slot kept apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotPrices {
    pub baseline: PriceRange,
    pub predicted: [PriceRange; PREDICTED_SLOT_COUNT],
}

impl SlotPrices {
    /// Builds from 13 ranges in slot order.
    pub fn from_slots(ranges: &[PriceRange]) -> ChartResult<Self> {
        let Some((baseline, rest)) = ranges.split_first() else {
            return Err(ChartError::InvalidData(format!(
                "expected {SLOT_COUNT} price ranges, got 0"
            )));
        };
        let predicted: [PriceRange; PREDICTED_SLOT_COUNT] = rest.try_into().map_err(|_| {
            ChartError::InvalidData(format!(
                "expected {SLOT_COUNT} price ranges, got {}",
                ranges.len()
            ))
        })?;
        Ok(Self {
            baseline: *baseline,
            predicted,
        })
    }

    #[must_use]
    pub fn get(&self, slot: TimeSlot) -> PriceRange {
        if slot.is_baseline() {
            self.baseline
        } else {
            self.predicted[slot.index() - 1]
        }
    }

    /// Ranges of the predicted slots paired with their slot.
    pub fn iter_predicted(&self) -> impl Iterator<Item = (TimeSlot, PriceRange)> + '_ {
        TimeSlot::predicted().zip(self.predicted.iter().copied())
    }

    /// Every bound of every slot, baseline included.
    pub fn bounds(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.baseline)
            .chain(self.predicted.iter().copied())
            .flat_map(|range| [range.min, range.max])
    }
}

/// Observed prices on the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSeries {
    pub baseline: Option<f64>,
    pub observed: [Option<f64>; PREDICTED_SLOT_COUNT],
}

impl InputSeries {
    /// Builds from 13 optional prices in slot order.
    pub fn from_slots(values: &[Option<f64>]) -> ChartResult<Self> {
        if values.len() != SLOT_COUNT {
            return Err(ChartError::InvalidData(format!(
                "expected {SLOT_COUNT} input prices, got {}",
                values.len()
            )));
        }
        let mut observed = [None; PREDICTED_SLOT_COUNT];
        observed.copy_from_slice(&values[1..]);
        Ok(Self {
            baseline: values[0],
            observed,
        })
    }

    #[must_use]
    pub fn with_baseline(mut self, price: f64) -> Self {
        self.baseline = Some(price);
        self
    }

    #[must_use]
    pub fn with_observed(mut self, slot: TimeSlot, price: f64) -> Self {
        if slot.is_baseline() {
            self.baseline = Some(price);
        } else {
            self.observed[slot.index() - 1] = Some(price);
        }
        self
    }

    #[must_use]
    pub fn get(&self, slot: TimeSlot) -> Option<f64> {
        if slot.is_baseline() {
            self.baseline
        } else {
            self.observed[slot.index() - 1]
        }
    }

    /// Slots holding a value, in grid order.
    pub fn iter_known(&self) -> impl Iterator<Item = (TimeSlot, f64)> + '_ {
        TimeSlot::all().filter_map(|slot| self.get(slot).map(|value| (slot, value)))
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (slot, value) in self.iter_known() {
            if !value.is_finite() {
                return Err(ChartError::InvalidDomain(format!(
                    "input price at slot {} must be finite",
                    slot.index()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{InputSeries, PriceRange, SlotPrices};
    use crate::core::slot::TimeSlot;

    #[test]
    fn decimal_range_converts_to_float_bounds() {
        let range = PriceRange::from_decimal(Decimal::new(905, 1), Decimal::from(130))
            .expect("decimal range");
        assert_eq!(range.min(), 90.5);
        assert_eq!(range.max(), 130.0);
    }

    #[test]
    fn inverted_decimal_range_is_malformed() {
        let err = PriceRange::from_decimal(Decimal::from(130), Decimal::new(905, 1))
            .expect_err("min > max");
        assert!(format!("{err}").contains("malformed price range"));
    }

    #[test]
    fn inverted_range_is_malformed() {
        let err = PriceRange::new(110.0, 90.0).expect_err("min > max");
        assert!(format!("{err}").contains("malformed price range"));
        assert!(PriceRange::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn touching_ranges_overlap() {
        let a = PriceRange::new(90.0, 100.0).expect("a");
        let b = PriceRange::new(100.0, 130.0).expect("b");
        let c = PriceRange::new(131.0, 140.0).expect("c");
        assert!(a.overlaps(b));
        assert!(!a.overlaps(c));
        assert_eq!(a.union(b), PriceRange::new(90.0, 130.0).expect("union"));
    }

    #[test]
    fn slot_prices_require_thirteen_ranges() {
        let range = PriceRange::exact(100.0).expect("range");
        assert!(SlotPrices::from_slots(&[range; 12]).is_err());
        let prices = SlotPrices::from_slots(&[range; 13]).expect("prices");
        assert_eq!(prices.iter_predicted().count(), 12);
        assert_eq!(prices.bounds().count(), 26);
    }

    #[test]
    fn input_series_keeps_baseline_apart() {
        let mut values = vec![None; 13];
        values[0] = Some(100.0);
        values[5] = Some(87.0);
        let input = InputSeries::from_slots(&values).expect("input");
        assert_eq!(input.baseline, Some(100.0));
        assert_eq!(input.get(TimeSlot::new(5).expect("slot")), Some(87.0));
        assert_eq!(input.iter_known().count(), 2);
    }

    #[test]
    fn non_finite_input_is_an_invalid_domain() {
        let input = InputSeries::default().with_baseline(f64::INFINITY);
        let err = input.validate().expect_err("infinite price");
        assert!(format!("{err}").contains("invalid price domain"));
    }
}
