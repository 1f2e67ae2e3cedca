use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::band_scale::BandScale;
use crate::core::pow_scale::PowScale;
use crate::core::price::{InputSeries, SlotPrices};
use crate::core::slot::{SLOT_COUNT, TimeSlot};
use crate::core::types::ChartLayout;
use crate::error::{ChartError, ChartResult};

/// Tuning knobs for [`ChartScales::build`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleTuning {
    pub band_padding: f64,
    pub price_exponent: f64,
    /// Subtracted from the lowest value to keep bars off the axis.
    pub domain_floor_offset: f64,
}

impl Default for ScaleTuning {
    fn default() -> Self {
        Self {
            band_padding: 0.1,
            price_exponent: 0.5,
            domain_floor_offset: 5.0,
        }
    }
}

/// Horizontal slot scale and vertical price scale for one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: BandScale,
    pub y: PowScale,
}

impl ChartScales {
    /// Derives both scales from the layout and every value on the chart.
    ///
    /// The vertical domain spans the input prices and the baseline bounds.
    pub fn build(
        layout: ChartLayout,
        input: &InputSeries,
        baseline: &SlotPrices,
        tuning: ScaleTuning,
    ) -> ChartResult<Self> {
        let (x_start, x_end) = layout.x_range();
        let x = BandScale::new(SLOT_COUNT, x_start, x_end, tuning.band_padding, true)?;

        let (min, max) = value_extent(
            input
                .iter_known()
                .map(|(_, value)| value)
                .chain(baseline.bounds()),
        )?;
        let y = PowScale::new(
            (min - tuning.domain_floor_offset, max),
            layout.y_range(),
            tuning.price_exponent,
            true,
        )?;

        Ok(Self { x, y })
    }

    /// Left edge of the band for `slot`.
    pub fn slot_x(self, slot: TimeSlot) -> ChartResult<f64> {
        self.x.position(slot.index())
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.x.bandwidth()
    }

    pub fn price_y(self, price: f64) -> ChartResult<f64> {
        self.y.value_to_pixel(price)
    }
}

/// Minimum and maximum of `values`; empty or non-finite input is rejected.
pub fn value_extent(values: impl IntoIterator<Item = f64>) -> ChartResult<(f64, f64)> {
    let mut extent: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for value in values {
        if !value.is_finite() {
            return Err(ChartError::InvalidDomain(format!(
                "chart values must be finite, got {value}"
            )));
        }
        let value = OrderedFloat(value);
        extent = Some(match extent {
            None => (value, value),
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
        });
    }
    extent
        .map(|(lo, hi)| (lo.into_inner(), hi.into_inner()))
        .ok_or_else(|| ChartError::InvalidDomain("no values to derive a domain from".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::value_extent;

    #[test]
    fn extent_of_empty_set_is_invalid() {
        let err = value_extent(std::iter::empty()).expect_err("empty");
        assert!(format!("{err}").contains("no values"));
    }

    #[test]
    fn extent_rejects_nan() {
        assert!(value_extent([1.0, f64::NAN]).is_err());
    }

    #[test]
    fn extent_tracks_min_and_max() {
        assert_eq!(value_extent([3.0, -1.0, 7.5]).expect("extent"), (-1.0, 7.5));
    }
}
