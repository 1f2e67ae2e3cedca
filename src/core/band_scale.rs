use serde::{Deserialize, Serialize};

use crate::core::primitives::round_half_up;
use crate::error::{ChartError, ChartResult};

/// Categorical scale that splits a pixel range into equal bands.
///
/// Padding applies both between bands and at the outer edges, with the
/// leftover space centered. With `round` the step is floored and the start
/// and band width are rounded so every band edge lands on a whole pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    count: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(
        count: usize,
        range_start: f64,
        range_end: f64,
        padding: f64,
        round: bool,
    ) -> ChartResult<Self> {
        if count == 0 {
            return Err(ChartError::InvalidData(
                "band scale needs at least one category".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }

        let (mut start, stop) = if range_end < range_start {
            (range_end, range_start)
        } else {
            (range_start, range_end)
        };
        let n = count as f64;
        let mut step = (stop - start) / (n - padding + padding * 2.0).max(1.0);
        if round {
            step = step.floor();
        }
        start += (stop - start - step * (n - padding)) * 0.5;
        let mut bandwidth = step * (1.0 - padding);
        if round {
            start = round_half_up(start);
            bandwidth = round_half_up(bandwidth);
        }

        Ok(Self {
            count,
            start,
            step,
            bandwidth,
        })
    }

    /// Left edge of band `index`.
    pub fn position(self, index: usize) -> ChartResult<f64> {
        if index >= self.count {
            return Err(ChartError::InvalidData(format!(
                "band index {index} is outside 0..{}",
                self.count
            )));
        }
        Ok(self.start + self.step * index as f64)
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::BandScale;

    #[test]
    fn rounded_bands_land_on_whole_pixels() {
        let scale = BandScale::new(13, 30.0, 800.0, 0.1, true).expect("band scale");
        assert_eq!(scale.step(), 58.0);
        assert_eq!(scale.bandwidth(), 52.0);
        assert_eq!(scale.position(0).expect("first"), 41.0);
        assert_eq!(scale.position(12).expect("last"), 41.0 + 58.0 * 12.0);
    }

    #[test]
    fn unrounded_bands_fill_the_range() {
        let scale = BandScale::new(4, 0.0, 100.0, 0.0, false).expect("band scale");
        assert_eq!(scale.step(), 25.0);
        assert_eq!(scale.bandwidth(), 25.0);
        assert_eq!(scale.position(3).expect("last"), 75.0);
    }

    #[test]
    fn index_past_domain_is_rejected() {
        let scale = BandScale::new(13, 30.0, 800.0, 0.1, true).expect("band scale");
        assert!(scale.position(13).is_err());
    }
}
