use serde::{Deserialize, Serialize};

use crate::core::primitives::round_half_up;
use crate::error::{ChartError, ChartResult};

/// Power-law scale from a price domain to pixel coordinates.
///
/// Values are raised to `exponent` (sign preserved) before linear
/// interpolation, so an exponent below one stretches the low end of the
/// domain. Output is optionally rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    exponent: f64,
    round: bool,
}

impl PowScale {
    pub fn new(
        domain: (f64, f64),
        range: (f64, f64),
        exponent: f64,
        round: bool,
    ) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidDomain(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(ChartError::InvalidData(
                "scale exponent must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
            exponent,
            round,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn exponent(self) -> f64 {
        self.exponent
    }

    fn transform(self, value: f64) -> f64 {
        value.signum() * value.abs().powf(self.exponent)
    }

    fn untransform(self, value: f64) -> f64 {
        value.signum() * value.abs().powf(self.exponent.recip())
    }

    pub fn value_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let t0 = self.transform(self.domain_start);
        let t1 = self.transform(self.domain_end);
        let normalized = (self.transform(value) - t0) / (t1 - t0);
        let pixel = self.range_start + normalized * (self.range_end - self.range_start);
        Ok(if self.round {
            round_half_up(pixel)
        } else {
            pixel
        })
    }

    pub fn pixel_to_value(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        if self.range_start == self.range_end {
            return Err(ChartError::InvalidData(
                "cannot invert a zero-height range".to_owned(),
            ));
        }

        let t0 = self.transform(self.domain_start);
        let t1 = self.transform(self.domain_end);
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        Ok(self.untransform(t0 + normalized * (t1 - t0)))
    }
}

#[cfg(test)]
mod tests {
    use super::PowScale;

    #[test]
    fn square_root_scale_maps_quarter_to_midpoint() {
        let scale = PowScale::new((0.0, 100.0), (360.0, 10.0), 0.5, true).expect("scale");
        assert_eq!(scale.value_to_pixel(0.0).expect("bottom"), 360.0);
        assert_eq!(scale.value_to_pixel(100.0).expect("top"), 10.0);
        assert_eq!(scale.value_to_pixel(25.0).expect("mid"), 185.0);
    }

    #[test]
    fn rounding_produces_whole_pixels() {
        let scale = PowScale::new((95.0, 600.0), (360.0, 10.0), 0.5, true).expect("scale");
        let px = scale.value_to_pixel(123.4).expect("pixel");
        assert_eq!(px, px.round());
    }

    #[test]
    fn degenerate_domain_is_invalid() {
        let err = PowScale::new((10.0, 10.0), (360.0, 10.0), 0.5, true).expect_err("flat");
        assert!(format!("{err}").contains("invalid price domain"));
    }

    #[test]
    fn unrounded_inverse_recovers_value() {
        let scale = PowScale::new((95.0, 600.0), (360.0, 10.0), 0.5, false).expect("scale");
        let px = scale.value_to_pixel(321.0).expect("pixel");
        let back = scale.pixel_to_value(px).expect("value");
        assert!((back - 321.0).abs() <= 1e-9);
    }
}
