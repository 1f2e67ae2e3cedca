use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, ChartMargins, ScaleTuning};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Public chart configuration.
///
/// Serializable so hosts can persist chart setup; every field falls back to
/// its default when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub margins: ChartMargins,
    /// Height divided by width.
    pub aspect_ratio: f64,
    pub band_padding: f64,
    pub price_exponent: f64,
    pub domain_floor_offset: f64,
    pub confidence_steps: u32,
    pub bar_border_width: f64,
    pub bar_border_color: Color,
    pub marker_color: Color,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let tuning = ScaleTuning::default();
        Self {
            margins: ChartMargins::default(),
            aspect_ratio: 0.5,
            band_padding: tuning.band_padding,
            price_exponent: tuning.price_exponent,
            domain_floor_offset: tuning.domain_floor_offset,
            confidence_steps: 5,
            bar_border_width: 2.0,
            bar_border_color: Color::from_rgba8(0x00, 0x00, 0x00, 0x44),
            marker_color: Color::rgb(0.0, 0.0, 0.0),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_margins(mut self, margins: ChartMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_confidence_steps(mut self, steps: u32) -> Self {
        self.confidence_steps = steps;
        self
    }

    #[must_use]
    pub fn scale_tuning(self) -> ScaleTuning {
        ScaleTuning {
            band_padding: self.band_padding,
            price_exponent: self.price_exponent,
            domain_floor_offset: self.domain_floor_offset,
        }
    }

    pub fn layout_for_width(self, measured_width: u32) -> ChartResult<ChartLayout> {
        ChartLayout::from_measured_width(measured_width, self.margins, self.aspect_ratio)
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.margins.validate()?;
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "chart aspect ratio must be finite and > 0".to_owned(),
            ));
        }
        if !self.band_padding.is_finite() || !(0.0..1.0).contains(&self.band_padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        if !self.price_exponent.is_finite() || self.price_exponent <= 0.0 {
            return Err(ChartError::InvalidData(
                "price exponent must be finite and > 0".to_owned(),
            ));
        }
        if !self.domain_floor_offset.is_finite() || self.domain_floor_offset < 0.0 {
            return Err(ChartError::InvalidData(
                "domain floor offset must be finite and >= 0".to_owned(),
            ));
        }
        if self.confidence_steps == 0 {
            return Err(ChartError::InvalidData(
                "confidence steps must be > 0".to_owned(),
            ));
        }
        if !self.bar_border_width.is_finite() || self.bar_border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "bar border width must be finite and >= 0".to_owned(),
            ));
        }
        self.bar_border_color.validate()?;
        self.marker_color.validate()?;
        Ok(self)
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()
    }
}
