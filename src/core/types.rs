use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Plot margins in pixels around the bar area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for ChartMargins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 0.0,
            bottom: 40.0,
            left: 30.0,
        }
    }
}

impl ChartMargins {
    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Pixel budget derived from the measured width of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub unit: f64,
    pub width: f64,
    pub height: f64,
    pub line_width: f64,
    pub margins: ChartMargins,
}

impl ChartLayout {
    /// Builds the layout for a surface `measured_width` pixels wide.
    ///
    /// One unit is a hundredth of the width. Height follows `aspect_ratio`
    /// (height / width) and marker lines are a quarter unit thick, at least 1px.
    pub fn from_measured_width(
        measured_width: u32,
        margins: ChartMargins,
        aspect_ratio: f64,
    ) -> ChartResult<Self> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "chart aspect ratio must be finite and > 0".to_owned(),
            ));
        }
        let margins = margins.validate()?;

        let unit = f64::from(measured_width) / 100.0;
        let width = 100.0 * unit;
        let height = width * aspect_ratio;
        if width <= margins.left + margins.right || height <= margins.top + margins.bottom {
            return Err(ChartError::InvalidViewport {
                width: measured_width,
                height: height.round() as u32,
            });
        }

        Ok(Self {
            unit,
            width,
            height,
            line_width: (unit / 4.0).floor().max(1.0),
            margins,
        })
    }

    /// Horizontal pixel range available to slot bands.
    #[must_use]
    pub fn x_range(self) -> (f64, f64) {
        (self.margins.left, self.width - self.margins.right)
    }

    /// Vertical pixel range for prices, bottom first.
    #[must_use]
    pub fn y_range(self) -> (f64, f64) {
        (self.height - self.margins.bottom, self.margins.top)
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.width.round() as u32, self.height.round() as u32)
    }
}
