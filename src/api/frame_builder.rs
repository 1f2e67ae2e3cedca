use crate::core::{ChartGeometry, ChartLayout, ChartScales, TimeSlot};
use crate::error::ChartResult;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame};

use super::ChartConfig;

/// Materializes geometry into pixel-space draw commands.
///
/// Bars come first in draw order, then the lower and upper extent lines,
/// then one line per known input price.
pub fn build_render_frame(
    geometry: &ChartGeometry,
    scales: ChartScales,
    layout: ChartLayout,
    config: ChartConfig,
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(layout.viewport());
    let bandwidth = scales.bandwidth();

    for group in &geometry.patterns {
        let width = (bandwidth - 2.0 * group.x_pad).max(0.0);
        for range in &group.ranges {
            let x = group.x_pad + scales.slot_x(range.slot)?;
            let top = scales.price_y(range.max())?;
            let bottom = scales.price_y(range.min())?;
            frame.rects.push(
                RectPrimitive::new(x, top, width, bottom - top, group.color)
                    .with_border(config.bar_border_width, config.bar_border_color),
            );
        }
    }

    let band_line = |slot: TimeSlot, value: f64| -> ChartResult<LinePrimitive> {
        let x = scales.slot_x(slot)?;
        let y = scales.price_y(value)?;
        Ok(LinePrimitive::new(
            x,
            y,
            x + bandwidth,
            y,
            layout.line_width,
            config.marker_color,
        ))
    };

    for extent in &geometry.extents {
        frame.lines.push(band_line(extent.slot, extent.min)?);
    }
    for extent in &geometry.extents {
        frame.lines.push(band_line(extent.slot, extent.max)?);
    }
    for marker in &geometry.inputs {
        frame.lines.push(band_line(marker.slot, marker.value)?);
    }

    Ok(frame)
}
