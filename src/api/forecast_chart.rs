use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{
    ChartGeometry, ChartLayout, ChartScales, ForecastRequest, LegendEntry, SlotLabelText,
    SlotLabels, build_geometry,
};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::{ChartConfig, PercentFormatter, ProbabilityFormatter, build_render_frame};

/// Legend entry paired with its display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    #[serde(flatten)]
    pub entry: LegendEntry,
    pub probability_text: String,
}

/// Everything produced by one chart update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartUpdate {
    pub layout: ChartLayout,
    pub slot_labels: SlotLabels,
    pub scales: ChartScales,
    pub geometry: ChartGeometry,
    pub legend: Vec<LegendItem>,
    pub frame: RenderFrame,
}

/// Pure chart computation: scales, then geometry, then the draw frame.
pub fn build_chart_update(
    request: &ForecastRequest,
    layout: ChartLayout,
    slot_labels: &SlotLabels,
    config: ChartConfig,
    formatter: &dyn ProbabilityFormatter,
) -> ChartResult<ChartUpdate> {
    let config = config.validate()?;
    let scales = ChartScales::build(
        layout,
        &request.input,
        &request.baseline,
        config.scale_tuning(),
    )?;
    let geometry = build_geometry(request, scales.bandwidth(), config.confidence_steps)?;
    let frame = build_render_frame(&geometry, scales, layout, config)?;
    let legend = geometry
        .legend
        .iter()
        .map(|entry| LegendItem {
            entry: entry.clone(),
            probability_text: formatter.format(entry.probability),
        })
        .collect();

    Ok(ChartUpdate {
        layout,
        slot_labels: slot_labels.clone(),
        scales,
        geometry,
        legend,
        frame,
    })
}

/// Stateful front end that renders each successful update.
///
/// A failed update leaves the previous chart and renderer state untouched.
pub struct ForecastChart<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    layout: ChartLayout,
    slot_labels: SlotLabels,
    formatter: Box<dyn ProbabilityFormatter>,
    last_update: Option<ChartUpdate>,
}

impl<R: Renderer> ForecastChart<R> {
    pub fn new(renderer: R, config: ChartConfig, measured_width: u32) -> ChartResult<Self> {
        let config = config.validate()?;
        let layout = config.layout_for_width(measured_width)?;
        Ok(Self {
            renderer,
            config,
            layout,
            slot_labels: SlotLabels::default(),
            formatter: Box::new(PercentFormatter),
            last_update: None,
        })
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl ProbabilityFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn set_slot_labels(&mut self, text: &SlotLabelText) -> ChartResult<()> {
        self.slot_labels = SlotLabels::from_text(text)?;
        Ok(())
    }

    /// Recomputes the layout for a resized surface.
    ///
    /// Takes effect on the next update.
    pub fn set_measured_width(&mut self, measured_width: u32) -> ChartResult<()> {
        self.layout = self.config.layout_for_width(measured_width)?;
        debug!(measured_width, height = self.layout.height, "chart layout updated");
        Ok(())
    }

    /// Rebuilds and redraws the chart from fresh data.
    pub fn update_chart(&mut self, request: &ForecastRequest) -> ChartResult<&ChartUpdate> {
        let update = match build_chart_update(
            request,
            self.layout,
            &self.slot_labels,
            self.config,
            &*self.formatter,
        ) {
            Ok(update) => update,
            Err(err) => {
                warn!(error = %err, "chart update rejected; keeping previous chart");
                return Err(err);
            }
        };

        self.renderer.render(&update.frame)?;
        debug!(
            rects = update.frame.rects.len(),
            lines = update.frame.lines.len(),
            legend = update.legend.len(),
            "chart updated"
        );
        Ok(&*self.last_update.insert(update))
    }

    #[must_use]
    pub fn last_update(&self) -> Option<&ChartUpdate> {
        self.last_update.as_ref()
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn config(&self) -> ChartConfig {
        self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
