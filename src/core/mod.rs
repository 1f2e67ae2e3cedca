pub mod band_scale;
pub mod geometry;
pub mod pattern;
pub mod possibility;
pub mod pow_scale;
pub mod price;
pub mod primitives;
pub mod scale_builder;
pub mod slot;
pub mod types;

pub use band_scale::BandScale;
pub use geometry::{
    ChartGeometry, DayExtent, InputMarker, LegendEntry, MergedRange, PatternGroup,
    build_geometry, confidence_factor, merge_range,
};
pub use pattern::PatternKind;
pub use possibility::{ForecastPayload, ForecastRequest, Possibility, RawPossibility, RawPriceRange};
pub use pow_scale::PowScale;
pub use price::{InputSeries, PriceRange, SlotPrices};
pub use scale_builder::{ChartScales, ScaleTuning, value_extent};
pub use slot::{
    DayPeriod, PREDICTED_SLOT_COUNT, SLOT_COUNT, SlotLabelText, SlotLabels, TimeSlot, Weekday,
};
pub use types::{ChartLayout, ChartMargins, Viewport};
