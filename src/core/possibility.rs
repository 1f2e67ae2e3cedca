use serde::{Deserialize, Serialize};

use crate::core::pattern::PatternKind;
use crate::core::price::{InputSeries, PriceRange, SlotPrices};
use crate::error::{ChartError, ChartResult};

/// One concrete predicted trajectory belonging to a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Possibility {
    pub pattern: PatternKind,
    pub description: String,
    /// Total probability of `pattern`, shared by all of its possibilities.
    pub probability: f64,
    pub prices: SlotPrices,
}

impl Possibility {
    pub fn new(
        pattern: PatternKind,
        description: impl Into<String>,
        probability: f64,
        prices: SlotPrices,
    ) -> ChartResult<Self> {
        validate_probability(probability)?;
        Ok(Self {
            pattern,
            description: description.into(),
            probability,
            prices,
        })
    }
}

/// Rejects probabilities that are non-finite or outside `[0, 1]`.
pub fn validate_probability(probability: f64) -> ChartResult<f64> {
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(ChartError::InvalidData(format!(
            "pattern probability must be finite and in [0, 1], got {probability}"
        )));
    }
    Ok(probability)
}

/// Upstream `{min, max}` record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPriceRange {
    pub min: f64,
    pub max: f64,
}

/// Upstream possibility record as produced by the predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPossibility {
    pub pattern_number: i64,
    #[serde(default)]
    pub pattern_description: String,
    pub category_total_probability: f64,
    pub prices: Vec<RawPriceRange>,
}

impl RawPossibility {
    /// Validated slot prices, ignoring the pattern fields.
    pub fn slot_prices(&self) -> ChartResult<SlotPrices> {
        let ranges = self
            .prices
            .iter()
            .map(|raw| PriceRange::new(raw.min, raw.max))
            .collect::<ChartResult<Vec<_>>>()?;
        SlotPrices::from_slots(&ranges)
    }
}

impl TryFrom<RawPossibility> for Possibility {
    type Error = ChartError;

    fn try_from(raw: RawPossibility) -> ChartResult<Self> {
        let pattern = PatternKind::try_from(raw.pattern_number)?;
        let prices = raw.slot_prices()?;
        Possibility::new(
            pattern,
            raw.pattern_description,
            raw.category_total_probability,
            prices,
        )
    }
}

/// Everything one chart update needs.
///
/// `baseline` supplies the vertical domain and the day extents; it is not
/// grouped with `possibilities`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub input: InputSeries,
    pub baseline: SlotPrices,
    pub possibilities: Vec<Possibility>,
}

impl ForecastRequest {
    #[must_use]
    pub fn new(input: InputSeries, baseline: SlotPrices, possibilities: Vec<Possibility>) -> Self {
        Self {
            input,
            baseline,
            possibilities,
        }
    }

    /// Accepts the upstream ordering where the first record is the
    /// all-patterns aggregate used as baseline.
    ///
    /// The baseline's pattern number is not checked against the palette.
    pub fn from_ranked(input: InputSeries, records: Vec<RawPossibility>) -> ChartResult<Self> {
        let mut records = records.into_iter();
        let baseline = records
            .next()
            .ok_or_else(|| {
                ChartError::InvalidData("at least one possibility is required".to_owned())
            })?
            .slot_prices()?;
        let possibilities = records
            .map(Possibility::try_from)
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self::new(input, baseline, possibilities))
    }
}

/// JSON payload accepted by the geometry tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub input: Vec<Option<f64>>,
    pub possibilities: Vec<RawPossibility>,
}

impl ForecastPayload {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse forecast payload json: {e}"))
        })
    }

    pub fn into_request(self) -> ChartResult<ForecastRequest> {
        let input = InputSeries::from_slots(&self.input)?;
        ForecastRequest::from_ranked(input, self.possibilities)
    }
}
