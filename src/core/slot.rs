use chrono::{Datelike, NaiveDateTime, Timelike};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Number of time slots on the weekly grid (baseline + 6 days x 2 periods).
pub const SLOT_COUNT: usize = 13;
/// Number of slots that carry predictions (everything after the baseline).
pub const PREDICTED_SLOT_COUNT: usize = SLOT_COUNT - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPeriod {
    Morning,
    Afternoon,
}

/// One position on the fixed weekly price grid.
///
/// Index 0 is the Sunday baseline; indices 1..=12 alternate morning and
/// afternoon from Monday through Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub const BASELINE: TimeSlot = TimeSlot(0);

    pub fn new(index: usize) -> ChartResult<Self> {
        if index >= SLOT_COUNT {
            return Err(ChartError::InvalidData(format!(
                "time slot index {index} is outside 0..{SLOT_COUNT}"
            )));
        }
        Ok(Self(index as u8))
    }

    /// Returns the slot for a weekday/period pair.
    #[must_use]
    pub fn of_day(weekday: Weekday, period: DayPeriod) -> Self {
        let day = weekday as u8;
        let offset = match period {
            DayPeriod::Morning => 1,
            DayPeriod::Afternoon => 2,
        };
        Self(day * 2 + offset)
    }

    /// Maps a wall-clock moment onto the grid.
    ///
    /// Sunday is the baseline; other days split at noon.
    #[must_use]
    pub fn from_datetime(moment: NaiveDateTime) -> Self {
        let weekday = match moment.weekday() {
            chrono::Weekday::Sun => return Self::BASELINE,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        };
        let period = if moment.hour() < 12 {
            DayPeriod::Morning
        } else {
            DayPeriod::Afternoon
        };
        Self::of_day(weekday, period)
    }

    /// All slots after the baseline, in grid order.
    pub fn predicted() -> impl Iterator<Item = TimeSlot> {
        (1..SLOT_COUNT as u8).map(TimeSlot)
    }

    /// All slots, baseline first.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..SLOT_COUNT as u8).map(TimeSlot)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_baseline(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn weekday(self) -> Option<Weekday> {
        if self.is_baseline() {
            return None;
        }
        Some(Weekday::ALL[(self.index() - 1) / 2])
    }

    #[must_use]
    pub fn period(self) -> Option<DayPeriod> {
        match self.0 {
            0 => None,
            i if i % 2 == 1 => Some(DayPeriod::Morning),
            _ => Some(DayPeriod::Afternoon),
        }
    }
}

impl TryFrom<usize> for TimeSlot {
    type Error = ChartError;

    fn try_from(index: usize) -> ChartResult<Self> {
        Self::new(index)
    }
}

impl From<TimeSlot> for usize {
    fn from(slot: TimeSlot) -> Self {
        slot.index()
    }
}

/// Localized words used to build slot labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLabelText {
    pub sunday: String,
    pub weekdays: [String; 6],
    pub morning: String,
    pub afternoon: String,
}

impl Default for SlotLabelText {
    fn default() -> Self {
        Self {
            sunday: "Sunday".to_owned(),
            weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(str::to_owned),
            morning: "AM".to_owned(),
            afternoon: "PM".to_owned(),
        }
    }
}

/// The 13 category keys of the horizontal axis, in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLabels {
    labels: IndexSet<String>,
}

impl SlotLabels {
    pub fn from_text(text: &SlotLabelText) -> ChartResult<Self> {
        Self::from_labels(slot_keys(text))
    }

    /// Accepts pre-built keys; there must be exactly 13 distinct ones.
    pub fn from_labels<I, S>(labels: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = labels.into_iter().map(Into::into).collect();
        if raw.len() != SLOT_COUNT {
            return Err(ChartError::InvalidData(format!(
                "expected {SLOT_COUNT} slot labels, got {}",
                raw.len()
            )));
        }
        let labels: IndexSet<String> = raw.into_iter().collect();
        if labels.len() != SLOT_COUNT {
            return Err(ChartError::InvalidData(
                "slot labels must be distinct".to_owned(),
            ));
        }
        Ok(Self { labels })
    }

    #[must_use]
    pub fn label(&self, slot: TimeSlot) -> &str {
        // Construction guarantees SLOT_COUNT entries.
        &self.labels[slot.index()]
    }

    #[must_use]
    pub fn slot_of(&self, label: &str) -> Option<TimeSlot> {
        self.labels.get_index_of(label).map(|i| TimeSlot(i as u8))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// Keys in slot order: Sunday, then each weekday's morning and afternoon.
fn slot_keys(text: &SlotLabelText) -> Vec<String> {
    let mut keys = Vec::with_capacity(SLOT_COUNT);
    keys.push(text.sunday.clone());
    for day in &text.weekdays {
        for period in [&text.morning, &text.afternoon] {
            keys.push(format!("{day} {period}"));
        }
    }
    keys
}

impl Default for SlotLabels {
    fn default() -> Self {
        // The default text yields 13 distinct keys.
        Self {
            labels: slot_keys(&SlotLabelText::default()).into_iter().collect(),
        }
    }
}
