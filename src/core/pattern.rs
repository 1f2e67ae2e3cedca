use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Price-evolution model a possibility belongs to.
///
/// The discriminant is the upstream `pattern_number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PatternKind {
    Fluctuating = 0,
    LargeSpike = 1,
    Decreasing = 2,
    SmallSpike = 3,
}

impl PatternKind {
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Fluctuating,
        PatternKind::LargeSpike,
        PatternKind::Decreasing,
        PatternKind::SmallSpike,
    ];

    #[must_use]
    pub const fn number(self) -> i64 {
        self as i64
    }

    /// Back-to-front layering rank.
    ///
    /// Patterns whose bars usually cover the most area are drawn first so
    /// narrower ones stay visible on top.
    #[must_use]
    pub const fn draw_rank(self) -> usize {
        match self {
            PatternKind::LargeSpike => 0,
            PatternKind::SmallSpike => 1,
            PatternKind::Fluctuating => 2,
            PatternKind::Decreasing => 3,
        }
    }

    /// Bar fill (ColorBrewer PRGn, 4 classes).
    #[must_use]
    pub const fn fill_color(self) -> Color {
        match self {
            PatternKind::Fluctuating => Color::from_rgb8(0xf1, 0xb6, 0xda),
            PatternKind::LargeSpike => Color::from_rgb8(0x4d, 0xac, 0x26),
            PatternKind::Decreasing => Color::from_rgb8(0xd0, 0x1c, 0x8b),
            PatternKind::SmallSpike => Color::from_rgb8(0xb8, 0xe1, 0x86),
        }
    }

    /// Text color readable on top of `fill_color`.
    #[must_use]
    pub const fn foreground_color(self) -> Color {
        match self {
            PatternKind::Fluctuating | PatternKind::SmallSpike => Color::rgb(0.0, 0.0, 0.0),
            PatternKind::LargeSpike | PatternKind::Decreasing => Color::rgb(1.0, 1.0, 1.0),
        }
    }
}

impl TryFrom<i64> for PatternKind {
    type Error = ChartError;

    fn try_from(number: i64) -> ChartResult<Self> {
        match number {
            0 => Ok(PatternKind::Fluctuating),
            1 => Ok(PatternKind::LargeSpike),
            2 => Ok(PatternKind::Decreasing),
            3 => Ok(PatternKind::SmallSpike),
            other => Err(ChartError::InvalidPattern(other)),
        }
    }
}

impl From<PatternKind> for i64 {
    fn from(kind: PatternKind) -> Self {
        kind.number()
    }
}

#[cfg(test)]
mod tests {
    use super::PatternKind;

    #[test]
    fn pattern_numbers_round_trip() {
        for kind in PatternKind::ALL {
            assert_eq!(PatternKind::try_from(kind.number()).expect("known"), kind);
        }
    }

    #[test]
    fn unknown_pattern_number_is_rejected() {
        let err = PatternKind::try_from(4).expect_err("4 has no palette entry");
        assert!(format!("{err}").contains("unsupported pattern number: 4"));
        assert!(PatternKind::try_from(-1).is_err());
    }

    #[test]
    fn draw_ranks_form_a_permutation() {
        let mut ranks: Vec<usize> = PatternKind::ALL.iter().map(|k| k.draw_rank()).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert_eq!(PatternKind::LargeSpike.draw_rank(), 0);
    }

    #[test]
    fn palette_colors_are_valid() {
        for kind in PatternKind::ALL {
            kind.fill_color().validate().expect("fill");
            kind.foreground_color().validate().expect("foreground");
        }
    }
}
