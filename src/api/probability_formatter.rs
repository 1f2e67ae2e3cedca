/// Formats a probability in `[0, 1]` for legend display.
pub trait ProbabilityFormatter {
    fn format(&self, probability: f64) -> String;
}

/// Default percentage text.
///
/// Three significant digits from 1% upward, two decimals down to 0.01%,
/// `<0.01%` below that and an em dash for non-finite input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentFormatter;

impl ProbabilityFormatter for PercentFormatter {
    fn format(&self, probability: f64) -> String {
        if !probability.is_finite() {
            return "\u{2014}".to_owned();
        }
        let percent = probability * 100.0;
        if percent >= 1.0 {
            let decimals = if percent >= 100.0 {
                0
            } else if percent >= 10.0 {
                1
            } else {
                2
            };
            format!("{percent:.decimals$}%")
        } else if percent >= 0.01 {
            format!("{percent:.2}%")
        } else {
            "<0.01%".to_owned()
        }
    }
}

impl<F> ProbabilityFormatter for F
where
    F: Fn(f64) -> String,
{
    fn format(&self, probability: f64) -> String {
        self(probability)
    }
}
