//! Motivational message bands

use serde::Serialize;

/// A message bucket chosen by overall progress percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationBand {
    /// `[0, 25)`
    Starting,
    /// `[25, 50)`
    Momentum,
    /// `[50, 75)`
    Progressing,
    /// `[75, 100)`
    Almost,
    /// `100` and above
    Complete,
}

impl MotivationBand {
    /// Pick the band for a percentage. Bands are half-open except the last,
    /// so exactly 100 is complete. NaN and negatives fall in the first band.
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 100.0 => MotivationBand::Complete,
            p if p >= 75.0 => MotivationBand::Almost,
            p if p >= 50.0 => MotivationBand::Progressing,
            p if p >= 25.0 => MotivationBand::Momentum,
            _ => MotivationBand::Starting,
        }
    }

    /// Stable identifier
    pub fn id(self) -> &'static str {
        match self {
            MotivationBand::Starting => "starting",
            MotivationBand::Momentum => "momentum",
            MotivationBand::Progressing => "progressing",
            MotivationBand::Almost => "almost",
            MotivationBand::Complete => "complete",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MotivationBand::Starting => "You're just getting started!",
            MotivationBand::Momentum => "Keep up the good work!",
            MotivationBand::Progressing => "You're making great progress!",
            MotivationBand::Almost => "Almost there!",
            MotivationBand::Complete => "Congratulations! You've completed everything!",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MotivationBand::Starting => "Every problem you solve builds your foundation. Keep going!",
            MotivationBand::Momentum => "You're developing good momentum. Stay consistent!",
            MotivationBand::Progressing => {
                "You've mastered a significant portion. The hard work is paying off!"
            }
            MotivationBand::Almost => "You're in the final stretch. Just a few more to conquer!",
            MotivationBand::Complete => {
                "You've completed all the problems! Time to celebrate your achievement!"
            }
        }
    }
}
