use chrono::{DateTime, Utc};

use crate::{EventType, Kilometers};

/// Geographic position of an event epicenter.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

/// One detected event in the recent-activity list.
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub magnitude: f64,
    pub depth: Kilometers,
    pub location: Location,
    pub event_type: EventType,
    pub confidence: f64,
}

/// Model output for the event currently under analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub event_type: EventType,
    pub confidence: f64,
    pub magnitude: f64,
    pub magnitude_error: f64,
    pub depth_estimate: Kilometers,
}

/// Confidence assigned to one event type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScore {
    pub event_type: EventType,
    pub value: f64,
}

impl ClassScore {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_value(self.value)
    }
}

/// Coarse bucket for a confidence value, used to pick a bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Good,
    Fair,
    Low,
}

impl ConfidenceBand {
    pub fn from_value(value: f64) -> Self {
        if value > 0.8 {
            Self::High
        } else if value > 0.6 {
            Self::Good
        } else if value > 0.4 {
            Self::Fair
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub mae: f64,
    pub r2: f64,
}

/// Reported model performance, plus validation accuracy per training epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMetrics {
    pub classification: ClassificationMetrics,
    pub regression: RegressionMetrics,
    pub training_progress: Vec<f64>,
}

impl ModelMetrics {
    /// Accuracy after the last epoch, if any epochs were recorded.
    pub fn final_progress(&self) -> Option<f64> {
        self.training_progress.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_band_thresholds_are_exclusive() {
        assert_eq!(ConfidenceBand::from_value(0.94), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_value(0.8), ConfidenceBand::Good);
        assert_eq!(ConfidenceBand::from_value(0.6), ConfidenceBand::Fair);
        assert_eq!(ConfidenceBand::from_value(0.4), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_value(0.05), ConfidenceBand::Low);
    }
}
