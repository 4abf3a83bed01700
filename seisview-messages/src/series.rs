use std::sync::Arc;

use crate::EventType;

/// Time-ordered amplitude samples for one event type.
///
/// Samples are shared behind an `Arc` so the UI can hold on to a series while
/// the engine generates the next one. A series is never resized or edited;
/// changing parameters means generating a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformSeries {
    event_type: EventType,
    samples: Arc<[f64]>,
}

impl WaveformSeries {
    pub fn new(event_type: EventType, samples: Vec<f64>) -> Self {
        Self {
            event_type,
            samples: samples.into(),
        }
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest absolute sample value, 0.0 for an empty series.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }
}

/// Intensity grid indexed by (frequency bucket, time bucket).
///
/// Row 0 is the lowest frequency bucket. Values are stored row-major and lie
/// in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrogramGrid {
    event_type: EventType,
    rows: usize,
    cols: usize,
    values: Arc<[f64]>,
}

impl SpectrogramGrid {
    /// Build a grid from row-major values.
    ///
    /// Returns `None` when `values.len()` does not equal `rows * cols`.
    pub fn from_row_major(
        event_type: EventType,
        rows: usize,
        cols: usize,
        values: Vec<f64>,
    ) -> Option<Self> {
        if values.len() != rows.checked_mul(cols)? {
            return None;
        }
        Some(Self {
            event_type,
            rows,
            cols,
            values: values.into(),
        })
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.values.get(start..start + self.cols)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mean intensity of one time bucket across all frequency buckets.
    pub fn column_mean(&self, col: usize) -> Option<f64> {
        if col >= self.cols || self.rows == 0 {
            return None;
        }
        let sum: f64 = (0..self.rows)
            .map(|row| self.values[row * self.cols + col])
            .sum();
        Some(sum / self.rows as f64)
    }
}
