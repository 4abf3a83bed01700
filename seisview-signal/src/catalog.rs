//! Fixed mock catalog: recent events, the current prediction and model metrics.

use chrono::{DateTime, Utc};
use rand::Rng;
use seisview_messages::{
    ClassScore, ClassificationMetrics, EventType, Kilometers, Location, ModelMetrics, Prediction,
    RegressionMetrics, SeismicEvent,
};

/// Upper bound for the confidence given to event types that were not predicted.
const RUNNER_UP_CEILING: f64 = 0.1;

struct EventRecord {
    id: &'static str,
    timestamp: &'static str,
    magnitude: f64,
    depth_km: f64,
    lat: f64,
    lng: f64,
    place: &'static str,
    event_type: EventType,
    confidence: f64,
}

const EVENTS: [EventRecord; 5] = [
    EventRecord {
        id: "ev1",
        timestamp: "2025-04-29T08:24:13Z",
        magnitude: 4.7,
        depth_km: 12.3,
        lat: 36.2048,
        lng: -117.4971,
        place: "Central California, USA",
        event_type: EventType::Earthquake,
        confidence: 0.94,
    },
    EventRecord {
        id: "ev2",
        timestamp: "2025-04-29T07:58:32Z",
        magnitude: 3.2,
        depth_km: 5.7,
        lat: 34.0522,
        lng: -118.2437,
        place: "Los Angeles, California, USA",
        event_type: EventType::Earthquake,
        confidence: 0.88,
    },
    EventRecord {
        id: "ev3",
        timestamp: "2025-04-29T06:37:21Z",
        magnitude: 2.1,
        depth_km: 1.3,
        lat: 37.7749,
        lng: -122.4194,
        place: "San Francisco, California, USA",
        event_type: EventType::Tremor,
        confidence: 0.76,
    },
    EventRecord {
        id: "ev4",
        timestamp: "2025-04-29T05:12:45Z",
        magnitude: 3.8,
        depth_km: 8.5,
        lat: 19.4326,
        lng: -155.2832,
        place: "Hilo, Hawaii, USA",
        event_type: EventType::Earthquake,
        confidence: 0.92,
    },
    EventRecord {
        id: "ev5",
        timestamp: "2025-04-29T04:03:17Z",
        magnitude: 1.4,
        depth_km: 0.7,
        lat: 39.7392,
        lng: -104.9903,
        place: "Denver, Colorado, USA",
        event_type: EventType::Explosion,
        confidence: 0.85,
    },
];

/// The built-in list of recently detected events, in catalog order.
pub fn mock_events() -> Result<Vec<SeismicEvent>, chrono::ParseError> {
    EVENTS
        .iter()
        .map(|record| {
            let timestamp = record.timestamp.parse::<DateTime<Utc>>()?;
            Ok(SeismicEvent {
                id: record.id.to_string(),
                timestamp,
                magnitude: record.magnitude,
                depth: Kilometers(record.depth_km),
                location: Location {
                    lat: record.lat,
                    lng: record.lng,
                    name: record.place.to_string(),
                },
                event_type: record.event_type,
                confidence: record.confidence,
            })
        })
        .collect()
}

/// Events ordered newest first.
pub fn latest_events(mut events: Vec<SeismicEvent>) -> Vec<SeismicEvent> {
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events
}

pub fn reference_prediction() -> Prediction {
    Prediction {
        event_type: EventType::Earthquake,
        confidence: 0.94,
        magnitude: 4.7,
        magnitude_error: 0.3,
        depth_estimate: Kilometers(12.4),
    }
}

pub fn reference_metrics() -> ModelMetrics {
    ModelMetrics {
        classification: ClassificationMetrics {
            accuracy: 0.93,
            precision: 0.91,
            recall: 0.94,
            f1_score: 0.92,
        },
        regression: RegressionMetrics {
            mse: 0.18,
            mae: 0.31,
            r2: 0.89,
        },
        training_progress: vec![0.65, 0.72, 0.78, 0.84, 0.87, 0.89, 0.91, 0.92, 0.93, 0.93],
    }
}

/// One score per event type, highest first.
///
/// The predicted type carries the prediction's confidence; every other type
/// gets a small random score below `RUNNER_UP_CEILING`.
pub fn classification_scores<R: Rng + ?Sized>(
    rng: &mut R,
    prediction: &Prediction,
) -> Vec<ClassScore> {
    let mut scores: Vec<ClassScore> = EventType::ALL
        .into_iter()
        .map(|event_type| {
            let value = if event_type == prediction.event_type {
                prediction.confidence
            } else {
                rng.random::<f64>() * RUNNER_UP_CEILING
            };
            ClassScore { event_type, value }
        })
        .collect();
    scores.sort_by(|a, b| b.value.total_cmp(&a.value));
    scores
}
