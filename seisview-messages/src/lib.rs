mod catalog;
mod command;
mod event;
mod event_type;
mod series;
mod state;
mod units;

pub use catalog::{
    ClassScore, ClassificationMetrics, ConfidenceBand, Location, ModelMetrics, Prediction,
    RegressionMetrics, SeismicEvent,
};
pub use command::Command;
pub use event::{CatalogSnapshot, Event};
pub use event_type::{EventType, ParseEventTypeError};
pub use series::{SpectrogramGrid, WaveformSeries};
pub use state::{GeneratorConfig, GeneratorState};
pub use units::{Hertz, Kilometers};
