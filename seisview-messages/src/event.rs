use crate::{
    ClassScore, GeneratorState, ModelMetrics, Prediction, SeismicEvent, SpectrogramGrid,
    WaveformSeries,
};

/// Events sent from the engine to the UI.
#[derive(Debug, Clone)]
pub enum Event {
    /// Sent on start-up and whenever the engine configuration changes.
    StateSnapshot(GeneratorState),
    /// A freshly generated waveform for the active event type.
    Waveform(WaveformSeries),
    /// A freshly generated spectrogram for the active event type.
    Spectrogram(SpectrogramGrid),
    /// Static dashboard data, sent once on start-up.
    Catalog(CatalogSnapshot),
    /// Classification scores for the current prediction, highest first.
    Prediction(Vec<ClassScore>),
}

/// Recent events and reference metrics shown beside the traces.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Newest first
    pub events: Vec<SeismicEvent>,
    pub prediction: Prediction,
    pub metrics: ModelMetrics,
}
