use crate::{EventType, Hertz};

/// Current state of the generator engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorState {
    /// Nominal sample rate shown beside the trace
    pub sample_rate: Hertz,
    /// Station label shown beside the trace
    pub station: &'static str,
    /// Configuration the current series were generated with
    pub config: GeneratorConfig,
}

/// Parameters for synthetic series generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Event type the engine generates series for.
    pub event_type: EventType,
    /// Number of waveform samples.
    pub samples: usize,
    /// Spectrogram frequency buckets.
    pub spectrogram_rows: usize,
    /// Spectrogram time buckets.
    pub spectrogram_cols: usize,
    /// Fixed seed for reproducible output. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            event_type: EventType::Earthquake,
            samples: 300,
            spectrogram_rows: 40,
            spectrogram_cols: 100,
            seed: None,
        }
    }
}
