use crate::EventType;

/// Commands sent from the UI to the generator engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stop the engine and let its thread finish.
    Stop,
    /// Switch the active event type. Engine regenerates both series for it.
    SelectEventType(EventType),
    /// Regenerate the waveform and spectrogram for the current event type.
    Regenerate,
    /// Draw a fresh set of classification scores for the current prediction.
    RunPrediction,
}
