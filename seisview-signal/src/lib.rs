pub mod catalog;
mod error;
pub mod generator;

pub use error::{GenerateError, Result};
pub use generator::{Generator, generate_spectrogram, generate_waveform};

use anyhow::Context;
use flume::{Receiver, Sender};
use log::{debug, info};
use seisview_messages::{
    CatalogSnapshot, Command, Event, GeneratorConfig, GeneratorState, Hertz, Prediction,
};

/// Nominal sample rate of the synthetic station.
const SAMPLE_RATE: Hertz = Hertz(100);
const STATION: &str = "USGS-CA12";

/// The generator engine.
/// Owns the random source and answers UI commands with freshly generated series.
pub struct Engine {
    cmd_rx: Receiver<Command>,
    event_tx: Sender<Event>,
    config: GeneratorConfig,
    generator: Generator,
    prediction: Prediction,
}

impl Engine {
    /// Create a new Engine instance.
    pub fn new(cmd_rx: Receiver<Command>, event_tx: Sender<Event>, config: GeneratorConfig) -> Self {
        debug!("Constructing a new engine with {:?}", config);
        let generator = Generator::new(config.seed);
        Self {
            cmd_rx,
            event_tx,
            config,
            generator,
            prediction: catalog::reference_prediction(),
        }
    }

    /// Run the engine (blocking).
    ///
    /// Publishes a state snapshot, the catalog and the first pair of series, then
    /// serves commands until `Command::Stop` arrives or either channel disconnects.
    /// Fails only when the configured dimensions are rejected by the generator.
    pub fn run(mut self) -> anyhow::Result<()> {
        if !self.publish_state() || !self.publish_catalog()? || !self.publish_series()? {
            return Ok(());
        }
        if !self.publish_prediction() {
            return Ok(());
        }

        loop {
            let msg = self.cmd_rx.recv();
            debug!("Engine received message: {:?}", msg);

            let listening = match msg {
                Ok(Command::Stop) | Err(flume::RecvError::Disconnected) => break,
                Ok(Command::SelectEventType(event_type)) => {
                    if event_type == self.config.event_type {
                        true
                    } else {
                        self.config.event_type = event_type;
                        self.publish_state() && self.publish_series()?
                    }
                }
                Ok(Command::Regenerate) => self.publish_series()?,
                Ok(Command::RunPrediction) => self.publish_prediction(),
            };

            if !listening {
                break;
            }
        }

        info!("Engine stopped");
        Ok(())
    }

    /// Returns false once the UI has hung up.
    fn send(&self, event: Event) -> bool {
        if self.event_tx.send(event).is_err() {
            info!("UI disconnected, stopping engine");
            return false;
        }
        true
    }

    fn publish_state(&self) -> bool {
        self.send(Event::StateSnapshot(GeneratorState {
            sample_rate: SAMPLE_RATE,
            station: STATION,
            config: self.config.clone(),
        }))
    }

    fn publish_series(&mut self) -> anyhow::Result<bool> {
        let event_type = self.config.event_type;
        let waveform = self
            .generator
            .waveform(self.config.samples, event_type)
            .context("Failed to generate waveform")?;
        let spectrogram = self
            .generator
            .spectrogram(
                self.config.spectrogram_rows,
                self.config.spectrogram_cols,
                event_type,
            )
            .context("Failed to generate spectrogram")?;

        debug!(
            "Generated {} series: {} samples (peak {:.3}), {}x{} spectrogram",
            event_type,
            waveform.len(),
            waveform.peak(),
            spectrogram.rows(),
            spectrogram.cols()
        );

        Ok(self.send(Event::Waveform(waveform)) && self.send(Event::Spectrogram(spectrogram)))
    }

    fn publish_catalog(&self) -> anyhow::Result<bool> {
        let events = catalog::mock_events().context("Failed to parse event catalog")?;
        Ok(self.send(Event::Catalog(CatalogSnapshot {
            events: catalog::latest_events(events),
            prediction: self.prediction.clone(),
            metrics: catalog::reference_metrics(),
        })))
    }

    fn publish_prediction(&mut self) -> bool {
        let scores = catalog::classification_scores(self.generator.rng(), &self.prediction);
        self.send(Event::Prediction(scores))
    }
}
