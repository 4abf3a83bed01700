use flume::Sender;
use log::{debug, trace};

use crate::control_panel::ControlPanel;
use crate::spectrogram::SpectrogramView;
use crate::summary::Summary;
use crate::trace::{TraceConfig, WaveformTrace};
use seisview_messages::{Command, Event, GeneratorState, WaveformSeries};

/// Local UI state derived from engine events.
pub(super) struct UiState {
    /// Current engine state (from StateSnapshot)
    pub generator_state: Option<GeneratorState>,

    /// Live trace for the latest waveform, if one has arrived
    pub trace: Option<WaveformTrace>,

    pub trace_config: TraceConfig,

    /// Spectrogram widget state
    pub spectrogram: SpectrogramView,

    /// Control panel widget state
    pub control_panel: ControlPanel,

    pub summary: Summary,
}

impl UiState {
    pub fn new(cmd_tx: Sender<Command>, trace_config: TraceConfig) -> Self {
        Self {
            generator_state: None,
            trace: None,
            spectrogram: SpectrogramView::new(trace_config.height),
            trace_config,
            control_panel: ControlPanel::new(cmd_tx),
            summary: Summary::default(),
        }
    }

    /// True until a live trace exists to drive repaints.
    pub fn awaiting_waveform(&self) -> bool {
        !self.trace.as_ref().is_some_and(WaveformTrace::wants_frame)
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::StateSnapshot(state) => {
                debug!("Generator state: {:?}", state.config);
                self.control_panel.update_from_generator_state(&state);
                self.generator_state = Some(state);
            }
            Event::Waveform(series) => self.replace_trace(series),
            Event::Spectrogram(grid) => {
                trace!("Spectrogram {}x{} for {}", grid.rows(), grid.cols(), grid.event_type());
                self.spectrogram.set_grid(&grid);
            }
            Event::Catalog(catalog) => {
                debug!("Catalog with {} events", catalog.events.len());
                self.summary.set_catalog(catalog);
            }
            Event::Prediction(scores) => self.summary.set_scores(scores),
        }
    }

    /// Tear down the current trace and mount one for `series`.
    ///
    /// A regenerated series of the same event type keeps the play/pause
    /// state; a new event type starts from the configured default.
    fn replace_trace(&mut self, series: WaveformSeries) {
        let playback = match self.trace.as_mut() {
            Some(old) => {
                old.teardown();
                if old.event_type() == series.event_type() {
                    old.state().playback
                } else {
                    self.trace_config.initial_playback()
                }
            }
            None => self.trace_config.initial_playback(),
        };
        self.trace = Some(WaveformTrace::mount_with_playback(
            series,
            self.trace_config.clone(),
            playback,
        ));
    }
}
