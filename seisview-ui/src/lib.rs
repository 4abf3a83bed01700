mod control_panel;
mod spectrogram;
mod state;
mod summary;
mod surface;
mod trace;

pub use spectrogram::{grid_pixels, intensity_to_color};
pub use surface::{PainterSurface, Surface};
pub use trace::{
    FrameOutcome, Playback, TraceConfig, TraceState, WaveformTrace, sample_index, trace_color,
    trace_color_for_tag,
};

use eframe::egui::{self, RichText};
use log::info;
use seisview_messages::{Command, Event};
use state::UiState;

/// Main application struct implementing the egui App trait.
pub struct SeisViewApp {
    /// Receiver for events from engine
    event_rx: flume::Receiver<Event>,

    /// Local application state
    state: UiState,
}

impl SeisViewApp {
    fn new(
        event_rx: flume::Receiver<Event>,
        cmd_tx: flume::Sender<Command>,
        trace_config: TraceConfig,
    ) -> Self {
        Self {
            event_rx,
            state: UiState::new(cmd_tx, trace_config),
        }
    }

    fn trace_header(&mut self, ui: &mut egui::Ui) {
        let Some(trace) = self.state.trace.as_mut() else {
            return;
        };
        let playing = trace.state().playback.is_playing();
        ui.horizontal(|ui| {
            ui.heading("Waveform Analysis");
            let dot = if playing {
                trace_color(trace.event_type())
            } else {
                egui::Color32::GRAY
            };
            ui.colored_label(dot, "●");
            if ui.button(if playing { "Pause" } else { "Play" }).clicked() {
                trace.toggle_playback();
                info!("Trace {}", if playing { "paused" } else { "resumed" });
            }
        });
        ui.label(format!(
            "Real-time seismic signal - {} pattern",
            trace.event_type()
        ));
    }
}

impl eframe::App for SeisViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process all pending events (non-blocking)
        while let Ok(event) = self.event_rx.try_recv() {
            self.state.handle_event(event);
        }

        // Keep polling the engine until the trace takes over repainting
        if self.state.awaiting_waveform() {
            ctx.request_repaint();
        }

        // Right side panel for controls and summaries
        egui::SidePanel::right("control_panel")
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add(&mut self.state.control_panel);
                    ui.add_space(10.0);
                    ui.add(&mut self.state.summary);
                });
            });

        // Central panel for the trace and the spectrogram
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.trace.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("Waiting for engine connection...");
                });
                return;
            }

            self.trace_header(ui);
            if let Some(trace) = self.state.trace.as_mut() {
                ui.add(trace);
            }

            ui.add_space(10.0);
            ui.heading("Frequency Analysis");
            ui.label(RichText::new("Time-frequency spectrogram").small());
            ui.add(&mut self.state.spectrogram);
        });
    }
}

/// Entry point for the UI module.
///
/// Runs the eframe application on the main thread (blocking).
pub fn run(
    event_rx: flume::Receiver<Event>,
    cmd_tx: flume::Sender<Command>,
    trace_config: TraceConfig,
) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("SeisView"),
        ..Default::default()
    };

    eframe::run_native(
        "SeisView",
        options,
        Box::new(|_cc| Ok(Box::new(SeisViewApp::new(event_rx, cmd_tx, trace_config)))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
