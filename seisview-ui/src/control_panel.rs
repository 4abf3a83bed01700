use eframe::egui::{ComboBox, Response, Ui, Widget};
use flume::Sender;
use log::warn;

use seisview_messages::{Command, EventType, GeneratorState};

/// Control panel widget for choosing what the engine generates.
pub struct ControlPanel {
    cmd_tx: Sender<Command>,
    selected: EventType,
    generator_state: Option<GeneratorState>,
    waiting_for_switch: bool,
}

impl ControlPanel {
    pub fn new(cmd_tx: Sender<Command>) -> Self {
        Self {
            cmd_tx,
            selected: EventType::default(),
            generator_state: None,
            waiting_for_switch: false,
        }
    }

    /// Update from engine state snapshot.
    pub fn update_from_generator_state(&mut self, state: &GeneratorState) {
        self.selected = state.config.event_type;
        self.generator_state = Some(state.clone());
        self.waiting_for_switch = false;
    }

    pub fn selected(&self) -> EventType {
        self.selected
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting_for_switch
    }

    pub fn select(&mut self, event_type: EventType) {
        if event_type == self.selected {
            return;
        }
        self.selected = event_type;
        self.waiting_for_switch = true;
        self.send(Command::SelectEventType(event_type));
    }

    pub fn send(&self, command: Command) {
        if self.cmd_tx.send(command).is_err() {
            warn!("Engine is gone, dropping {:?}", command);
        }
    }
}

impl Widget for &mut ControlPanel {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.heading("Signal Source");
        ui.separator();

        let enabled = !self.waiting_for_switch;
        let current = self.selected;
        let mut choice = current;
        ui.add_enabled_ui(enabled, |ui| {
            ComboBox::from_label("Event type")
                .selected_text(current.label())
                .show_ui(ui, |ui| {
                    for event_type in EventType::ALL {
                        ui.selectable_value(&mut choice, event_type, event_type.label());
                    }
                });
        });
        if choice != current {
            self.select(choice);
        }

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui.add_enabled(enabled, eframe::egui::Button::new("Regenerate")).clicked() {
                self.send(Command::Regenerate);
            }
            if ui.button("Run Prediction").clicked() {
                self.send(Command::RunPrediction);
            }
        });

        ui.add_space(10.0);
        ui.separator();

        if let Some(state) = &self.generator_state {
            ui.label(format!("Sample Rate: {}", state.sample_rate));
            ui.label(format!("Station: {}", state.station));
            ui.label(format!(
                "Samples: {} | Spectrogram: {}x{}",
                state.config.samples, state.config.spectrogram_rows, state.config.spectrogram_cols
            ));
            if let Some(seed) = state.config.seed {
                ui.label(format!("Seed: {}", seed));
            }
        }

        ui.response()
    }
}
