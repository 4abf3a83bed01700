use eframe::egui::{
    Color32, Grid, ProgressBar, Response, RichText, Sense, Shape, Stroke, Ui, Widget, vec2,
};
use seisview_messages::{CatalogSnapshot, ClassScore, ConfidenceBand, EventType, ModelMetrics};

const PROGRESS_LINE: Color32 = Color32::from_rgb(0x64, 0xFF, 0xDA);
const PROGRESS_HEIGHT: f32 = 64.0;

/// Badge color for an event type in lists and headings.
pub fn badge_color(event_type: EventType) -> Color32 {
    match event_type {
        EventType::Earthquake => Color32::from_rgb(0xF6, 0xAD, 0x55),
        EventType::Explosion => Color32::from_rgb(0xF5, 0x65, 0x65),
        EventType::Tremor => Color32::from_rgb(0x68, 0xD3, 0x91),
        EventType::Noise => Color32::from_rgb(0x8A, 0x99, 0xAD),
    }
}

pub fn band_color(band: ConfidenceBand) -> Color32 {
    match band {
        ConfidenceBand::High => Color32::from_rgb(0x64, 0xFF, 0xDA),
        ConfidenceBand::Good => Color32::from_rgb(0x68, 0xD3, 0x91),
        ConfidenceBand::Fair => Color32::from_rgb(0xEC, 0xC9, 0x4B),
        ConfidenceBand::Low => Color32::from_rgb(0x8A, 0x99, 0xAD),
    }
}

/// Points of the training-progress chart inside a `width` x `height` box.
///
/// Epochs are spread evenly across the width; accuracy 1.0 maps to the top.
pub fn progress_points(progress: &[f64], width: f32, height: f32) -> Vec<[f32; 2]> {
    let steps = progress.len().saturating_sub(1).max(1) as f32;
    progress
        .iter()
        .enumerate()
        .map(|(i, &value)| [i as f32 / steps * width, (1.0 - value as f32) * height])
        .collect()
}

/// Classification scores, recent events and model metrics.
#[derive(Default)]
pub struct Summary {
    catalog: Option<CatalogSnapshot>,
    scores: Vec<ClassScore>,
}

impl Summary {
    pub fn set_catalog(&mut self, catalog: CatalogSnapshot) {
        self.catalog = Some(catalog);
    }

    pub fn set_scores(&mut self, scores: Vec<ClassScore>) {
        self.scores = scores;
    }

    fn classification(&self, ui: &mut Ui, catalog: &CatalogSnapshot) {
        let prediction = &catalog.prediction;
        ui.heading("Event Classification");
        ui.label(format!(
            "Model prediction - {:.0}% confidence",
            prediction.confidence * 100.0
        ));
        ui.horizontal(|ui| {
            ui.label("Detected:");
            ui.colored_label(
                badge_color(prediction.event_type),
                RichText::new(prediction.event_type.label()).strong(),
            );
            ui.label(
                RichText::new(format!(
                    "M {:.1} ±{}",
                    prediction.magnitude, prediction.magnitude_error
                ))
                .monospace(),
            );
        });
        ui.label(format!("Depth estimate: {}", prediction.depth_estimate));

        for score in &self.scores {
            ui.add(
                ProgressBar::new(score.value as f32)
                    .fill(band_color(score.band()))
                    .text(format!(
                        "{} {:.1}%",
                        score.event_type.label(),
                        score.value * 100.0
                    )),
            );
        }
    }

    fn recent_events(&self, ui: &mut Ui, catalog: &CatalogSnapshot) {
        ui.heading("Recent Events");
        Grid::new("recent_events").striped(true).show(ui, |ui| {
            for event in &catalog.events {
                ui.colored_label(badge_color(event.event_type), "●");
                ui.vertical(|ui| {
                    ui.label(&event.location.name);
                    ui.small(event.timestamp.format("%H:%M:%S UTC").to_string());
                });
                ui.vertical(|ui| {
                    ui.label(RichText::new(format!("M {:.1}", event.magnitude)).monospace());
                    ui.small(event.event_type.label());
                });
                ui.end_row();
            }
        });
    }

    fn metrics(&self, ui: &mut Ui, metrics: &ModelMetrics) {
        ui.heading("Model Performance");
        Grid::new("model_metrics").num_columns(4).show(ui, |ui| {
            let c = &metrics.classification;
            let r = &metrics.regression;
            let rows = [
                ("Accuracy", c.accuracy, "MSE", r.mse),
                ("Precision", c.precision, "MAE", r.mae),
                ("Recall", c.recall, "R² Score", r.r2),
            ];
            for (left, left_value, right, right_value) in rows {
                ui.label(left);
                ui.monospace(format!("{:.1}%", left_value * 100.0));
                ui.label(right);
                ui.monospace(format!("{:.2}", right_value));
                ui.end_row();
            }
            ui.label("F1 Score");
            ui.monospace(format!("{:.1}%", c.f1_score * 100.0));
            ui.end_row();
        });

        if let Some(last) = metrics.final_progress() {
            ui.label(format!("Training progress: {:.1}%", last * 100.0));
        }
        let (rect, _) =
            ui.allocate_exact_size(vec2(ui.available_width(), PROGRESS_HEIGHT), Sense::hover());
        let painter = ui.painter_at(rect);
        let points: Vec<_> = progress_points(&metrics.training_progress, rect.width(), rect.height())
            .into_iter()
            .map(|[x, y]| rect.min + vec2(x, y))
            .collect();
        for point in &points {
            painter.circle_filled(*point, 2.0, PROGRESS_LINE);
        }
        painter.add(Shape::line(points, Stroke::new(2.0, PROGRESS_LINE)));
        ui.horizontal(|ui| {
            ui.small("Epoch 0");
            ui.small(format!(
                "Epoch {}",
                metrics.training_progress.len().saturating_sub(1)
            ));
        });
    }
}

impl Widget for &mut Summary {
    fn ui(self, ui: &mut Ui) -> Response {
        let Some(catalog) = &self.catalog else {
            ui.label("Waiting for catalog...");
            return ui.response();
        };

        self.classification(ui, catalog);
        ui.separator();
        self.recent_events(ui, catalog);
        ui.separator();
        self.metrics(ui, &catalog.metrics);

        ui.response()
    }
}
