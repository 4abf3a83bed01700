use eframe::egui::{
    Align2, Color32, ColorImage, FontId, Image, Response, TextureHandle, TextureOptions, Ui,
    Widget, pos2,
};
use seisview_messages::SpectrogramGrid;

const LABEL: Color32 = Color32::from_rgba_premultiplied(179, 179, 179, 179);
const FREQUENCY_LABELS: [&str; 5] = ["40 Hz", "30 Hz", "20 Hz", "10 Hz", "0 Hz"];
const TIME_LABELS: [&str; 5] = ["0s", "1s", "2s", "3s", "4s"];

/// Spectrogram display widget.
///
/// Pixels are rebuilt only when a new grid arrives, and the texture is uploaded
/// to the GPU once per grid rather than once per frame.
pub struct SpectrogramView {
    image: Option<ColorImage>,
    needs_gpu_upload: bool,
    /// Cached texture handle to avoid re-uploading on every frame
    texture_handle: Option<TextureHandle>,
    height: f32,
}

impl SpectrogramView {
    pub fn new(height: f32) -> Self {
        Self {
            image: None,
            needs_gpu_upload: false,
            texture_handle: None,
            height,
        }
    }

    /// Replace the displayed grid.
    pub fn set_grid(&mut self, grid: &SpectrogramGrid) {
        let rgb: Vec<u8> = grid_pixels(grid)
            .iter()
            .flat_map(|c| [c.r(), c.g(), c.b()])
            .collect();
        self.image = Some(ColorImage::from_rgb([grid.cols(), grid.rows()], &rgb));
        self.needs_gpu_upload = true;
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Image pixels for `grid`, top row first.
///
/// Row 0 of the grid is the lowest frequency, so it ends up at the bottom.
pub fn grid_pixels(grid: &SpectrogramGrid) -> Vec<Color32> {
    (0..grid.rows())
        .rev()
        .filter_map(|row| grid.row(row))
        .flat_map(|row| row.iter().map(|&v| intensity_to_color(v)))
        .collect()
}

/// Blue for silence, teal at half intensity, yellow at full intensity.
pub fn intensity_to_color(value: f64) -> Color32 {
    let v = value.clamp(0.0, 1.0);
    let (r, g, b) = if v < 0.5 {
        (v * 2.0 * 64.0, v * 2.0 * 210.0, 255.0)
    } else {
        let t = (v - 0.5) * 2.0;
        (64.0 + t * 191.0, 210.0, 255.0 - t * 255.0)
    };
    Color32::from_rgb(r as u8, g as u8, b as u8)
}

impl Widget for &mut SpectrogramView {
    fn ui(self, ui: &mut Ui) -> Response {
        let Some(image) = &self.image else {
            ui.label("Waiting for spectrogram data...");
            return ui.response();
        };

        if self.needs_gpu_upload {
            let texture = ui
                .ctx()
                .load_texture("spectrogram", image.clone(), TextureOptions::NEAREST);
            self.texture_handle = Some(texture);
            self.needs_gpu_upload = false;
        }

        let Some(texture_handle) = &self.texture_handle else {
            return ui.response();
        };

        let size = [ui.available_width(), self.height];
        let response = ui.add(Image::new(texture_handle).fit_to_exact_size(size.into()));

        // Axis labels over the image
        let rect = response.rect;
        let painter = ui.painter_at(rect);
        let font = FontId::monospace(10.0);
        for (i, label) in FREQUENCY_LABELS.iter().enumerate() {
            let y = rect.top() + i as f32 / (FREQUENCY_LABELS.len() - 1) as f32 * rect.height();
            let anchor = if i == 0 { Align2::LEFT_TOP } else { Align2::LEFT_BOTTOM };
            painter.text(pos2(rect.left() + 5.0, y), anchor, *label, font.clone(), LABEL);
        }
        for (i, label) in TIME_LABELS.iter().enumerate() {
            let x = rect.left() + i as f32 / (TIME_LABELS.len() - 1) as f32 * rect.width();
            painter.text(
                pos2(x, rect.bottom() - 5.0),
                Align2::CENTER_BOTTOM,
                *label,
                font.clone(),
                LABEL,
            );
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seisview_messages::EventType;

    #[test]
    fn test_gradient_anchor_colors() {
        assert_eq!(intensity_to_color(0.0), Color32::from_rgb(0, 0, 255));
        assert_eq!(intensity_to_color(0.5), Color32::from_rgb(64, 210, 255));
        assert_eq!(intensity_to_color(1.0), Color32::from_rgb(255, 210, 0));
    }

    #[test]
    fn test_gradient_clamps_out_of_range() {
        assert_eq!(intensity_to_color(-3.0), intensity_to_color(0.0));
        assert_eq!(intensity_to_color(7.0), intensity_to_color(1.0));
    }

    #[test]
    fn test_low_frequencies_drawn_at_bottom() {
        // Row 0 silent, row 1 saturated.
        let grid =
            SpectrogramGrid::from_row_major(EventType::Earthquake, 2, 2, vec![0.0, 0.0, 1.0, 1.0])
                .unwrap();

        let pixels = grid_pixels(&grid);

        assert_eq!(pixels.len(), 4);
        assert_eq!(pixels[0], intensity_to_color(1.0));
        assert_eq!(pixels[3], intensity_to_color(0.0));
    }

    #[test]
    fn test_set_grid_marks_upload() {
        let grid = SpectrogramGrid::from_row_major(EventType::Noise, 3, 4, vec![0.2; 12]).unwrap();
        let mut view = SpectrogramView::new(200.0);
        assert!(!view.has_image());

        view.set_grid(&grid);

        assert!(view.has_image());
        assert!(view.needs_gpu_upload);
        assert_eq!(view.image.as_ref().map(|i| i.size), Some([4, 3]));
    }
}
