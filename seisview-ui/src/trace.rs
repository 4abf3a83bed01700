use eframe::egui::{Color32, Pos2, Response, Sense, Stroke, Ui, Widget, pos2, vec2};
use log::debug;
use seisview_messages::{EventType, WaveformSeries};

use crate::surface::{PainterSurface, Surface};

const BACKGROUND: Color32 = Color32::from_rgb(17, 34, 64);
const GRID: Color32 = Color32::from_rgba_premultiplied(13, 13, 13, 13);
const MARKER: Color32 = Color32::from_rgba_premultiplied(77, 77, 77, 77);
const TRACE_WIDTH: f32 = 2.0;

/// Fixed parameters of a scrolling trace.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceConfig {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Scroll speed in pixels per second
    pub speed: f32,
    /// Spacing between horizontal grid lines
    pub horizontal_grid: f32,
    /// Spacing between vertical grid lines
    pub vertical_grid: f32,
    pub start_playing: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 200.0,
            speed: 50.0,
            horizontal_grid: 20.0,
            vertical_grid: 40.0,
            start_playing: true,
        }
    }
}

impl TraceConfig {
    pub fn initial_playback(&self) -> Playback {
        if self.start_playing {
            Playback::Playing
        } else {
            Playback::Paused
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Playing,
    Paused,
}

impl Playback {
    pub fn toggled(self) -> Self {
        match self {
            Self::Playing => Self::Paused,
            Self::Paused => Self::Playing,
        }
    }

    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

/// Everything that changes between frames of a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceState {
    /// Horizontal offset into the series, in pixels. Always in `[0, width)`.
    pub scroll_position: f32,
    /// Timestamp of the previous frame in seconds, `None` before the first frame.
    pub last_timestamp: Option<f64>,
    pub playback: Playback,
}

impl TraceState {
    pub fn new(playback: Playback) -> Self {
        Self {
            scroll_position: 0.0,
            last_timestamp: None,
            playback,
        }
    }

    /// Advance the scroll position by `elapsed` seconds at `speed` px/s.
    ///
    /// Paused traces and non-positive widths leave the position untouched.
    pub fn tick(self, elapsed: f32, speed: f32, width: f32) -> Self {
        if !self.playback.is_playing() || width <= 0.0 {
            return self;
        }
        let scroll_position = (self.scroll_position + speed * elapsed).rem_euclid(width);
        Self {
            scroll_position,
            ..self
        }
    }

    /// Tick using the time elapsed since the previous frame.
    ///
    /// The first frame has no predecessor and counts as zero elapsed time, as
    /// does a timestamp that goes backwards.
    pub fn advance(self, timestamp: f64, speed: f32, width: f32) -> Self {
        let elapsed = self
            .last_timestamp
            .map_or(0.0, |previous| (timestamp - previous).max(0.0) as f32);
        Self {
            last_timestamp: Some(timestamp),
            ..self.tick(elapsed, speed, width)
        }
    }

    pub fn toggled(self) -> Self {
        Self {
            playback: self.playback.toggled(),
            ..self
        }
    }
}

/// What a call to `WaveformTrace::frame` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// No surface, or one with no area. Nothing was touched.
    NoSurface,
    /// The trace was torn down. Nothing was touched.
    TornDown,
}

/// Series index drawn at pixel `column` for a given scroll position.
///
/// `len` must be non-zero.
pub fn sample_index(column: usize, scroll_position: f32, len: usize) -> usize {
    let position = (column as f32 + scroll_position) % len as f32;
    (position.floor() as usize).min(len - 1)
}

pub fn trace_color(event_type: EventType) -> Color32 {
    match event_type {
        EventType::Earthquake => Color32::from_rgb(0x42, 0x99, 0xE1),
        EventType::Explosion => Color32::from_rgb(0xF5, 0x65, 0x65),
        EventType::Tremor => Color32::from_rgb(0x68, 0xD3, 0x91),
        EventType::Noise => Color32::from_rgb(0xA0, 0xAE, 0xC0),
    }
}

/// Color for a free-form event tag. Unknown tags get the earthquake blue.
pub fn trace_color_for_tag(tag: &str) -> Color32 {
    let event_type = tag.parse().unwrap_or_default();
    trace_color(event_type)
}

/// A left-scrolling line trace of one waveform.
///
/// The trace is mounted on construction and stays live until `teardown`.
/// After teardown every frame is a no-op and no further frames are requested.
pub struct WaveformTrace {
    config: TraceConfig,
    series: Option<WaveformSeries>,
    event_type: EventType,
    state: TraceState,
}

impl WaveformTrace {
    pub fn mount(series: WaveformSeries, config: TraceConfig) -> Self {
        let playback = config.initial_playback();
        Self::mount_with_playback(series, config, playback)
    }

    pub fn mount_with_playback(
        series: WaveformSeries,
        config: TraceConfig,
        playback: Playback,
    ) -> Self {
        debug!(
            "Mounting {} trace with {} samples",
            series.event_type(),
            series.len()
        );
        Self {
            event_type: series.event_type(),
            series: Some(series),
            config,
            state: TraceState::new(playback),
        }
    }

    /// Drop the series and revoke any pending frame.
    pub fn teardown(&mut self) {
        if self.series.take().is_some() {
            debug!("Tearing down {} trace", self.event_type);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.series.is_some()
    }

    /// Whether the host should schedule another frame.
    pub fn wants_frame(&self) -> bool {
        self.is_mounted()
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn state(&self) -> TraceState {
        self.state
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn toggle_playback(&mut self) {
        if self.is_mounted() {
            self.state = self.state.toggled();
        }
    }

    /// Advance the scroll position to `timestamp` (seconds) and repaint.
    pub fn frame<S: Surface>(&mut self, timestamp: f64, surface: Option<&mut S>) -> FrameOutcome {
        let Some(series) = &self.series else {
            return FrameOutcome::TornDown;
        };
        let Some(surface) = surface else {
            return FrameOutcome::NoSurface;
        };
        let size = surface.size();
        if size.x < 1.0 || size.y <= 0.0 {
            return FrameOutcome::NoSurface;
        }

        self.state = self.state.advance(timestamp, self.config.speed, size.x);
        paint(surface, series, self.state.scroll_position, &self.config);
        FrameOutcome::Drawn
    }
}

fn paint<S: Surface>(surface: &mut S, series: &WaveformSeries, scroll: f32, config: &TraceConfig) {
    let size = surface.size();
    surface.clear(BACKGROUND);

    let grid = Stroke::new(1.0, GRID);
    if config.horizontal_grid > 0.0 {
        let mut y = 0.0;
        while y < size.y {
            surface.line_segment(pos2(0.0, y), pos2(size.x, y), grid);
            y += config.horizontal_grid;
        }
    }
    if config.vertical_grid > 0.0 {
        let mut x = 0.0;
        while x < size.x {
            surface.line_segment(pos2(x, 0.0), pos2(x, size.y), grid);
            x += config.vertical_grid;
        }
    }

    let samples = series.samples();
    if !samples.is_empty() {
        let center = size.y / 2.0;
        let amplitude = size.y / 3.0;
        let columns = size.x as usize;
        let points: Vec<Pos2> = (0..columns)
            .map(|column| {
                let sample = samples[sample_index(column, scroll, samples.len())];
                pos2(column as f32, center - sample as f32 * amplitude)
            })
            .collect();
        surface.polyline(
            points,
            Stroke::new(TRACE_WIDTH, trace_color(series.event_type())),
        );
    }

    let middle = size.x / 2.0;
    surface.line_segment(
        pos2(middle, 0.0),
        pos2(middle, size.y),
        Stroke::new(1.0, MARKER),
    );
}

impl Widget for &mut WaveformTrace {
    /// Paints one frame at the current input time and asks for the next one
    /// while the trace is mounted.
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(vec2(self.config.width, self.config.height), Sense::hover());
        let painter = ui.painter_at(rect);
        let mut surface = PainterSurface::new(&painter, rect);

        let now = ui.input(|i| i.time);
        self.frame(now, Some(&mut surface));

        if self.wants_frame() {
            ui.ctx().request_repaint();
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Vec2;

    #[derive(Debug, Clone, PartialEq)]
    enum DrawOp {
        Clear,
        Line(Pos2, Pos2),
        Polyline(Vec<Pos2>, Color32),
    }

    struct RecordingSurface {
        size: Vec2,
        ops: Vec<DrawOp>,
    }

    impl RecordingSurface {
        fn new(width: f32, height: f32) -> Self {
            Self {
                size: vec2(width, height),
                ops: Vec::new(),
            }
        }

        fn polyline(&self) -> (&[Pos2], Color32) {
            self.ops
                .iter()
                .find_map(|op| match op {
                    DrawOp::Polyline(points, color) => Some((points.as_slice(), *color)),
                    _ => None,
                })
                .expect("frame should draw a polyline")
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Vec2 {
            self.size
        }

        fn clear(&mut self, _color: Color32) {
            self.ops.push(DrawOp::Clear);
        }

        fn line_segment(&mut self, from: Pos2, to: Pos2, _stroke: Stroke) {
            self.ops.push(DrawOp::Line(from, to));
        }

        fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke) {
            self.ops.push(DrawOp::Polyline(points, stroke.color));
        }
    }

    fn ramp(len: usize) -> WaveformSeries {
        let samples = (0..len).map(|i| i as f64 / len as f64 - 0.5).collect();
        WaveformSeries::new(EventType::Tremor, samples)
    }

    fn playing_trace(len: usize) -> WaveformTrace {
        WaveformTrace::mount(ramp(len), TraceConfig::default())
    }

    #[test]
    fn test_tick_wraps_modulo_width() {
        let state = TraceState::new(Playback::Playing).tick(3.0, 50.0, 100.0);
        assert_eq!(state.scroll_position, 50.0);

        let state = state.tick(1.5, 50.0, 100.0);
        assert_eq!(state.scroll_position, 25.0);
    }

    #[test]
    fn test_tick_ignores_zero_width() {
        let state = TraceState::new(Playback::Playing).tick(1.0, 50.0, 0.0);
        assert_eq!(state.scroll_position, 0.0);
    }

    #[test]
    fn test_first_frame_does_not_scroll() {
        let state = TraceState::new(Playback::Playing).advance(12.0, 50.0, 800.0);
        assert_eq!(state.scroll_position, 0.0);
        assert_eq!(state.last_timestamp, Some(12.0));
    }

    #[test]
    fn test_backwards_timestamp_counts_as_no_time() {
        let state = TraceState::new(Playback::Playing)
            .advance(2.0, 50.0, 800.0)
            .advance(1.0, 50.0, 800.0);
        assert_eq!(state.scroll_position, 0.0);
        assert_eq!(state.last_timestamp, Some(1.0));
    }

    #[test]
    fn test_sample_index_wraps_series() {
        assert_eq!(sample_index(0, 0.0, 300), 0);
        assert_eq!(sample_index(10, 2.5, 300), 12);
        assert_eq!(sample_index(299, 1.0, 300), 0);
        assert_eq!(sample_index(799, 0.0, 300), 199);
    }

    #[test]
    fn test_frame_draws_series_at_scroll_offset() {
        let len = 300;
        let series = ramp(len);
        let mut trace = playing_trace(len);
        let mut surface = RecordingSurface::new(800.0, 200.0);

        trace.frame(0.0, Some(&mut surface));
        surface.ops.clear();
        assert_eq!(trace.frame(0.25, Some(&mut surface)), FrameOutcome::Drawn);

        let p = trace.state().scroll_position;
        assert_eq!(p, 12.5);

        let (points, color) = surface.polyline();
        assert_eq!(points.len(), 800);
        assert_eq!(color, trace_color(EventType::Tremor));
        for (i, point) in points.iter().enumerate() {
            let expected_index = ((i as f32 + p) % len as f32).floor() as usize;
            let expected_y = 100.0 - series.samples()[expected_index] as f32 * (200.0 / 3.0);
            assert_eq!(point.x, i as f32);
            assert!(
                (point.y - expected_y).abs() < 1e-4,
                "column {i}: y {} != {}",
                point.y,
                expected_y
            );
        }
    }

    #[test]
    fn test_frame_draws_grid_and_center_marker() {
        let mut trace = playing_trace(10);
        let mut surface = RecordingSurface::new(80.0, 40.0);

        trace.frame(0.0, Some(&mut surface));

        assert_eq!(surface.ops.first(), Some(&DrawOp::Clear));
        let lines: Vec<&DrawOp> = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line(..)))
            .collect();
        // Horizontal at y = 0, 20; vertical at x = 0, 40; one marker.
        assert_eq!(lines.len(), 5);
        assert_eq!(
            surface.ops.last(),
            Some(&DrawOp::Line(pos2(40.0, 0.0), pos2(40.0, 40.0)))
        );
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut trace = playing_trace(300);
        let mut surface = RecordingSurface::new(800.0, 200.0);

        trace.frame(0.0, Some(&mut surface));
        trace.frame(1.0, Some(&mut surface));
        assert_eq!(trace.state().scroll_position, 50.0);

        trace.toggle_playback();
        assert_eq!(trace.state().playback, Playback::Paused);
        trace.frame(2.0, Some(&mut surface));
        trace.frame(3.0, Some(&mut surface));
        assert_eq!(trace.state().scroll_position, 50.0);

        trace.toggle_playback();
        trace.frame(3.5, Some(&mut surface));
        assert_eq!(trace.state().scroll_position, 75.0);
    }

    #[test]
    fn test_start_paused_from_config() {
        let config = TraceConfig {
            start_playing: false,
            ..TraceConfig::default()
        };
        let mut trace = WaveformTrace::mount(ramp(300), config);
        let mut surface = RecordingSurface::new(800.0, 200.0);

        trace.frame(0.0, Some(&mut surface));
        trace.frame(5.0, Some(&mut surface));
        assert_eq!(trace.state().scroll_position, 0.0);
    }

    #[test]
    fn test_frame_after_teardown_is_noop() {
        let mut trace = playing_trace(300);
        let mut surface = RecordingSurface::new(800.0, 200.0);
        trace.frame(0.0, Some(&mut surface));
        trace.frame(1.0, Some(&mut surface));
        let before = trace.state();

        trace.teardown();
        surface.ops.clear();

        assert!(!trace.wants_frame());
        assert_eq!(trace.frame(2.0, Some(&mut surface)), FrameOutcome::TornDown);
        assert!(surface.ops.is_empty());
        assert_eq!(trace.state(), before);

        trace.toggle_playback();
        assert_eq!(trace.state(), before);
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let mut trace = playing_trace(300);

        assert_eq!(
            trace.frame::<RecordingSurface>(1.0, None),
            FrameOutcome::NoSurface
        );
        assert_eq!(trace.state(), TraceState::new(Playback::Playing));

        let mut empty = RecordingSurface::new(0.0, 200.0);
        assert_eq!(trace.frame(2.0, Some(&mut empty)), FrameOutcome::NoSurface);
        assert!(empty.ops.is_empty());
        assert_eq!(trace.state().last_timestamp, None);
    }

    #[test]
    fn test_color_for_unknown_tag_falls_back() {
        assert_eq!(
            trace_color_for_tag("explosion"),
            trace_color(EventType::Explosion)
        );
        assert_eq!(
            trace_color_for_tag("sonic boom"),
            trace_color(EventType::Earthquake)
        );
    }
}
