//! Synthetic waveform and spectrogram generation.
//!
//! Every series is built from a handful of closed-form shapes (sinusoids,
//! exponential decays and Gaussian ridges) plus uniform jitter drawn from the
//! caller's random source. Passing a seeded RNG makes the output reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seisview_messages::{EventType, SpectrogramGrid, WaveformSeries};

use crate::error::{GenerateError, Result};

/// Normalized position where the S-wave takes over from the P-wave.
pub const S_WAVE_ONSET: f64 = 0.3;

/// Peak-to-peak size of the jitter added to every waveform sample.
const WAVEFORM_JITTER: f64 = 0.1;
/// Peak-to-peak size of the jitter added to every spectrogram cell.
const SPECTROGRAM_JITTER: f64 = 0.1;

/// Base amplitude of the deterministic part of each waveform.
pub const fn base_amplitude(event_type: EventType) -> f64 {
    match event_type {
        EventType::Earthquake => 0.5,
        EventType::Explosion => 0.7,
        EventType::Tremor => 0.3,
        EventType::Noise => 0.1,
    }
}

/// Centered uniform sample in `[-width / 2, width / 2)`.
fn jitter<R: Rng + ?Sized>(rng: &mut R, width: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * width
}

/// P-wave and S-wave contributions of an earthquake at position `x`.
///
/// Exactly one of the two is non-zero (apart from zero crossings): the P-wave
/// before `S_WAVE_ONSET`, the S-wave from it onwards.
pub(crate) fn earthquake_phases(x: f64, amplitude: f64) -> (f64, f64) {
    if x < S_WAVE_ONSET {
        let p = (x * 50.0).sin() * amplitude * (-10.0 * x).exp();
        (p, 0.0)
    } else {
        let s = (x * 30.0).sin() * amplitude * (-3.0 * (x - S_WAVE_ONSET)).exp();
        (0.0, s)
    }
}

/// Type-specific waveform value at normalized position `x`, before jitter.
fn waveform_shape<R: Rng + ?Sized>(rng: &mut R, event_type: EventType, x: f64) -> f64 {
    let amplitude = base_amplitude(event_type);
    match event_type {
        EventType::Earthquake => {
            let (p, s) = earthquake_phases(x, amplitude);
            p + s
        }
        EventType::Explosion => (x * 80.0).sin() * amplitude * (-8.0 * x).exp(),
        EventType::Tremor => (x * 40.0).sin() * amplitude * 0.5 * (1.0 + (x * 5.0).sin()),
        EventType::Noise => jitter(rng, amplitude * 0.5),
    }
}

/// Generate `count` waveform samples for `event_type`.
///
/// Jitter is added to every sample regardless of type, so the noise type
/// carries two independent jitter terms. Samples are not clamped.
pub fn generate_waveform<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    event_type: EventType,
) -> Result<WaveformSeries> {
    if count == 0 {
        return Err(GenerateError::EmptyDimension { dimension: "count" });
    }

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(count)
        .map_err(|_| GenerateError::TooLong { count })?;
    samples.extend((0..count).map(|i| {
        let x = i as f64 / count as f64;
        waveform_shape(rng, event_type, x) + jitter(rng, WAVEFORM_JITTER)
    }));

    Ok(WaveformSeries::new(event_type, samples))
}

fn gaussian(offset: f64, sharpness: f64) -> f64 {
    (-sharpness * offset * offset).exp()
}

/// Type-specific spectrogram intensity at time `x` and frequency `y`, before jitter.
fn spectrogram_shape<R: Rng + ?Sized>(rng: &mut R, event_type: EventType, x: f64, y: f64) -> f64 {
    match event_type {
        EventType::Earthquake => {
            // High-frequency ridge sliding down, then a later low-frequency one.
            let early = gaussian(y - 0.7 * (-3.0 * x).exp(), 10.0) * (-2.0 * x).exp();
            let late = if x > S_WAVE_ONSET {
                gaussian(y - 0.3 * (-x).exp(), 10.0) * (-x).exp()
            } else {
                0.0
            };
            early + late
        }
        EventType::Explosion => {
            gaussian(x, 15.0) * gaussian(y - 0.5, 4.0)
                + gaussian(x - 0.1, 5.0) * gaussian(y - 0.7, 10.0)
        }
        EventType::Tremor => {
            gaussian(y - 0.3 - 0.1 * (x * 20.0).sin(), 3.0) * (0.5 + 0.5 * (x * 10.0).sin())
        }
        EventType::Noise => rng.random::<f64>() * 0.3,
    }
}

/// Generate a `rows` x `cols` spectrogram for `event_type`.
///
/// Every cell is jittered and then clamped to `[0, 1]`.
pub fn generate_spectrogram<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    event_type: EventType,
) -> Result<SpectrogramGrid> {
    if rows == 0 {
        return Err(GenerateError::EmptyDimension { dimension: "rows" });
    }
    if cols == 0 {
        return Err(GenerateError::EmptyDimension { dimension: "cols" });
    }
    let cells = rows
        .checked_mul(cols)
        .ok_or(GenerateError::TooLarge { rows, cols })?;

    let mut values = Vec::new();
    values
        .try_reserve_exact(cells)
        .map_err(|_| GenerateError::TooLarge { rows, cols })?;
    for i in 0..rows {
        let y = i as f64 / rows as f64;
        for j in 0..cols {
            let x = j as f64 / cols as f64;
            let value = spectrogram_shape(rng, event_type, x, y) + jitter(rng, SPECTROGRAM_JITTER);
            values.push(value.clamp(0.0, 1.0));
        }
    }

    SpectrogramGrid::from_row_major(event_type, rows, cols, values)
        .ok_or(GenerateError::TooLarge { rows, cols })
}

/// Owns the random source used for every series the engine produces.
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// Seeded generators repeat their output; unseeded ones draw a seed from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    pub fn waveform(&mut self, count: usize, event_type: EventType) -> Result<WaveformSeries> {
        generate_waveform(&mut self.rng, count, event_type)
    }

    pub fn spectrogram(
        &mut self,
        rows: usize,
        cols: usize,
        event_type: EventType,
    ) -> Result<SpectrogramGrid> {
        generate_spectrogram(&mut self.rng, rows, cols, event_type)
    }

    /// The underlying random source, for other randomized mock data.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn mean_abs(samples: &[f64]) -> f64 {
        samples.iter().map(|s| s.abs()).sum::<f64>() / samples.len() as f64
    }

    #[test]
    fn test_waveform_has_requested_length_and_finite_samples() {
        let mut rng = seeded();
        for event_type in EventType::ALL {
            for count in [1, 2, 300, 1024] {
                let series = generate_waveform(&mut rng, count, event_type).unwrap();
                assert_eq!(series.len(), count);
                assert_eq!(series.event_type(), event_type);
                assert!(
                    series.samples().iter().all(|s| s.is_finite()),
                    "{event_type} produced a non-finite sample"
                );
            }
        }
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let err = generate_waveform(&mut seeded(), 0, EventType::Tremor).unwrap_err();
        assert_eq!(err, GenerateError::EmptyDimension { dimension: "count" });
    }

    #[test]
    fn test_spectrogram_dimensions_and_range() {
        let mut rng = seeded();
        for event_type in EventType::ALL {
            let grid = generate_spectrogram(&mut rng, 40, 100, event_type).unwrap();
            assert_eq!(grid.rows(), 40);
            assert_eq!(grid.cols(), 100);
            assert_eq!(grid.values().len(), 4000);
            assert!(
                grid.values().iter().all(|v| (0.0..=1.0).contains(v)),
                "{event_type} produced a cell outside [0, 1]"
            );
        }
    }

    #[test]
    fn test_spectrogram_rejects_empty_dimensions() {
        let mut rng = seeded();
        assert_eq!(
            generate_spectrogram(&mut rng, 0, 10, EventType::Noise).unwrap_err(),
            GenerateError::EmptyDimension { dimension: "rows" }
        );
        assert_eq!(
            generate_spectrogram(&mut rng, 10, 0, EventType::Noise).unwrap_err(),
            GenerateError::EmptyDimension { dimension: "cols" }
        );
    }

    #[test]
    fn test_spectrogram_rejects_overflowing_size() {
        let err = generate_spectrogram(&mut seeded(), usize::MAX, 2, EventType::Noise).unwrap_err();
        assert_eq!(
            err,
            GenerateError::TooLarge {
                rows: usize::MAX,
                cols: 2
            }
        );
    }

    #[test]
    fn test_unallocatable_spectrogram_is_rejected() {
        // Fits in usize, but not in bytes.
        let rows = usize::MAX / 16;
        let err = generate_spectrogram(&mut seeded(), rows, 4, EventType::Noise).unwrap_err();
        assert_eq!(err, GenerateError::TooLarge { rows, cols: 4 });
    }

    #[test]
    fn test_unallocatable_waveform_is_rejected() {
        let count = usize::MAX / 4;
        let err = generate_waveform(&mut seeded(), count, EventType::Tremor).unwrap_err();
        assert_eq!(err, GenerateError::TooLong { count });
    }

    #[test]
    fn test_earthquake_phases_switch_at_onset() {
        let amplitude = base_amplitude(EventType::Earthquake);

        // Sample 3 of 10 sits exactly on the onset.
        let boundary = 3.0 / 10.0;
        assert_eq!(boundary, S_WAVE_ONSET);
        let (p, s) = earthquake_phases(boundary, amplitude);
        assert_eq!(p, 0.0);
        assert!((s - 9.0_f64.sin() * amplitude).abs() < 1e-12);

        let before = 2.9 / 10.0;
        let (p, s) = earthquake_phases(before, amplitude);
        assert_eq!(s, 0.0);
        assert!(p.abs() > 0.0);
    }

    #[test]
    fn test_earthquake_boundary_sample_follows_s_wave() {
        let series = generate_waveform(&mut seeded(), 10, EventType::Earthquake).unwrap();
        let expected = 9.0_f64.sin() * base_amplitude(EventType::Earthquake);
        // Only the jitter term separates the sample from the S-wave value.
        assert!((series.samples()[3] - expected).abs() <= WAVEFORM_JITTER / 2.0);
    }

    #[test]
    fn test_explosion_waveform_decays() {
        let series = generate_waveform(&mut seeded(), 300, EventType::Explosion).unwrap();
        let samples = series.samples();
        assert!(mean_abs(&samples[..30]) > 3.0 * mean_abs(&samples[150..]));
    }

    #[test]
    fn test_noise_waveform_stays_within_jitter_bounds() {
        let series = generate_waveform(&mut seeded(), 500, EventType::Noise).unwrap();
        let bound = base_amplitude(EventType::Noise) * 0.25 + WAVEFORM_JITTER / 2.0;
        assert!(series.samples().iter().all(|s| s.abs() <= bound));
    }

    #[test]
    fn test_explosion_spectrogram_energy_is_front_loaded() {
        let grid = generate_spectrogram(&mut seeded(), 40, 100, EventType::Explosion).unwrap();

        let mean_over = |cols: std::ops::Range<usize>| {
            let means: Vec<f64> = cols.filter_map(|c| grid.column_mean(c)).collect();
            means.iter().sum::<f64>() / means.len() as f64
        };
        // x = col / 100
        let early = mean_over(0..10);
        let late = mean_over(51..100);
        assert!(early > late, "early {early:.3} should exceed late {late:.3}");
    }

    #[test]
    fn test_seeded_generators_repeat_output() {
        let mut a = Generator::new(Some(42));
        let mut b = Generator::new(Some(42));

        assert_eq!(
            a.waveform(300, EventType::Tremor).unwrap(),
            b.waveform(300, EventType::Tremor).unwrap()
        );
        assert_eq!(
            a.spectrogram(8, 16, EventType::Noise).unwrap(),
            b.spectrogram(8, 16, EventType::Noise).unwrap()
        );
    }

    #[test]
    fn test_consecutive_series_differ() {
        let mut generator = Generator::new(Some(42));
        let first = generator.waveform(64, EventType::Earthquake).unwrap();
        let second = generator.waveform(64, EventType::Earthquake).unwrap();
        assert_ne!(first, second);
    }
}
