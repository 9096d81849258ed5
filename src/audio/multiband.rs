//! Multiband frequency analysis
//!
//! Converts PCM into the per-band frequency sample batches the panel
//! consumes: a windowed FFT over the most recent samples, bin magnitudes
//! normalized against a fixed decibel window, and the speech-relevant bins
//! split into a fixed number of contiguous bands.

use crate::session::BandSamples;
use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::Arc;

/// FFT length in samples
const FFT_SIZE: usize = 512;

/// Decibel treated as silence
const MIN_DB: f32 = -100.0;

/// Decibel treated as full scale
const MAX_DB: f32 = -30.0;

/// Lower edge of the analyzed spectrum
const LO_CUT_HZ: f32 = 200.0;

/// Upper edge of the analyzed spectrum
const HI_CUT_HZ: f32 = 12_000.0;

/// Streaming PCM to band-sample analyzer
pub struct MultibandAnalyzer {
    sample_rate: u32,
    band_count: usize,
    fft: Arc<dyn rustfft::Fft<f32>>,
    /// Pre-computed Hann window coefficients
    window: Vec<f32>,
    /// Most recent samples, at most `FFT_SIZE`
    buffer: Vec<f32>,
}

impl MultibandAnalyzer {
    /// Create an analyzer producing `band_count` bands
    pub fn new(sample_rate: u32, band_count: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        // Hann window, 0.5 * (1 - cos(2*pi*i / (N-1))), reduces spectral
        // leakage between neighboring bins
        let window = (0..FFT_SIZE)
            .map(|i| {
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (FFT_SIZE - 1) as f32).cos())
            })
            .collect();

        Self {
            sample_rate,
            band_count,
            fft,
            window,
            buffer: Vec::with_capacity(FFT_SIZE),
        }
    }

    /// Number of bands each frame carries
    pub fn band_count(&self) -> usize {
        self.band_count
    }

    /// Feed PCM samples into the analysis window
    ///
    /// Only the most recent `FFT_SIZE` samples are retained.
    pub fn push(&mut self, samples: &[f32]) {
        self.buffer.extend_from_slice(samples);
        let len = self.buffer.len();
        if len > FFT_SIZE {
            self.buffer.drain(0..len - FFT_SIZE);
        }
    }

    /// Analyze the current window into one batch of band samples
    ///
    /// Always yields exactly `band_count` bands. When the analyzed slice has
    /// fewer bins than bands the trailing bands are empty, and a window with
    /// too few samples is zero-padded at the front.
    pub fn frame(&mut self) -> BandSamples {
        // Windowed complex input, front-padded with silence if short
        let pad = FFT_SIZE - self.buffer.len();
        let mut spectrum: Vec<Complex<f32>> = (0..FFT_SIZE)
            .map(|i| {
                let sample = if i < pad { 0.0 } else { self.buffer[i - pad] };
                Complex::new(sample * self.window[i], 0.0)
            })
            .collect();

        self.fft.process(&mut spectrum);

        // Positive-frequency magnitudes, normalized by FFT length
        let magnitudes: Vec<f32> = spectrum[..FFT_SIZE / 2]
            .iter()
            .map(|c| (c.re * c.re + c.im * c.im).sqrt() / FFT_SIZE as f32)
            .collect();

        // Keep the speech-relevant slice
        let lo_bin = self.bin_for(LO_CUT_HZ).min(magnitudes.len());
        let hi_bin = self.bin_for(HI_CUT_HZ).min(magnitudes.len());
        let sliced = &magnitudes[lo_bin..hi_bin.max(lo_bin)];

        // Map each bin onto the decibel window
        let normalized: Vec<f32> = sliced.iter().map(|&m| normalize_db(m)).collect();

        // Chunk into contiguous bands
        let chunk = normalized.len().div_ceil(self.band_count.max(1)).max(1);
        (0..self.band_count)
            .map(|i| {
                let start = (i * chunk).min(normalized.len());
                let end = ((i + 1) * chunk).min(normalized.len());
                normalized[start..end].to_vec()
            })
            .collect()
    }

    /// FFT bin index for a frequency
    fn bin_for(&self, frequency: f32) -> usize {
        (frequency * FFT_SIZE as f32 / self.sample_rate as f32) as usize
    }
}

/// Map a linear magnitude onto the `[MIN_DB, MAX_DB]` window as 0..1
fn normalize_db(magnitude: f32) -> f32 {
    let db = 20.0 * magnitude.log10();
    if !db.is_finite() {
        return 0.0;
    }
    ((db - MIN_DB) / (MAX_DB - MIN_DB)).clamp(0.0, 1.0)
}
