//! Per-band volume aggregation
//!
//! Collapses the frequency sample batches delivered by the session layer
//! into one renderable magnitude per band.

/// Collapse one band of frequency samples into a single magnitude
///
/// The magnitude is the square root of the arithmetic mean of the samples,
/// which compresses peaks while keeping quiet bands visible. An empty band
/// yields 0.0 so missing data never turns into NaN. Samples are assumed
/// non-negative; NaN or negative inputs flow through the arithmetic
/// unchanged rather than being sanitized.
pub fn band_magnitude(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().sum();
    (sum / samples.len() as f32).sqrt()
}

/// Collapse a batch of bands into per-band magnitudes
///
/// The output preserves band order and length; an empty batch yields an
/// empty vector.
pub fn band_magnitudes(bands: &[Vec<f32>]) -> Vec<f32> {
    bands.iter().map(|band| band_magnitude(band)).collect()
}
