//! Deterministic speech-like audio synthesis
//!
//! Generates the PCM behind the simulated session's audio tracks: a small
//! stack of harmonically unrelated partials under a syllable-rate envelope.
//! Everything derives from the sample position, so identical settings
//! always produce identical audio.

/// Relative weights of the three partials
const PARTIAL_WEIGHTS: [f32; 3] = [0.6, 0.25, 0.15];

/// Frequency ratios of the partials to the fundamental
const PARTIAL_RATIOS: [f32; 3] = [1.0, 3.1, 5.3];

/// Syllable envelope rate in Hz
const ENVELOPE_RATE: f32 = 3.5;

/// Speech-like tone generator
pub struct SpeechSynth {
    sample_rate: u32,
    fundamental: f32,
    /// Running sample position
    position: u64,
}

impl SpeechSynth {
    /// Create a generator with the given fundamental frequency
    pub fn new(sample_rate: u32, fundamental: f32) -> Self {
        Self {
            sample_rate,
            fundamental,
            position: 0,
        }
    }

    /// Produce the next block of samples
    ///
    /// `intensity` scales the output; zero yields a silent block. The sample
    /// position advances either way so speech resumes mid-phrase rather
    /// than restarting.
    pub fn next_block(&mut self, samples: usize, intensity: f32) -> Vec<f32> {
        let start = self.position;
        self.position += samples as u64;

        if intensity == 0.0 {
            return vec![0.0; samples];
        }

        let rate = self.sample_rate as f32;
        (0..samples)
            .map(|i| {
                let t = (start + i as u64) as f32 / rate;

                // Syllable-rate amplitude modulation, kept above zero so
                // phrases read as continuous speech
                let envelope =
                    0.55 + 0.45 * (2.0 * std::f32::consts::PI * ENVELOPE_RATE * t).sin();

                let mut sample = 0.0;
                for (weight, ratio) in PARTIAL_WEIGHTS.iter().zip(PARTIAL_RATIOS.iter()) {
                    let frequency = self.fundamental * ratio;
                    sample += weight * (2.0 * std::f32::consts::PI * frequency * t).sin();
                }

                intensity * envelope * sample
            })
            .collect()
    }
}
