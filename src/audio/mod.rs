//! Audio analysis and synthesis
//!
//! The analyzer turns PCM into the per-band frequency batches the panel
//! renders; the synthesizer produces the deterministic PCM the simulated
//! session feeds through it.

pub mod multiband;
pub mod synth;

pub use multiband::MultibandAnalyzer;
pub use synth::SpeechSynth;
