/// Multi-device aggregation across scenarios A, B and C.
pub mod aggregate;
/// Sampling clock for the simulated day.
pub mod clock;
/// Sub-hourly load profile reconstruction.
pub mod profile;
pub mod types;
pub mod waveform;
