use crate::{CHANNELS, SAMPLE_RATE};

/// Errors returned by `KnotSynth::init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The host runs at a rate other than the one the voice is tuned for
    SampleRate { actual: u32 },
    /// The output is not interleaved stereo
    Geometry { channels: u32 },
}

impl InitError {
    /// Numeric code reported to the host.
    pub fn code(&self) -> i32 {
        match self {
            InitError::SampleRate { .. } => -4,
            InitError::Geometry { .. } => -8,
        }
    }
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::SampleRate { actual } => {
                write!(
                    f,
                    "Unsupported sample rate: expected {} Hz, got {} Hz",
                    SAMPLE_RATE, actual
                )
            }
            InitError::Geometry { channels } => {
                write!(
                    f,
                    "Unsupported channel count: expected {}, got {}",
                    CHANNELS, channels
                )
            }
        }
    }
}

impl std::error::Error for InitError {}
