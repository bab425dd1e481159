use thiserror::Error;

/// Errors raised while configuring or writing a collision report. The
/// probability arithmetic itself cannot fail.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the report out failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sweep line could not be encoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Group sizes are odd and start at 1, so the largest must be too.
    #[error("maximum group size must be odd and at least 1, got {max}")]
    InvalidGroupSize { max: u64 },

    #[error("at least one bit-width and one observation count are required")]
    EmptySweep,

    /// The simulator draws starts from at most 128 random bits.
    #[error("cannot simulate {bits} bits of entropy, expected 1..={max}")]
    UnsupportedBitspace { bits: u32, max: u32 },

    /// Every simulated trial holds one start per group in memory.
    #[error("cannot simulate {observations} observations, expected at most {max}")]
    TooManySimulatedObservations { observations: u64, max: u64 },
}
