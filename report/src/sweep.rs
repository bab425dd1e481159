use std::iter::StepBy;
use std::ops::RangeInclusive;

use collision_model::simulation::MAX_SIMULATED_BITSPACE;

use crate::error::ReportError;

/// The bit-widths reported on by default.
pub const DEFAULT_BITS: [u32; 3] = [22, 32, 80];

/// The observation counts reported on by default.
pub const DEFAULT_OBSERVATIONS: [u64; 2] = [1000, 10000];

/// The largest group size swept by default.
pub const DEFAULT_MAX_GROUP_SIZE: u64 = 29;

/// The number of fractional digits kept when a probability is printed.
pub const DEFAULT_PRECISION: u32 = 40;

/// The largest observation count that can be simulated.
pub const MAX_SIMULATED_OBSERVATIONS: u64 = 1_000_000;

/// Monte Carlo settings for cross-checking each sweep line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SimulationSettings {
    pub trials: u32,
    pub seed: u64,
}

/// The parameter combinations making up a full report.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sweep {
    /// Bits of entropy, reported in the order given.
    pub bits: Vec<u32>,
    /// Identifiers generated within the same millisecond.
    pub observations: Vec<u64>,
    pub max_group_size: u64,
    pub precision: u32,
    pub simulation: Option<SimulationSettings>,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS.to_vec(),
            observations: DEFAULT_OBSERVATIONS.to_vec(),
            max_group_size: DEFAULT_MAX_GROUP_SIZE,
            precision: DEFAULT_PRECISION,
            simulation: None,
        }
    }
}

impl Sweep {
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.bits.is_empty() || self.observations.is_empty() {
            return Err(ReportError::EmptySweep);
        }
        if self.max_group_size % 2 == 0 {
            return Err(ReportError::InvalidGroupSize {
                max: self.max_group_size,
            });
        }
        if self.simulation.is_some() {
            if let Some(&bits) = self
                .bits
                .iter()
                .find(|&&bits| bits == 0 || bits > MAX_SIMULATED_BITSPACE)
            {
                return Err(ReportError::UnsupportedBitspace {
                    bits,
                    max: MAX_SIMULATED_BITSPACE,
                });
            }
            if let Some(&observations) = self
                .observations
                .iter()
                .find(|&&observations| observations > MAX_SIMULATED_OBSERVATIONS)
            {
                return Err(ReportError::TooManySimulatedObservations {
                    observations,
                    max: MAX_SIMULATED_OBSERVATIONS,
                });
            }
        }
        Ok(())
    }

    pub fn group_sizes(&self) -> StepBy<RangeInclusive<u64>> {
        group_sizes(self.max_group_size)
    }
}

/// The odd group sizes `1, 3, 5, ..., max`.
pub fn group_sizes(max: u64) -> StepBy<RangeInclusive<u64>> {
    (1..=max).step_by(2)
}

/// Render a count with a comma between each group of three digits
/// e.g. `10,000`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
