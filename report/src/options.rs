//! Command line options. Every option defaults to the fixed report.

use clap::{Parser, ValueEnum};

use crate::sweep::{
    SimulationSettings, Sweep, DEFAULT_BITS, DEFAULT_MAX_GROUP_SIZE, DEFAULT_OBSERVATIONS,
    DEFAULT_PRECISION,
};

/// How sweep lines are written out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Headers, one line per group size and blank separators.
    #[default]
    Text,
    /// One JSON object per group size and nothing else.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "collision-report")]
#[command(
    about = "Probability of collision for monotonic ULID-style identifiers generated within the same millisecond"
)]
#[command(version)]
pub struct ReportOptions {
    /// Bits of entropy to report on, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_BITS)]
    pub bits: Vec<u32>,

    /// Identifiers generated in the same millisecond, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_OBSERVATIONS)]
    pub observations: Vec<u64>,

    /// Largest (odd) group size of the sweep
    #[arg(long, default_value_t = DEFAULT_MAX_GROUP_SIZE)]
    pub max_group_size: u64,

    /// Fractional digits kept when printing a probability
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    pub precision: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Cross-check each line with this many Monte Carlo trials
    #[arg(long)]
    pub simulate: Option<u32>,

    /// Seed for the Monte Carlo random number generator
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl ReportOptions {
    pub fn sweep(&self) -> Sweep {
        Sweep {
            bits: self.bits.clone(),
            observations: self.observations.clone(),
            max_group_size: self.max_group_size,
            precision: self.precision,
            simulation: self.simulate.map(|trials| SimulationSettings {
                trials,
                seed: self.seed,
            }),
        }
    }
}
