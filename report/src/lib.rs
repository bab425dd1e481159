#![doc = include_str!("../../README.md")]

use std::fmt;
use std::io::Write;

use collision_model::{collision_probability, entropy_space, simulate, Decimal, SimulationOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::{debug, info, trace};

pub mod error;
pub mod options;
pub mod sweep;

pub use error::ReportError;
pub use options::{OutputFormat, ReportOptions};
pub use sweep::{group_sizes, group_thousands, SimulationSettings, Sweep};

/// One parameter combination of a report and its collision probability.
#[derive(Debug, Serialize)]
pub struct SweepLine {
    pub bitspace: u32,
    pub observations: u64,
    /// The group size.
    pub g: u64,
    /// The number of groups i.e. `observations / g`.
    pub n: u64,
    /// The tie-break increments per group i.e. `g - 1`.
    pub k: u64,
    /// `p(n, k, d)` truncated to the report's precision.
    #[serde(serialize_with = "serialize_decimal")]
    pub p: Decimal,
    #[serde(
        rename = "simulated_collisions",
        serialize_with = "serialize_simulation",
        skip_serializing_if = "Option::is_none"
    )]
    pub simulation: Option<SimulationOutcome>,
}

fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

fn serialize_simulation<S>(
    simulation: &Option<SimulationOutcome>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match simulation {
        Some(outcome) => {
            let mut state = serializer.serialize_struct("SimulationOutcome", 3)?;
            state.serialize_field("trials", &outcome.trials)?;
            state.serialize_field("collisions", &outcome.collisions)?;
            state.serialize_field("ratio", &outcome.ratio())?;
            state.end()
        }
        None => serializer.serialize_none(),
    }
}

impl fmt::Display for SweepLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "g={} n={} k={} p(n, k, d)={}",
            self.g, self.n, self.k, self.p
        )
    }
}

/// Compute a single line of a report. The probability is truncated, never
/// rounded, to `precision` fractional digits and rendered without trailing
/// zeros.
pub fn sweep_line(bitspace: u32, observations: u64, g: u64, precision: u32) -> SweepLine {
    let k = g - 1;
    let n = observations / g;
    let d = entropy_space(bitspace);
    let p = collision_probability(n, k, &d)
        .truncate(precision)
        .trim_trailing_zeros();
    SweepLine {
        bitspace,
        observations,
        g,
        n,
        k,
        p,
        simulation: None,
    }
}

/// Writes collision reports for a sweep to some output.
pub struct Reporter<W> {
    out: W,
    format: OutputFormat,
    sweep: Sweep,
    rng: Option<(StdRng, u32)>,
}

impl<W> Reporter<W>
where
    W: Write,
{
    /// Validate the sweep and prepare to write to `out`.
    pub fn new(out: W, format: OutputFormat, sweep: Sweep) -> Result<Self, ReportError> {
        sweep.validate()?;
        let rng = sweep
            .simulation
            .map(|settings| (StdRng::seed_from_u64(settings.seed), settings.trials));
        Ok(Self {
            out,
            format,
            sweep,
            rng,
        })
    }

    /// Relinquish the output.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Names the observation count for the reports that follow e.g.
    /// `1,000 observations occurring at the same millisecond`.
    pub fn write_observations_header(&mut self, observations: u64) -> Result<(), ReportError> {
        if self.format == OutputFormat::Text {
            writeln!(
                self.out,
                "{} observations occurring at the same millisecond",
                group_thousands(observations)
            )?;
        }
        Ok(())
    }

    /// Write the report for one bit-width and observation count: a header
    /// followed by one line per group size in ascending order.
    pub fn write_report(&mut self, bitspace: u32, observations: u64) -> Result<(), ReportError> {
        debug!(bitspace, observations, d = %entropy_space(bitspace), "writing report");

        if self.format == OutputFormat::Text {
            writeln!(self.out, "report for {bitspace} bits of entropy")?;
        }

        for g in self.sweep.group_sizes() {
            let mut line = sweep_line(bitspace, observations, g, self.sweep.precision);
            if let Some((rng, trials)) = self.rng.as_mut() {
                line.simulation = Some(simulate(rng, bitspace, line.n, line.k, *trials));
            }
            trace!(g, n = line.n, k = line.k, p = %line.p, "computed");

            match self.format {
                OutputFormat::Text => {
                    writeln!(self.out, "{line}")?;
                    if let Some(outcome) = line.simulation {
                        writeln!(
                            self.out,
                            "  simulated={} collisions={}/{}",
                            outcome.ratio(),
                            outcome.collisions,
                            outcome.trials
                        )?;
                    }
                }
                OutputFormat::Json => {
                    serde_json::to_writer(&mut self.out, &line)?;
                    writeln!(self.out)?;
                }
            }
        }
        Ok(())
    }

    /// Write every report of the sweep. Each observation count is named
    /// before its reports, and reports are separated by a blank line.
    pub fn write_full_report(&mut self) -> Result<(), ReportError> {
        let bits = self.sweep.bits.clone();
        let observations = self.sweep.observations.clone();
        info!(
            reports = bits.len() * observations.len(),
            "writing collision report"
        );

        let mut first = true;
        for &observations in &observations {
            for (i, &bitspace) in bits.iter().enumerate() {
                if !first && self.format == OutputFormat::Text {
                    writeln!(self.out)?;
                }
                first = false;
                if i == 0 {
                    self.write_observations_header(observations)?;
                }
                self.write_report(bitspace, observations)?;
            }
        }

        info!("collision report written");
        Ok(())
    }
}
