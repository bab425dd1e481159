use alloc::vec::Vec;
use rand::RngCore;

/// The largest number of bits of entropy that can be simulated.
pub const MAX_SIMULATED_BITSPACE: u32 = 128;

/// The result of a number of simulated trials.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SimulationOutcome {
    pub trials: u32,
    /// The number of trials where at least two groups overlapped.
    pub collisions: u32,
}

impl SimulationOutcome {
    /// The observed proportion of trials that collided. Zero trials yields
    /// zero.
    pub fn ratio(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.collisions as f64 / self.trials as f64
        }
    }
}

// Draw a value uniformly from [0, 2^bitspace) by masking random bits.
fn draw<T>(rng: &mut T, bitspace: u32) -> u128
where
    T: RngCore,
{
    let lo = rng.next_u64() as u128;
    let value = if bitspace > 64 {
        lo | ((rng.next_u64() as u128) << 64)
    } else {
        lo
    };
    if bitspace >= MAX_SIMULATED_BITSPACE {
        value
    } else {
        value & ((1u128 << bitspace) - 1)
    }
}

/// Returns true if any two groups overlap. A group starting at `s`
/// occupies `s..=s + k` given its monotonic increments.
pub fn groups_overlap(starts: &mut [u128], k: u64) -> bool {
    starts.sort_unstable();
    starts
        .windows(2)
        .any(|pair| pair[1] - pair[0] <= k as u128)
}

/// Estimate the collision probability of `n` monotonic groups, each of
/// `k + 1` consecutive values, within a space of `2^bitspace` values.
///
/// Each trial draws a random start for every group and then checks for
/// overlap. Increments that would run past the end of the space are not
/// wrapped.
///
/// Panics if `bitspace` is zero or greater than [MAX_SIMULATED_BITSPACE].
pub fn simulate<T>(rng: &mut T, bitspace: u32, n: u64, k: u64, trials: u32) -> SimulationOutcome
where
    T: RngCore,
{
    assert!(bitspace > 0 && bitspace <= MAX_SIMULATED_BITSPACE);

    let mut starts = Vec::with_capacity(n as usize);
    let mut collisions = 0;
    for _ in 0..trials {
        starts.clear();
        starts.extend((0..n).map(|_| draw(rng, bitspace)));
        if groups_overlap(&mut starts, k) {
            collisions += 1;
        }
    }

    SimulationOutcome { trials, collisions }
}
