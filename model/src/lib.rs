#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]

extern crate alloc;

pub mod decimal;
pub mod probability;
pub mod simulation;

pub use decimal::{Decimal, ParseDecimalError};
pub use probability::{collision_probability, entropy_space};
pub use simulation::{simulate, SimulationOutcome};
