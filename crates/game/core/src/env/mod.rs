//! Read-only inputs the rules draw on besides the state itself.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};
