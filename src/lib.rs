//! Minimum and maximum over a sliding window of a stream of samples,
//! in amortized O(1) time per sample and without allocating after construction.
//!
//! ```
//! use movingminmax::MovingMinMax;
//!
//! let mut m = MovingMinMax::both(3).unwrap();
//! m.extend([1.0, 3.0, 2.0, 5.0, 4.0, 1.0]);
//! assert_eq!(m.min(), Ok(1.0));
//! assert_eq!(m.max(), Ok(5.0));
//! ```

pub mod deque;
mod error;
pub mod moving_mean;
pub mod moving_minmax;
pub mod offline;
#[cfg(feature = "python-bindings")]
mod py;
pub mod wedge;

pub use deque::{next_power_of_two, BoundedDeque};
pub use error::{Error, Result};
pub use moving_mean::MovingMean;
pub use moving_minmax::{Mode, MovingMinMax};
pub use wedge::Sample;

use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

/// Generate `n` random samples in `[0, 1)` from a generator seeded with `seed`.
pub fn generate_random_samples(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

#[cfg(test)]
#[ctor::ctor]
fn install_backtrace() {
    color_backtrace::install();
}
