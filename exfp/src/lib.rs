//! `exfp` is a library for exactly rounded reductions of floating-point
//! data: given a sequence of `f64` values (or pairs of values for dot
//! products and distances), it produces the `f64` closest to the
//! mathematically exact result, with ties rounded to even.
//!
//! The kernel making this possible is a small tower of immutable exact
//! numeric types:
//! - [UBig]: arbitrary-precision natural number on packed 32-bit words
//! - [SBig]: sign plus a `UBig` magnitude
//! - [BRat]: exact rational, `SBig` over `UBig`
//! - [BFlt]: `SBig` significand scaled by a signed binary exponent; the
//!   preferred summation representation, since its "denominator" is just a
//!   tracked power of two
//!
//! and the [acc] module's [Accumulator](acc::Accumulator) reducers that
//! consume `f64` streams through them. Rounding happens exactly once, in
//! [BFlt::to_f64]/[BRat::to_f64], which implement IEEE-754
//! round-half-to-even against the exact accumulated value.
//!
//! ```
//! use exfp::acc::{Accumulator, BigFloatAccumulator};
//!
//! let mut acc = BigFloatAccumulator::new();
//! acc.add_all(&[1.0e20, 1.0, -1.0e20]).unwrap();
//! // a plain `f64` summation loses the 1.0 to catastrophic cancellation
//! assert_eq!(acc.to_f64().unwrap(), 1.0);
//! ```
//!
//! The exact types are immutable and freely shareable across threads;
//! accumulators are mutable and single-writer. There are feature flags for
//! `rand_core` ("rand_support"), `serde` ("serde_support"), and `zeroize`
//! ("zeroize_support") integration.

#![no_std]
// the word loops read more uniformly with explicit indexes
#![allow(clippy::needless_range_loop)]
#![allow(clippy::manual_range_contains)]

extern crate alloc;

pub mod acc;
mod data;
mod error;
mod logic;

pub use data::{BFlt, BRat, SBig, Sign, UBig};
pub use error::Error;
pub(crate) use error::check_words;
pub use exfp_internals::{MAX_BITS, MAX_WORDS};
