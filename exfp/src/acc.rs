//! Stateful reducers of `f64` streams with the contract "produce the `f64`
//! closest to the exact result".
//!
//! Every scalar operation is optional: the trait defaults return
//! [Error::Unsupported] as a value, never unwinding, and the array variants
//! iterate whatever scalar operations a backend provides. Mutators return
//! `&mut Self` so reductions chain fluently:
//!
//! ```
//! use exfp::acc::{Accumulator, BigFloatAccumulator};
//!
//! let mut acc = BigFloatAccumulator::new();
//! let total = acc.add(2.5)?.add_sq(3.0)?.to_f64()?;
//! assert_eq!(total, 11.5);
//! # Ok::<(), exfp::Error>(())
//! ```
//!
//! Accumulators are single-writer: share one across threads only behind
//! external synchronization. All inputs must be finite; a non-finite input
//! fails with a `Domain` error and poisons the accumulator, so the result
//! cannot be read until [clear](Accumulator::clear) — whichever of the
//! offending operation and the final [to_f64](Accumulator::to_f64) the
//! caller checks, the failure is seen.

mod bigfloat;
mod kahan;
mod rational;

use alloc::vec::Vec;

pub use bigfloat::BigFloatAccumulator;
pub use kahan::KahanAccumulator;
pub use rational::RationalAccumulator;

use crate::Error;

#[inline]
fn unsupported<T>(op: &'static str) -> Result<T, Error> {
    Err(Error::Unsupported { op })
}

#[inline]
fn length_mismatch(op: &'static str) -> Error {
    Error::Domain {
        op,
        msg: "input lengths differ",
    }
}

/// `|x|` without the std-only intrinsic
#[inline]
pub(crate) fn abs_f64(x: f64) -> f64 {
    f64::from_bits(x.to_bits() & (u64::MAX >> 1))
}

/// A mutable, non-thread-safe reducer of `f64` data sets, typically online
pub trait Accumulator {
    /// Whether results are equivalent to half-even rounding to nearest of
    /// an infinite-precision calculation
    fn is_exact(&self) -> bool;

    /// Whether intermediate results never silently overflow to an
    /// absorbing infinity state (they may still fail on implementation
    /// bounds such as memory)
    fn no_overflow(&self) -> bool;

    /// Resets to exact 0 and clears any poisoned state
    fn clear(&mut self) -> &mut Self;

    /// Half-even rounding of the accumulated value to the nearest `f64`
    fn to_f64(&self) -> Result<f64, Error> {
        unsupported("Accumulator::to_f64")
    }

    /// Adds `x`
    fn add(&mut self, x: f64) -> Result<&mut Self, Error> {
        let _ = x;
        unsupported("Accumulator::add")
    }

    /// Adds `|x|`
    fn add_abs(&mut self, x: f64) -> Result<&mut Self, Error> {
        let _ = x;
        unsupported("Accumulator::add_abs")
    }

    /// Adds `x^2`
    fn add_sq(&mut self, x: f64) -> Result<&mut Self, Error> {
        let _ = x;
        unsupported("Accumulator::add_sq")
    }

    /// Adds `a * b`
    fn add_prod(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        let _ = (a, b);
        unsupported("Accumulator::add_prod")
    }

    /// Adds the absolute difference `|a - b|`
    fn add_l1(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        let _ = (a, b);
        unsupported("Accumulator::add_l1")
    }

    /// Adds the squared difference `(a - b)^2`
    fn add_l2(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        let _ = (a, b);
        unsupported("Accumulator::add_l2")
    }

    fn add_all(&mut self, x: &[f64]) -> Result<&mut Self, Error> {
        for &xi in x {
            self.add(xi)?;
        }
        Ok(self)
    }

    fn add_abs_all(&mut self, x: &[f64]) -> Result<&mut Self, Error> {
        for &xi in x {
            self.add_abs(xi)?;
        }
        Ok(self)
    }

    fn add_sq_all(&mut self, x: &[f64]) -> Result<&mut Self, Error> {
        for &xi in x {
            self.add_sq(xi)?;
        }
        Ok(self)
    }

    /// Adds the dot product contribution of two equal-length slices
    fn add_prods(&mut self, x0: &[f64], x1: &[f64]) -> Result<&mut Self, Error> {
        if x0.len() != x1.len() {
            return Err(length_mismatch("Accumulator::add_prods"))
        }
        for i in 0..x0.len() {
            self.add_prod(x0[i], x1[i])?;
        }
        Ok(self)
    }

    /// Adds the L1 distance of two equal-length slices
    fn add_l1_distance(&mut self, x0: &[f64], x1: &[f64]) -> Result<&mut Self, Error> {
        if x0.len() != x1.len() {
            return Err(length_mismatch("Accumulator::add_l1_distance"))
        }
        for i in 0..x0.len() {
            self.add_l1(x0[i], x1[i])?;
        }
        Ok(self)
    }

    /// Adds the squared L2 distance of two equal-length slices
    fn add_l2_distance(&mut self, x0: &[f64], x1: &[f64]) -> Result<&mut Self, Error> {
        if x0.len() != x1.len() {
            return Err(length_mismatch("Accumulator::add_l2_distance"))
        }
        for i in 0..x0.len() {
            self.add_l2(x0[i], x1[i])?;
        }
        Ok(self)
    }

    /// Clears, then accumulates `x` element by element, recording the
    /// rounded running sum after each step
    fn partial_sums(&mut self, x: &[f64]) -> Result<Vec<f64>, Error> {
        self.clear();
        let mut out = Vec::with_capacity(x.len());
        for &xi in x {
            self.add(xi)?;
            out.push(self.to_f64()?);
        }
        Ok(out)
    }
}
