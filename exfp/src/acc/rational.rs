use crate::{acc::Accumulator, BRat, Error};

/// The exact accumulator backed by one running [BRat].
///
/// Functionally interchangeable with
/// [BigFloatAccumulator](crate::acc::BigFloatAccumulator) on every
/// operation here, and the oracle the test suite compares it against
/// bit-for-bit; it additionally generalizes to division-bearing reductions
/// a binary float cannot represent. Denominators are products of powers of
/// two here, so the lazy reduction in [BRat::to_f64] keeps the final
/// division small.
#[derive(Debug, Clone, Default)]
pub struct RationalAccumulator {
    state: BRat,
    poisoned: bool,
}

impl RationalAccumulator {
    pub fn new() -> Self {
        RationalAccumulator {
            state: BRat::zero(),
            poisoned: false,
        }
    }

    /// The exact accumulated value
    pub fn value(&self) -> &BRat {
        &self.state
    }

    fn fold(&mut self, r: Result<BRat, Error>) -> Result<&mut Self, Error> {
        match r {
            Ok(state) => {
                self.state = state;
                Ok(self)
            }
            Err(e) => {
                if matches!(e, Error::Domain { .. }) {
                    self.poisoned = true;
                }
                Err(e)
            }
        }
    }
}

impl Accumulator for RationalAccumulator {
    fn is_exact(&self) -> bool {
        true
    }

    fn no_overflow(&self) -> bool {
        true
    }

    fn clear(&mut self) -> &mut Self {
        self.state = BRat::zero();
        self.poisoned = false;
        self
    }

    fn to_f64(&self) -> Result<f64, Error> {
        if self.poisoned {
            return Err(Error::Domain {
                op: "RationalAccumulator::to_f64",
                msg: "poisoned by an earlier non-finite input",
            })
        }
        self.state.to_f64()
    }

    fn add(&mut self, x: f64) -> Result<&mut Self, Error> {
        let r = BRat::from_f64(x).and_then(|r| self.state.checked_add(&r));
        self.fold(r)
    }

    fn add_abs(&mut self, x: f64) -> Result<&mut Self, Error> {
        let r = BRat::from_f64(x).and_then(|r| self.state.checked_add(&r.abs()));
        self.fold(r)
    }

    fn add_sq(&mut self, x: f64) -> Result<&mut Self, Error> {
        let r = BRat::from_f64(x)
            .and_then(|r| r.checked_mul(&r))
            .and_then(|sq| self.state.checked_add(&sq));
        self.fold(r)
    }

    fn add_prod(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        let r = BRat::from_f64(a)
            .and_then(|ra| Ok((ra, BRat::from_f64(b)?)))
            .and_then(|(ra, rb)| ra.checked_mul(&rb))
            .and_then(|p| self.state.checked_add(&p));
        self.fold(r)
    }

    fn add_l1(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        let r = BRat::from_f64(a)
            .and_then(|ra| Ok((ra, BRat::from_f64(b)?)))
            .and_then(|(ra, rb)| ra.checked_sub(&rb))
            .and_then(|d| self.state.checked_add(&d.abs()));
        self.fold(r)
    }

    fn add_l2(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        let r = BRat::from_f64(a)
            .and_then(|ra| Ok((ra, BRat::from_f64(b)?)))
            .and_then(|(ra, rb)| ra.checked_sub(&rb))
            .and_then(|d| d.checked_mul(&d))
            .and_then(|sq| self.state.checked_add(&sq));
        self.fold(r)
    }
}
