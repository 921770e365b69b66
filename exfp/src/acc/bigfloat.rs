use crate::{acc::Accumulator, BFlt, Error};

/// The exact accumulator backed by one running [BFlt].
///
/// Every operation folds its contribution into the running value with no
/// rounding; rounding happens once, in [to_f64](Accumulator::to_f64).
/// Because the "denominator" of a binary float is just its tracked
/// exponent, summing doubles never grows a denominator the way a rational
/// accumulation does, and the significand stays within a few thousand bits
/// for any finite-double workload.
#[derive(Debug, Clone, Default)]
pub struct BigFloatAccumulator {
    state: BFlt,
    poisoned: bool,
}

impl BigFloatAccumulator {
    pub fn new() -> Self {
        BigFloatAccumulator {
            state: BFlt::zero(),
            poisoned: false,
        }
    }

    /// The exact accumulated value
    pub fn value(&self) -> &BFlt {
        &self.state
    }

    /// Runs one folding step, poisoning the accumulator if the step
    /// rejects its input
    fn fold(&mut self, r: Result<BFlt, Error>) -> Result<&mut Self, Error> {
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

impl Accumulator for BigFloatAccumulator {
    fn is_exact(&self) -> bool {
        true
    }

    fn no_overflow(&self) -> bool {
        true
    }

    fn clear(&mut self) -> &mut Self {
        self.state = BFlt::zero();
        self.poisoned = false;
        self
    }

    fn to_f64(&self) -> Result<f64, Error> {
        if self.poisoned {
            return Err(Error::Domain {
                op: "BigFloatAccumulator::to_f64",
                msg: "poisoned by an earlier non-finite input",
            })
        }
        Ok(self.state.to_f64())
    }

    fn add(&mut self, x: f64) -> Result<&mut Self, Error> {
        let r = self.state.add_f64(x);
        self.fold(r)
    }

    fn add_abs(&mut self, x: f64) -> Result<&mut Self, Error> {
        let r = self.state.add_abs_f64(x);
        self.fold(r)
    }

    fn add_sq(&mut self, x: f64) -> Result<&mut Self, Error> {
        let r = self.state.add_sq_f64(x);
        self.fold(r)
    }

    fn add_prod(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        let r = self.state.add_prod_f64(a, b);
        self.fold(r)
    }

    fn add_l1(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        let r = self.state.add_abs_diff_f64(a, b);
        self.fold(r)
    }

    fn add_l2(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        let r = self.state.add_sq_diff_f64(a, b);
        self.fold(r)
    }
}
