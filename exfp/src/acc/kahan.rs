use crate::{
    acc::{abs_f64, Accumulator},
    data::split_f64,
    Error,
};

/// Compensated (two-register distillation) summation: the classic running
/// sum plus a correction register.
///
/// This accumulator is *inexact* — it merely bounds the error far better
/// than a naive loop — and exists as the fast contrast case for the exact
/// backends in benchmarks and tests. The distance operations are left
/// unsupported; its error behavior under cancellation makes them
/// uninteresting here.
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanAccumulator {
    sum: f64,
    c: f64,
    poisoned: bool,
}

impl KahanAccumulator {
    pub fn new() -> Self {
        KahanAccumulator {
            sum: 0.0,
            c: 0.0,
            poisoned: false,
        }
    }

    fn fold(&mut self, op: &'static str, x: f64) -> Result<&mut Self, Error> {
        // reuse the non-finite rejection of the exact types; the
        // compensated arithmetic itself is allowed to overflow, which is
        // what `no_overflow() == false` declares
        if let Err(e) = split_f64(op, x) {
            self.poisoned = true;
            return Err(e)
        }
        self.step(x);
        Ok(self)
    }

    fn step(&mut self, x: f64) {
        let y = x - self.c;
        let t = self.sum + y;
        self.c = (t - self.sum) - y;
        self.sum = t;
    }
}

impl Accumulator for KahanAccumulator {
    fn is_exact(&self) -> bool {
        false
    }

    fn no_overflow(&self) -> bool {
        false
    }

    fn clear(&mut self) -> &mut Self {
        self.sum = 0.0;
        self.c = 0.0;
        self.poisoned = false;
        self
    }

    fn to_f64(&self) -> Result<f64, Error> {
        if self.poisoned {
            return Err(Error::Domain {
                op: "KahanAccumulator::to_f64",
                msg: "poisoned by an earlier non-finite input",
            })
        }
        Ok(self.sum)
    }

    fn add(&mut self, x: f64) -> Result<&mut Self, Error> {
        self.fold("KahanAccumulator::add", x)
    }

    fn add_abs(&mut self, x: f64) -> Result<&mut Self, Error> {
        self.fold("KahanAccumulator::add_abs", abs_f64(x))
    }

    fn add_sq(&mut self, x: f64) -> Result<&mut Self, Error> {
        if let Err(e) = split_f64("KahanAccumulator::add_sq", x) {
            self.poisoned = true;
            return Err(e)
        }
        self.step(x * x);
        Ok(self)
    }

    fn add_prod(&mut self, a: f64, b: f64) -> Result<&mut Self, Error> {
        if let Err(e) = split_f64("KahanAccumulator::add_prod", a)
            .and(split_f64("KahanAccumulator::add_prod", b))
        {
            self.poisoned = true;
            return Err(e)
        }
        self.step(a * b);
        Ok(self)
    }
}
