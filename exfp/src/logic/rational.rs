use core::cmp::Ordering;

use crate::{logic::round_f64, BRat, Error, SBig, Sign};

/// # Arithmetic
///
/// Sums and products are formed without reducing to lowest terms;
/// denominators only shrink through [BRat::reduced] or [BRat::to_f64].
impl BRat {
    /// Computes `p/q + r/s` as `(p*s + r*q) / (q*s)` exactly
    pub fn checked_add(&self, rhs: &Self) -> Result<BRat, Error> {
        if self.is_zero() {
            return Ok(rhs.clone())
        }
        if rhs.is_zero() {
            return Ok(self.clone())
        }
        let ps = self.num.checked_mul(&SBig::from_ubig(rhs.den.clone()))?;
        let rq = rhs.num.checked_mul(&SBig::from_ubig(self.den.clone()))?;
        Ok(BRat {
            num: ps.checked_add(&rq)?,
            den: self.den.checked_mul(&rhs.den)?,
        })
    }

    /// Computes `self - rhs` exactly
    #[inline]
    pub fn checked_sub(&self, rhs: &Self) -> Result<BRat, Error> {
        self.checked_add(&rhs.neg())
    }

    /// Computes `self * rhs` exactly
    pub fn checked_mul(&self, rhs: &Self) -> Result<BRat, Error> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(BRat::zero())
        }
        Ok(BRat {
            num: self.num.checked_mul(&rhs.num)?,
            den: self.den.checked_mul(&rhs.den)?,
        })
    }

    /// The negation of `self`
    pub fn neg(&self) -> BRat {
        BRat {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    /// The absolute value of `self`
    pub fn abs(&self) -> BRat {
        BRat {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    /// Computes `1 / self`, a `Domain` error for zero
    pub fn reciprocal(&self) -> Result<BRat, Error> {
        if self.is_zero() {
            return Err(Error::Domain {
                op: "BRat::reciprocal",
                msg: "reciprocal of zero",
            })
        }
        Ok(BRat {
            num: SBig::new(self.num.sign(), self.den.clone()),
            den: self.num.magnitude().clone(),
        })
    }

    /// Compares values by cross-multiplication with sign bookkeeping
    pub fn compare(&self, rhs: &Self) -> Result<Ordering, Error> {
        match self.sign().to_i32().cmp(&rhs.sign().to_i32()) {
            Ordering::Equal => (),
            ord => return Ok(ord),
        }
        if self.is_zero() {
            return Ok(Ordering::Equal)
        }
        // same nonzero sign: compare |p|*s against |r|*q
        let a = self.num.magnitude().checked_mul(&rhs.den)?;
        let b = rhs.num.magnitude().checked_mul(&self.den)?;
        Ok(if self.sign() == Sign::Pos {
            a.cmp(&b)
        } else {
            a.cmp(&b).reverse()
        })
    }

    /// The fraction in lowest terms
    pub fn reduced(&self) -> Result<BRat, Error> {
        if self.is_zero() {
            return Ok(BRat::zero())
        }
        let (n, d) = self.num.magnitude().reduce(&self.den)?;
        Ok(BRat {
            num: SBig::new(self.num.sign(), n),
            den: d,
        })
    }

    /// The `f64` nearest the exact value, ties to even. The quotient is
    /// computed to 54 or 55 bits, one past the target precision, and the
    /// division remainder feeds the sticky bit.
    pub fn to_f64(&self) -> Result<f64, Error> {
        if self.is_zero() {
            return Ok(0.0)
        }
        let red = self.reduced()?;
        let n = red.num.magnitude();
        let d = &red.den;
        let k = 54 - (n.hi_bit() as i64 - d.hi_bit() as i64);
        let (q, r) = if k >= 0 {
            n.shift_up(k as usize)?.divide_and_remainder(d)?
        } else {
            n.divide_and_remainder(&d.shift_up((-k) as usize)?)?
        };
        Ok(round_f64(red.num.sign(), &q, -k, !r.is_zero()))
    }
}
