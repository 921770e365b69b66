use core::cmp::Ordering;

use exfp_internals::*;

use crate::{data::split_f64, BFlt, Error, SBig, Sign, UBig};

/// The product of two `f64` significands as a `UBig`, via the full 128-bit
/// product
fn mag_u128(lo: u64, hi: u64) -> UBig {
    UBig::from_vec(alloc::vec![
        lo as Word,
        hi_word(lo) as Word,
        hi as Word,
        hi_word(hi) as Word,
    ])
}

/// # Arithmetic
///
/// Addition aligns exponents by shifting the larger-exponent significand
/// up by the exponent difference, which loses nothing; the result carries
/// the smaller exponent. The scalar `_f64` operations below are the
/// accumulation fast paths: a finite `f64` (or a product or square of two)
/// is folded into the value through the shifted-`u64` word operations, so
/// the common case allocates one result buffer and nothing else.
impl BFlt {
    /// Computes `self + rhs` exactly
    pub fn checked_add(&self, rhs: &Self) -> Result<BFlt, Error> {
        if self.is_zero() {
            return Ok(rhs.clone())
        }
        if rhs.is_zero() {
            return Ok(self.clone())
        }
        let exp = self.exponent().min(rhs.exponent());
        let s1 = self.significand().shift_up((self.exponent() - exp) as usize)?;
        let s2 = rhs.significand().shift_up((rhs.exponent() - exp) as usize)?;
        Ok(BFlt::new(s1.checked_add(&s2)?, exp))
    }

    /// Computes `self - rhs` exactly
    #[inline]
    pub fn checked_sub(&self, rhs: &Self) -> Result<BFlt, Error> {
        self.checked_add(&rhs.neg())
    }

    /// Computes `self * rhs` exactly
    pub fn checked_mul(&self, rhs: &Self) -> Result<BFlt, Error> {
        Ok(BFlt::new(
            self.significand().checked_mul(rhs.significand())?,
            self.exponent() + rhs.exponent(),
        ))
    }

    /// The negation of `self`
    pub fn neg(&self) -> BFlt {
        BFlt::new(self.significand().neg(), self.exponent())
    }

    /// The absolute value of `self`
    pub fn abs(&self) -> BFlt {
        BFlt::new(self.significand().abs(), self.exponent())
    }

    /// Folds `sign * m * 2^e` into the value using the three-word-window
    /// `u64` operations of the magnitude
    fn add_signed_u64(&self, sign: Sign, m: u64, e: i64) -> Result<BFlt, Error> {
        if m == 0 || sign == Sign::Zero {
            return Ok(self.clone())
        }
        if self.is_zero() {
            return Ok(BFlt::new(SBig::new(sign, UBig::from_u64(m)), e))
        }
        // align to the smaller exponent; shifting the accumulated value is
        // only needed when the incoming exponent is below it
        let aligned;
        let (mag, shift, exp) = if e >= self.exponent() {
            (
                self.significand().magnitude(),
                (e - self.exponent()) as usize,
                self.exponent(),
            )
        } else {
            aligned = self
                .significand()
                .magnitude()
                .shift_up((self.exponent() - e) as usize)?;
            (&aligned, 0, e)
        };
        if self.sign() == sign {
            return Ok(BFlt::new(
                SBig::new(sign, mag.add_u64_shifted(m, shift)?),
                exp,
            ))
        }
        Ok(match mag.cmp_u64_shifted(m, shift) {
            Ordering::Equal => BFlt::zero(),
            Ordering::Greater => BFlt::new(
                SBig::new(self.sign(), mag.sub_u64_shifted(m, shift)?),
                exp,
            ),
            Ordering::Less => BFlt::new(SBig::new(sign, mag.sub_from_u64_shifted(m, shift)?), exp),
        })
    }

    /// Computes `self + x` exactly
    pub fn add_f64(&self, x: f64) -> Result<BFlt, Error> {
        let (sign, m, e) = split_f64("BFlt::add_f64", x)?;
        self.add_signed_u64(sign, m, e)
    }

    /// Computes `self + |x|` exactly
    pub fn add_abs_f64(&self, x: f64) -> Result<BFlt, Error> {
        let (sign, m, e) = split_f64("BFlt::add_abs_f64", x)?;
        self.add_signed_u64(if sign == Sign::Zero { sign } else { Sign::Pos }, m, e)
    }

    /// Computes `self + x^2` exactly. `x^2` is itself representable as a
    /// 106-bit significand with a doubled exponent.
    pub fn add_sq_f64(&self, x: f64) -> Result<BFlt, Error> {
        let (sign, m, e) = split_f64("BFlt::add_sq_f64", x)?;
        if sign == Sign::Zero {
            return Ok(self.clone())
        }
        let (lo, hi) = wide_mul_u64(m, m);
        self.checked_add(&BFlt::new(SBig::new(Sign::Pos, mag_u128(lo, hi)), 2 * e))
    }

    /// Computes `self + a*b` exactly
    pub fn add_prod_f64(&self, a: f64, b: f64) -> Result<BFlt, Error> {
        let (sa, ma, ea) = split_f64("BFlt::add_prod_f64", a)?;
        let (sb, mb, eb) = split_f64("BFlt::add_prod_f64", b)?;
        let sign = sa.mul(sb);
        if sign == Sign::Zero {
            return Ok(self.clone())
        }
        let (lo, hi) = wide_mul_u64(ma, mb);
        self.checked_add(&BFlt::new(SBig::new(sign, mag_u128(lo, hi)), ea + eb))
    }

    /// Computes `self + |a - b|` exactly
    pub fn add_abs_diff_f64(&self, a: f64, b: f64) -> Result<BFlt, Error> {
        let d = BFlt::from_f64(a)?.checked_sub(&BFlt::from_f64(b)?)?;
        self.checked_add(&d.abs())
    }

    /// Computes `self + (a - b)^2` exactly
    pub fn add_sq_diff_f64(&self, a: f64, b: f64) -> Result<BFlt, Error> {
        let d = BFlt::from_f64(a)?.checked_sub(&BFlt::from_f64(b)?)?;
        let sq = BFlt::new(
            SBig::from_ubig(d.significand().magnitude().square()?),
            2 * d.exponent(),
        );
        self.checked_add(&sq)
    }
}
