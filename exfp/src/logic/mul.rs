use alloc::vec::Vec;

use exfp_internals::*;

use crate::{check_words, Error, SBig, UBig};

/// Schoolbook multiplication below this many words
const KARATSUBA_THRESHOLD: usize = 80;
/// Karatsuba multiplication below this many words, Toom-Cook 3 above
const TOOM3_THRESHOLD: usize = 240;
/// Schoolbook squaring below this many words
const KARATSUBA_SQUARE_THRESHOLD: usize = 128;
/// Karatsuba squaring below this many words, Toom-Cook 3 above
const TOOM3_SQUARE_THRESHOLD: usize = 216;

/// Fails early when a product of operands with the given hi-bits cannot fit
/// the word budget
#[inline]
fn check_product(op: &'static str, hb0: usize, hb1: usize) -> Result<(), Error> {
    // the product hi-bit is hb0 + hb1 or hb0 + hb1 - 1
    if hb0 + hb1 - 1 > MAX_BITS {
        return Err(Error::Overflow {
            op,
            words: (hb0 + hb1 + 31) >> 5,
        })
    }
    Ok(())
}

fn mul_schoolbook(x: &UBig, y: &UBig) -> UBig {
    let nt = x.len();
    let nu = y.len();
    let xx = x.as_words();
    let yy = y.as_words();
    let mut vv = alloc::vec![0; nt + nu];
    for i in 0..nt {
        // a carry from the short multiplication and one from the addition
        let mut carry0 = 0;
        let mut carry1 = 0;
        for j in 0..nu {
            let tmp0 = widen_mul_add(xx[i], yy[j], carry0);
            carry0 = tmp0.1;
            let tmp1 = widen_add(vv[i + j], tmp0.0, carry1);
            carry1 = tmp1.1;
            vv[i + j] = tmp1.0;
        }
        let tmp = widen_add(vv[i + nu], carry0, carry1);
        vv[i + nu] = tmp.0;
        let mut c = tmp.1;
        let mut k = i + nu + 1;
        // the value bound keeps this inside the buffer
        while c != 0 {
            let tmp = widen_add(vv[k], c, 0);
            vv[k] = tmp.0;
            c = tmp.1;
            k += 1;
        }
    }
    UBig::from_vec(vv)
}

fn mul_karatsuba(x: &UBig, y: &UBig) -> Result<UBig, Error> {
    let half = (x.len().max(y.len()) + 1) / 2;
    let xl = x.words_range(0, half);
    let xh = x.words_range(half, x.len());
    let yl = y.words_range(0, half);
    let yh = y.words_range(half, y.len());
    let p1 = xh.checked_mul(&yh)?;
    let p2 = xl.checked_mul(&yl)?;
    // (xh + xl)(yh + yl) - p1 - p2 == xh*yl + xl*yh
    let p3 = xh.checked_add(&xl)?.checked_mul(&yh.checked_add(&yl)?)?;
    let mid = p3.checked_sub(&p1.checked_add(&p2)?)?;
    p1.shift_up(64 * half)?
        .checked_add(&mid.shift_up(32 * half)?)?
        .checked_add(&p2)
}

/// Evaluation-point slices for Toom-Cook 3: `x = x2*B^2 + x1*B + x0` with
/// `B = 2^(32k)`
fn toom3_slices(x: &UBig, k: usize) -> (SBig, SBig, SBig) {
    (
        SBig::from_ubig(x.words_range(0, k)),
        SBig::from_ubig(x.words_range(k, 2 * k)),
        SBig::from_ubig(x.words_range(2 * k, x.len())),
    )
}

/// Exact halving and thirding of the even/divisible interpolation values
fn exact_shr1(v: &SBig) -> SBig {
    debug_assert!(!v.magnitude().test_bit(0));
    v.with_magnitude(v.magnitude().shift_down(1))
}

fn exact_div3(v: &SBig) -> Result<SBig, Error> {
    let (q, r) = v.magnitude().div_rem_word(3)?;
    debug_assert_eq!(r, 0);
    Ok(v.with_magnitude(q))
}

/// Toom-Cook 3-way multiplication, evaluating at the points
/// 0, 1, -1, -2, and infinity. The interpolation intermediates are signed.
fn mul_toom3(x: &UBig, y: &UBig) -> Result<UBig, Error> {
    let n = x.len().max(y.len());
    let k = (n + 2) / 3;
    let (a0, a1, a2) = toom3_slices(x, k);
    let (b0, b1, b2) = toom3_slices(y, k);

    let v0 = a0.checked_mul(&b0)?;
    let vinf = a2.checked_mul(&b2)?;
    let da1 = a2.checked_add(&a0)?;
    let db1 = b2.checked_add(&b0)?;
    let vm1 = da1.checked_sub(&a1)?.checked_mul(&db1.checked_sub(&b1)?)?;
    let da1 = da1.checked_add(&a1)?;
    let db1 = db1.checked_add(&b1)?;
    let v1 = da1.checked_mul(&db1)?;
    let v2 = da1
        .checked_add(&a2)?
        .shift_up(1)?
        .checked_sub(&a0)?
        .checked_mul(&db1.checked_add(&b2)?.shift_up(1)?.checked_sub(&b0)?)?;

    let t2 = exact_div3(&v2.checked_sub(&vm1)?)?;
    let tm1 = exact_shr1(&v1.checked_sub(&vm1)?);
    let mut t1 = v1.checked_sub(&v0)?;
    let t2 = exact_shr1(&t2.checked_sub(&t1)?);
    t1 = t1.checked_sub(&tm1)?.checked_sub(&vinf)?;
    let t2 = t2.checked_sub(&vinf.shift_up(1)?)?;
    let tm1 = tm1.checked_sub(&t2)?;

    let ss = 32 * k;
    let sum = vinf
        .shift_up(ss)?
        .checked_add(&t2)?
        .shift_up(ss)?
        .checked_add(&t1)?
        .shift_up(ss)?
        .checked_add(&tm1)?
        .shift_up(ss)?
        .checked_add(&v0)?;
    // the product of two naturals is a natural
    debug_assert!(!sum.is_negative());
    Ok(sum.into_magnitude())
}

/// Doubled-off-diagonal schoolbook squaring: `x^2` is the diagonal of the
/// partial-product square plus twice its upper triangle, so nearly half the
/// word products are skipped.
fn square_simple(x: &UBig) -> UBig {
    let nt = x.len();
    let xx = x.as_words();
    let mut vv: Vec<Word> = alloc::vec![0; 2 * nt];
    // upper triangle
    for i in 0..nt {
        let mut carry = 0;
        for j in (i + 1)..nt {
            let tmp0 = widen_mul_add(xx[i], xx[j], carry);
            let tmp1 = widen_add(vv[i + j], tmp0.0, 0);
            vv[i + j] = tmp1.0;
            carry = tmp0.1 + tmp1.1;
        }
        let mut c = carry;
        let mut k = i + nt;
        while c != 0 && k < 2 * nt {
            let tmp = widen_add(vv[k], c, 0);
            vv[k] = tmp.0;
            c = tmp.1;
            k += 1;
        }
    }
    // double it
    let mut carry = 0;
    for i in 0..(2 * nt) {
        let w = vv[i];
        vv[i] = (w << 1) | carry;
        carry = w >> 31;
    }
    // add the diagonal
    let mut carry = 0;
    for i in 0..nt {
        let tmp0 = widen_mul_add(xx[i], xx[i], carry);
        let tmp1 = widen_add(vv[2 * i], tmp0.0, 0);
        vv[2 * i] = tmp1.0;
        let tmp2 = widen_add(vv[2 * i + 1], tmp0.1, tmp1.1);
        vv[2 * i + 1] = tmp2.0;
        carry = tmp2.1;
    }
    debug_assert_eq!(carry, 0);
    UBig::from_vec(vv)
}

fn square_karatsuba(x: &UBig) -> Result<UBig, Error> {
    let half = (x.len() + 1) / 2;
    let xl = x.words_range(0, half);
    let xh = x.words_range(half, x.len());
    let low = xl.square()?;
    let high = xh.square()?;
    let cross = xh.checked_mul(&xl)?;
    high.shift_up(64 * half)?
        .checked_add(&cross.shift_up(32 * half + 1)?)?
        .checked_add(&low)
}

/// # Multiplication
impl UBig {
    /// Computes `self * rhs`. Three regimes are used depending on the larger
    /// operand's word count: schoolbook, Karatsuba, and Toom-Cook 3-way.
    pub fn checked_mul(&self, rhs: &Self) -> Result<UBig, Error> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(UBig::zero())
        }
        if self.is_one() {
            return Ok(rhs.clone())
        }
        if rhs.is_one() {
            return Ok(self.clone())
        }
        check_product("UBig::checked_mul", self.hi_bit(), rhs.hi_bit())?;
        if rhs.len() <= 2 {
            return self.mul_u64(match rhs.try_to_u64() {
                Ok(u) => u,
                Err(_) => unreachable!(),
            })
        }
        if self.len() <= 2 {
            return rhs.mul_u64(match self.try_to_u64() {
                Ok(u) => u,
                Err(_) => unreachable!(),
            })
        }
        let n = self.len().max(rhs.len());
        let v = if n < KARATSUBA_THRESHOLD {
            mul_schoolbook(self, rhs)
        } else if n < TOOM3_THRESHOLD {
            mul_karatsuba(self, rhs)?
        } else {
            mul_toom3(self, rhs)?
        };
        // the bit estimate above can be one word optimistic
        check_words("UBig::checked_mul", v.len())?;
        Ok(v)
    }

    /// Computes `self * u`
    pub fn mul_u64(&self, u: u64) -> Result<UBig, Error> {
        if u == 0 || self.is_zero() {
            return Ok(UBig::zero())
        }
        if u == 1 {
            return Ok(self.clone())
        }
        check_product("UBig::mul_u64", self.hi_bit(), hi_bit_u64(u))?;
        let lo = lo_word(u) as Word;
        let hi = hi_word(u) as Word;
        let nt = self.len();
        let tt = self.as_words();
        let nv = nt + if hi == 0 { 1 } else { 2 };
        let mut vv = alloc::vec![0; nv];
        let mut carry = 0;
        for i in 0..nt {
            let tmp = widen_mul_add(tt[i], lo, carry);
            vv[i] = tmp.0;
            carry = tmp.1;
        }
        vv[nt] = carry;
        if hi != 0 {
            let mut carry = 0;
            for i in 0..nt {
                let tmp0 = widen_mul_add(tt[i], hi, carry);
                let tmp1 = widen_add(vv[i + 1], tmp0.0, 0);
                vv[i + 1] = tmp1.0;
                carry = tmp0.1 + tmp1.1;
            }
            vv[nt + 1] = carry;
        }
        let v = UBig::from_vec(vv);
        check_words("UBig::mul_u64", v.len())?;
        Ok(v)
    }

    /// Computes `self * u * 2^up_shift`
    pub fn mul_u64_shifted(&self, u: u64, up_shift: usize) -> Result<UBig, Error> {
        self.mul_u64(u)?.shift_up(up_shift)
    }

    /// Computes `self * self`, with the same regime scheme as
    /// [UBig::checked_mul] under its own thresholds. Schoolbook squaring
    /// uses the doubled-off-diagonal identity.
    pub fn square(&self) -> Result<UBig, Error> {
        if self.is_zero() {
            return Ok(UBig::zero())
        }
        if self.is_one() {
            return Ok(UBig::one())
        }
        let hb = self.hi_bit();
        check_product("UBig::square", hb, hb)?;
        let n = self.len();
        let v = if n < KARATSUBA_SQUARE_THRESHOLD {
            square_simple(self)
        } else if n < TOOM3_SQUARE_THRESHOLD {
            square_karatsuba(self)?
        } else {
            mul_toom3(self, self)?
        };
        check_words("UBig::square", v.len())?;
        Ok(v)
    }
}
