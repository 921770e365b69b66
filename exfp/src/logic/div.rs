use alloc::vec::Vec;
use core::{cmp::Ordering, mem};

use exfp_internals::*;

use crate::{Error, SBig, UBig};

/// Knuth division below this many divisor words, Burnikel-Ziegler above
const BURNIKEL_ZIEGLER_THRESHOLD: usize = 80;
/// Burnikel-Ziegler additionally requires this many words of length excess
/// in the dividend
const BURNIKEL_ZIEGLER_OFFSET: usize = 40;

#[inline]
fn zero_divisor(op: &'static str) -> Error {
    Error::Domain {
        op,
        msg: "division by zero",
    }
}

/// `2^(32*words) - 1`
fn ones(words: usize) -> UBig {
    UBig::from_vec(alloc::vec![MAX; words])
}

/// `hi * 2^(32*words) + lo`, where `lo` occupies at most `words` words
fn concat(hi: &UBig, lo: &UBig, words: usize) -> UBig {
    debug_assert!(lo.len() <= words);
    if hi.is_zero() {
        return lo.clone()
    }
    let mut vv = alloc::vec![0; words + hi.len()];
    vv[..lo.len()].copy_from_slice(lo.as_words());
    vv[words..].copy_from_slice(hi.as_words());
    UBig::from_vec(vv)
}

/// Knuth's algorithm D on normalized word buffers. Preconditions:
/// `div.len() >= 2` and `duo >= div`.
fn knuth_core(duo: &UBig, div: &UBig) -> (UBig, UBig) {
    let m = duo.len();
    let n = div.len();
    debug_assert!(n >= 2 && m >= n);
    let s = div.as_words()[n - 1].leading_zeros() as usize;

    // normalize so the divisor's top bit is set
    let mut v = alloc::vec![0; n];
    let mut u = alloc::vec![0; m + 1];
    if s == 0 {
        v.copy_from_slice(div.as_words());
        u[..m].copy_from_slice(duo.as_words());
    } else {
        let r = 32 - s;
        for i in (1..n).rev() {
            v[i] = (div.as_words()[i] << s) | (div.as_words()[i - 1] >> r);
        }
        v[0] = div.as_words()[0] << s;
        u[m] = duo.as_words()[m - 1] >> r;
        for i in (1..m).rev() {
            u[i] = (duo.as_words()[i] << s) | (duo.as_words()[i - 1] >> r);
        }
        u[0] = duo.as_words()[0] << s;
    }

    let mut q = alloc::vec![0; m - n + 1];
    let vn1 = v[n - 1] as u64;
    let vn2 = v[n - 2] as u64;
    for j in (0..=(m - n)).rev() {
        // estimate the quotient word from the top two dividend words, then
        // correct it with the third
        let un = ((u[j + n] as u64) << 32) | (u[j + n - 1] as u64);
        let mut qhat = un / vn1;
        let mut rhat = un % vn1;
        while qhat > MAX as u64 || qhat * vn2 > ((rhat << 32) | (u[j + n - 2] as u64)) {
            qhat -= 1;
            rhat += vn1;
            if rhat > MAX as u64 {
                break
            }
        }
        // multiply and subtract
        let mut borrow: i64 = 0;
        for i in 0..n {
            let p = qhat * (v[i] as u64);
            let t = (u[i + j] as i64) - borrow - ((p & (MAX as u64)) as i64);
            u[i + j] = t as Word;
            borrow = ((p >> 32) as i64) - (t >> 32);
        }
        let t = (u[j + n] as i64) - borrow;
        u[j + n] = t as Word;
        if t < 0 {
            // the estimate was one too large, add the divisor back
            qhat -= 1;
            let mut carry = 0;
            for i in 0..n {
                let tmp = widen_add(u[i + j], v[i], carry);
                u[i + j] = tmp.0;
                carry = tmp.1;
            }
            u[j + n] = u[j + n].wrapping_add(carry);
        }
        q[j] = qhat as Word;
    }

    // denormalize the remainder
    let mut r = alloc::vec![0; n];
    if s == 0 {
        r.copy_from_slice(&u[..n]);
    } else {
        for i in 0..(n - 1) {
            r[i] = (u[i] >> s) | (u[i + 1] << (32 - s));
        }
        r[n - 1] = u[n - 1] >> s;
    }
    (UBig::from_vec(q), UBig::from_vec(r))
}

/// Divides `a` (up to `2n` words, `a < div * 2^(32n)`) by the `n`-word
/// normalized divisor `div`, Burnikel-Ziegler style
fn divide_2n1n(a: &UBig, div: &UBig, n: usize) -> Result<(UBig, UBig), Error> {
    if (n & 1) == 1 || n < BURNIKEL_ZIEGLER_THRESHOLD {
        return a.divide_and_remainder_knuth(div)
    }
    let half = n / 2;
    // view a as four half-word blocks; the top three go through the first
    // 3n/2-by-n step, the remainder picks up the fourth
    let a123 = a.shift_down(32 * half);
    let a4 = a.words_range(0, half);
    let (q1, r1) = divide_3n2n(&a123, div, half)?;
    let (q2, r2) = divide_3n2n(&concat(&r1, &a4, half), div, half)?;
    Ok((concat(&q1, &q2, half), r2))
}

/// Divides `a` (up to `3*half` words) by the `2*half`-word normalized
/// divisor `div`, returning a `half`-word quotient
fn divide_3n2n(a: &UBig, div: &UBig, half: usize) -> Result<(UBig, UBig), Error> {
    let a12 = a.shift_down(32 * half);
    let a3 = a.words_range(0, half);
    let b1 = div.words_range(half, 2 * half);
    let b2 = div.words_range(0, half);
    let a1 = a12.words_range(half, a12.len());
    let (q, r) = if a1.cmp(&b1) == Ordering::Less {
        divide_2n1n(&a12, &b1, half)?
    } else {
        // quotient is the all-ones maximum; r = a12 - b1*2^(32*half) + b1
        let r = a12
            .checked_sub(&b1.shift_up(32 * half)?)?
            .checked_add(&b1)?;
        (ones(half), r)
    };
    let d = q.checked_mul(&b2)?;
    let mut rr = SBig::from_ubig(concat(&r, &a3, half)).checked_sub(&SBig::from_ubig(d))?;
    let mut q = q;
    // at most two corrections
    while rr.is_negative() {
        rr = rr.checked_add(&SBig::from_ubig(div.clone()))?;
        q = q.checked_sub(&UBig::one())?;
    }
    Ok((q, rr.into_magnitude()))
}

fn burnikel_ziegler(duo: &UBig, div: &UBig) -> Result<(UBig, UBig), Error> {
    let s = div.len();
    // the smallest power of two m with s/m below the threshold
    let m = 1usize << (usize::BITS - (s / BURNIKEL_ZIEGLER_THRESHOLD).leading_zeros());
    let j = (s + m - 1) / m;
    // block length in words, and the shift aligning the divisor's top bit
    // with the top of its block
    let n = j * m;
    let n32 = 32 * n;
    let sigma = n32 - div.hi_bit();
    let bb = div.shift_up(sigma)?;
    let aa = duo.shift_up(sigma)?;
    let t = (2usize).max((aa.hi_bit() + n32) / n32);

    let block = |i: usize| aa.words_range(i * n, (i + 1) * n);
    let mut z = concat(&block(t - 1), &block(t - 2), n);
    let mut quotient = UBig::zero();
    let mut i = t - 2;
    let rem = loop {
        let (qi, ri) = divide_2n1n(&z, &bb, n)?;
        quotient = concat(&quotient, &qi, n);
        if i == 0 {
            break ri
        }
        z = concat(&ri, &block(i - 1), n);
        i -= 1;
    };
    Ok((quotient, rem.shift_down(sigma)))
}

/// # Division
impl UBig {
    /// Computes `(floor(self / div), self mod div)` with a single short
    /// division pass, `div` being one word
    pub fn div_rem_word(&self, div: Word) -> Result<(UBig, Word), Error> {
        if div == 0 {
            return Err(zero_divisor("UBig::div_rem_word"))
        }
        let nt = self.len();
        let mut vv = alloc::vec![0; nt];
        let mut rem = 0u64;
        for i in (0..nt).rev() {
            let duo = (rem << 32) | self.uword(i);
            vv[i] = (duo / (div as u64)) as Word;
            rem = duo % (div as u64);
        }
        Ok((UBig::from_vec(vv), rem as Word))
    }

    /// Computes `(floor(self / div), self mod div)`, so that
    /// `self == quotient * div + remainder` and `0 <= remainder < div`.
    /// Fails with a `Domain` error for `div == 0`. Below a divisor size
    /// threshold this runs Knuth's algorithm D, above it Burnikel-Ziegler
    /// recursive division.
    pub fn divide_and_remainder(&self, div: &Self) -> Result<(UBig, UBig), Error> {
        if div.is_zero() {
            return Err(zero_divisor("UBig::divide_and_remainder"))
        }
        if self.cmp(div) == Ordering::Less {
            return Ok((UBig::zero(), self.clone()))
        }
        // single-bit divisors reduce to a shift and a mask; the rational
        // accumulation path divides by powers of two almost exclusively
        let k = div.lo_bit();
        if div.hi_bit() == k + 1 {
            return Ok((self.shift_down(k), self.low_bits(k)))
        }
        if div.len() < BURNIKEL_ZIEGLER_THRESHOLD
            || self.len() - div.len() < BURNIKEL_ZIEGLER_OFFSET
        {
            self.divide_and_remainder_knuth(div)
        } else {
            self.divide_and_remainder_burnikel_ziegler(div)
        }
    }

    /// The Knuth algorithm D path of [UBig::divide_and_remainder], exposed
    /// for testing
    pub fn divide_and_remainder_knuth(&self, div: &Self) -> Result<(UBig, UBig), Error> {
        if div.is_zero() {
            return Err(zero_divisor("UBig::divide_and_remainder_knuth"))
        }
        if self.cmp(div) == Ordering::Less {
            return Ok((UBig::zero(), self.clone()))
        }
        if div.len() == 1 {
            let (q, r) = self.div_rem_word(div.as_words()[0])?;
            return Ok((q, UBig::from_vec(alloc::vec![r])))
        }
        Ok(knuth_core(self, div))
    }

    /// The Burnikel-Ziegler path of [UBig::divide_and_remainder], exposed
    /// for testing
    pub fn divide_and_remainder_burnikel_ziegler(
        &self,
        div: &Self,
    ) -> Result<(UBig, UBig), Error> {
        if div.is_zero() {
            return Err(zero_divisor("UBig::divide_and_remainder_burnikel_ziegler"))
        }
        if self.cmp(div) == Ordering::Less {
            return Ok((UBig::zero(), self.clone()))
        }
        if div.len() == 1 {
            let (q, r) = self.div_rem_word(div.as_words()[0])?;
            return Ok((q, UBig::from_vec(alloc::vec![r])))
        }
        burnikel_ziegler(self, div)
    }

    /// The quotient projection of [UBig::divide_and_remainder]
    #[inline]
    pub fn divide(&self, div: &Self) -> Result<UBig, Error> {
        Ok(self.divide_and_remainder(div)?.0)
    }

    /// The remainder projection of [UBig::divide_and_remainder]
    #[inline]
    pub fn remainder(&self, div: &Self) -> Result<UBig, Error> {
        Ok(self.divide_and_remainder(div)?.1)
    }

    /// Computes the greatest common divisor of `self` and `rhs`, binary GCD
    /// with a word-sized Euclid fast path
    pub fn gcd(&self, rhs: &Self) -> Result<UBig, Error> {
        if self.is_zero() {
            return Ok(rhs.clone())
        }
        if rhs.is_zero() {
            return Ok(self.clone())
        }
        let ta = self.lo_bit();
        let tb = rhs.lo_bit();
        let k = ta.min(tb);
        let mut a = self.shift_down(ta);
        let mut b = rhs.shift_down(tb);
        // both odd from here on
        loop {
            if a.is_one() || b.is_one() {
                a = UBig::one();
                break
            }
            if a.len() <= 2 && b.len() <= 2 {
                let mut x = match a.try_to_u64() {
                    Ok(x) => x,
                    Err(_) => unreachable!(),
                };
                let mut y = match b.try_to_u64() {
                    Ok(y) => y,
                    Err(_) => unreachable!(),
                };
                while y != 0 {
                    let t = x % y;
                    x = y;
                    y = t;
                }
                a = UBig::from_u64(x);
                break
            }
            match a.cmp(&b) {
                Ordering::Equal => break,
                Ordering::Less => mem::swap(&mut a, &mut b),
                Ordering::Greater => (),
            }
            // a > b, both odd: the difference is even and nonzero
            let d = a.checked_sub(&b)?;
            a = d.shift_down(d.lo_bit());
        }
        a.shift_up(k)
    }

    /// Reduces the fraction `self / den` to lowest terms, returning the
    /// reduced `(numerator, denominator)` pair
    pub fn reduce(&self, den: &Self) -> Result<(UBig, UBig), Error> {
        if den.is_zero() {
            return Err(zero_divisor("UBig::reduce"))
        }
        if self.is_zero() {
            return Ok((UBig::zero(), UBig::one()))
        }
        let g = self.gcd(den)?;
        if g.is_one() {
            return Ok((self.clone(), den.clone()))
        }
        Ok((self.divide(&g)?, den.divide(&g)?))
    }
}

#[cfg(test)]
mod tests {
    use rand_xoshiro::{
        rand_core::{RngCore, SeedableRng},
        Xoshiro128StarStar,
    };

    use super::*;

    fn random_ubig(rng: &mut Xoshiro128StarStar, words: usize) -> UBig {
        let mut vv = alloc::vec![0; words];
        for w in vv.iter_mut() {
            *w = rng.next_u32();
        }
        UBig::from_vec(vv)
    }

    /// Knuth and Burnikel-Ziegler must agree bitwise, and both must satisfy
    /// the division law, at sizes where the recursive splitting actually
    /// happens
    #[test]
    fn knuth_vs_burnikel_ziegler() {
        let mut rng = Xoshiro128StarStar::seed_from_u64(0);
        for &(nd, nv) in &[
            (
                2 * BURNIKEL_ZIEGLER_THRESHOLD + BURNIKEL_ZIEGLER_OFFSET,
                BURNIKEL_ZIEGLER_THRESHOLD,
            ),
            (
                4 * BURNIKEL_ZIEGLER_THRESHOLD + 17,
                2 * BURNIKEL_ZIEGLER_THRESHOLD + 1,
            ),
            (331, 97),
        ] {
            let duo = random_ubig(&mut rng, nd);
            let div = random_ubig(&mut rng, nv);
            let (q0, r0) = duo.divide_and_remainder_knuth(&div).unwrap();
            let (q1, r1) = duo.divide_and_remainder_burnikel_ziegler(&div).unwrap();
            assert_eq!(q0, q1);
            assert_eq!(r0, r1);
            assert!(r0.cmp(&div) == Ordering::Less);
            let back = q0.checked_mul(&div).unwrap().checked_add(&r0).unwrap();
            assert_eq!(back, duo);
        }
    }

    /// The qhat estimate correction and add-back paths need top-heavy
    /// dividends to trigger
    #[test]
    fn knuth_edge_patterns() {
        // all-ones dividends against divisors just below a power of two
        // exercise the correction loop
        for n in 2..6usize {
            let duo = ones(2 * n);
            for sub in 1..4u64 {
                let div = UBig::from_u64_shifted(1, 32 * n).unwrap().sub_u64(sub).unwrap();
                let (q, r) = duo.divide_and_remainder_knuth(&div).unwrap();
                assert!(r.cmp(&div) == Ordering::Less);
                let back = q.checked_mul(&div).unwrap().checked_add(&r).unwrap();
                assert_eq!(back, duo);
            }
        }
    }

    #[test]
    fn gcd_laws() {
        let mut rng = Xoshiro128StarStar::seed_from_u64(2);
        for _ in 0..50 {
            let g = random_ubig(&mut rng, 3);
            let a = random_ubig(&mut rng, 5).checked_mul(&g).unwrap();
            let b = random_ubig(&mut rng, 4).checked_mul(&g).unwrap();
            let d = a.gcd(&b).unwrap();
            // the planted factor divides the gcd, and the gcd divides both
            if !g.is_zero() {
                assert!(d.remainder(&g).unwrap().is_zero());
            }
            if !d.is_zero() {
                assert!(a.remainder(&d).unwrap().is_zero());
                assert!(b.remainder(&d).unwrap().is_zero());
            }
        }
        let x = UBig::from_u64(12);
        assert_eq!(x.gcd(&UBig::zero()).unwrap(), x);
        assert_eq!(UBig::zero().gcd(&x).unwrap(), x);
        assert_eq!(x.gcd(&UBig::from_u64(18)).unwrap(), UBig::from_u64(6));
    }
}
