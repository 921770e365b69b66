use core::{cmp::Ordering, fmt};

use crate::{logic::round_f64, Error, SBig, Sign, UBig};

/// Splits a finite `f64` into its exact `(sign, significand, exponent)`
/// triple with value `significand * 2^exponent`: the hidden bit is restored
/// for normal values, subnormal values use the fixed minimum exponent, and
/// infinities and NaN are a `Domain` error.
pub(crate) fn split_f64(op: &'static str, x: f64) -> Result<(Sign, u64, i64), Error> {
    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64;
    let mantissa = bits & ((1u64 << 52) - 1);
    if exponent == 0x7ff {
        return Err(Error::Domain {
            op,
            msg: "non-finite input",
        })
    }
    let (m, e) = if exponent == 0 {
        // subnormal, or zero
        (mantissa, -1074)
    } else {
        (mantissa | (1u64 << 52), exponent - 1075)
    };
    let sign = if m == 0 {
        Sign::Zero
    } else if (bits >> 63) != 0 {
        Sign::Neg
    } else {
        Sign::Pos
    };
    Ok((sign, m, e))
}

/// An exact binary floating-point value `significand * 2^exponent`, with an
/// [SBig] significand and a signed binary exponent.
///
/// This is the preferred representation for exact summation: where a
/// rational accumulation grows arbitrary denominators, here the
/// "denominator" is always the tracked power of two, and addition aligns
/// exponents by shifting the larger-exponent significand up, losing
/// nothing.
///
/// The significand is not kept normalized (trailing zero bits are allowed),
/// so equality and ordering compare values, not representations:
/// `6 * 2^-1 == 3 * 2^0`. [BFlt::canonical] produces the odd-or-zero
/// normal form.
///
/// ```
/// use exfp::BFlt;
///
/// let x = BFlt::from_f64(1.0e20).unwrap();
/// let y = BFlt::from_f64(1.0).unwrap();
/// // exact: no bits of the 1.0 are absorbed
/// let sum = x.checked_add(&y).unwrap();
/// assert_eq!(sum.checked_sub(&x).unwrap(), y);
/// assert_eq!(sum.to_f64(), 1.0e20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BFlt {
    sig: SBig,
    exp: i64,
}

impl BFlt {
    /// Zero, canonically `(0, 0)`
    #[inline]
    pub const fn zero() -> Self {
        BFlt {
            sig: SBig::zero(),
            exp: 0,
        }
    }

    /// Constructs `sig * 2^exp`; zero significands pin the exponent to 0
    pub fn new(sig: SBig, exp: i64) -> Self {
        if sig.is_zero() {
            BFlt::zero()
        } else {
            BFlt { sig, exp }
        }
    }

    /// The exact value of a finite `f64`, or a `Domain` error for
    /// infinities and NaN. Nonzero values get `|significand|` in
    /// `[2^52, 2^53)` with exponent `unbiased - 52`; subnormals use
    /// exponent `-1074`.
    pub fn from_f64(x: f64) -> Result<BFlt, Error> {
        let (sign, m, e) = split_f64("BFlt::from_f64", x)?;
        Ok(BFlt::new(SBig::new(sign, UBig::from_u64(m)), e))
    }

    #[inline]
    pub fn significand(&self) -> &SBig {
        &self.sig
    }

    #[inline]
    pub fn exponent(&self) -> i64 {
        self.exp
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sig.sign()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sig.is_zero()
    }

    /// The canonical form: an odd (or zero) significand, trailing zero bits
    /// moved into the exponent
    pub fn canonical(&self) -> BFlt {
        if self.is_zero() {
            return BFlt::zero()
        }
        let tz = self.sig.magnitude().lo_bit();
        if tz == 0 {
            return self.clone()
        }
        BFlt {
            sig: self.sig.with_magnitude(self.sig.magnitude().shift_down(tz)),
            exp: self.exp + tz as i64,
        }
    }

    /// The `f64` nearest the exact value, ties to even
    #[inline]
    pub fn to_f64(&self) -> f64 {
        round_f64(self.sig.sign(), self.sig.magnitude(), self.exp, false)
    }

    /// Compares magnitudes bit-by-bit from the top, without materializing
    /// aligned significands
    fn cmp_abs(&self, rhs: &Self) -> Ordering {
        let a = self.sig.magnitude();
        let b = rhs.sig.magnitude();
        let ha = a.hi_bit() as i64 + self.exp;
        let hb = b.hi_bit() as i64 + rhs.exp;
        if ha != hb {
            return ha.cmp(&hb)
        }
        let lo = (a.lo_bit() as i64 + self.exp).min(b.lo_bit() as i64 + rhs.exp);
        let mut k = ha - 1;
        while k >= lo {
            let ba = k >= self.exp && a.test_bit((k - self.exp) as usize);
            let bb = k >= rhs.exp && b.test_bit((k - rhs.exp) as usize);
            match (ba, bb) {
                (true, false) => return Ordering::Greater,
                (false, true) => return Ordering::Less,
                _ => (),
            }
            k -= 1;
        }
        Ordering::Equal
    }
}

impl PartialEq for BFlt {
    fn eq(&self, rhs: &Self) -> bool {
        self.cmp(rhs) == Ordering::Equal
    }
}

impl Eq for BFlt {}

impl PartialOrd for BFlt {
    #[inline]
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

/// Total order consistent with the exact real value
impl Ord for BFlt {
    fn cmp(&self, rhs: &Self) -> Ordering {
        match self.sign().to_i32().cmp(&rhs.sign().to_i32()) {
            Ordering::Equal => (),
            ord => return ord,
        }
        match self.sign() {
            Sign::Zero => Ordering::Equal,
            Sign::Pos => self.cmp_abs(rhs),
            Sign::Neg => self.cmp_abs(rhs).reverse(),
        }
    }
}

/// Hex-float-like: the signed hexadecimal significand, `p`, and the decimal
/// binary exponent
impl fmt::Display for BFlt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p{}", self.sig, self.exp)
    }
}
