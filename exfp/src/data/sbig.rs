use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use crate::{Error, UBig};

/// The sign of an [SBig] (and of the exact value of a [BRat](crate::BRat)
/// or [BFlt](crate::BFlt))
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    Neg,
    #[default]
    Zero,
    Pos,
}

impl Sign {
    /// The sign of the negated value
    #[inline]
    pub fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Zero => Sign::Zero,
            Sign::Pos => Sign::Neg,
        }
    }

    /// The sign of a product of values with signs `self` and `rhs`
    #[inline]
    pub fn mul(self, rhs: Sign) -> Sign {
        match (self, rhs) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (Sign::Pos, Sign::Pos) | (Sign::Neg, Sign::Neg) => Sign::Pos,
            _ => Sign::Neg,
        }
    }

    /// -1, 0, or 1
    #[inline]
    pub fn to_i32(self) -> i32 {
        match self {
            Sign::Neg => -1,
            Sign::Zero => 0,
            Sign::Pos => 1,
        }
    }
}

/// A signed arbitrary-precision integer: a [Sign] paired with a [UBig]
/// magnitude. The sign is `Zero` exactly when the magnitude is zero. A thin
/// layer: arithmetic dispatches on the sign combination and delegates to
/// the magnitude operations.
#[derive(Debug, Clone, Default)]
pub struct SBig {
    sign: Sign,
    mag: UBig,
}

impl SBig {
    /// Zero
    #[inline]
    pub const fn zero() -> Self {
        SBig {
            sign: Sign::Zero,
            mag: UBig::zero(),
        }
    }

    /// Constructs from a sign and a magnitude, fixing the sign up to `Zero`
    /// if the magnitude is zero
    pub fn new(sign: Sign, mag: UBig) -> Self {
        if mag.is_zero() {
            SBig::zero()
        } else if sign == Sign::Zero {
            // a nonzero magnitude with no sign direction is malformed;
            // treat it as positive
            SBig {
                sign: Sign::Pos,
                mag,
            }
        } else {
            SBig { sign, mag }
        }
    }

    /// Constructs a non-negative value from a magnitude
    #[inline]
    pub fn from_ubig(mag: UBig) -> Self {
        SBig::new(Sign::Pos, mag)
    }

    pub fn from_i64(u: i64) -> Self {
        if u < 0 {
            SBig::new(Sign::Neg, UBig::from_u64(u.unsigned_abs()))
        } else {
            SBig::new(Sign::Pos, UBig::from_u64(u as u64))
        }
    }

    /// The value as an `i64`, or a `Domain` error if it does not fit
    pub fn try_to_i64(&self) -> Result<i64, Error> {
        let mag = self.mag.try_to_u64().map_err(|_| Error::Domain {
            op: "SBig::try_to_i64",
            msg: "value too large for i64",
        })?;
        let limit = (i64::MAX as u64) + ((self.sign == Sign::Neg) as u64);
        if mag > limit {
            return Err(Error::Domain {
                op: "SBig::try_to_i64",
                msg: "value too large for i64",
            })
        }
        Ok(if self.sign == Sign::Neg {
            (mag as i64).wrapping_neg()
        } else {
            mag as i64
        })
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn magnitude(&self) -> &UBig {
        &self.mag
    }

    /// `self` with the same sign and the given magnitude (fixed up for
    /// zero)
    #[inline]
    pub(crate) fn with_magnitude(&self, mag: UBig) -> SBig {
        SBig::new(self.sign, mag)
    }

    /// Surrenders the magnitude. Callers have established the value is
    /// non-negative.
    #[inline]
    pub(crate) fn into_magnitude(self) -> UBig {
        debug_assert!(self.sign != Sign::Neg);
        self.mag
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Neg
    }

    /// The negation of `self`
    pub fn neg(&self) -> SBig {
        SBig {
            sign: self.sign.neg(),
            mag: self.mag.clone(),
        }
    }

    /// The absolute value of `self`
    pub fn abs(&self) -> SBig {
        SBig {
            sign: if self.sign == Sign::Zero {
                Sign::Zero
            } else {
                Sign::Pos
            },
            mag: self.mag.clone(),
        }
    }

    /// Computes `self + rhs`
    pub fn checked_add(&self, rhs: &Self) -> Result<SBig, Error> {
        if self.is_zero() {
            return Ok(rhs.clone())
        }
        if rhs.is_zero() {
            return Ok(self.clone())
        }
        if self.sign == rhs.sign {
            return Ok(SBig::new(self.sign, self.mag.checked_add(&rhs.mag)?))
        }
        // opposite signs: the larger magnitude wins
        Ok(match self.mag.cmp(&rhs.mag) {
            Ordering::Equal => SBig::zero(),
            Ordering::Greater => SBig::new(self.sign, self.mag.abs_diff(&rhs.mag)),
            Ordering::Less => SBig::new(rhs.sign, rhs.mag.abs_diff(&self.mag)),
        })
    }

    /// Computes `self - rhs`
    pub fn checked_sub(&self, rhs: &Self) -> Result<SBig, Error> {
        self.checked_add(&rhs.neg())
    }

    /// Computes `self * rhs`
    pub fn checked_mul(&self, rhs: &Self) -> Result<SBig, Error> {
        Ok(SBig::new(
            self.sign.mul(rhs.sign),
            self.mag.checked_mul(&rhs.mag)?,
        ))
    }

    /// Computes `self * 2^up_shift`
    pub fn shift_up(&self, up_shift: usize) -> Result<SBig, Error> {
        Ok(SBig {
            sign: self.sign,
            mag: self.mag.shift_up(up_shift)?,
        })
    }

    /// Truncating division: `(quotient, remainder)` with
    /// `self == quotient * rhs + remainder`, the quotient rounded toward
    /// zero, and the remainder carrying the dividend's sign
    pub fn divide_and_remainder(&self, rhs: &Self) -> Result<(SBig, SBig), Error> {
        if rhs.is_zero() {
            return Err(Error::Domain {
                op: "SBig::divide_and_remainder",
                msg: "division by zero",
            })
        }
        let (q, r) = self.mag.divide_and_remainder(&rhs.mag)?;
        Ok((
            SBig::new(self.sign.mul(rhs.sign), q),
            SBig::new(self.sign, r),
        ))
    }
}

impl PartialEq for SBig {
    #[inline]
    fn eq(&self, rhs: &Self) -> bool {
        self.sign == rhs.sign && self.mag == rhs.mag
    }
}

impl Eq for SBig {}

impl Hash for SBig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.mag.hash(state);
    }
}

impl PartialOrd for SBig {
    #[inline]
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Ord for SBig {
    fn cmp(&self, rhs: &Self) -> Ordering {
        match self.sign.to_i32().cmp(&rhs.sign.to_i32()) {
            Ordering::Equal => (),
            ord => return ord,
        }
        match self.sign {
            Sign::Zero => Ordering::Equal,
            Sign::Pos => self.mag.cmp(&rhs.mag),
            Sign::Neg => rhs.mag.cmp(&self.mag),
        }
    }
}

/// Sign prefix plus the hexadecimal magnitude
impl fmt::Display for SBig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign == Sign::Neg {
            f.write_str("-")?;
        }
        fmt::Display::fmt(&self.mag, f)
    }
}

impl From<i64> for SBig {
    fn from(u: i64) -> Self {
        SBig::from_i64(u)
    }
}

impl From<UBig> for SBig {
    fn from(mag: UBig) -> Self {
        SBig::from_ubig(mag)
    }
}

#[cfg(feature = "zeroize_support")]
impl zeroize::Zeroize for SBig {
    fn zeroize(&mut self) {
        self.sign = Sign::Zero;
        self.mag.zeroize()
    }
}
