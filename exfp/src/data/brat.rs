use core::fmt;

use crate::{Error, SBig, Sign, UBig};

/// An exact binary rational: an [SBig] numerator over a positive [UBig]
/// denominator.
///
/// The fraction is not kept in lowest terms; reduction is lazy, applied by
/// [BRat::reduced], by [BRat::to_f64], and implicitly by the
/// cross-multiplying [BRat::compare]. This is the reference representation
/// for reductions that need true division (and the test oracle for the
/// binary-float accumulator); for plain summation prefer
/// [BFlt](crate::BFlt), whose denominators never grow.
#[derive(Debug, Clone)]
pub struct BRat {
    pub(crate) num: SBig,
    pub(crate) den: UBig,
}

impl BRat {
    /// Zero, as `0/1`
    pub fn zero() -> Self {
        BRat {
            num: SBig::zero(),
            den: UBig::one(),
        }
    }

    /// Constructs `num / den`, failing with a `Domain` error for a zero
    /// denominator
    pub fn new(num: SBig, den: UBig) -> Result<Self, Error> {
        if den.is_zero() {
            return Err(Error::Domain {
                op: "BRat::new",
                msg: "zero denominator",
            })
        }
        Ok(BRat { num, den })
    }

    pub fn from_i64(u: i64) -> Self {
        BRat {
            num: SBig::from_i64(u),
            den: UBig::one(),
        }
    }

    /// The exact value of a finite `f64`, or a `Domain` error for
    /// infinities and NaN
    pub fn from_f64(x: f64) -> Result<Self, Error> {
        let (sign, m, e) = crate::data::split_f64("BRat::from_f64", x)?;
        if m == 0 {
            return Ok(BRat::zero())
        }
        Ok(if e >= 0 {
            BRat {
                num: SBig::new(sign, UBig::from_u64_shifted(m, e as usize)?),
                den: UBig::one(),
            }
        } else {
            BRat {
                num: SBig::new(sign, UBig::from_u64(m)),
                den: UBig::from_u64_shifted(1, (-e) as usize)?,
            }
        })
    }

    #[inline]
    pub fn numerator(&self) -> &SBig {
        &self.num
    }

    #[inline]
    pub fn denominator(&self) -> &UBig {
        &self.den
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.num.sign()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl Default for BRat {
    fn default() -> Self {
        BRat::zero()
    }
}

/// Value equality by cross-multiplication (`1/2 == 2/4`)
impl PartialEq for BRat {
    fn eq(&self, rhs: &Self) -> bool {
        matches!(self.compare(rhs), Ok(core::cmp::Ordering::Equal))
    }
}

/// The signed hexadecimal numerator over the hexadecimal denominator
impl fmt::Display for BRat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
