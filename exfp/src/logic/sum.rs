use alloc::vec::Vec;
use core::cmp::Ordering;

use exfp_internals::*;

use crate::{check_words, logic::cmp::shifted_u64_window, Error, UBig};

/// Pushes a final carry word, rechecking the word budget
#[inline]
fn push_carry(op: &'static str, mut vv: Vec<Word>) -> Result<UBig, Error> {
    check_words(op, vv.len() + 1)?;
    vv.push(1);
    Ok(UBig::from_vec(vv))
}

/// # Addition and subtraction
impl UBig {
    /// Computes `self + rhs`
    pub fn checked_add(&self, rhs: &Self) -> Result<UBig, Error> {
        // keep the longer operand on the left
        let (x, y) = if self.len() >= rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let nx = x.len();
        let ny = y.len();
        let mut vv = alloc::vec![0; nx];
        let mut carry = 0;
        for i in 0..ny {
            let tmp = widen_add(x.as_words()[i], y.as_words()[i], carry);
            vv[i] = tmp.0;
            carry = tmp.1;
        }
        for i in ny..nx {
            let tmp = widen_add(x.as_words()[i], 0, carry);
            vv[i] = tmp.0;
            carry = tmp.1;
        }
        if carry != 0 {
            return push_carry("UBig::checked_add", vv)
        }
        Ok(UBig::from_vec(vv))
    }

    /// Computes `self - rhs`, or a `Domain` error if `self < rhs`
    pub fn checked_sub(&self, rhs: &Self) -> Result<UBig, Error> {
        if self.cmp(rhs) == Ordering::Less {
            return Err(Error::Domain {
                op: "UBig::checked_sub",
                msg: "subtrahend exceeds self",
            })
        }
        let nt = self.len();
        let nu = rhs.len();
        let mut vv = alloc::vec![0; nt];
        // two's complement subtraction: self + !rhs + 1
        let mut carry = 1;
        for i in 0..nt {
            let y = if i < nu { !rhs.as_words()[i] } else { MAX };
            let tmp = widen_add(self.as_words()[i], y, carry);
            vv[i] = tmp.0;
            carry = tmp.1;
        }
        // carry out is guaranteed because self >= rhs
        Ok(UBig::from_vec(vv))
    }

    /// Computes `|self - rhs|`
    pub fn abs_diff(&self, rhs: &Self) -> UBig {
        match self.cmp(rhs) {
            Ordering::Equal => UBig::zero(),
            // neither direction can fail after the comparison
            Ordering::Greater => match self.checked_sub(rhs) {
                Ok(v) => v,
                Err(_) => unreachable!(),
            },
            Ordering::Less => match rhs.checked_sub(self) {
                Ok(v) => v,
                Err(_) => unreachable!(),
            },
        }
    }

    /// Computes `self + (u * 2^up_shift)`
    pub fn add_shifted(&self, u: &UBig, up_shift: usize) -> Result<UBig, Error> {
        if u.is_zero() {
            return Ok(self.clone())
        }
        let i_shift = up_shift >> 5;
        let b_shift = up_shift & 0x1f;
        let nt = self.len();
        // words spanned by the shifted operand
        let nu = (u.hi_bit() + up_shift + 31) >> 5;
        check_words("UBig::add_shifted", nt.max(nu))?;
        let nv = nt.max(nu);
        let mut vv = alloc::vec![0; nv];
        let mut carry = 0;
        for i in 0..nv {
            let ui = if i < i_shift {
                0
            } else {
                let j = i - i_shift;
                if b_shift == 0 {
                    u.word(j)
                } else {
                    let hi = (u.word(j) as u64) << b_shift;
                    let lo = if j == 0 {
                        0
                    } else {
                        (u.word(j - 1) as u64) >> (32 - b_shift)
                    };
                    (hi | lo) as Word
                }
            };
            let tmp = widen_add(self.word(i), ui, carry);
            vv[i] = tmp.0;
            carry = tmp.1;
        }
        if carry != 0 {
            return push_carry("UBig::add_shifted", vv)
        }
        Ok(UBig::from_vec(vv))
    }

    /// Computes `self + u`
    #[inline]
    pub fn add_u64(&self, u: u64) -> Result<UBig, Error> {
        self.add_u64_shifted(u, 0)
    }

    /// Computes `self + (u * 2^up_shift)`. The shifted operand touches at
    /// most three words at the word offset of the shift, so no shifted copy
    /// of `u` is built.
    pub fn add_u64_shifted(&self, u: u64, up_shift: usize) -> Result<UBig, Error> {
        if u == 0 {
            return Ok(self.clone())
        }
        let i_shift = up_shift >> 5;
        let b_shift = up_shift & 0x1f;
        let (v0, v1, v2) = shifted_u64_window(u, b_shift);
        let nu = i_shift
            + if v2 != 0 {
                3
            } else if v1 != 0 {
                2
            } else {
                1
            };
        let nt = self.len();
        let nv = nt.max(nu);
        check_words("UBig::add_u64_shifted", nv)?;
        let mut vv = alloc::vec![0; nv];
        vv[..nt.min(i_shift)].copy_from_slice(&self.as_words()[..nt.min(i_shift)]);
        let mut carry = 0;
        for i in i_shift..nv {
            let ui = match i - i_shift {
                0 => v0,
                1 => v1,
                2 => v2,
                _ => 0,
            };
            let tmp = widen_add(self.word(i), ui, carry);
            vv[i] = tmp.0;
            carry = tmp.1;
        }
        if carry != 0 {
            return push_carry("UBig::add_u64_shifted", vv)
        }
        Ok(UBig::from_vec(vv))
    }

    /// Computes `self - u`, or a `Domain` error if `self < u`
    #[inline]
    pub fn sub_u64(&self, u: u64) -> Result<UBig, Error> {
        self.sub_u64_shifted(u, 0)
    }

    /// Computes `self - (u * 2^up_shift)`, or a `Domain` error if
    /// `self < u * 2^up_shift`
    pub fn sub_u64_shifted(&self, u: u64, up_shift: usize) -> Result<UBig, Error> {
        if self.cmp_u64_shifted(u, up_shift) == Ordering::Less {
            return Err(Error::Domain {
                op: "UBig::sub_u64_shifted",
                msg: "subtrahend exceeds self",
            })
        }
        if u == 0 {
            return Ok(self.clone())
        }
        let i_shift = up_shift >> 5;
        let b_shift = up_shift & 0x1f;
        let (v0, v1, v2) = shifted_u64_window(u, b_shift);
        let nt = self.len();
        let mut vv = alloc::vec![0; nt];
        vv[..nt.min(i_shift)].copy_from_slice(&self.as_words()[..nt.min(i_shift)]);
        let mut carry = 1;
        for i in i_shift..nt {
            let ui = match i - i_shift {
                0 => v0,
                1 => v1,
                2 => v2,
                _ => 0,
            };
            let tmp = widen_add(self.as_words()[i], !ui, carry);
            vv[i] = tmp.0;
            carry = tmp.1;
        }
        Ok(UBig::from_vec(vv))
    }

    /// Computes `u - self`, or a `Domain` error if `self > u`
    pub fn sub_from_u64(&self, u: u64) -> Result<UBig, Error> {
        if self.cmp_u64(u) == Ordering::Greater {
            return Err(Error::Domain {
                op: "UBig::sub_from_u64",
                msg: "self exceeds minuend",
            })
        }
        // self fits a u64 after the comparison
        let s = match self.try_to_u64() {
            Ok(s) => s,
            Err(_) => unreachable!(),
        };
        Ok(UBig::from_u64(u - s))
    }

    /// Computes `(u * 2^up_shift) - self`, or a `Domain` error if
    /// `self > u * 2^up_shift`
    pub fn sub_from_u64_shifted(&self, u: u64, up_shift: usize) -> Result<UBig, Error> {
        if self.cmp_u64_shifted(u, up_shift) == Ordering::Greater {
            return Err(Error::Domain {
                op: "UBig::sub_from_u64_shifted",
                msg: "self exceeds minuend",
            })
        }
        let i_shift = up_shift >> 5;
        let b_shift = up_shift & 0x1f;
        check_words("UBig::sub_from_u64_shifted", i_shift + 3)?;
        let (v0, v1, v2) = shifted_u64_window(u, b_shift);
        let n = i_shift + 3;
        let mut vv = alloc::vec![0; n];
        vv[i_shift] = v0;
        vv[i_shift + 1] = v1;
        vv[i_shift + 2] = v2;
        // self spans at most i_shift + 3 words after the comparison
        let mut carry = 1;
        for i in 0..n {
            let tmp = widen_add(vv[i], !self.word(i), carry);
            vv[i] = tmp.0;
            carry = tmp.1;
        }
        Ok(UBig::from_vec(vv))
    }
}
