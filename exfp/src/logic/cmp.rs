use core::cmp::Ordering;

use exfp_internals::*;

use crate::UBig;

impl PartialOrd for UBig {
    #[inline]
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

/// Total order consistent with integer value
impl Ord for UBig {
    fn cmp(&self, rhs: &Self) -> Ordering {
        let nt = self.len();
        let nu = rhs.len();
        if nt != nu {
            // canonical buffers, so more words means strictly larger
            return nt.cmp(&nu)
        }
        for i in (0..nt).rev() {
            match self.uword(i).cmp(&rhs.uword(i)) {
                Ordering::Equal => (),
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

/// Word `i` of `u << (32*i_shift + b_shift)`, where the shifted value spans
/// at most three words starting at `i_shift`
#[inline]
pub(crate) fn shifted_u64_word(u: u64, i_shift: usize, b_shift: usize, i: usize) -> Word {
    if i < i_shift {
        return 0
    }
    let (v0, v1, v2) = shifted_u64_window(u, b_shift);
    match i - i_shift {
        0 => v0,
        1 => v1,
        2 => v2,
        _ => 0,
    }
}

/// Decomposes `u << b_shift` (`b_shift < 32`) into its three-word window
/// (low, mid, high)
#[inline]
pub(crate) fn shifted_u64_window(u: u64, b_shift: usize) -> (Word, Word, Word) {
    if b_shift == 0 {
        (u as Word, hi_word(u) as Word, 0)
    } else {
        let us = u << b_shift;
        (us as Word, hi_word(us) as Word, (u >> (64 - b_shift)) as Word)
    }
}

/// # Comparison
impl UBig {
    /// Compares `self` to `u`
    pub fn cmp_u64(&self, u: u64) -> Ordering {
        let nt = self.len();
        let ulo = lo_word(u);
        let uhi = hi_word(u);
        let nu = if uhi != 0 {
            2
        } else if ulo != 0 {
            1
        } else {
            0
        };
        if nt != nu {
            return nt.cmp(&nu)
        }
        for i in (0..nt).rev() {
            let ui = if i == 1 { uhi } else { ulo };
            match self.uword(i).cmp(&ui) {
                Ordering::Equal => (),
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Compares `self` to `u * 2^up_shift`
    pub fn cmp_u64_shifted(&self, u: u64, up_shift: usize) -> Ordering {
        if u == 0 {
            return if self.is_zero() {
                Ordering::Equal
            } else {
                Ordering::Greater
            }
        }
        let mt = self.hi_bit();
        let mu = hi_bit_u64(u) + up_shift;
        if mt != mu {
            return mt.cmp(&mu)
        }
        let i_shift = up_shift >> 5;
        let b_shift = up_shift & 0x1f;
        for i in (0..self.len()).rev() {
            let ui = shifted_u64_word(u, i_shift, b_shift, i);
            match self.word(i).cmp(&ui) {
                Ordering::Equal => (),
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}
