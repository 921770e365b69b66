use alloc::vec::Vec;
use core::{
    fmt,
    hash::{Hash, Hasher},
};

use exfp_internals::*;

use crate::{check_words, Error};

/// An immutable arbitrary-precision non-negative integer (a natural number)
/// as a bit sequence, represented by a buffer of 32-bit words starting with
/// the least significant word at index 0.
///
/// The buffer never has a trailing zero word; the empty buffer represents
/// zero. The 1-based index of the most significant set bit ([UBig::hi_bit])
/// always fits in an `i32`: any operation that would produce more than
/// [MAX_WORDS](exfp_internals::MAX_WORDS) words fails with
/// [Error::Overflow](crate::Error) instead. This limit is separate from the
/// limit imposed by available memory.
///
/// All operations take `&self` and return fresh values; a `UBig` is never
/// mutated after construction and is freely shareable across threads.
///
/// ```
/// use exfp::UBig;
///
/// let x = UBig::from_u64(0xfedc_ba98_7654_3210);
/// let y = x.checked_mul(&x).unwrap();
/// assert_eq!(y.divide(&x).unwrap(), x);
/// assert_eq!(x.hi_bit(), 64);
/// ```
#[derive(Clone, Default)]
pub struct UBig {
    words: Vec<Word>,
}

impl UBig {
    /// Zero, the empty word sequence
    #[inline]
    pub const fn zero() -> Self {
        UBig { words: Vec::new() }
    }

    /// One
    #[inline]
    pub fn one() -> Self {
        UBig {
            words: alloc::vec![1],
        }
    }

    /// Takes ownership of `words`, truncating any trailing zero words. The
    /// canonical constructor for every operation result; callers guarantee
    /// the word budget was checked before `words` was allocated.
    #[inline]
    pub(crate) fn from_vec(mut words: Vec<Word>) -> Self {
        words.truncate(hi_int(&words));
        UBig { words }
    }

    /// Constructs from a little-endian word slice, copying it
    pub fn from_words(words: &[Word]) -> Result<Self, Error> {
        let n = hi_int(words);
        check_words("UBig::from_words", n)?;
        Ok(UBig {
            words: words[..n].to_vec(),
        })
    }

    /// Constructs from a `u64`
    pub fn from_u64(u: u64) -> Self {
        let lo = u as Word;
        let hi = hi_word(u) as Word;
        if hi != 0 {
            UBig {
                words: alloc::vec![lo, hi],
            }
        } else if lo != 0 {
            UBig {
                words: alloc::vec![lo],
            }
        } else {
            UBig::zero()
        }
    }

    /// Constructs `u * 2^up_shift`
    pub fn from_u64_shifted(u: u64, up_shift: usize) -> Result<Self, Error> {
        if u == 0 {
            return Ok(UBig::zero())
        }
        let i_shift = up_shift >> 5;
        let b_shift = up_shift & 0x1f;
        let nv = (hi_bit_u64(u) + up_shift + 31) >> 5;
        check_words("UBig::from_u64_shifted", nv)?;
        let mut vv = alloc::vec![0; nv];
        if b_shift == 0 {
            vv[i_shift] = u as Word;
            if i_shift + 1 < nv {
                vv[i_shift + 1] = hi_word(u) as Word;
            }
        } else {
            let us = u << b_shift;
            vv[i_shift] = us as Word;
            if i_shift + 1 < nv {
                vv[i_shift + 1] = hi_word(us) as Word;
            }
            if i_shift + 2 < nv {
                vv[i_shift + 2] = (u >> (64 - b_shift)) as Word;
            }
        }
        Ok(UBig::from_vec(vv))
    }

    /// The number of words in the buffer; 0 iff `self` is zero
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.words.len() == 1 && self.words[0] == 1
    }

    /// The little-endian word buffer; no trailing zero word
    #[inline]
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    /// Word `i`, or 0 if `i` is beyond the buffer
    #[inline]
    pub fn word(&self, i: usize) -> Word {
        if i < self.words.len() {
            self.words[i]
        } else {
            0
        }
    }

    /// Word `i` widened to a `u64`
    #[inline]
    pub fn uword(&self, i: usize) -> u64 {
        self.word(i) as u64
    }

    /// 1-based index of the most significant set bit, 0 for zero
    #[inline]
    pub fn hi_bit(&self) -> usize {
        match self.words.last() {
            None => 0,
            Some(&w) => ((self.words.len() - 1) << 5) + (BITS - w.leading_zeros() as usize),
        }
    }

    /// 0-based index of the least significant set bit, 0 for zero
    #[inline]
    pub fn lo_bit(&self) -> usize {
        let i = lo_int(&self.words);
        if i == self.words.len() {
            return 0
        }
        (i << 5) + self.words[i].trailing_zeros() as usize
    }

    /// The `[i0, i1)` words of `self` as a fresh value, equivalent to
    /// `(self >> 32*i0) mod 2^(32*(i1-i0))`
    pub fn words_range(&self, i0: usize, i1: usize) -> UBig {
        let n = self.words.len();
        if i0 >= n || i1 <= i0 {
            return UBig::zero()
        }
        let i1 = i1.min(n);
        UBig::from_vec(self.words[i0..i1].to_vec())
    }

    /// `self` with word `i` replaced by `w`
    pub fn set_word(&self, i: usize, w: Word) -> Result<UBig, Error> {
        check_words("UBig::set_word", i + 1)?;
        let n = self.words.len().max(i + 1);
        let mut vv = alloc::vec![0; n];
        vv[..self.words.len()].copy_from_slice(&self.words);
        vv[i] = w;
        Ok(UBig::from_vec(vv))
    }

    /// The value as a `u32`, or a `Domain` error if it does not fit
    pub fn try_to_u32(&self) -> Result<u32, Error> {
        match self.words.len() {
            0 => Ok(0),
            1 => Ok(self.words[0]),
            _ => Err(Error::Domain {
                op: "UBig::try_to_u32",
                msg: "value too large for u32",
            }),
        }
    }

    /// The value as a `u64`, or a `Domain` error if it does not fit
    pub fn try_to_u64(&self) -> Result<u64, Error> {
        match self.words.len() {
            0 => Ok(0),
            1 => Ok(self.words[0] as u64),
            2 => Ok(((self.words[1] as u64) << 32) | (self.words[0] as u64)),
            _ => Err(Error::Domain {
                op: "UBig::try_to_u64",
                msg: "value too large for u64",
            }),
        }
    }
}

impl PartialEq for UBig {
    #[inline]
    fn eq(&self, rhs: &Self) -> bool {
        self.words == rhs.words
    }
}

impl Eq for UBig {}

impl Hash for UBig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state);
    }
}

impl fmt::Debug for UBig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UBig(0x{})", self.to_hex_string())
    }
}

/// Hexadecimal, like [UBig::to_hex_string]
impl fmt::Display for UBig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl fmt::LowerHex for UBig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl From<u64> for UBig {
    fn from(u: u64) -> Self {
        UBig::from_u64(u)
    }
}

impl From<u32> for UBig {
    fn from(u: u32) -> Self {
        UBig::from_u64(u as u64)
    }
}

#[cfg(feature = "zeroize_support")]
impl zeroize::Zeroize for UBig {
    fn zeroize(&mut self) {
        self.words.zeroize()
    }
}
