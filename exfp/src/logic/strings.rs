use alloc::{string::String, vec::Vec};
use core::fmt::Write as _;

use exfp_internals::*;

use crate::{check_words, Error, UBig};

/// The largest power of `radix` fitting a `Word`, with its exponent
fn word_chunk(radix: u32) -> (Word, usize) {
    let mut chunk = radix as u64;
    let mut digits = 1;
    while chunk * (radix as u64) <= MAX as u64 {
        chunk *= radix as u64;
        digits += 1;
    }
    (chunk as Word, digits)
}

#[inline]
fn check_radix(op: &'static str, radix: u32) -> Result<(), Error> {
    if radix < 2 || radix > 36 {
        return Err(Error::Domain {
            op,
            msg: "radix outside 2..=36",
        })
    }
    Ok(())
}

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// # String and byte conversion
impl UBig {
    /// Unsigned hexadecimal, the top word bare and every lower word
    /// zero-padded to 8 digits; `"0"` for zero
    pub fn to_hex_string(&self) -> String {
        let n = self.len();
        if n == 0 {
            return String::from("0")
        }
        let mut s = String::new();
        // infallible for String
        let _ = write!(s, "{:x}", self.as_words()[n - 1]);
        for i in (0..(n - 1)).rev() {
            let _ = write!(s, "{:08x}", self.as_words()[i]);
        }
        s
    }

    /// Formats `self` in the given radix, lowercase, without leading zeros
    pub fn to_str_radix(&self, radix: u32) -> Result<String, Error> {
        check_radix("UBig::to_str_radix", radix)?;
        if self.is_zero() {
            return Ok(String::from("0"))
        }
        let (chunk, digits) = word_chunk(radix);
        // least significant digit first, reversed at the end
        let mut out: Vec<u8> = Vec::new();
        let mut cur = self.clone();
        while !cur.is_zero() {
            let (q, mut r) = cur.div_rem_word(chunk)?;
            let last = q.is_zero();
            for _ in 0..digits {
                out.push(DIGITS[(r % radix) as usize]);
                r /= radix;
                if last && r == 0 {
                    break
                }
            }
            cur = q;
        }
        out.reverse();
        // `out` is ASCII by construction
        Ok(match String::from_utf8(out) {
            Ok(s) => s,
            Err(_) => unreachable!(),
        })
    }

    /// Parses an unsigned integer in the given radix. Signs are rejected
    /// even for non-negative input; `_` separators are allowed.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<UBig, Error> {
        const OP: &str = "UBig::from_str_radix";
        check_radix(OP, radix)?;
        if s.starts_with('+') || s.starts_with('-') {
            return Err(Error::Domain {
                op: OP,
                msg: "signs are not accepted",
            })
        }
        let (chunk_full, digits) = word_chunk(radix);
        let mut acc = UBig::zero();
        let mut val: u64 = 0;
        let mut count = 0;
        let mut any = false;
        for c in s.bytes() {
            if c == b'_' {
                continue
            }
            let d = match c {
                b'0'..=b'9' => (c - b'0') as u32,
                b'a'..=b'z' => (c - b'a') as u32 + 10,
                b'A'..=b'Z' => (c - b'A') as u32 + 10,
                _ => {
                    return Err(Error::Domain {
                        op: OP,
                        msg: "unrecognized character",
                    })
                }
            };
            if d >= radix {
                return Err(Error::Domain {
                    op: OP,
                    msg: "digit out of range for radix",
                })
            }
            val = val * (radix as u64) + (d as u64);
            count += 1;
            any = true;
            if count == digits {
                acc = acc.mul_u64(chunk_full as u64)?.add_u64(val)?;
                val = 0;
                count = 0;
            }
        }
        if !any {
            return Err(Error::Domain {
                op: OP,
                msg: "empty input",
            })
        }
        if count > 0 {
            let mut chunk = 1u64;
            for _ in 0..count {
                chunk *= radix as u64;
            }
            acc = acc.mul_u64(chunk)?.add_u64(val)?;
        }
        Ok(acc)
    }

    /// Parses an unsigned hexadecimal integer, the radix of
    /// [UBig::to_hex_string] and [Display](core::fmt::Display)
    #[inline]
    pub fn from_hex_str(s: &str) -> Result<UBig, Error> {
        UBig::from_str_radix(s, 16)
    }

    /// Big-endian bytes with an extra leading zero byte, so the encoding is
    /// also the two's-complement encoding of the (non-negative) value
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let n = 1 + self.hi_bit() / 8;
        let mut b = alloc::vec![0u8; n];
        let mut w = 0;
        for i in 0..n {
            if i % 4 == 0 {
                w = self.word(i / 4);
            } else {
                w >>= 8;
            }
            b[n - 1 - i] = w as u8;
        }
        b
    }

    /// Parses big-endian bytes. A set top bit of the first byte would
    /// encode a negative two's-complement value and is a `Domain` error.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<UBig, Error> {
        match bytes.first() {
            None => return Ok(UBig::zero()),
            Some(b) if (b & 0x80) != 0 => {
                return Err(Error::Domain {
                    op: "UBig::from_be_bytes",
                    msg: "negative two's-complement input",
                })
            }
            _ => (),
        }
        let n_bytes = bytes.len();
        let mut keep = 0;
        while keep < n_bytes && bytes[keep] == 0 {
            keep += 1;
        }
        let n_words = ((n_bytes - keep) + 3) >> 2;
        check_words("UBig::from_be_bytes", n_words)?;
        let mut vv: Vec<Word> = alloc::vec![0; n_words];
        let mut b = n_bytes;
        for i in (0..n_words).rev() {
            b -= 1;
            vv[i] = bytes[b] as Word;
            let bytes_remaining = b - keep;
            let bytes_to_transfer = bytes_remaining.min(3);
            for j in 1..=bytes_to_transfer {
                b -= 1;
                vv[i] |= (bytes[b] as Word) << (8 * j);
            }
        }
        // the loop leaves the least significant word at the top index
        reverse(&mut vv);
        Ok(UBig::from_vec(vv))
    }
}
