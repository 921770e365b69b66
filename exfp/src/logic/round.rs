use crate::{Sign, UBig};

#[inline]
fn signed_zero(neg: bool) -> f64 {
    if neg {
        -0.0
    } else {
        0.0
    }
}

#[inline]
fn signed_inf(neg: bool) -> f64 {
    if neg {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

/// Rounds the exact value `sign * mag * 2^exp` to the nearest `f64`, ties
/// to even. `extra_sticky` declares that discarded nonzero value bits exist
/// below `mag`'s least significant bit (the nonzero-remainder flag of the
/// rational conversion); it ORs into the sticky field.
///
/// The significand is first normalized to odd, so that the unbiased
/// exponent `eu` of the value is `exp + hi_bit - 1` exactly. Values beyond
/// `2^1024` overflow to infinity, values below the subnormal range
/// underflow to (signed) zero, and in between the top 53 bits (fewer in the
/// subnormal range) are kept, rounding up when the guard bit is set and
/// either any lower bit is set or the kept field is odd.
pub(crate) fn round_f64(sign: Sign, mag: &UBig, exp: i64, extra_sticky: bool) -> f64 {
    if sign == Sign::Zero || mag.is_zero() {
        return 0.0
    }
    let neg = sign == Sign::Neg;
    let sign_bit = (neg as u64) << 63;

    let tz = mag.lo_bit();
    let stripped;
    let m: &UBig = if tz == 0 {
        mag
    } else {
        stripped = mag.shift_down(tz);
        &stripped
    };
    let e = exp + tz as i64;
    let h = m.hi_bit() as i64;
    let mut eu = e + h - 1;
    if eu > 1023 {
        return signed_inf(neg)
    }
    // bits the target keeps: 53 in the normal range, down to 0 across the
    // subnormal range
    let prec = if eu >= -1022 { 53 } else { 53 + (eu + 1022) };
    if prec < 0 {
        return signed_zero(neg)
    }
    let d = h - prec;
    let mut kept: u64;
    if d <= 0 {
        // every bit of m is kept; sticky bits below it sit under an
        // implicitly zero guard bit and cannot round
        kept = match m.try_to_u64() {
            Ok(v) => v,
            Err(_) => unreachable!(),
        };
        kept <<= (-d) as u32;
    } else {
        let d = d as usize;
        kept = m.get_shifted_u64(d);
        if m.round_up(d) || (extra_sticky && m.test_bit(d - 1)) {
            kept += 1;
        }
    }
    if eu >= -1022 {
        // normal: renormalize a rounding carry out of the 53-bit field
        if kept == (1u64 << 53) {
            kept >>= 1;
            eu += 1;
            if eu > 1023 {
                return signed_inf(neg)
            }
        }
        let bits = (((eu + 1023) as u64) << 52) | (kept & ((1u64 << 52) - 1)) | sign_bit;
        f64::from_bits(bits)
    } else {
        // subnormal: the value is kept * 2^-1074 with kept <= 2^52; a carry
        // to exactly 2^52 lands on the smallest normal and assembles
        // correctly with the biased exponent left at zero
        f64::from_bits(kept | sign_bit)
    }
}
