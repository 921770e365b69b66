//! Common helpers for the `exfp` integration tests.

use exfp::UBig;
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};

pub use rand_xoshiro;

/// The seeded generator every test drives, so failures reproduce exactly
pub fn rng(seed: u64) -> Xoshiro128StarStar {
    Xoshiro128StarStar::seed_from_u64(seed)
}

/// A uniformly random `UBig` of at most `max_bits` bits, with the bit
/// length itself uniform
pub fn rand_ubig(rng: &mut Xoshiro128StarStar, max_bits: usize) -> UBig {
    let bits = (rng.next_u64() as usize) % (max_bits + 1);
    UBig::rand_using(rng, bits).unwrap()
}

/// A random finite `f64` drawn from uniform bit patterns (so the full
/// exponent range, both signs, and subnormals all occur), with an edge-case
/// pool mixed in
pub fn rand_f64(rng: &mut Xoshiro128StarStar) -> f64 {
    const EDGE: &[f64] = &[
        0.0,
        -0.0,
        1.0,
        -1.0,
        2.0,
        0.5,
        f64::MAX,
        f64::MIN,
        f64::MIN_POSITIVE,
        // smallest and largest subnormals
        5e-324,
        2.225073858507201e-308,
    ];
    if rng.next_u32() % 10 == 0 {
        return EDGE[(rng.next_u32() as usize) % EDGE.len()]
    }
    loop {
        let x = f64::from_bits(rng.next_u64());
        if x.is_finite() {
            return x
        }
    }
}

/// An array of random finite doubles
pub fn rand_f64_array(rng: &mut Xoshiro128StarStar, n: usize) -> Vec<f64> {
    (0..n).map(|_| rand_f64(rng)).collect()
}

/// In-place Fisher-Yates shuffle
pub fn shuffle<T>(rng: &mut Xoshiro128StarStar, x: &mut [T]) {
    for i in (1..x.len()).rev() {
        let j = (rng.next_u64() as usize) % (i + 1);
        x.swap(i, j);
    }
}
