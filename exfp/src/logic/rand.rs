use alloc::vec::Vec;

use exfp_internals::*;

use crate::{check_words, Error, UBig};

/// `rand_support` functions
impl UBig {
    /// Builds a uniformly random value below `2^bits` using a
    /// `rand_core::RngCore` random number generator. This works by filling
    /// a word buffer from the generator and masking the top word down to
    /// `bits`.
    ///
    /// ```
    /// // Example using the `rand_xoshiro` crate.
    /// use exfp::UBig;
    /// use rand_xoshiro::{rand_core::SeedableRng, Xoshiro128StarStar};
    ///
    /// let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    /// let x = UBig::rand_using(&mut rng, 100).unwrap();
    /// assert!(x.hi_bit() <= 100);
    /// ```
    pub fn rand_using<R>(rng: &mut R, bits: usize) -> Result<UBig, Error>
    where
        R: rand_core::RngCore,
    {
        if bits == 0 {
            return Ok(UBig::zero())
        }
        let n = (bits + 31) >> 5;
        check_words("UBig::rand_using", n)?;
        let mut vv: Vec<Word> = alloc::vec![0; n];
        for w in vv.iter_mut() {
            *w = rng.next_u32();
        }
        let extra = bits & 0x1f;
        if extra != 0 {
            vv[n - 1] &= MAX >> (32 - extra);
        }
        Ok(UBig::from_vec(vv))
    }
}
