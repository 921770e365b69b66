mod cmp;
mod div;
mod float;
mod mul;
#[cfg(feature = "rand_support")]
mod rand;
mod rational;
mod round;
mod shift;
mod strings;
mod sum;

pub(crate) use round::round_f64;
