mod bflt;
mod brat;
mod sbig;
#[cfg(feature = "serde_support")]
mod serde;
mod ubig;

pub use bflt::BFlt;
pub(crate) use bflt::split_f64;
pub use brat::BRat;
pub use sbig::{SBig, Sign};
pub use ubig::UBig;
