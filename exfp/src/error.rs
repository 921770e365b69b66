use core::fmt;

/// An error from an `exfp` operation
///
/// Failures surface immediately and abort the operation that raised them;
/// the immutable numeric types are never left partially built. Accumulators
/// are poisoned by [Error::Domain] until cleared, see
/// [Accumulator](crate::acc::Accumulator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The result of `op` would exceed the
    /// [MAX_WORDS](exfp_internals::MAX_WORDS) word budget. `words` is the
    /// word count that was attempted.
    Overflow { op: &'static str, words: usize },
    /// An argument of `op` violated a precondition, such as dividing by
    /// zero, subtracting a larger value from a smaller one, a radix outside
    /// `2..=36`, a value too large for the requested primitive, or a
    /// non-finite floating-point input.
    Domain { op: &'static str, msg: &'static str },
    /// The accumulator this was called on does not implement `op`
    Unsupported { op: &'static str },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Overflow { op, words } => {
                write!(f, "{op}: result of {words} words exceeds the word budget")
            }
            Error::Domain { op, msg } => write!(f, "{op}: {msg}"),
            Error::Unsupported { op } => write!(f, "{op}: unsupported by this accumulator"),
        }
    }
}

/// Checks the [MAX_WORDS](exfp_internals::MAX_WORDS) budget before a buffer
/// of `words` words is built for `op`
#[inline]
pub(crate) const fn check_words(op: &'static str, words: usize) -> Result<(), Error> {
    if words > exfp_internals::MAX_WORDS {
        Err(Error::Overflow { op, words })
    } else {
        Ok(())
    }
}
