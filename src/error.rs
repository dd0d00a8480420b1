//! Error handling primitives for the D7S driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// A register field read back with a reserved bit pattern.
    InvalidFieldValue,
    /// An event record index outside the stored range 1..=5 was requested.
    InvalidRecordIndex,
    /// The self-diagnostic did not complete within the polling budget.
    SelfTestTimeout,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
