//! The closed error surface of the crate. Decision procedures on well-formed
//! terms are total; only construction and parsing can fail.

/// Everything that can go wrong while building or parsing an [`Rx`](crate::Rx).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `repeat(m, n)` called with `n < m`.
    #[error("invalid repeat bounds: {0}")]
    InvalidArgument(String),

    /// The surface-syntax parser rejected its input.
    #[error("parse error: {0}")]
    Parse(String),

    /// A `Var` node escaped the algorithm that introduced it, or some other
    /// §3 invariant was violated. This is always a bug in this crate, never
    /// a consequence of caller input.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
