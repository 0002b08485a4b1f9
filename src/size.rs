//! Extended natural numbers: finite counts plus an `Unbounded` top element,
//! used for the `(lo, hi)` match-size range of a term (§4.4).

use std::cmp::Ordering;
use std::ops::Add;

/// A natural number, or `Unbounded` (infinity).
///
/// NOTE: we use `u64` rather than `usize` since match-size bounds are a pure
/// property of a term and shouldn't silently change width across targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Finite(u64),
    Unbounded,
}

impl Size {
    pub const ZERO: Size = Size::Finite(0);
    pub const ONE: Size = Size::Finite(1);

    pub fn finite(n: u64) -> Self {
        Size::Finite(n)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Size::Finite(0))
    }

    pub fn min(self, other: Size) -> Size {
        match (self, other) {
            (Size::Finite(a), Size::Finite(b)) => Size::Finite(a.min(b)),
            (Size::Finite(a), Size::Unbounded) => Size::Finite(a),
            (Size::Unbounded, Size::Finite(b)) => Size::Finite(b),
            (Size::Unbounded, Size::Unbounded) => Size::Unbounded,
        }
    }

    pub fn max(self, other: Size) -> Size {
        match (self, other) {
            (Size::Finite(a), Size::Finite(b)) => Size::Finite(a.max(b)),
            _ => Size::Unbounded,
        }
    }

    /// `n · Unbounded`: `0` if `n == 0`, else `Unbounded`. `Unbounded · n` is
    /// symmetric.
    pub fn saturating_mul(self, factor: u64) -> Size {
        match self {
            Size::Finite(n) => Size::Finite(n.saturating_mul(factor)),
            Size::Unbounded => {
                if factor == 0 {
                    Size::Finite(0)
                } else {
                    Size::Unbounded
                }
            }
        }
    }

    pub fn mul(self, other: Size) -> Size {
        match (self, other) {
            (Size::Finite(a), Size::Finite(b)) => Size::Finite(a.saturating_mul(b)),
            (Size::Finite(0), _) | (_, Size::Finite(0)) => Size::Finite(0),
            _ => Size::Unbounded,
        }
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, other: Size) -> Size {
        match (self, other) {
            (Size::Finite(a), Size::Finite(b)) => Size::Finite(a.saturating_add(b)),
            _ => Size::Unbounded,
        }
    }
}

impl PartialOrd for Size {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Size {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Size::Finite(a), Size::Finite(b)) => a.cmp(b),
            (Size::Unbounded, Size::Unbounded) => Ordering::Equal,
            (Size::Unbounded, Size::Finite(_)) => Ordering::Greater,
            (Size::Finite(_), Size::Unbounded) => Ordering::Less,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_times_unbounded_is_zero() {
        assert_eq!(Size::ZERO.mul(Size::Unbounded), Size::ZERO);
        assert_eq!(Size::Unbounded.mul(Size::ZERO), Size::ZERO);
    }

    #[test]
    fn nonzero_times_unbounded_is_unbounded() {
        assert_eq!(Size::Finite(3).mul(Size::Unbounded), Size::Unbounded);
    }

    #[test]
    fn unbounded_plus_anything_is_unbounded() {
        assert_eq!(Size::Unbounded + Size::Finite(5), Size::Unbounded);
        assert_eq!(Size::Finite(5) + Size::Unbounded, Size::Unbounded);
    }

    #[test]
    fn ordering() {
        assert!(Size::Finite(3) < Size::Finite(4));
        assert!(Size::Finite(400) < Size::Unbounded);
        assert_eq!(Size::Unbounded.cmp(&Size::Unbounded), Ordering::Equal);
    }
}
