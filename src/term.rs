//! The `Rx` term algebra: the closed AST (§3) plus the smart constructors
//! (§4.1) that keep every term in the normal form the rest of the crate
//! relies on. Modeled on the teacher's `RegExpNode`, but the variants here
//! denote languages directly (no capture groups, no anchors) and every
//! combinator normalizes eagerly rather than leaving simplification to a
//! later compilation pass.

use std::fmt;

use crate::error::{Error, Result};
use crate::letter_set::LetterSet;

/// A regular expression, represented as a language-set value rather than a
/// matching program. See §3 for the full invariant list.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Rx {
    /// `∅`, the empty language.
    Phi,
    /// `ε`, the language containing only the empty string.
    Empty,
    /// A single character.
    Letter(char),
    /// A character class with at least two members (§3 invariant 2).
    Letters(LetterSet),
    /// `r1 ∪ r2`.
    Choice(Box<Rx>, Box<Rx>),
    /// `r1 · r2`.
    Concat(Box<Rx>, Box<Rx>),
    /// `r*`.
    Star(Box<Rx>),
    /// `r` repeated `m..=n` times, `n >= 1`.
    Repeat(Box<Rx>, u32, u32),
    /// Recursion marker, only ever introduced and eliminated within a single
    /// activation of [`crate::algebra`]'s algorithms (§3 invariant 6).
    /// Variant-level `#[non_exhaustive]` makes this uninhabited from outside
    /// the crate: there is no public way to construct or destructure a
    /// `Var`.
    #[non_exhaustive]
    Var(u32),
}

impl fmt::Debug for Rx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Host-language debugging view (§6); distinct from `repr()`, which
        // renders standard regex syntax.
        match self {
            Rx::Phi => write!(f, "Phi"),
            Rx::Empty => write!(f, "Empty"),
            Rx::Letter(c) => write!(f, "Letter({c:?})"),
            Rx::Letters(s) => write!(f, "Letters({:?})", s.ranges().collect::<Vec<_>>()),
            Rx::Choice(a, b) => write!(f, "Choice({a:?}, {b:?})"),
            Rx::Concat(a, b) => write!(f, "Concat({a:?}, {b:?})"),
            Rx::Star(a) => write!(f, "Star({a:?})"),
            Rx::Repeat(a, m, n) => write!(f, "Repeat({a:?}, {m}, {n})"),
            Rx::Var(k) => write!(f, "Var({k})"),
        }
    }
}

impl Rx {
    pub fn phi() -> Rx {
        Rx::Phi
    }

    pub fn empty() -> Rx {
        Rx::Empty
    }

    pub fn letter(c: char) -> Rx {
        Rx::Letter(c)
    }

    /// A character class. Normalizes to `Phi` if `set` is empty and to
    /// `Letter` if `set` is a singleton (§3 invariant 2).
    pub fn letters(set: LetterSet) -> Rx {
        match set.single_value() {
            Some(c) => Rx::Letter(c),
            None if set.is_empty() => Rx::Phi,
            None => Rx::Letters(set),
        }
    }

    pub fn range(lo: char, hi: char) -> Rx {
        Rx::letters(LetterSet::range(lo, hi))
    }

    /// `Letters(Full)`, i.e. `.` in standard regex syntax.
    pub fn dot() -> Rx {
        Rx::letters(LetterSet::full())
    }

    /// The language of every finite string over the alphabet.
    pub fn universe() -> Rx {
        Rx::dot().star()
    }

    /// The concatenation of one `Rx::letter` per `char` of `s`.
    pub fn literal(s: &str) -> Rx {
        s.chars().rfold(Rx::Empty, |acc, c| Rx::letter(c).concat(acc))
    }

    /// Parses `s` as surface regex syntax. See [`crate::parser`] for the
    /// supported grammar (§6).
    pub fn parse(s: &str) -> Result<Rx> {
        crate::parser::parse(s)
    }

    /// `r1 ∪ r2`, normalizing per §3 invariants 1 and 4.
    pub fn choice(a: Rx, b: Rx) -> Rx {
        match (a, b) {
            (Rx::Phi, b) => b,
            (a, Rx::Phi) => a,
            (a, b) if a == b => a,
            (a, b) => match fuse_letters(&a, &b) {
                Some(fused) => fused,
                None => Rx::Choice(Box::new(a), Box::new(b)),
            },
        }
    }

    /// `r1 · r2`, normalizing per §3 invariant 1.
    pub fn concat(self, other: Rx) -> Rx {
        match (self, other) {
            (Rx::Phi, _) | (_, Rx::Phi) => Rx::Phi,
            (Rx::Empty, b) => b,
            (a, Rx::Empty) => a,
            (a, b) => Rx::Concat(Box::new(a), Box::new(b)),
        }
    }

    /// `r*`, normalizing per §3 invariant 3.
    pub fn star(self) -> Rx {
        match self {
            Rx::Phi | Rx::Empty => Rx::Empty,
            Rx::Star(inner) => Rx::Star(inner),
            other => Rx::Star(Box::new(other)),
        }
    }

    /// `r` repeated exactly `k` times. Negative `k` denotes the empty
    /// repetition, i.e. `Empty`.
    pub fn pow(self, k: i64) -> Rx {
        if k < 0 {
            Rx::Empty
        } else {
            let k = k as u32;
            // `repeat` only fails when `n < m`; `k..=k` never does.
            self.repeat(k, k).expect("pow bounds are always valid")
        }
    }

    /// `r` repeated between `m` and `n` times inclusive. Fails with
    /// `InvalidArgument` if `n < m` (§4.1).
    pub fn repeat(self, m: u32, n: u32) -> Result<Rx> {
        if n < m {
            return Err(Error::InvalidArgument(format!(
                "repeat bounds out of order: {{{m},{n}}}"
            )));
        }
        Ok(match (n, self) {
            (0, _) => Rx::Empty,
            (_, Rx::Phi) => Rx::Phi,
            (_, Rx::Empty) => Rx::Empty,
            (n, r) => Rx::Repeat(Box::new(r), m, n),
        })
    }

    /// `r1 & r2`. See [`crate::algebra::intersect`].
    pub fn intersect(&self, other: &Rx) -> Rx {
        crate::algebra::intersect(self, other)
    }

    /// `r1 - r2`. See [`crate::algebra::difference`].
    pub fn difference(&self, other: &Rx) -> Rx {
        crate::algebra::difference(self, other)
    }

    /// `r1 ^ r2`. See [`crate::algebra::xor`].
    pub fn xor(&self, other: &Rx) -> Rx {
        crate::algebra::xor(self, other)
    }

    /// `~r`, defined as `Universe - r`.
    pub fn complement(&self) -> Rx {
        crate::algebra::difference(&Rx::universe(), self)
    }

    /// A canonical representative: equivalent terms canonicalize to equal
    /// terms. See [`crate::algebra::canonical`].
    pub fn canonical(&self) -> Rx {
        crate::algebra::canonical(self)
    }

    /// Whether `self` and `other` denote the same language (§4.7).
    pub fn equiv(&self, other: &Rx) -> bool {
        crate::relation::equiv(self, other)
    }

    /// The subset/superset/incomparable relation between `self` and `other`
    /// (§4.7). See [`crate::relation::partial_compare`] for the `NaN` case.
    pub fn partial_compare(&self, other: &Rx) -> Option<std::cmp::Ordering> {
        crate::relation::partial_compare(self, other)
    }

    /// `self ⊆ other`.
    pub fn subset_of(&self, other: &Rx) -> bool {
        matches!(
            self.partial_compare(other),
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        )
    }

    /// `self ⊇ other`.
    pub fn superset_of(&self, other: &Rx) -> bool {
        matches!(
            self.partial_compare(other),
            Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
        )
    }

    /// `self ⊊ other`.
    pub fn proper_subset_of(&self, other: &Rx) -> bool {
        self.partial_compare(other) == Some(std::cmp::Ordering::Less)
    }

    /// `self ⊋ other`.
    pub fn proper_superset_of(&self, other: &Rx) -> bool {
        self.partial_compare(other) == Some(std::cmp::Ordering::Greater)
    }

    /// Alias for [`Rx::proper_subset_of`], spelled as a total-order-style
    /// comparison for callers coming from `Ord`-shaped APIs.
    pub fn lt(&self, other: &Rx) -> bool {
        self.proper_subset_of(other)
    }

    pub fn le(&self, other: &Rx) -> bool {
        self.subset_of(other)
    }

    pub fn gt(&self, other: &Rx) -> bool {
        self.proper_superset_of(other)
    }

    pub fn ge(&self, other: &Rx) -> bool {
        self.superset_of(other)
    }

    /// Whether `self` accepts `s` (§4.6).
    pub fn accepts(&self, s: &str) -> bool {
        crate::membership::accepts(self, s)
    }

    /// `!self.accepts(s)`.
    pub fn rejects(&self, s: &str) -> bool {
        crate::membership::rejects(self, s)
    }

    /// Whether `self` accepts the empty string (§4.2).
    pub fn accepts_empty(&self) -> bool {
        crate::derive::accepts_empty(self)
    }

    /// Whether `self` denotes the empty language, `∅` (§4.2).
    pub fn is_phi(&self) -> bool {
        crate::derive::is_phi(self)
    }

    /// `(lo, hi)` bounds on accepted-string length, or `None` if `self`
    /// denotes `∅` (§4.4).
    pub fn match_sizes(&self) -> Option<(crate::size::Size, crate::size::Size)> {
        crate::derive::match_sizes(self)
    }

    /// The Brzozowski derivative of `self` with respect to `c` (§4.5).
    pub fn deriv(&self, c: char) -> Rx {
        crate::derive::deriv(self, c)
    }

    /// The pairwise-disjoint congruence classes that may begin a match
    /// (§4.3).
    pub fn first_set(&self) -> Vec<LetterSet> {
        crate::derive::first_set(self)
    }

    /// Whether `self` denotes exactly `{""}` (§4.2).
    pub fn is_empty(&self) -> bool {
        crate::derive::is_empty_language(self)
    }

    /// A textual form close to standard regex syntax (§6).
    pub fn repr(&self) -> String {
        crate::repr::repr(self)
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Rx::Letter(_))
    }
}

/// If both terms are letter-ish leaves (`Letter` or `Letters`), fuse them
/// into one `Letters` via set union (§3 invariant 4). Returns `None`
/// otherwise, leaving the caller to build a plain `Choice`.
fn fuse_letters(a: &Rx, b: &Rx) -> Option<Rx> {
    let a_set = as_letter_set(a)?;
    let b_set = as_letter_set(b)?;
    Some(Rx::letters(a_set.union(&b_set)))
}

fn as_letter_set(r: &Rx) -> Option<LetterSet> {
    match r {
        Rx::Letter(c) => Some(LetterSet::single(*c)),
        Rx::Letters(s) => Some(s.clone()),
        _ => None,
    }
}

impl std::ops::Add for Rx {
    type Output = Rx;
    fn add(self, rhs: Rx) -> Rx {
        Rx::choice(self, rhs)
    }
}

impl std::ops::BitOr for Rx {
    type Output = Rx;
    fn bitor(self, rhs: Rx) -> Rx {
        Rx::choice(self, rhs)
    }
}

/// Concatenation. Rust has no dedicated "sequence" operator; `Mul` is the
/// closest algebraic reading of the monoid product `r1 · r2` (§9 "Open
/// questions resolved").
impl std::ops::Mul for Rx {
    type Output = Rx;
    fn mul(self, rhs: Rx) -> Rx {
        self.concat(rhs)
    }
}

impl std::ops::BitAnd for &Rx {
    type Output = Rx;
    fn bitand(self, rhs: &Rx) -> Rx {
        self.intersect(rhs)
    }
}

impl std::ops::Sub for &Rx {
    type Output = Rx;
    fn sub(self, rhs: &Rx) -> Rx {
        self.difference(rhs)
    }
}

impl std::ops::BitXor for &Rx {
    type Output = Rx;
    fn bitxor(self, rhs: &Rx) -> Rx {
        self.xor(rhs)
    }
}

impl std::ops::Not for &Rx {
    type Output = Rx;
    fn not(self) -> Rx {
        self.complement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_with_phi_is_identity() {
        let a = Rx::letter('a');
        assert_eq!(a.clone() + Rx::phi(), a);
        assert_eq!(Rx::phi() + a.clone(), a);
    }

    #[test]
    fn concat_with_empty_is_identity() {
        let a = Rx::letter('a');
        assert_eq!(a.clone().concat(Rx::empty()), a);
        assert_eq!(Rx::empty().concat(a.clone()), a);
    }

    #[test]
    fn concat_with_phi_is_phi() {
        let a = Rx::letter('a');
        assert_eq!(a.clone().concat(Rx::phi()), Rx::phi());
        assert_eq!(Rx::phi().concat(a), Rx::phi());
    }

    #[test]
    fn star_of_phi_or_empty_is_empty() {
        assert_eq!(Rx::phi().star(), Rx::empty());
        assert_eq!(Rx::empty().star(), Rx::empty());
    }

    #[test]
    fn nested_star_collapses() {
        let a = Rx::letter('a');
        assert_eq!(a.clone().star().star(), a.star());
    }

    #[test]
    fn choice_of_equal_terms_collapses() {
        let a = Rx::letter('a');
        assert_eq!(a.clone() + a.clone(), a);
    }

    #[test]
    fn choice_of_letters_fuses() {
        let r = Rx::letter('a') + Rx::letter('b');
        assert_eq!(r, Rx::letters(LetterSet::range('a', 'b')));
    }

    #[test]
    fn repeat_rejects_bad_bounds() {
        assert!(Rx::letter('a').repeat(3, 2).is_err());
    }

    #[test]
    fn repeat_zero_n_is_empty() {
        assert_eq!(Rx::letter('a').repeat(0, 0).unwrap(), Rx::empty());
    }

    #[test]
    fn pow_negative_is_empty() {
        assert_eq!(Rx::letter('a').pow(-1), Rx::empty());
    }

    #[test]
    fn literal_builds_concatenation() {
        let r = Rx::literal("ab");
        assert_eq!(r, Rx::letter('a').concat(Rx::letter('b')));
    }
}
