//! The derivative engine (§4.2–§4.5): nullability, first sets, match-size
//! ranges, and the Antimirov partial derivative itself. Everything here is a
//! pure structural fold over `Rx` — the coinductive algorithms in
//! `relation` and `algebra` are the only clients that need to memoize
//! anything, and they memoize *pairs*, not these per-term folds.

use crate::letter_set::{venn, LetterSet};
use crate::size::Size;
use crate::term::Rx;

/// Whether `r` accepts the empty string (§4.2).
pub fn accepts_empty(r: &Rx) -> bool {
    match r {
        Rx::Phi | Rx::Letter(_) | Rx::Letters(_) => false,
        Rx::Empty | Rx::Star(_) => true,
        Rx::Repeat(inner, m, _) => *m == 0 || accepts_empty(inner),
        Rx::Choice(a, b) => accepts_empty(a) || accepts_empty(b),
        Rx::Concat(a, b) => accepts_empty(a) && accepts_empty(b),
        Rx::Var(_) => unreachable!("Var escaped its algorithm (§3 invariant 6)"),
    }
}

/// Strict structural "denotes the empty language" check: every leaf must
/// contribute nothing (§4.2). Stricter than "`match_sizes` is `None`" would
/// be if it were defined via derivatives, since it never descends into
/// derivatives at all — purely structural, as required for `equiv`'s
/// cheap early-out.
pub fn is_phi(r: &Rx) -> bool {
    match r {
        Rx::Phi => true,
        Rx::Empty | Rx::Letter(_) | Rx::Letters(_) | Rx::Star(_) => false,
        Rx::Choice(a, b) => is_phi(a) && is_phi(b),
        Rx::Concat(a, b) => is_phi(a) || is_phi(b),
        Rx::Repeat(inner, _, _) => is_phi(inner),
        Rx::Var(_) => unreachable!("Var escaped its algorithm (§3 invariant 6)"),
    }
}

/// Strict structural "denotes exactly `{\"\"}`" check: every leaf must be
/// `Empty`, with no `Phi`/`Letter`/`Star`/`Repeat`/`Var` anywhere (§4.2).
pub fn is_empty_language(r: &Rx) -> bool {
    match r {
        Rx::Empty => true,
        Rx::Phi | Rx::Letter(_) | Rx::Letters(_) | Rx::Star(_) | Rx::Repeat(..) => false,
        Rx::Choice(a, b) | Rx::Concat(a, b) => is_empty_language(a) && is_empty_language(b),
        Rx::Var(_) => unreachable!("Var escaped its algorithm (§3 invariant 6)"),
    }
}

/// The pairwise-disjoint list of congruence classes that may begin some
/// string accepted by `r` (§4.3).
pub fn first_set(r: &Rx) -> Vec<LetterSet> {
    match r {
        Rx::Phi | Rx::Empty => Vec::new(),
        Rx::Letter(c) => vec![LetterSet::single(*c)],
        Rx::Letters(s) => vec![s.clone()],
        Rx::Star(inner) | Rx::Repeat(inner, _, _) => first_set(inner),
        Rx::Concat(a, b) => {
            if !accepts_empty(a) {
                first_set(a)
            } else {
                venn_sets(&first_set(a), &first_set(b))
            }
        }
        Rx::Choice(a, b) => venn_sets(&first_set(a), &first_set(b)),
        Rx::Var(_) => unreachable!("Var escaped its algorithm (§3 invariant 6)"),
    }
}

fn venn_sets(a: &[LetterSet], b: &[LetterSet]) -> Vec<LetterSet> {
    venn(a, b).into_iter().map(|piece| piece.set().clone()).collect()
}

/// `(lo, hi)` bounds on accepted-string length, or `None` if `r` denotes the
/// empty language (§4.4).
pub fn match_sizes(r: &Rx) -> Option<(Size, Size)> {
    match r {
        Rx::Phi => None,
        Rx::Empty => Some((Size::ZERO, Size::ZERO)),
        Rx::Letter(_) | Rx::Letters(_) => Some((Size::ONE, Size::ONE)),
        Rx::Choice(a, b) => match (match_sizes(a), match_sizes(b)) {
            (None, x) => x,
            (x, None) => x,
            (Some((lo1, hi1)), Some((lo2, hi2))) => Some((lo1.min(lo2), hi1.max(hi2))),
        },
        Rx::Concat(a, b) => {
            let (lo1, hi1) = match_sizes(a)?;
            let (lo2, hi2) = match_sizes(b)?;
            Some((lo1 + lo2, hi1 + hi2))
        }
        Rx::Star(inner) => match match_sizes(inner) {
            None => Some((Size::ZERO, Size::ZERO)),
            Some((_, hi)) => Some((Size::ZERO, hi.mul(Size::Unbounded))),
        },
        Rx::Repeat(inner, m, n) => match match_sizes(inner) {
            None if *m == 0 => Some((Size::ZERO, Size::ZERO)),
            None => None,
            Some((lo, hi)) => {
                Some((lo.mul(Size::Finite(*m as u64)), hi.mul(Size::Finite(*n as u64))))
            }
        },
        Rx::Var(_) => unreachable!("Var escaped its algorithm (§3 invariant 6)"),
    }
}

/// The set of terms (Antimirov style) whose union denotes the Brzozowski
/// derivative of `r` with respect to `c` (§4.5). Callers needing the
/// unioned single term should use [`deriv`].
pub fn partial_deriv(r: &Rx, c: char) -> Vec<Rx> {
    match r {
        Rx::Phi | Rx::Empty => Vec::new(),
        Rx::Letter(l) => {
            if *l == c {
                vec![Rx::Empty]
            } else {
                Vec::new()
            }
        }
        Rx::Letters(s) => {
            if s.contains(c) {
                vec![Rx::Empty]
            } else {
                Vec::new()
            }
        }
        Rx::Choice(a, b) => {
            let mut out = partial_deriv(a, c);
            out.extend(partial_deriv(b, c));
            out
        }
        Rx::Concat(a, b) => {
            let mut out: Vec<Rx> = partial_deriv(a, c)
                .into_iter()
                .filter(|d| !matches!(d, Rx::Phi))
                .map(|d| d.concat((**b).clone()))
                .collect();
            if accepts_empty(a) {
                out.extend(partial_deriv(b, c));
            }
            out
        }
        Rx::Star(inner) => partial_deriv(inner, c)
            .into_iter()
            .filter(|d| !matches!(d, Rx::Phi))
            .map(|d| d.concat(Rx::Star(inner.clone())))
            .collect(),
        Rx::Repeat(inner, m, n) => {
            let residues: Vec<Rx> = partial_deriv(inner, c)
                .into_iter()
                .filter(|d| !matches!(d, Rx::Phi))
                .collect();
            if residues.is_empty() {
                Vec::new()
            } else {
                let tail_m = m.saturating_sub(1);
                let tail_n = n - 1;
                residues
                    .into_iter()
                    .map(|d| {
                        d.concat(
                            (**inner)
                                .clone()
                                .repeat(tail_m, tail_n)
                                .expect("tail_n >= tail_m by construction"),
                        )
                    })
                    .collect()
            }
        }
        Rx::Var(_) => unreachable!("Var escaped its algorithm (§3 invariant 6)"),
    }
}

/// The Brzozowski derivative of `r` with respect to `c`, as a single term:
/// the smart-constructor union of [`partial_deriv`]'s residue set.
pub fn deriv(r: &Rx, c: char) -> Rx {
    partial_deriv(r, c)
        .into_iter()
        .fold(Rx::Phi, |acc, d| Rx::choice(acc, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullability_matches_spec_table() {
        assert!(!accepts_empty(&Rx::phi()));
        assert!(accepts_empty(&Rx::empty()));
        assert!(accepts_empty(&Rx::letter('a').star()));
        assert!(!accepts_empty(&Rx::letter('a')));
    }

    #[test]
    fn is_phi_propagates_through_concat_and_choice() {
        let a = Rx::letter('a');
        assert!(is_phi(&Rx::phi().concat(a.clone())));
        assert!(is_phi(&Rx::phi().concat(Rx::phi())));
        assert!(!is_phi(&(a.clone() + Rx::phi())));
    }

    #[test]
    fn first_set_of_ab_star() {
        let r = Rx::letter('a').concat(Rx::letter('b').star());
        assert_eq!(first_set(&r), vec![LetterSet::single('a')]);
    }

    #[test]
    fn first_set_of_optional_a_then_b() {
        // (a|Empty)·b : both 'a' and 'b' can start a match.
        let r = (Rx::letter('a') + Rx::empty()).concat(Rx::letter('b'));
        let fs = first_set(&r);
        assert_eq!(fs.len(), 2);
    }

    #[test]
    fn match_sizes_of_ab_star() {
        let r = Rx::letter('a').concat(Rx::letter('b').star());
        assert_eq!(match_sizes(&r), Some((Size::ONE, Size::Unbounded)));
    }

    #[test]
    fn match_sizes_of_repeat() {
        let r = Rx::letter('a').repeat(2, 4).unwrap();
        assert_eq!(match_sizes(&r), Some((Size::Finite(2), Size::Finite(4))));
    }

    #[test]
    fn match_sizes_of_repeat_zero_with_phi_inner_is_empty_string() {
        // `repeat`'s smart constructor never lets `Rx::Repeat` wrap a
        // structurally-Phi inner term (it collapses to `Phi`/`Empty`
        // itself), so this shape can't arise through the public API — built
        // directly here to pin down the `m == 0` branch the spec requires.
        let r = Rx::Repeat(Box::new(Rx::phi()), 0, 3);
        assert_eq!(match_sizes(&r), Some((Size::ZERO, Size::ZERO)));
    }

    #[test]
    fn deriv_of_ab_on_a_is_b() {
        let r = Rx::letter('a').concat(Rx::letter('b'));
        assert_eq!(deriv(&r, 'a'), Rx::letter('b'));
        assert_eq!(deriv(&r, 'b'), Rx::phi());
    }

    #[test]
    fn deriv_of_star() {
        let r = Rx::letter('a').star();
        assert_eq!(deriv(&r, 'a'), r);
    }
}
