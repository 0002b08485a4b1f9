//! Equivalence and partial order (§4.7): two coinductive bisimulations over
//! the derivative automaton. Both terminate because Antimirov derivatives
//! only ever produce finitely many distinct residues, and both use a local
//! `env` — the coinduction hypothesis — to short-circuit on a revisited
//! pair instead of recomputing it.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::derive::{accepts_empty, deriv, first_set, is_empty_language, is_phi, match_sizes};
use crate::letter_set::{venn, VennPiece};
use crate::size::Size;
use crate::term::Rx;

/// Whether `lhs` and `rhs` denote the same language (§4.7).
pub fn equiv(lhs: &Rx, rhs: &Rx) -> bool {
    let mut env = HashSet::new();
    equiv_rec(lhs, rhs, &mut env)
}

fn equiv_rec(lhs: &Rx, rhs: &Rx, env: &mut HashSet<(Rx, Rx)>) -> bool {
    if accepts_empty(lhs) != accepts_empty(rhs) {
        return false;
    }
    if is_phi(lhs) != is_phi(rhs) {
        return false;
    }

    let pair = (lhs.clone(), rhs.clone());
    if env.contains(&pair) {
        return true;
    }

    if match_sizes(lhs) != match_sizes(rhs) {
        return false;
    }

    let pieces = venn(&first_set(lhs), &first_set(rhs));
    if pieces
        .iter()
        .any(|p| matches!(p, VennPiece::Left(_) | VennPiece::Right(_)))
    {
        return false;
    }

    env.insert(pair);
    for piece in &pieces {
        let c = piece
            .set()
            .min()
            .expect("venn never emits an empty piece");
        if !equiv_rec(&deriv(lhs, c), &deriv(rhs, c), env) {
            return false;
        }
    }
    true
}

/// The partial order between `lhs` and `rhs`: `Some(Equal)` for
/// equivalent, `Some(Less)` if `lhs` is a (possibly improper) subset,
/// `Some(Greater)` for the reverse, and `None` when neither contains the
/// other (§4.7's `NaN`; see SPEC_FULL.md §4.7's Open Question on why this is
/// `Option<Ordering>` rather than a `PartialOrd` impl).
pub fn partial_compare(lhs: &Rx, rhs: &Rx) -> Option<Ordering> {
    let mut env = HashSet::new();
    partial_compare_rec(lhs, rhs, &mut env)
}

fn partial_compare_rec(lhs: &Rx, rhs: &Rx, env: &mut HashSet<(Rx, Rx)>) -> Option<Ordering> {
    if matches!(lhs, Rx::Phi) {
        return Some(if is_phi(rhs) {
            Ordering::Equal
        } else {
            Ordering::Less
        });
    }
    if matches!(rhs, Rx::Phi) {
        return Some(if is_phi(lhs) {
            Ordering::Equal
        } else {
            Ordering::Greater
        });
    }
    if matches!(lhs, Rx::Empty) {
        return if is_empty_language(rhs) {
            Some(Ordering::Equal)
        } else if accepts_empty(rhs) {
            Some(Ordering::Less)
        } else {
            None
        };
    }
    if matches!(rhs, Rx::Empty) {
        return if is_empty_language(lhs) {
            Some(Ordering::Equal)
        } else if accepts_empty(lhs) {
            Some(Ordering::Greater)
        } else {
            None
        };
    }

    let pair = (lhs.clone(), rhs.clone());
    if env.contains(&pair) {
        return Some(Ordering::Equal);
    }
    env.insert(pair);

    let mut res = Some(match (accepts_empty(lhs), accepts_empty(rhs)) {
        (true, true) | (false, false) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    });

    res = acc(res, range_subset(match_sizes(lhs), match_sizes(rhs)));
    res?;

    let pieces = venn(&first_set(lhs), &first_set(rhs));
    for piece in &pieces {
        res = acc(
            res,
            match piece {
                VennPiece::Left(_) => Some(Ordering::Greater),
                VennPiece::Right(_) => Some(Ordering::Less),
                VennPiece::Both(_) => continue,
            },
        );
        res?;
    }

    for piece in &pieces {
        if let VennPiece::Both(set) = piece {
            let c = set.min().expect("venn never emits an empty piece");
            res = acc(res, partial_compare_rec(&deriv(lhs, c), &deriv(rhs, c), env));
            res?;
        }
    }

    res
}

/// The lattice-join table from §4.7: combines two `{-1,0,+1,NaN}` results.
fn acc(x: Option<Ordering>, y: Option<Ordering>) -> Option<Ordering> {
    use Ordering::*;
    match (x?, y?) {
        (Less, Less) => Some(Less),
        (Less, Equal) => Some(Less),
        (Less, Greater) => None,
        (Equal, Less) => Some(Less),
        (Equal, Equal) => Some(Equal),
        (Equal, Greater) => Some(Greater),
        (Greater, Less) => None,
        (Greater, Equal) => Some(Greater),
        (Greater, Greater) => Some(Greater),
    }
}

/// Compares two match-size ranges (`None` standing for the empty range).
fn range_subset(lhs: Option<(Size, Size)>, rhs: Option<(Size, Size)>) -> Option<Ordering> {
    match (lhs, rhs) {
        (None, None) => Some(Ordering::Equal),
        (None, Some(_)) => Some(Ordering::Less),
        (Some(_), None) => Some(Ordering::Greater),
        (Some((x1, y1)), Some((x2, y2))) => {
            if x1 == x2 && y1 == y2 {
                Some(Ordering::Equal)
            } else if x1 >= x2 && y1 <= y2 {
                Some(Ordering::Less)
            } else if x2 >= x1 && y2 <= y1 {
                Some(Ordering::Greater)
            } else {
                None
            }
        }
    }
}
