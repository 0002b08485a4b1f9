//! Set-algebra combinators and canonicalization (§4.8–§4.10): intersection,
//! difference, XOR, and a canonical representative, all built the same way
//! — construct the derivative automaton on the fly, tie off each newly
//! discovered recursive state behind a fresh `Var`, and close the resulting
//! expression with Arden's rule as soon as that state's own `Var` is no
//! longer needed.
//!
//! `Var` only exists within a single top-level call into this module: each
//! public entry point starts a fresh `env`/`cnt` pair, and by the time it
//! returns, every `Var` it allocated has been eliminated by [`resolve`].

use std::collections::HashMap;

use crate::derive::{accepts_empty, deriv, first_set, is_phi};
use crate::letter_set::{venn, LetterSet, VennPiece};
use crate::term::Rx;

#[derive(Clone, Copy)]
enum Op {
    Intersect,
    Difference,
    Xor,
}

type PairEnv = HashMap<(Rx, Rx), u32>;

/// `r1 ∩ r2` (§4.8).
pub fn intersect(lhs: &Rx, rhs: &Rx) -> Rx {
    run(lhs, rhs, Op::Intersect)
}

/// `r1 - r2` (§4.8).
pub fn difference(lhs: &Rx, rhs: &Rx) -> Rx {
    run(lhs, rhs, Op::Difference)
}

/// `r1 ^ r2`, symmetric difference (§4.8).
pub fn xor(lhs: &Rx, rhs: &Rx) -> Rx {
    run(lhs, rhs, Op::Xor)
}

fn run(lhs: &Rx, rhs: &Rx, op: Op) -> Rx {
    let mut env = PairEnv::new();
    let mut cnt = 0u32;
    rec(lhs, rhs, op, &mut env, &mut cnt)
}

fn base_case(op: Op, lhs: &Rx, rhs: &Rx) -> Option<Rx> {
    match op {
        Op::Intersect => {
            if matches!(lhs, Rx::Phi) || matches!(rhs, Rx::Phi) {
                return Some(Rx::Phi);
            }
            if matches!(lhs, Rx::Empty) {
                return Some(if accepts_empty(rhs) { Rx::Empty } else { Rx::Phi });
            }
            if matches!(rhs, Rx::Empty) {
                return Some(if accepts_empty(lhs) { Rx::Empty } else { Rx::Phi });
            }
            None
        }
        Op::Difference => {
            if matches!(lhs, Rx::Phi) {
                return Some(Rx::Phi);
            }
            if matches!(rhs, Rx::Phi) {
                return Some(lhs.clone());
            }
            if matches!(lhs, Rx::Empty) {
                return Some(if accepts_empty(rhs) { Rx::Phi } else { Rx::Empty });
            }
            None
        }
        Op::Xor => {
            if matches!(rhs, Rx::Phi) {
                return Some(lhs.clone());
            }
            if matches!(lhs, Rx::Phi) {
                return Some(rhs.clone());
            }
            if matches!(lhs, Rx::Empty) && !accepts_empty(rhs) {
                return Some(rhs.clone() + Rx::Empty);
            }
            if matches!(rhs, Rx::Empty) && !accepts_empty(lhs) {
                return Some(lhs.clone() + Rx::Empty);
            }
            None
        }
    }
}

fn rec(lhs: &Rx, rhs: &Rx, op: Op, env: &mut PairEnv, cnt: &mut u32) -> Rx {
    if let Some(r) = base_case(op, lhs, rhs) {
        return r;
    }

    let pair = (lhs.clone(), rhs.clone());
    if let Some(&id) = env.get(&pair) {
        return Rx::Var(id);
    }
    *cnt += 1;
    let id = *cnt;
    env.insert(pair, id);

    let nullable = match op {
        Op::Intersect => accepts_empty(lhs) && accepts_empty(rhs),
        Op::Difference => accepts_empty(lhs) && !accepts_empty(rhs),
        Op::Xor => accepts_empty(lhs) != accepts_empty(rhs),
    };
    let mut body = if nullable { Rx::Empty } else { Rx::Phi };

    for piece in &venn(&first_set(lhs), &first_set(rhs)) {
        let contrib: Option<(&LetterSet, Rx, Rx)> = match piece {
            VennPiece::Both(s) => {
                let c = s.min().expect("venn never emits an empty piece");
                Some((s, deriv(lhs, c), deriv(rhs, c)))
            }
            VennPiece::Left(s) => match op {
                Op::Intersect => None,
                Op::Difference | Op::Xor => {
                    let c = s.min().expect("venn never emits an empty piece");
                    Some((s, deriv(lhs, c), Rx::Phi))
                }
            },
            VennPiece::Right(s) => match op {
                Op::Intersect | Op::Difference => None,
                Op::Xor => {
                    let c = s.min().expect("venn never emits an empty piece");
                    Some((s, Rx::Phi, deriv(rhs, c)))
                }
            },
        };
        if let Some((set, nl, nr)) = contrib {
            let sub = rec(&nl, &nr, op, env, cnt);
            body = body + Rx::letters(set.clone()).concat(sub);
        }
    }

    resolve(&body, id)
}

/// A representative term such that `equiv(r, s)` implies `canonical(r) ==
/// canonical(s)` (§4.9). Not necessarily minimal.
pub fn canonical(r: &Rx) -> Rx {
    let mut env: HashMap<Rx, u32> = HashMap::new();
    let mut cnt = 0u32;
    canon_rec(r, &mut env, &mut cnt)
}

fn canon_rec(r: &Rx, env: &mut HashMap<Rx, u32>, cnt: &mut u32) -> Rx {
    if is_phi(r) {
        return Rx::Phi;
    }
    if let Some(&id) = env.get(r) {
        return Rx::Var(id);
    }
    *cnt += 1;
    let id = *cnt;
    env.insert(r.clone(), id);

    let mut body = if accepts_empty(r) { Rx::Empty } else { Rx::Phi };
    for set in first_set(r) {
        let c = set.min().expect("first_set never emits an empty piece");
        let sub = canon_rec(&deriv(r, c), env, cnt);
        body = body + Rx::letters(set).concat(sub);
    }

    resolve(&body, id)
}

/// Arden's rule (§4.10): `e ≡ R · Var(k) + B` closes to `R* · B`.
fn resolve(e: &Rx, k: u32) -> Rx {
    let (r, b) = split(e, k);
    r.star().concat(b)
}

/// Splits `e` into `(R, B)` such that `e ≡ R · Var(k) + B`, with `Var(k)`
/// eliminated and every other `Var(j)` left untouched in `B`.
fn split(e: &Rx, k: u32) -> (Rx, Rx) {
    match e {
        Rx::Var(j) if *j == k => (Rx::Empty, Rx::Phi),
        Rx::Var(_) => (Rx::Phi, e.clone()),
        Rx::Concat(a, b) => {
            let (r1, b1) = split(a, k);
            let (r2, b2) = split(b, k);
            let term1 = r1.clone().concat(r2.clone());
            let term2 = r1.concat(b2.clone());
            let term3 = b1.clone().concat(r2);
            (term1 + term2 + term3, b1.concat(b2))
        }
        Rx::Choice(a, b) => {
            let (r1, b1) = split(a, k);
            let (r2, b2) = split(b, k);
            (r1 + r2, b1 + b2)
        }
        other => (Rx::Phi, other.clone()),
    }
}
