//! `repr()`: a structural fold from `Rx` back to standard regex syntax
//! (§6), round-tripping through [`crate::parser`] for every term the
//! parser itself can produce. Distinct from the derived `Debug` impl on
//! `Rx`, which is a host-language view, not regex text.

use crate::letter_set::LetterSet;
use crate::term::Rx;

/// Precedence tiers, lowest first: choice binds loosest, then
/// concatenation, then postfix quantifiers; everything else is atomic.
fn prec(r: &Rx) -> u8 {
    match r {
        Rx::Choice(..) => 0,
        Rx::Concat(..) => 1,
        Rx::Star(..) | Rx::Repeat(..) => 2,
        _ => 3,
    }
}

/// A textual form close to standard regex syntax (§6).
pub fn repr(r: &Rx) -> String {
    let mut out = String::new();
    fmt_rx(r, 0, &mut out);
    out
}

fn fmt_rx(r: &Rx, min_prec: u8, out: &mut String) {
    let needs_parens = prec(r) < min_prec;
    if needs_parens {
        out.push('(');
    }
    match r {
        Rx::Phi => out.push('\u{2205}'),
        Rx::Empty => out.push_str("\"\""),
        Rx::Letter(c) => push_escaped(out, *c),
        Rx::Letters(s) => fmt_letters(s, out),
        Rx::Choice(a, b) => {
            fmt_rx(a, 0, out);
            out.push('|');
            fmt_rx(b, 0, out);
        }
        Rx::Concat(a, b) => {
            fmt_rx(a, 1, out);
            fmt_rx(b, 1, out);
        }
        Rx::Star(inner) => {
            fmt_rx(inner, 3, out);
            out.push('*');
        }
        Rx::Repeat(inner, m, n) => {
            fmt_rx(inner, 3, out);
            out.push_str(&format!("{{{m},{n}}}"));
        }
        Rx::Var(_) => unreachable!("Var escaped its algorithm (§3 invariant 6)"),
    }
    if needs_parens {
        out.push(')');
    }
}

fn fmt_letters(s: &LetterSet, out: &mut String) {
    out.push('[');
    for (lo, hi) in s.ranges() {
        if lo == hi {
            push_escaped_in_class(out, lo);
        } else {
            push_escaped_in_class(out, lo);
            out.push('-');
            push_escaped_in_class(out, hi);
        }
    }
    out.push(']');
}

const METACHARS: &str = "|)(*+?{}[]^$\\.";

fn push_escaped(out: &mut String, c: char) {
    if METACHARS.contains(c) {
        out.push('\\');
    }
    push_raw_or_control(out, c);
}

fn push_escaped_in_class(out: &mut String, c: char) {
    if matches!(c, ']' | '\\' | '-' | '^') {
        out.push('\\');
    }
    push_raw_or_control(out, c);
}

fn push_raw_or_control(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        '\r' => out.push_str("\\r"),
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repr_of_phi_and_empty() {
        assert_eq!(repr(&Rx::phi()), "\u{2205}");
        assert_eq!(repr(&Rx::empty()), "\"\"");
    }

    #[test]
    fn repr_of_letter_and_star() {
        let r = Rx::letter('a').star();
        assert_eq!(repr(&r), "a*");
    }

    #[test]
    fn repr_parenthesizes_choice_inside_concat() {
        let r = (Rx::letter('a') + Rx::letter('b')).concat(Rx::letter('c'));
        assert_eq!(repr(&r), "(a|b)c");
    }

    #[test]
    fn repr_parenthesizes_concat_inside_star() {
        let r = Rx::letter('a').concat(Rx::letter('b')).star();
        assert_eq!(repr(&r), "(ab)*");
    }

    #[test]
    fn repr_of_letters_class() {
        let r = Rx::range('a', 'c');
        assert_eq!(repr(&r), "[a-c]");
    }

    #[test]
    fn repr_of_repeat() {
        let r = Rx::letter('a').repeat(2, 4).unwrap();
        assert_eq!(repr(&r), "a{2,4}");
    }

    #[test]
    fn repr_escapes_metacharacters() {
        let r = Rx::letter('.');
        assert_eq!(repr(&r), "\\.");
    }
}
