//! Surface-syntax parser (§6): standard regex notation, restricted to this
//! algebra's feature set. Built with `nom`, the same combinator library the
//! teacher's own regex front end historically used.
//!
//! No capture groups, no anchors, no lookaround, no backreferences — `(...)`
//! is always plain grouping, and `^`/`$`/`\1`.. are rejected outright rather
//! than silently accepted as literals.

use nom::branch::alt;
use nom::character::complete::{anychar, char, digit1, one_of};
use nom::combinator::{all_consuming, map, map_res, opt, value, verify};
use nom::error::{Error as NomError, ErrorKind, ParseError};
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::preceded;
use nom::{Err as NErr, IResult};

use crate::error::{Error, Result};
use crate::letter_set::LetterSet;
use crate::term::Rx;

type PResult<'a, O> = IResult<&'a str, O>;

/// Parses `input` as a regex, consuming it in full (§6).
pub fn parse(input: &str) -> Result<Rx> {
    all_consuming(parse_alt)(input)
        .map(|(_, rx)| rx)
        .map_err(|e| Error::Parse(format!("{e}")))
}

fn parse_alt(input: &str) -> PResult<Rx> {
    map(separated_list1(char('|'), parse_concat), |branches| {
        branches.into_iter().fold(Rx::phi(), |acc, r| acc + r)
    })(input)
}

fn parse_concat(input: &str) -> PResult<Rx> {
    map(many0(parse_repeat), |atoms| {
        atoms.into_iter().fold(Rx::empty(), |acc, r| acc.concat(r))
    })(input)
}

enum Quant {
    Star,
    Plus,
    Optional,
    Exact(u32),
    AtLeast(u32),
    Range(u32, u32),
}

fn parse_repeat(input: &str) -> PResult<Rx> {
    let (input, atom) = parse_atom(input)?;
    let (input, quant) = opt(parse_quantifier)(input)?;
    let rx = match quant {
        None => atom,
        Some(Quant::Star) => atom.star(),
        Some(Quant::Plus) => atom.clone().concat(atom.star()),
        Some(Quant::Optional) => atom + Rx::empty(),
        Some(Quant::Exact(m)) => atom.pow(m as i64),
        Some(Quant::AtLeast(m)) => atom.clone().pow(m as i64).concat(atom.star()),
        Some(Quant::Range(m, n)) => {
            if n < m {
                return Err(NErr::Failure(NomError::from_error_kind(
                    input,
                    ErrorKind::Verify,
                )));
            }
            atom.repeat(m, n).expect("bounds validated above")
        }
    };
    Ok((input, rx))
}

fn parse_quantifier(input: &str) -> PResult<Quant> {
    alt((
        value(Quant::Star, char('*')),
        value(Quant::Plus, char('+')),
        value(Quant::Optional, char('?')),
        parse_brace_quantifier,
    ))(input)
}

fn parse_brace_quantifier(input: &str) -> PResult<Quant> {
    let (input, _) = char('{')(input)?;
    let (input, m) = number(input)?;
    let (input, rest) = opt(preceded(char(','), opt(number)))(input)?;
    let (input, _) = char('}')(input)?;
    Ok((
        input,
        match rest {
            None => Quant::Exact(m),
            Some(None) => Quant::AtLeast(m),
            Some(Some(n)) => Quant::Range(m, n),
        },
    ))
}

fn number(input: &str) -> PResult<u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

fn parse_atom(input: &str) -> PResult<Rx> {
    alt((
        parse_group,
        value(Rx::dot(), char('.')),
        parse_class,
        parse_escape_atom,
        reject_anchor,
        parse_literal_char,
    ))(input)
}

fn parse_group(input: &str) -> PResult<Rx> {
    let (input, _) = char('(')(input)?;
    if input.starts_with('?') {
        // No capture groups means there is nothing for `(?...)` to select
        // between; reject it rather than silently treating it as a group.
        return Err(NErr::Failure(NomError::from_error_kind(
            input,
            ErrorKind::Tag,
        )));
    }
    let (input, inner) = parse_alt(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, inner))
}

fn reject_anchor(input: &str) -> PResult<Rx> {
    let (_, _) = one_of("^$")(input)?;
    Err(NErr::Failure(NomError::from_error_kind(
        input,
        ErrorKind::Tag,
    )))
}

const METACHARS: &str = "|)(*+?{}[]^$\\.";

fn parse_literal_char(input: &str) -> PResult<Rx> {
    map(
        verify(anychar, |c: &char| !METACHARS.contains(*c)),
        Rx::letter,
    )(input)
}

fn parse_escape_atom(input: &str) -> PResult<Rx> {
    let (input, _) = char('\\')(input)?;
    let (rest, c) = anychar(input)?;
    match c {
        'd' => Ok((rest, Rx::letters(digit_class()))),
        'D' => Ok((rest, Rx::letters(LetterSet::full().difference(&digit_class())))),
        'w' => Ok((rest, Rx::letters(word_class()))),
        'W' => Ok((rest, Rx::letters(LetterSet::full().difference(&word_class())))),
        's' => Ok((rest, Rx::letters(space_class()))),
        'S' => Ok((rest, Rx::letters(LetterSet::full().difference(&space_class())))),
        'n' => Ok((rest, Rx::letter('\n'))),
        't' => Ok((rest, Rx::letter('\t'))),
        'r' => Ok((rest, Rx::letter('\r'))),
        '1'..='9' => Err(NErr::Failure(NomError::from_error_kind(
            input,
            ErrorKind::Tag,
        ))),
        c if METACHARS.contains(c) => Ok((rest, Rx::letter(c))),
        '/' | '-' => Ok((rest, Rx::letter(c))),
        _ => Err(NErr::Failure(NomError::from_error_kind(
            input,
            ErrorKind::Tag,
        ))),
    }
}

fn parse_class(input: &str) -> PResult<Rx> {
    let (input, _) = char('[')(input)?;
    let (input, negate) = map(opt(char('^')), |o| o.is_some())(input)?;
    let (input, items) = many1(parse_class_item)(input)?;
    let (input, _) = char(']')(input)?;
    let set = items
        .into_iter()
        .fold(LetterSet::empty(), |acc, s| acc.union(&s));
    let set = if negate {
        LetterSet::full().difference(&set)
    } else {
        set
    };
    Ok((input, Rx::letters(set)))
}

fn parse_class_item(input: &str) -> PResult<LetterSet> {
    alt((parse_class_shorthand, parse_class_range, parse_class_single))(input)
}

fn parse_class_shorthand(input: &str) -> PResult<LetterSet> {
    let (input, _) = char('\\')(input)?;
    let (input, c) = one_of("dDwWsS")(input)?;
    Ok((
        input,
        match c {
            'd' => digit_class(),
            'D' => LetterSet::full().difference(&digit_class()),
            'w' => word_class(),
            'W' => LetterSet::full().difference(&word_class()),
            's' => space_class(),
            'S' => LetterSet::full().difference(&space_class()),
            _ => unreachable!("one_of restricted the alternatives above"),
        },
    ))
}

fn parse_class_range(input: &str) -> PResult<LetterSet> {
    let (input, lo) = parse_class_char(input)?;
    let (input, _) = char('-')(input)?;
    let (input, hi) = parse_class_char(input)?;
    Ok((input, LetterSet::range(lo, hi)))
}

fn parse_class_single(input: &str) -> PResult<LetterSet> {
    map(parse_class_char, LetterSet::single)(input)
}

fn parse_class_char(input: &str) -> PResult<char> {
    alt((
        preceded(char('\\'), class_escape_char),
        verify(anychar, |c: &char| *c != ']'),
    ))(input)
}

fn class_escape_char(input: &str) -> PResult<char> {
    map(anychar, |c| match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    })(input)
}

fn digit_class() -> LetterSet {
    LetterSet::range('0', '9')
}

fn word_class() -> LetterSet {
    LetterSet::range('0', '9')
        .union(&LetterSet::range('A', 'Z'))
        .union(&LetterSet::range('a', 'z'))
        .union(&LetterSet::single('_'))
}

fn space_class() -> LetterSet {
    [' ', '\t', '\n', '\r', '\u{0B}', '\u{0C}']
        .into_iter()
        .fold(LetterSet::empty(), |acc, c| acc.union(&LetterSet::single(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::accepts;

    #[test]
    fn parses_literal_concatenation() {
        let r = parse("ab").unwrap();
        assert_eq!(r, Rx::literal("ab"));
    }

    #[test]
    fn parses_alternation_and_star() {
        let r = parse("ab*|c").unwrap();
        assert!(accepts(&r, "a"));
        assert!(accepts(&r, "abbb"));
        assert!(accepts(&r, "c"));
        assert!(!accepts(&r, "ac"));
    }

    #[test]
    fn parses_grouping() {
        let r = parse("(ab)*").unwrap();
        assert!(accepts(&r, ""));
        assert!(accepts(&r, "abab"));
        assert!(!accepts(&r, "aba"));
    }

    #[test]
    fn parses_bounded_repeat() {
        let r = parse("a{2,4}").unwrap();
        assert!(!accepts(&r, "a"));
        assert!(accepts(&r, "aa"));
        assert!(accepts(&r, "aaaa"));
        assert!(!accepts(&r, "aaaaa"));
    }

    #[test]
    fn parses_character_class_and_negation() {
        let r = parse("[a-c]").unwrap();
        assert!(accepts(&r, "b"));
        assert!(!accepts(&r, "d"));

        let neg = parse("[^a-c]").unwrap();
        assert!(!accepts(&neg, "b"));
        assert!(accepts(&neg, "d"));
    }

    #[test]
    fn parses_digit_shorthand() {
        let r = parse("\\d+").unwrap();
        assert!(accepts(&r, "0"));
        assert!(accepts(&r, "42"));
        assert!(!accepts(&r, ""));
        assert!(!accepts(&r, "4a"));
    }

    #[test]
    fn rejects_anchors() {
        assert!(parse("^a$").is_err());
    }

    #[test]
    fn rejects_special_group_syntax() {
        assert!(parse("(?:a)").is_err());
    }

    #[test]
    fn rejects_backreferences() {
        assert!(parse("a\\1").is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse("a)").is_err());
    }

    #[test]
    fn rejects_bad_repeat_bounds() {
        assert!(parse("a{4,2}").is_err());
    }
}
