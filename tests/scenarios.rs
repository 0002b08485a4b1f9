//! Concrete end-to-end scenarios (§8), exercised through the public parser
//! and decision API rather than internal constructors.

use rxset::Rx;

#[test]
fn a_star_equiv_aa_star_alternatives_and_shares_canonical_form() {
    let r = Rx::parse("a*").unwrap();
    let s = Rx::parse("(aa)*|(aa)*a").unwrap();
    assert!(r.equiv(&s));
    assert_eq!(r.canonical(), s.canonical());
}

#[test]
fn overlapping_classes_combine_correctly() {
    let r = Rx::parse("[a-c]").unwrap();
    let s = Rx::parse("[b-d]").unwrap();

    let inter = r.intersect(&s);
    assert!(inter.accepts("b"));
    assert!(inter.accepts("c"));
    assert!(!inter.accepts("a"));
    assert!(!inter.accepts("d"));

    let diff = r.difference(&s);
    assert!(diff.accepts("a"));
    assert!(!diff.accepts("b"));
    assert!(!diff.accepts("d"));

    let xor = r.xor(&s);
    assert!(xor.accepts("a"));
    assert!(xor.accepts("d"));
    assert!(!xor.accepts("b"));
    assert!(!xor.accepts("c"));
}

#[test]
fn ab_star_membership_and_match_sizes() {
    use rxset::Size;

    let r = Rx::parse("ab*").unwrap();
    assert!(r.accepts("a"));
    assert!(r.accepts("abbbb"));
    assert!(!r.accepts(""));
    assert!(!r.accepts("b"));
    assert_eq!(r.match_sizes(), Some((Size::Finite(1), Size::Unbounded)));
}

#[test]
fn bounded_repeat_membership_and_match_sizes() {
    use rxset::Size;

    let r = Rx::parse("a{2,4}").unwrap();
    assert!(!r.accepts("a"));
    assert!(r.accepts("aa"));
    assert!(r.accepts("aaaa"));
    assert!(!r.accepts("aaaaa"));
    assert_eq!(r.match_sizes(), Some((Size::Finite(2), Size::Finite(4))));
}

#[test]
fn partial_order_scenarios() {
    use std::cmp::Ordering;

    let a_star = Rx::parse("a*").unwrap();
    let ab_star = Rx::parse("(a|b)*").unwrap();
    assert_eq!(a_star.partial_compare(&ab_star), Some(Ordering::Less));

    let ab_then = Rx::parse("a*b*").unwrap();
    let ba_then = Rx::parse("b*a*").unwrap();
    assert_eq!(ab_then.partial_compare(&ba_then), None);
}

#[test]
fn complement_matches_universe_minus_self() {
    let a_star = Rx::parse("a*").unwrap();
    let universe = Rx::universe();
    let via_difference = universe.difference(&a_star);
    let via_not = a_star.complement();

    assert!(via_difference.equiv(&via_not));
    assert!(via_not.accepts("b"));
    assert!(via_not.accepts("ab"));
    assert!(!via_not.accepts(""));
    assert!(!via_not.accepts("aa"));
}

#[test]
fn parser_rejects_unsupported_syntax() {
    assert!(Rx::parse("^a$").is_err());
    assert!(Rx::parse("(?:a)").is_err());
    assert!(Rx::parse("a\\1").is_err());
}
