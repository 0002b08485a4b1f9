//! `LetterSet`: an ordered union of disjoint, inclusive `[lo, hi]` character
//! ranges, plus the `venn` congruence-class partitioner that the derivative
//! engine leans on (§4.3, §9 "Alphabet partitioning"). Modeled on the
//! offset-sweep technique the teacher's `RegExpAlphabet` uses to decimate
//! symbol ranges, generalized here to tag pieces by which side(s) of two
//! lists of already-disjoint sets cover them.

use std::cmp::Ordering;

/// One past the last code point below the surrogate range.
const GAP_LO: u32 = 0xD7FF;
/// First code point above the surrogate range.
const GAP_HI: u32 = 0xE000;
const CODE_MAX: u32 = 0x10FFFF;

/// An ordered union of disjoint, non-adjacent `[lo, hi]` ranges over `char`.
///
/// Ranges are stored gap-free: none of them straddle the UTF-16 surrogate
/// range (`0xD800..=0xDFFF`), which contains no valid `char` values. This
/// keeps every range endpoint a valid `char` even after the sweep in
/// [`venn`] cuts a set at an arbitrary boundary.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct LetterSet {
    ranges: Vec<(u32, u32)>,
}

impl LetterSet {
    pub fn empty() -> Self {
        LetterSet { ranges: Vec::new() }
    }

    /// The entire `char` alphabet: every valid code point.
    pub fn full() -> Self {
        LetterSet {
            ranges: vec![(0, GAP_LO), (GAP_HI, CODE_MAX)],
        }
    }

    pub fn single(c: char) -> Self {
        LetterSet {
            ranges: vec![(c as u32, c as u32)],
        }
    }

    /// An inclusive range `[lo, hi]`. Empty if `lo > hi`; split automatically
    /// if it would otherwise straddle the surrogate gap.
    pub fn range(lo: char, hi: char) -> Self {
        let mut out = LetterSet::empty();
        for piece in split_at_gap(lo as u32, hi as u32) {
            out.ranges.push(piece);
        }
        out
    }

    pub fn from_ranges<I: IntoIterator<Item = (char, char)>>(ranges: I) -> Self {
        let mut out = LetterSet::empty();
        for (lo, hi) in ranges {
            out = out.union(&LetterSet::range(lo, hi));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        let v = c as u32;
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if v < lo {
                    Ordering::Greater
                } else if v > hi {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn min(&self) -> Option<char> {
        self.ranges.first().map(|&(lo, _)| char_from(lo))
    }

    pub fn max(&self) -> Option<char> {
        self.ranges.last().map(|&(_, hi)| char_from(hi))
    }

    /// `Some(c)` if this set contains exactly one character.
    pub fn single_value(&self) -> Option<char> {
        match self.ranges.as_slice() {
            [(lo, hi)] if lo == hi => Some(char_from(*lo)),
            _ => None,
        }
    }

    pub fn union(&self, other: &LetterSet) -> LetterSet {
        merge_tagged(
            &self.ranges,
            &other.ranges,
            |a, b| a || b,
        )
    }

    pub fn intersection(&self, other: &LetterSet) -> LetterSet {
        merge_tagged(&self.ranges, &other.ranges, |a, b| a && b)
    }

    pub fn difference(&self, other: &LetterSet) -> LetterSet {
        merge_tagged(&self.ranges, &other.ranges, |a, b| a && !b)
    }

    pub fn ranges(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.ranges.iter().map(|&(lo, hi)| (char_from(lo), char_from(hi)))
    }

    fn raw_ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }
}

fn char_from(v: u32) -> char {
    char::from_u32(v).expect("LetterSet ranges are kept gap-free and in-range")
}

/// Splits `[lo, hi]` (as raw code points) so that no resulting piece
/// straddles the surrogate gap.
fn split_at_gap(lo: u32, hi: u32) -> Vec<(u32, u32)> {
    if lo > hi {
        return Vec::new();
    }
    let mut out = Vec::new();
    if lo <= GAP_LO {
        out.push((lo, hi.min(GAP_LO)));
    }
    if hi >= GAP_HI {
        out.push((lo.max(GAP_HI), hi));
    }
    out
}

/// Sweeps two sorted, disjoint range lists and rebuilds a normalized range
/// list by combining, at each elementary interval, whether it was covered by
/// `a` and/or `b` through `combine`.
fn merge_tagged(
    a: &[(u32, u32)],
    b: &[(u32, u32)],
    combine: impl Fn(bool, bool) -> bool,
) -> LetterSet {
    let mut boundaries: Vec<u32> = Vec::with_capacity(2 * (a.len() + b.len()));
    for &(lo, hi) in a.iter().chain(b.iter()) {
        boundaries.push(lo);
        if hi < u32::MAX {
            boundaries.push(hi + 1);
        }
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut ranges = Vec::new();
    let mut pending: Option<(u32, u32)> = None;

    for window in boundaries.windows(2) {
        let (start, next) = (window[0], window[1]);
        let end = next - 1;
        let in_a = contains_raw(a, start);
        let in_b = contains_raw(b, start);
        if combine(in_a, in_b) {
            match pending {
                Some((plo, phi)) if phi + 1 == start => pending = Some((plo, end)),
                Some((plo, phi)) => {
                    ranges.push((plo, phi));
                    pending = Some((start, end));
                }
                None => pending = Some((start, end)),
            }
        } else if let Some(p) = pending.take() {
            ranges.push(p);
        }
    }
    if let Some(p) = pending {
        ranges.push(p);
    }

    LetterSet { ranges }
}

fn contains_raw(ranges: &[(u32, u32)], v: u32) -> bool {
    ranges
        .binary_search_by(|&(lo, hi)| {
            if v < lo {
                Ordering::Greater
            } else if v > hi {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        })
        .is_ok()
}

/// A piece of the partition produced by [`venn`], tagged by which of the two
/// input lists cover it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum VennPiece {
    /// Covered only by an element of the left list.
    Left(LetterSet),
    /// Covered only by an element of the right list.
    Right(LetterSet),
    /// Covered by an element of both lists.
    Both(LetterSet),
}

impl VennPiece {
    pub fn set(&self) -> &LetterSet {
        match self {
            VennPiece::Left(s) | VennPiece::Right(s) | VennPiece::Both(s) => s,
        }
    }
}

/// Partitions `(∪a) ∪ (∪b)` into pairwise-disjoint pieces, each tagged by
/// which side(s) cover it. `a` and `b` must each already be pairwise
/// disjoint (the invariant `first_set` maintains) — every output piece then
/// lies entirely inside zero-or-one element of `a` and zero-or-one element
/// of `b`, which is what lets callers pick one witness character per piece
/// and treat the derivative as constant across it.
pub fn venn(a: &[LetterSet], b: &[LetterSet]) -> Vec<VennPiece> {
    let mut boundaries: Vec<u32> = Vec::new();
    for set in a.iter().chain(b.iter()) {
        for &(lo, hi) in set.raw_ranges() {
            boundaries.push(lo);
            if hi < u32::MAX {
                boundaries.push(hi + 1);
            }
        }
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut out: Vec<VennPiece> = Vec::new();
    // The owning (a-index, b-index) pair of the elementary interval last
    // pushed into `out`, so a merge only ever fuses intervals that in fact
    // belong to the same A-element and the same B-element — matching the
    // same *tag* is not enough, since two distinct, adjacent elements of
    // `a` (e.g. `{a}` then `{b}`) are both tagged `Left` but must stay
    // separate pieces.
    let mut last_owner: Option<(Option<usize>, Option<usize>)> = None;

    for window in boundaries.windows(2) {
        let (start, next) = (window[0], window[1]);
        let end = next - 1;

        let a_owner = a.iter().position(|s| contains_raw(s.raw_ranges(), start));
        let b_owner = b.iter().position(|s| contains_raw(s.raw_ranges(), start));

        let tag = match (a_owner, b_owner) {
            (None, None) => continue,
            (Some(_), None) => Tag::Left,
            (None, Some(_)) => Tag::Right,
            (Some(_), Some(_)) => Tag::Both,
        };
        let owner = (a_owner, b_owner);

        let merge_with_previous = out.last().map_or(false, |prev| {
            last_owner == Some(owner) && prev.set().raw_ranges().last().unwrap().1 + 1 == start
        });

        if merge_with_previous {
            let prev = out.pop().unwrap();
            let (plo, _) = prev.set().raw_ranges()[0];
            let merged = LetterSet {
                ranges: vec![(plo, end)],
            };
            out.push(retag(tag, merged));
        } else {
            out.push(retag(tag, LetterSet { ranges: vec![(start, end)] }));
        }
        last_owner = Some(owner);
    }

    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tag {
    Left,
    Right,
    Both,
}

fn retag(tag: Tag, set: LetterSet) -> VennPiece {
    match tag {
        Tag::Left => VennPiece::Left(set),
        Tag::Right => VennPiece::Right(set),
        Tag::Both => VennPiece::Both(set),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_contains() {
        let s = LetterSet::single('a');
        assert!(s.contains('a'));
        assert!(!s.contains('b'));
        assert_eq!(s.single_value(), Some('a'));
    }

    #[test]
    fn range_contains_endpoints() {
        let s = LetterSet::range('a', 'c');
        assert!(s.contains('a'));
        assert!(s.contains('b'));
        assert!(s.contains('c'));
        assert!(!s.contains('d'));
        assert_eq!(s.min(), Some('a'));
        assert_eq!(s.max(), Some('c'));
    }

    #[test]
    fn union_merges_adjacent_ranges() {
        let s = LetterSet::range('a', 'c').union(&LetterSet::range('d', 'f'));
        assert_eq!(s.ranges().collect::<Vec<_>>(), vec![('a', 'f')]);
    }

    #[test]
    fn intersection_and_difference() {
        let bc = LetterSet::range('a', 'c');
        let cd = LetterSet::range('b', 'd');
        assert_eq!(bc.intersection(&cd).ranges().collect::<Vec<_>>(), vec![('b', 'c')]);
        assert_eq!(bc.difference(&cd).ranges().collect::<Vec<_>>(), vec![('a', 'a')]);
        assert_eq!(cd.difference(&bc).ranges().collect::<Vec<_>>(), vec![('d', 'd')]);
    }

    #[test]
    fn full_excludes_surrogate_gap() {
        let full = LetterSet::full();
        assert!(full.contains('\u{0}'));
        assert!(full.contains(char::MAX));
        assert!(full.contains('\u{D7FF}'));
        assert!(full.contains('\u{E000}'));
    }

    #[test]
    fn range_spanning_gap_splits_cleanly() {
        let s = LetterSet::range('\u{61}', '\u{10FFFF}');
        // Every endpoint produced must be a valid `char`; `ranges()` would
        // panic in `char_from` otherwise.
        let rs: Vec<_> = s.ranges().collect();
        assert!(rs.len() <= 2);
        assert!(s.contains('z'));
        assert!(s.contains('\u{10FFFF}'));
    }

    #[test]
    fn venn_tags_disjoint_and_shared_pieces() {
        let a = vec![LetterSet::range('a', 'c')];
        let b = vec![LetterSet::range('b', 'd')];
        let pieces = venn(&a, &b);

        let mut union = LetterSet::empty();
        for p in &pieces {
            union = union.union(p.set());
        }
        assert_eq!(union, a[0].union(&b[0]));

        for p in &pieces {
            match p {
                VennPiece::Left(s) => assert!(s.contains('a') && !s.contains('b')),
                VennPiece::Right(s) => assert!(s.contains('d') && !s.contains('c')),
                VennPiece::Both(s) => {
                    assert!(s.contains('b') || s.contains('c'));
                }
            }
        }
    }

    #[test]
    fn venn_pairwise_disjoint() {
        let a = vec![LetterSet::range('a', 'm'), LetterSet::range('p', 'z')];
        let b = vec![LetterSet::range('g', 's')];
        let pieces = venn(&a, &b);
        for (i, p) in pieces.iter().enumerate() {
            for q in pieces.iter().skip(i + 1) {
                assert!(p.set().intersection(q.set()).is_empty());
            }
        }
    }

    #[test]
    fn venn_keeps_adjacent_elements_of_the_same_list_apart() {
        // Two distinct elements in each list, 'a' and 'b' adjacent: must
        // stay two separate `Both` pieces, not fuse into `Both({a,b})` —
        // fusing would hide that 'a' and 'b' are owned by different
        // elements of `a`/`b` and so can carry different derivatives.
        let a = vec![LetterSet::single('a'), LetterSet::single('b')];
        let b = vec![LetterSet::single('a'), LetterSet::single('b')];
        let pieces = venn(&a, &b);
        assert_eq!(pieces.len(), 2);
        for p in &pieces {
            match p {
                VennPiece::Both(s) => assert_eq!(s.single_value().is_some(), true),
                other => panic!("expected Both piece, got {other:?}"),
            }
        }
    }
}
