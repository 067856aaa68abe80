// core/src/segment.rs
//
// Splits a `$`-joined IG annotation into its atomic tags. The cut points are
// the derivational boundary markers below; this is a string heuristic, not a
// grammar.

use crate::JOIN_MARKER;

/// Markers that open a new atomic tag inside an IG annotation.
pub const BOUNDARY_MARKERS: [&str; 7] = ["subst", "attr", "advl", "ger_", "gpr_", "gna_", "prc_"];

/// Segment an IG string into atomic tags, left to right.
///
/// At each step the remainder is cut at the earliest boundary marker. A marker
/// sitting at position 0 is skipped in favour of the next one, so a piece never
/// starts empty; with no usable marker the whole remainder is the last piece.
/// Every emitted piece has surrounding join markers stripped.
///
/// ```
/// use morphdisamb_core::segment::segment;
/// assert_eq!(
///     segment("v$tv$gpr_past$subst$acc"),
///     vec!["v$tv", "gpr_past", "subst$acc"]
/// );
/// ```
pub fn segment(ig: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = ig;
    while !rest.is_empty() {
        let cut = cut_position(rest);
        pieces.push(rest[..cut].trim_matches(JOIN_MARKER).to_string());
        rest = &rest[cut..];
    }
    pieces
}

/// Join atomic tags back into a single IG string.
pub fn join<S: AsRef<str>>(pieces: &[S]) -> String {
    let mut joined = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            joined.push(JOIN_MARKER);
        }
        joined.push_str(piece.as_ref());
    }
    joined
}

fn cut_position(rest: &str) -> usize {
    let mut positions: Vec<usize> = BOUNDARY_MARKERS
        .iter()
        .filter_map(|marker| rest.find(marker))
        .collect();
    positions.sort_unstable();
    match positions.as_slice() {
        [first, ..] if *first > 0 => *first,
        [_, second, ..] if *second > 0 => *second,
        _ => rest.len(),
    }
}
