//! # Per-Line Reset & Reordering — L1–L2 (spec §4.11–§4.12)
//!
//! Both rules operate on the paragraph's flat, position-indexed `levels[]`
//! output rather than on run lists: L1 needs the *original*, pre-resolution
//! types, and L2 produces the final visual permutation.

use crate::types::{BidiClass, Level};
use std::ops::Range;

/// L1: reset trailing whitespace/isolate-format runs (and every `S`/`B`) to
/// `par_level`, scanning `range` right to left. `orig_types` is the
/// unresolved input; `levels` is mutated in place.
pub fn reset_trailing_whitespace(
    levels: &mut [Level],
    orig_types: &[BidiClass],
    range: Range<usize>,
    par_level: u8,
) {
    let mut reset = true;
    for i in range.rev() {
        if matches!(levels[i], Level::Removed) {
            continue;
        }
        match orig_types[i] {
            BidiClass::S | BidiClass::B => reset = true,
            BidiClass::WS | BidiClass::FSI | BidiClass::LRI | BidiClass::RLI | BidiClass::PDI => {}
            _ => reset = false,
        }
        if reset {
            levels[i] = Level::Resolved(par_level);
        }
    }
}

/// L2: compute the visual order for `range`, excluding removed positions.
pub fn reorder(levels: &[Level], range: Range<usize>) -> Vec<usize> {
    let mut order: Vec<usize> = range.filter(|&i| !matches!(levels[i], Level::Removed)).collect();
    if order.is_empty() {
        return order;
    }

    let (mut hi, mut lo) = (0u8, u8::MAX);
    for &i in &order {
        if let Some(n) = levels[i].number() {
            hi = hi.max(n);
            lo = lo.min(n);
        }
    }
    if lo % 2 == 0 {
        lo += 1;
    }
    if lo > hi {
        return order;
    }

    for level in (lo..=hi).rev() {
        let mut start = 0;
        while start < order.len() {
            if levels[order[start]].number().unwrap_or(0) < level {
                start += 1;
                continue;
            }
            let mut end = start;
            while end < order.len() && levels[order[end]].number().unwrap_or(0) >= level {
                end += 1;
            }
            order[start..end].reverse();
            start = end;
        }
    }
    order
}
