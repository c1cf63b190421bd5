//! # Neutral-Type Resolution — N1–N2 (spec §4.8)
//!
//! Runs over the same weak-resolved content as [`crate::weak`], consulting
//! `sor`/`eor` as plain boundary values rather than sentinel [`Run`]s for the
//! same reason `weak` does: splicing them into the list risks [`compact`]
//! merging a sentinel into the run's own edge entry whenever N2's embedding
//! fallback happens to produce the same type. A pre-step coalesces every
//! neutrals-and-isolates type (`B`, `S`, `WS`, `ON`, `FSI`, `LRI`, `RLI`,
//! `PDI`) to `ON` and re-compacts, so N1/N2 only ever see plain `ON` runs to
//! resolve.

use crate::run::{compact, RunList};
use crate::types::{BidiClass, Level};

/// The strong-equivalent direction of a resolved type, for N1's purposes:
/// `EN`/`AN` count as `R` (spec §4.8).
fn strong_equivalent(t: BidiClass) -> BidiClass {
    match t {
        BidiClass::R | BidiClass::EN | BidiClass::AN => BidiClass::R,
        other => other,
    }
}

/// Pre-step: fold every neutrals-and-isolates type to `ON`.
fn coalesce_to_on(list: &mut RunList) {
    for run in list.iter_mut() {
        if run.bidi_type.is_neutral_or_isolate() {
            run.bidi_type = BidiClass::ON;
        }
    }
}

/// The nearest non-`ON` type before index `i`, or `sor` if none. An isolate
/// initiator or PDI keeps its `children` field even after being coalesced to
/// `ON`, which blocks [`compact`] from merging it with an adjacent `ON` run
/// (see [`crate::run::Run::try_extend`]) — so a maximal run of NIs can still
/// be split across more than one list entry, and a plain `list[i - 1]` would
/// see that split boundary instead of the true strong neighbour.
fn boundary_before(list: &RunList, i: usize, sor: BidiClass) -> BidiClass {
    let mut j = i;
    while j > 0 {
        j -= 1;
        if list[j].bidi_type != BidiClass::ON {
            return list[j].bidi_type;
        }
    }
    sor
}

fn boundary_after(list: &RunList, i: usize, eor: BidiClass) -> BidiClass {
    let mut j = i + 1;
    while j < list.len() {
        if list[j].bidi_type != BidiClass::ON {
            return list[j].bidi_type;
        }
        j += 1;
    }
    eor
}

/// N1: an `ON` run whose (strong-equivalent) neighbours agree takes that
/// direction. A boundary neighbour falls back to sor/eor.
fn n1(list: &mut RunList, sor: BidiClass, eor: BidiClass) {
    for i in 0..list.len() {
        if list[i].bidi_type != BidiClass::ON {
            continue;
        }
        let p = strong_equivalent(boundary_before(list, i, sor));
        let nn = strong_equivalent(boundary_after(list, i, eor));
        if p == nn && matches!(p, BidiClass::L | BidiClass::R) {
            list[i].bidi_type = p;
        }
    }
}

/// N2: any `ON` run still unresolved takes the embedding direction.
fn n2(list: &mut RunList, level: Level) {
    let embedding = if level.is_rtl() { BidiClass::R } else { BidiClass::L };
    for run in list.iter_mut() {
        if run.bidi_type == BidiClass::ON {
            run.bidi_type = embedding;
        }
    }
}

/// Run N1–N2 over one level-run's weak-resolved content.
pub fn resolve(content: RunList, sor: BidiClass, eor: BidiClass, level: Level) -> RunList {
    let mut list = content;

    coalesce_to_on(&mut list);
    list = compact(list);
    n1(&mut list, sor, eor);
    list = compact(list);
    n2(&mut list, level);
    list = compact(list);

    list
}
