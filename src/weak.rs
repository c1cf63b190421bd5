//! # Weak-Type Resolution — W1–W7 (spec §4.7)
//!
//! Operates on a single level-run's content. Each rule that needs the
//! character just outside the run (W1, W4, W5) consults `sor`/`eor` directly
//! as boundary values rather than materializing them as list entries —
//! `sor`/`eor` are always `L` or `R`, and splicing them into the list as
//! sentinel [`Run`]s risks [`compact`] silently merging a sentinel into the
//! run's own first/last entry whenever the resolved type happens to match
//! (which it very often does, e.g. any paragraph whose content resolves to
//! the same direction as sor). The list is re-[`compact`]ed after each rule
//! so a later rule's "previous"/"next" always reflects the prior rule's
//! result.

use crate::run::{compact, last_strong_or, RunList};
use crate::types::{BidiClass, Level};

/// W1: an NSM takes the type of the previous run (sor seeds the left edge).
fn w1(list: &mut RunList, sor: BidiClass) {
    for i in 0..list.len() {
        if list[i].bidi_type == BidiClass::NSM {
            let prev = if i == 0 { sor } else { list[i - 1].bidi_type };
            list[i].bidi_type = prev;
        }
    }
}

/// W2: EN becomes AN when the last strong type seen was AL (sor seeds the
/// accumulator; sor is always `L` or `R`, never `AL`, so this never changes
/// the outcome relative to treating sor as the initial "strong so far").
fn w2(list: &mut RunList, sor: BidiClass) {
    let mut last_strong = sor;
    for run in list.iter_mut() {
        if run.bidi_type == BidiClass::EN && last_strong == BidiClass::AL {
            run.bidi_type = BidiClass::AN;
        }
        last_strong = last_strong_or(last_strong, run.bidi_type);
    }
}

/// W3: AL becomes R.
fn w3(list: &mut RunList) {
    for run in list.iter_mut() {
        if run.bidi_type == BidiClass::AL {
            run.bidi_type = BidiClass::R;
        }
    }
}

/// W4: a single-character ES/CS between matching numeric neighbours takes
/// their type. A boundary neighbour falls back to sor/eor, which are never
/// numeric, so this never fires right at the edge of a run — consistent
/// with treating sor/eor as ordinary non-numeric context.
fn w4(list: &mut RunList, sor: BidiClass, eor: BidiClass) {
    let n = list.len();
    for i in 0..n {
        if list[i].len() != 1 {
            continue;
        }
        let prev_t = if i == 0 { sor } else { list[i - 1].bidi_type };
        let next_t = if i + 1 < n { list[i + 1].bidi_type } else { eor };
        match list[i].bidi_type {
            BidiClass::ES if prev_t == BidiClass::EN && next_t == BidiClass::EN => {
                list[i].bidi_type = BidiClass::EN;
            }
            BidiClass::CS if prev_t == next_t && matches!(prev_t, BidiClass::EN | BidiClass::AN) => {
                list[i].bidi_type = prev_t;
            }
            _ => {}
        }
    }
}

/// W5: ET adjacent to EN becomes EN.
fn w5(list: &mut RunList, sor: BidiClass, eor: BidiClass) {
    let n = list.len();
    for i in 0..n {
        if list[i].bidi_type != BidiClass::ET {
            continue;
        }
        let prev_t = if i == 0 { sor } else { list[i - 1].bidi_type };
        let next_t = if i + 1 < n { list[i + 1].bidi_type } else { eor };
        if prev_t == BidiClass::EN || next_t == BidiClass::EN {
            list[i].bidi_type = BidiClass::EN;
        }
    }
}

/// W6: remaining ET/ES/CS become ON.
fn w6(list: &mut RunList) {
    for run in list.iter_mut() {
        if matches!(run.bidi_type, BidiClass::ET | BidiClass::ES | BidiClass::CS) {
            run.bidi_type = BidiClass::ON;
        }
    }
}

/// W7: EN becomes L when the last strong type seen was L.
fn w7(list: &mut RunList, sor: BidiClass) {
    let mut last_strong = sor;
    for run in list.iter_mut() {
        if run.bidi_type == BidiClass::EN && last_strong == BidiClass::L {
            run.bidi_type = BidiClass::L;
        }
        last_strong = last_strong_or(last_strong, run.bidi_type);
    }
}

/// Run W1–W7 over one level-run's content and return the resolved,
/// re-compacted run list. `level` isn't consulted here (only N2 cares about
/// embedding direction) but is kept for a uniform call shape alongside
/// [`crate::neutral::resolve`].
pub fn resolve(content: RunList, sor: BidiClass, eor: BidiClass, _level: Level) -> RunList {
    let mut list = content;

    w1(&mut list, sor);
    list = compact(list);
    w2(&mut list, sor);
    list = compact(list);
    w3(&mut list);
    list = compact(list);
    w4(&mut list, sor, eor);
    list = compact(list);
    w5(&mut list, sor, eor);
    list = compact(list);
    w6(&mut list);
    list = compact(list);
    w7(&mut list, sor);
    list = compact(list);

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::Run;

    fn run(t: BidiClass) -> Run {
        Run::single(0..1, t, Level::Resolved(0))
    }

    fn types_of(list: &RunList) -> Vec<BidiClass> {
        list.iter().map(|r| r.bidi_type).collect()
    }

    #[test]
    fn w1_nsm_inherits_previous_type() {
        let content = vec![run(BidiClass::R), run(BidiClass::NSM)];
        let out = resolve(content, BidiClass::L, BidiClass::L, Level::Resolved(0));
        assert_eq!(types_of(&out), vec![BidiClass::R]);
    }

    #[test]
    fn w1_leading_nsm_inherits_sor() {
        let content = vec![run(BidiClass::NSM)];
        let out = resolve(content, BidiClass::R, BidiClass::L, Level::Resolved(0));
        assert_eq!(types_of(&out), vec![BidiClass::R]);
    }

    #[test]
    fn w2_en_after_al_becomes_an() {
        let content = vec![run(BidiClass::AL), run(BidiClass::EN)];
        let out = resolve(content, BidiClass::L, BidiClass::L, Level::Resolved(0));
        // W3 then turns AL into R, so check positions.
        assert_eq!(out[0].bidi_type, BidiClass::R);
        assert_eq!(out[1].bidi_type, BidiClass::AN);
    }

    #[test]
    fn w4_single_es_between_numbers() {
        let content = vec![run(BidiClass::EN), run(BidiClass::ES), run(BidiClass::EN)];
        let out = resolve(content, BidiClass::R, BidiClass::R, Level::Resolved(0));
        // all merge to one EN run since W4 folds ES into EN before N7/W7 can
        // touch it; sor is R here so W7 (which only fires after an L) can't
        // turn the result back into L.
        assert_eq!(types_of(&out), vec![BidiClass::EN]);
    }

    #[test]
    fn w4_cs_requires_matching_neighbours() {
        let content = vec![run(BidiClass::EN), run(BidiClass::CS), run(BidiClass::AN)];
        let out = resolve(content, BidiClass::L, BidiClass::L, Level::Resolved(0));
        // neighbours don't match -> W6 turns the CS into ON.
        assert_eq!(out[1].bidi_type, BidiClass::ON);
    }

    #[test]
    fn w5_et_adjacent_to_en_becomes_en() {
        let content = vec![run(BidiClass::ET), run(BidiClass::EN)];
        let out = resolve(content, BidiClass::R, BidiClass::R, Level::Resolved(0));
        assert_eq!(types_of(&out), vec![BidiClass::EN]);
    }

    #[test]
    fn w6_leftover_separators_become_on() {
        let content = vec![run(BidiClass::ET)];
        let out = resolve(content, BidiClass::L, BidiClass::L, Level::Resolved(0));
        assert_eq!(out[0].bidi_type, BidiClass::ON);
    }

    #[test]
    fn w7_en_after_l_becomes_l() {
        let content = vec![run(BidiClass::L), run(BidiClass::EN)];
        let out = resolve(content, BidiClass::R, BidiClass::R, Level::Resolved(0));
        assert_eq!(types_of(&out), vec![BidiClass::L]);
    }

    #[test]
    fn w7_en_with_sor_l_and_no_strong_becomes_l() {
        let content = vec![run(BidiClass::EN)];
        let out = resolve(content, BidiClass::L, BidiClass::R, Level::Resolved(0));
        assert_eq!(out[0].bidi_type, BidiClass::L);
    }
}
