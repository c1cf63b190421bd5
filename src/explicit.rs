//! # Paragraph Level & Explicit Levels (spec §4.4–§4.6, §4.10)
//!
//! P2/P3/HL1 paragraph-level detection, the X1–X9 explicit-embedding stack
//! machine, the isolate-recursion override (§4.6), and the X10 sor/eor
//! sentinel computation.

use crate::run::{Run, RunList};
use crate::types::{BaseDirection, BidiClass, Level, MAX_EXPLICIT_DEPTH};
use tracing::warn;

/// P2/P3/HL1: derive the paragraph (or isolate-child) embedding level from
/// the first strong run in `runs`. `runs` is the *top-level* list only —
/// isolate children are never examined at this level (spec §4.4).
pub fn paragraph_level(runs: &RunList, base: BaseDirection) -> u8 {
    match base {
        BaseDirection::Ltr => 0,
        BaseDirection::Rtl => 1,
        BaseDirection::Auto => {
            for run in runs {
                if run.bidi_type.is_strong() {
                    return if matches!(run.bidi_type, BidiClass::AL | BidiClass::R) {
                        1
                    } else {
                        0
                    };
                }
            }
            0
        }
    }
}

/// The child-base hint an isolate initiator forces for its own content
/// (spec §4.6): `FSI` behaves like auto-detection, `LRI`/`RLI` force a
/// direction outright.
pub fn child_base_direction(orig_type: BidiClass) -> BaseDirection {
    match orig_type {
        BidiClass::FSI => BaseDirection::Auto,
        BidiClass::LRI => BaseDirection::Ltr,
        BidiClass::RLI => BaseDirection::Rtl,
        other => unreachable!("child_base_direction called with non-initiator type {other:?}"),
    }
}

/// Raise `level` to at least `min_level`, preserving parity: if the parities
/// differ, bump by one (spec §4.6).
pub fn raise_to_min_preserving_parity(level: u8, min_level: u8) -> u8 {
    if level >= min_level {
        return level;
    }
    if (level % 2) == (min_level % 2) {
        min_level
    } else {
        min_level + 1
    }
}

/// Explicit-embedding machine state: the current level/override plus the
/// stack of frames saved by X2–X5 pushes.
struct State {
    cel: u8,
    dos: BidiClass,
    stack: Vec<(u8, BidiClass)>,
    /// Counts directional pushes rejected for exceeding [`MAX_EXPLICIT_DEPTH`];
    /// every `PDF` decrements this before popping a real frame.
    invalid_count: u32,
}

impl State {
    fn new(base_level: u8) -> Self {
        State {
            cel: base_level,
            dos: BidiClass::ON,
            stack: Vec::new(),
            invalid_count: 0,
        }
    }

    /// X2–X5: one embedding-initiator position.
    fn push_embedding(&mut self, kind: BidiClass) {
        let candidate = match kind {
            BidiClass::RLE | BidiClass::RLO => Level::least_greater_odd(self.cel),
            BidiClass::LRE | BidiClass::LRO => Level::least_greater_even(self.cel),
            _ => unreachable!("push_embedding called with non-initiator type"),
        };
        if self.invalid_count == 0 && candidate <= MAX_EXPLICIT_DEPTH {
            self.stack.push((self.cel, self.dos));
            self.cel = candidate;
            self.dos = match kind {
                BidiClass::RLE | BidiClass::LRE => BidiClass::ON,
                BidiClass::RLO => BidiClass::R,
                BidiClass::LRO => BidiClass::L,
                _ => unreachable!(),
            };
        } else {
            self.invalid_count += 1;
            warn!(
                invalid_count = self.invalid_count,
                candidate, "embedding push rejected past MAX_EXPLICIT_DEPTH"
            );
        }
    }

    /// X7: one `PDF` position.
    fn pop_pdf(&mut self) {
        if self.invalid_count > 0 {
            self.invalid_count -= 1;
        } else if let Some((level, dos)) = self.stack.pop() {
            self.cel = level;
            self.dos = dos;
        }
    }

    /// X8: a paragraph separator terminates all open embeddings. The bottom
    /// of the stack (if any) is always the `(base_level, ON)` state that
    /// existed before the first push, so resetting to it is the same as
    /// resetting straight to the paragraph level.
    fn reset_to_base(&mut self, base_level: u8) {
        if !self.stack.is_empty() {
            self.cel = base_level;
            self.dos = BidiClass::ON;
            self.stack.clear();
        }
    }
}

/// X1–X9: assign explicit levels/overrides to `runs` (a flat, top-level run
/// list — isolate children are handled by recursion, see [`raise_to_min_preserving_parity`]
/// and the pipeline's isolate descent). Returns the run list with every
/// position's `level` set to either a resolved level or [`Level::Removed`];
/// the caller is responsible for peeling off removed runs and recompacting
/// (spec §4.5: "drop runs marked removed and compact").
pub fn resolve_explicit_levels(runs: RunList, base_level: u8) -> RunList {
    let mut state = State::new(base_level);
    let mut out = Vec::with_capacity(runs.len());

    for mut run in runs {
        let t = run.bidi_type;
        let run_len = run.len();

        if t.is_embedding_initiator() {
            for _ in 0..run_len {
                state.push_embedding(t);
            }
            run.level = Level::Removed;
            out.push(run);
            continue;
        }

        if t == BidiClass::B {
            state.reset_to_base(base_level);
        }

        if !matches!(
            t,
            BidiClass::BN
                | BidiClass::RLE
                | BidiClass::LRE
                | BidiClass::RLO
                | BidiClass::LRO
                | BidiClass::PDF
        ) {
            run.level = Level::Resolved(state.cel);
            if state.dos != BidiClass::ON {
                run.bidi_type = state.dos;
            }
        }

        if t == BidiClass::PDF {
            for _ in 0..run_len {
                state.pop_pdf();
            }
        }

        if matches!(
            t,
            BidiClass::RLE
                | BidiClass::LRE
                | BidiClass::RLO
                | BidiClass::LRO
                | BidiClass::PDF
                | BidiClass::BN
        ) {
            run.level = Level::Removed;
        }

        out.push(run);
    }

    out
}

/// Split `runs` into a `(removed, kept)` partition, per spec §4.5's
/// "drop runs marked removed and compact" step.
pub fn partition_removed(runs: RunList) -> (RunList, RunList) {
    let mut removed = Vec::new();
    let mut kept = Vec::new();
    for run in runs {
        if matches!(run.level, Level::Removed) {
            removed.push(run);
        } else {
            kept.push(run);
        }
    }
    (removed, kept)
}

/// X10: split `runs` (already level-resolved, no removed entries) into
/// level-runs and compute the sor/eor sentinel for each, against the
/// neighbouring level or `par_level` at the paragraph boundary.
pub fn level_run_boundaries(runs: &RunList, par_level: u8) -> Vec<(usize, usize, BidiClass, BidiClass)> {
    // Each entry: (run_start_idx, run_end_idx) into `runs`, plus (sor, eor).
    let mut groups: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < runs.len() {
        let level = level_number(&runs[i]);
        let mut j = i + 1;
        while j < runs.len() && level_number(&runs[j]) == level {
            j += 1;
        }
        groups.push((i, j));
        i = j;
    }

    let mut out = Vec::with_capacity(groups.len());
    for (gi, &(start, end)) in groups.iter().enumerate() {
        let level = level_number(&runs[start]);
        let prev_level = if gi == 0 {
            par_level
        } else {
            level_number(&runs[groups[gi - 1].0])
        };
        let next_level = if gi + 1 < groups.len() {
            level_number(&runs[groups[gi + 1].0])
        } else {
            par_level
        };
        let sor = Level::l_or_r_for(prev_level.max(level));
        let eor = Level::l_or_r_for(next_level.max(level));
        out.push((start, end, sor, eor));
    }
    out
}

fn level_number(run: &Run) -> u8 {
    run.level.number().expect("level_run_boundaries requires resolved levels")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::compact;

    fn run(t: BidiClass, level: u8) -> Run {
        Run::single(0..1, t, Level::Resolved(level))
    }

    #[test]
    fn paragraph_level_ltr_forced() {
        assert_eq!(paragraph_level(&[], BaseDirection::Ltr), 0);
    }

    #[test]
    fn paragraph_level_rtl_forced() {
        assert_eq!(paragraph_level(&[], BaseDirection::Rtl), 1);
    }

    #[test]
    fn paragraph_level_auto_no_strong_is_zero() {
        let runs = vec![run(BidiClass::WS, 0), run(BidiClass::ON, 0)];
        assert_eq!(paragraph_level(&runs, BaseDirection::Auto), 0);
    }

    #[test]
    fn paragraph_level_auto_picks_first_strong() {
        let runs = vec![run(BidiClass::WS, 0), run(BidiClass::AL, 0), run(BidiClass::L, 0)];
        assert_eq!(paragraph_level(&runs, BaseDirection::Auto), 1);
    }

    #[test]
    fn raise_preserves_parity_when_equal() {
        assert_eq!(raise_to_min_preserving_parity(0, 2), 2);
        assert_eq!(raise_to_min_preserving_parity(1, 3), 3);
    }

    #[test]
    fn raise_bumps_by_one_when_parity_differs() {
        assert_eq!(raise_to_min_preserving_parity(0, 3), 4);
        assert_eq!(raise_to_min_preserving_parity(1, 2), 3);
    }

    #[test]
    fn raise_is_noop_when_already_high_enough() {
        assert_eq!(raise_to_min_preserving_parity(5, 2), 5);
    }

    fn build_flat(tokens: &[&str]) -> RunList {
        tokens
            .iter()
            .enumerate()
            .map(|(i, t)| Run::single(i..i + 1, BidiClass::from_token(t).unwrap(), Level::Resolved(0)))
            .collect()
    }

    #[test]
    fn rle_pushes_odd_level_and_is_removed() {
        let runs = compact(build_flat(&["L", "RLE", "R", "PDF", "L"]));
        let resolved = resolve_explicit_levels(runs, 0);
        assert!(matches!(resolved[0].level, Level::Resolved(0)));
        assert!(matches!(resolved[1].level, Level::Removed)); // RLE
        assert!(matches!(resolved[2].level, Level::Resolved(1))); // R
        assert!(matches!(resolved[3].level, Level::Removed)); // PDF
        assert!(matches!(resolved[4].level, Level::Resolved(0))); // L
    }

    #[test]
    fn rlo_overrides_type_to_r() {
        let runs = compact(build_flat(&["RLO", "L", "PDF"]));
        let resolved = resolve_explicit_levels(runs, 0);
        assert!(matches!(resolved[1].level, Level::Resolved(1)));
        assert_eq!(resolved[1].bidi_type, BidiClass::R);
    }

    #[test]
    fn unmatched_pdf_is_a_noop() {
        let runs = compact(build_flat(&["PDF", "L"]));
        let resolved = resolve_explicit_levels(runs, 0);
        assert!(matches!(resolved[0].level, Level::Removed));
        assert!(matches!(resolved[1].level, Level::Resolved(0)));
    }

    #[test]
    fn overflowing_embedding_depth_is_rejected() {
        // Push RLE 62 times from level 0: levels go 1,3,..,61 (31 pushes), the
        // 32nd candidate would be 63 > 61 and must be rejected.
        let mut tokens = vec!["RLE"; 32];
        tokens.push("L");
        let runs = compact(build_flat(&tokens));
        let resolved = resolve_explicit_levels(runs, 0);
        // The trailing L should have resolved to level 61 (last valid push).
        let l_run = resolved.last().unwrap();
        assert_eq!(l_run.level, Level::Resolved(61));
    }

    #[test]
    fn b_resets_open_embeddings_before_x6() {
        let runs = compact(build_flat(&["RLE", "L", "B"]));
        let resolved = resolve_explicit_levels(runs, 0);
        // B receives the paragraph level (0), not the embedding's level (1).
        let b_run = resolved.last().unwrap();
        assert_eq!(b_run.bidi_type, BidiClass::B);
        assert_eq!(b_run.level, Level::Resolved(0));
    }
}
