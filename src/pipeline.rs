//! # Pipeline Orchestration (spec §4, end to end)
//!
//! Ties every phase module together: paragraph split → isolate-run-list
//! build → explicit levels (X1–X9) → recursive isolate descent (§4.6) →
//! per-level-run weak/neutral/implicit resolution (X10, W1–W7, N1–N2, I1–I2)
//! → per-line reset (L1) → reorder (L2). Each paragraph is resolved
//! independently and writes directly into the caller's `levels[]` slice.

use crate::explicit;
use crate::implicit;
use crate::isolate;
use crate::neutral;
use crate::paragraph;
use crate::reorder;
use crate::run::{self, RunList};
use crate::types::{BaseDirection, BidiClass, Level};
use crate::weak;
use std::collections::HashMap;
use std::ops::Range;
use tracing::debug;

/// The result of resolving one input: per-position levels and the visual
/// reordering permutation (spec §6).
#[derive(Debug, Clone, Default)]
pub struct BidiResult {
    /// `levels[i]` is the resolved level at input position `i`, or
    /// [`Level::Removed`] for an X9-removed position.
    pub levels: Vec<Level>,
    /// Input indices in visual order, excluding removed positions.
    pub order: Vec<usize>,
}

/// Resolve every paragraph in `types` and return the combined result.
pub fn resolve(types: &[BidiClass], base: BaseDirection) -> BidiResult {
    let mut levels = vec![Level::Resolved(0); types.len()];
    let mut order = Vec::with_capacity(types.len());

    for range in paragraph::split_paragraphs(types) {
        resolve_paragraph(types, range.clone(), base, &mut levels);
        order.extend(reorder::reorder(&levels, range));
    }

    BidiResult { levels, order }
}

/// One paragraph: build its isolate tree, resolve levels recursively, then
/// apply L1 over the whole paragraph range.
fn resolve_paragraph(types: &[BidiClass], range: Range<usize>, base: BaseDirection, levels: &mut [Level]) {
    let _span = tracing::debug_span!("paragraph", start = range.start, end = range.end).entered();

    let top = isolate::build(types, range.clone());
    let par_level = explicit::paragraph_level(&top, base);
    debug!(par_level, "paragraph embedding level (P2/P3/HL1)");

    resolve_run_list(top, par_level, levels);

    reset_trailing_whitespace(levels, types, range, par_level);
}

fn reset_trailing_whitespace(levels: &mut [Level], types: &[BidiClass], range: Range<usize>, par_level: u8) {
    let _span = tracing::debug_span!("l1_reset", par_level).entered();
    reorder::reset_trailing_whitespace(levels, types, range, par_level);
}

/// Resolve one nesting level's flat run list: X1–X9, X10, W1–W7, N1–N2,
/// I1–I2, writing every position's final level into `levels`, then recurse
/// into any isolate children found along the way (spec §4.6).
fn resolve_run_list(top: RunList, base_level: u8, levels: &mut [Level]) {
    let _span = tracing::debug_span!("level_run", base_level).entered();

    let after_explicit = explicit::resolve_explicit_levels(top, base_level);
    let (removed, kept) = explicit::partition_removed(after_explicit);
    debug!(removed = removed.len(), kept = kept.len(), "explicit levels resolved (X1-X9)");

    for r in &removed {
        for range in &r.ranges {
            for i in range.clone() {
                levels[i] = Level::Removed;
            }
        }
    }

    let kept = run::compact(kept);
    if kept.is_empty() {
        return;
    }

    // §4.6 constrains an isolate child's level against its initiator's own
    // *explicit* (X1-X9) level, not whatever W1-W7/N1-N2/I1-I2 later bump
    // that position to for display — isolate initiators are themselves NI
    // and get folded through weak/neutral resolution and I1/I2 like any
    // other neutral, so `resolved[..].level` below is the wrong value to
    // recurse on. Capture the explicit level here, before those phases run,
    // keyed by each isolate run's (unique, single-position) start index.
    let explicit_isolate_levels: HashMap<usize, u8> = kept
        .iter()
        .filter(|r| r.children.is_some())
        .map(|r| {
            (
                r.first_index().expect("isolate initiator run covers one position"),
                r.level.number().expect("explicit levels are resolved by this point"),
            )
        })
        .collect();

    let boundaries = explicit::level_run_boundaries(&kept, base_level);
    let mut resolved: RunList = Vec::with_capacity(kept.len());

    for (start, end, sor, eor) in boundaries {
        let slice = kept[start..end].to_vec();
        let level = slice[0].level;
        let after_weak = weak::resolve(slice, sor, eor, level);
        let after_neutral = neutral::resolve(after_weak, sor, eor, level);
        let after_implicit = implicit::resolve(after_neutral);
        resolved.extend(after_implicit);
    }

    for r in &resolved {
        for range in &r.ranges {
            for i in range.clone() {
                levels[i] = r.level;
            }
        }
    }

    for r in &resolved {
        if let (Some(children), Some(orig_type)) = (&r.children, r.orig_type) {
            let idx = r.first_index().expect("isolate initiator run covers one position");
            let parent_level = explicit_isolate_levels[&idx];
            let child_min = parent_level + 1;
            let child_base = explicit::child_base_direction(orig_type);
            let child_par_level = explicit::paragraph_level(children, child_base);
            let child_level = explicit::raise_to_min_preserving_parity(child_par_level, child_min);
            debug!(parent_level, child_level, "descending into isolate");
            resolve_run_list(children.clone(), child_level, levels);
        }
    }
}

/// Resolve every paragraph in `types` concurrently, one OS thread per
/// paragraph (spec §5: paragraphs are independent and MAY be resolved in
/// parallel). Falls back to sequential [`resolve`] when there's at most one
/// paragraph — spinning up threads for a single-paragraph input would only
/// add overhead.
pub fn resolve_parallel(types: &[BidiClass], base: BaseDirection) -> BidiResult {
    let ranges = paragraph::split_paragraphs(types);
    if ranges.len() <= 1 {
        return resolve(types, base);
    }

    let mut levels = vec![Level::Resolved(0); types.len()];
    let mut order = Vec::with_capacity(types.len());

    std::thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .iter()
            .cloned()
            .map(|range| {
                scope.spawn(move || {
                    let local_types = &types[range.clone()];
                    let mut local_levels = vec![Level::Resolved(0); local_types.len()];
                    resolve_paragraph(local_types, 0..local_types.len(), base, &mut local_levels);
                    let local_order = reorder::reorder(&local_levels, 0..local_levels.len());
                    (range, local_levels, local_order)
                })
            })
            .collect();

        for handle in handles {
            let (range, local_levels, local_order) = handle.join().expect("paragraph worker panicked");
            levels[range.clone()].copy_from_slice(&local_levels);
            order.extend(local_order.into_iter().map(|i| i + range.start));
        }
    });

    BidiResult { levels, order }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types_of(s: &[&str]) -> Vec<BidiClass> {
        s.iter().map(|t| BidiClass::from_token(t).unwrap()).collect()
    }

    fn levels_of(r: &BidiResult) -> Vec<i32> {
        r.levels
            .iter()
            .map(|l| l.number().map(i32::from).unwrap_or(-1))
            .collect()
    }

    #[test]
    fn plain_ltr_text_stays_at_level_zero() {
        let types = types_of(&["L", "L", "L"]);
        let result = resolve(&types, BaseDirection::Auto);
        assert_eq!(levels_of(&result), vec![0, 0, 0]);
        assert_eq!(result.order, vec![0, 1, 2]);
    }

    #[test]
    fn rtl_paragraph_reverses_order() {
        let types = types_of(&["R", "R", "R"]);
        let result = resolve(&types, BaseDirection::Auto);
        assert_eq!(levels_of(&result), vec![1, 1, 1]);
        assert_eq!(result.order, vec![2, 1, 0]);
    }

    #[test]
    fn embedded_rtl_run_inside_ltr_paragraph() {
        // L RLE R R PDF L
        let types = types_of(&["L", "RLE", "R", "R", "PDF", "L"]);
        let result = resolve(&types, BaseDirection::Ltr);
        assert_eq!(result.levels[0], Level::Resolved(0));
        assert_eq!(result.levels[1], Level::Removed);
        assert_eq!(result.levels[2], Level::Resolved(1));
        assert_eq!(result.levels[3], Level::Resolved(1));
        assert_eq!(result.levels[4], Level::Removed);
        assert_eq!(result.levels[5], Level::Resolved(0));
        // visual order: 0, then the RTL pair reversed (3,2), then 5.
        assert_eq!(result.order, vec![0, 3, 2, 5]);
    }

    #[test]
    fn rli_isolate_content_is_resolved_independently() {
        // L RLI R R PDI L — RLI forces its content to start at the least odd
        // level above its own (here, level 1), regardless of the outer L text.
        let types = types_of(&["L", "RLI", "R", "R", "PDI", "L"]);
        let result = resolve(&types, BaseDirection::Ltr);
        assert_eq!(result.levels[0], Level::Resolved(0));
        assert_eq!(result.levels[1], Level::Resolved(0)); // the RLI character itself
        assert_eq!(result.levels[2], Level::Resolved(1));
        assert_eq!(result.levels[3], Level::Resolved(1));
        assert_eq!(result.levels[4], Level::Resolved(0)); // the closing PDI
        assert_eq!(result.levels[5], Level::Resolved(0));
    }

    #[test]
    fn lri_isolate_forces_least_greater_even_level() {
        // L LRI R R PDI L — LRI forces the least *even* level above its own,
        // which from level 0 is 2; the RTL content inside then gets I1's
        // level bump to 3.
        let types = types_of(&["L", "LRI", "R", "R", "PDI", "L"]);
        let result = resolve(&types, BaseDirection::Ltr);
        assert_eq!(result.levels[0], Level::Resolved(0));
        assert_eq!(result.levels[2], Level::Resolved(3));
        assert_eq!(result.levels[3], Level::Resolved(3));
        assert_eq!(result.levels[5], Level::Resolved(0));
    }

    #[test]
    fn isolate_child_min_level_uses_initiators_explicit_level_not_its_implicit_bump() {
        // R RLI R PDI R, base Ltr — the RLI itself is an R-context initiator:
        // it resolves (via N1, bounded by the R's on both sides) to R at its
        // *explicit* level 0, and I1 then bumps that to 1 for display. The
        // isolate's interior must be raised against the explicit level (0),
        // not the displayed, implicit-bumped one (1) — otherwise the interior
        // R ends up pushed to level 3 instead of staying at level 1.
        let types = types_of(&["R", "RLI", "R", "PDI", "R"]);
        let result = resolve(&types, BaseDirection::Ltr);
        assert_eq!(
            levels_of(&result),
            vec![1, 1, 1, 1, 1],
            "interior isolate level must not inherit the initiator's I1 bump"
        );
    }

    #[test]
    fn paragraph_separator_resets_embedding_and_gets_paragraph_level() {
        let types = types_of(&["RLE", "R", "B"]);
        let result = resolve(&types, BaseDirection::Ltr);
        assert_eq!(result.levels[2], Level::Resolved(0));
    }

    #[test]
    fn trailing_whitespace_resets_to_paragraph_level() {
        // RLE R PDF WS — trailing WS after the embedding closes resets to 0.
        let types = types_of(&["RLE", "R", "PDF", "WS"]);
        let result = resolve(&types, BaseDirection::Ltr);
        assert_eq!(result.levels[3], Level::Resolved(0));
    }

    #[test]
    fn multiple_paragraphs_resolve_independently() {
        let types = types_of(&["L", "B", "R"]);
        let result = resolve(&types, BaseDirection::Auto);
        assert_eq!(result.levels[0], Level::Resolved(0));
        assert_eq!(result.levels[1], Level::Resolved(0));
        assert_eq!(result.levels[2], Level::Resolved(1));
        assert_eq!(result.order, vec![0, 1, 2]);
    }

    #[test]
    fn parallel_resolution_matches_sequential() {
        let types = types_of(&["L", "B", "R", "B", "L", "RLE", "R", "PDF", "L"]);
        let sequential = resolve(&types, BaseDirection::Auto);
        let parallel = resolve_parallel(&types, BaseDirection::Auto);
        assert_eq!(sequential.levels, parallel.levels);
        assert_eq!(sequential.order, parallel.order);
    }

    #[test]
    fn parallel_resolution_falls_back_for_a_single_paragraph() {
        let types = types_of(&["L", "R", "L"]);
        let result = resolve_parallel(&types, BaseDirection::Auto);
        assert_eq!(result.order, vec![0, 1, 2]);
    }
}
