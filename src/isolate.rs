//! # Isolated-Run-List Builder (spec §4.3)
//!
//! Linearizes a paragraph's flat input into a tree of [`Run`]s: every
//! isolate-initiator (`LRI`/`RLI`/`FSI`) starts a nested child list
//! terminated by a matching `PDI`. Unmatched initiators remain open to the
//! end of the paragraph — handled here for free, since the recursive
//! descent below simply runs out of input to consume.

use crate::run::{Run, RunList};
use crate::types::{BidiClass, Level};
use std::ops::Range;

/// Build the isolate run-list tree for `types[range]`. Positions are kept in
/// their original (global) indices so every phase downstream can write
/// results directly into a paragraph-sized output array.
pub fn build(types: &[BidiClass], range: Range<usize>) -> RunList {
    let mut i = range.start;
    build_list(types, &mut i, range.end, false)
}

/// One level of the tree. `nested` distinguishes the base list (where an
/// unmatched `PDI` is just an ordinary token) from a list opened by an
/// isolate initiator (where a `PDI` closes the list and returns control to
/// the caller).
fn build_list(types: &[BidiClass], i: &mut usize, end: usize, nested: bool) -> RunList {
    let mut target: RunList = Vec::new();

    while *i < end {
        let idx = *i;
        let t = types[idx];

        if t.is_isolate_initiator() {
            *i += 1;
            let children = build_list(types, i, end, true);
            let mut run = Run::single(idx..idx + 1, t, Level::Resolved(0));
            run.children = Some(children);
            run.orig_type = Some(t);
            target.push(run);

            // The PDI that closed this isolate (if any) is a sibling of the
            // initiator at THIS level, not part of the child list: it is
            // examined by the outer weak/neutral resolution, never by the
            // isolate's own recursive pass.
            if *i < end && types[*i] == BidiClass::PDI {
                let pdi_idx = *i;
                *i += 1;
                target.push(Run::single(pdi_idx..pdi_idx + 1, BidiClass::PDI, Level::Resolved(0)));
            }
            continue;
        }

        if t == BidiClass::PDI && nested {
            // Leave the PDI unconsumed; the enclosing isolate-initiator
            // branch (one level up) will claim it as a sibling run.
            break;
        }

        // Ordinary token (including an unmatched PDI at the base level):
        // extend the last run in the current target, or start a new one.
        *i += 1;
        let run = Run::single(idx..idx + 1, t, Level::Resolved(0));
        match target.last_mut() {
            Some(last) => {
                if let Err((_mismatch, run)) = last.try_extend(run) {
                    target.push(run);
                }
            }
            None => target.push(run),
        }
    }

    target
}
