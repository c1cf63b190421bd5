//! # Run Algebra (spec §4.1)
//!
//! A [`Run`] is a contiguous view over the input sharing one `(type, level)`
//! pair, possibly gathered from several disjoint ranges. Every phase of the
//! pipeline mutates a run list's types/levels in place and then re-[`compact`]s
//! it, so run counts stay proportional to the number of boundaries rather
//! than to the input length.

use crate::types::{BidiClass, Level};
use std::ops::Range;

/// Why two runs refused to merge (spec §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    TypeMismatch,
    LevelMismatch,
    ChildrenMismatch,
}

/// A contiguous (possibly scattered) run of input positions sharing one
/// bidi type and embedding level.
#[derive(Debug, Clone)]
pub struct Run {
    /// Ordered, non-overlapping, coalesced ranges over the original input.
    pub ranges: Vec<Range<usize>>,
    /// Current bidi type; mutated through the pipeline.
    pub bidi_type: BidiClass,
    /// Current embedding level; mutated through the pipeline.
    pub level: Level,
    /// Present only for runs created from isolate initiators (spec §4.3).
    pub children: Option<RunList>,
    /// The initiator kind (`FSI`/`LRI`/`RLI`) when `children.is_some()`.
    pub orig_type: Option<BidiClass>,
}

/// An ordered, non-overlapping list of [`Run`]s.
pub type RunList = Vec<Run>;

impl Run {
    /// A fresh singleton run covering `range`, with no children.
    pub fn single(range: Range<usize>, bidi_type: BidiClass, level: Level) -> Self {
        Run {
            ranges: vec![range],
            bidi_type,
            level,
            children: None,
            orig_type: None,
        }
    }

    /// Number of input positions covered by this run (sum over ranges).
    pub fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.end - r.start).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The first input index covered by this run, if any.
    pub fn first_index(&self) -> Option<usize> {
        self.ranges.first().map(|r| r.start)
    }

    /// Attempt to extend `self` with `other`, consuming it on success.
    /// Touching endpoints are merged into one range; otherwise `other`'s
    /// ranges are appended as-is. Fails without mutating `self` when the
    /// two runs don't agree on `(type, level, children)` (spec §4.1),
    /// handing `other` back to the caller unchanged.
    pub fn try_extend(&mut self, other: Run) -> Result<(), (Mismatch, Run)> {
        if self.bidi_type != other.bidi_type {
            return Err((Mismatch::TypeMismatch, other));
        }
        if self.level != other.level {
            return Err((Mismatch::LevelMismatch, other));
        }
        // Runs that carry children (isolate-initiator runs) never merge —
        // each isolate is its own run, even if a sibling happens to share
        // type and level.
        if self.children.is_some() || other.children.is_some() {
            return Err((Mismatch::ChildrenMismatch, other));
        }

        let touching = match (self.ranges.last(), other.ranges.first()) {
            (Some(last), Some(first)) => last.end == first.start,
            _ => false,
        };

        if touching {
            let end = other.ranges[0].end;
            self.ranges.last_mut().unwrap().end = end;
            self.ranges.extend(other.ranges.into_iter().skip(1));
        } else {
            self.ranges.extend(other.ranges);
        }
        Ok(())
    }
}

/// Left-fold `runs` into a new list, merging each run into the last existing
/// one via [`Run::try_extend`] and pushing a new run on [`Mismatch`] or an
/// empty accumulator (spec §4.1). Compaction is idempotent: running it again
/// on an already-compacted list changes nothing (spec §8, invariant 5).
pub fn compact(runs: RunList) -> RunList {
    let mut out: RunList = Vec::with_capacity(runs.len());
    for run in runs {
        match out.last_mut() {
            Some(last) => {
                if let Err((_mismatch, run)) = last.try_extend(run) {
                    out.push(run);
                }
            }
            None => out.push(run),
        }
    }
    out
}

/// The "sor or last strong" accumulator threaded through W2/W7: returns
/// `run.bidi_type` when it is strong, else the previous accumulator value
/// (spec §4.1).
pub fn last_strong_or(prev: BidiClass, bidi_type: BidiClass) -> BidiClass {
    if bidi_type.is_strong() {
        bidi_type
    } else {
        prev
    }
}
