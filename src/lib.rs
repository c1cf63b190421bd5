//! # bidi-core
//!
//! A reference implementation of the Unicode Bidirectional Algorithm
//! (UAX#9): typed codes and a base direction go in, resolved embedding
//! levels and a visual reordering come out.
//!
//! This crate never looks at code points. Mapping a `char` to its
//! [`types::BidiClass`] is the caller's job — handing it a closed, typed
//! enumeration instead keeps the pipeline a pure function over an opaque
//! alphabet, easy to test and easy to feed from a `BidiTest`-format fixture.
//!
//! ## Architecture
//!
//! ```text
//! types, base direction
//!       ↓
//!   [paragraph]  — split on paragraph separators (P1)
//!       ↓
//!   [isolate]    — linearize into a tree of runs (isolate initiators/PDI)
//!       ↓
//!   [explicit]   — paragraph level (P2/P3), the X1–X9 stack machine,
//!                  isolate-recursion override, X10 sor/eor
//!       ↓
//!   [weak]       — W1–W7, per level-run
//!       ↓
//!   [neutral]    — N1–N2, per level-run
//!       ↓
//!   [implicit]   — I1–I2, per level-run
//!       ↓
//!   [reorder]    — L1 per-line reset, L2 visual reordering
//!       ↓
//!   levels[], order[]
//! ```
//!
//! [`pipeline`] is the orchestrator that drives this chain, recursing into
//! isolate content per §4.6 and writing the final per-position levels
//! straight into one paragraph-sized output array.

pub mod error;
pub mod explicit;
pub mod implicit;
pub mod isolate;
pub mod neutral;
pub mod paragraph;
pub mod pipeline;
pub mod reorder;
pub mod run;
pub mod testfile;
pub mod types;
pub mod weak;

pub use error::BidiError;
pub use pipeline::BidiResult;
pub use types::{BaseDirection, BidiClass, Level};

/// Resolve embedding levels and visual order for `types` under `base`
/// (spec §6's conceptual `bidi(types, base) -> (levels, order)`).
///
/// Each paragraph (split on `B`, spec §4.2) is resolved independently;
/// `levels.len() == types.len()` always, `order.len() <= types.len()`
/// (X9-removed positions are excluded from `order`).
pub fn bidi(types: &[BidiClass], base: BaseDirection) -> BidiResult {
    pipeline::resolve(types, base)
}

/// Same as [`bidi`], but resolves independent paragraphs concurrently, one
/// OS thread per paragraph (spec §5: "paragraphs MAY be resolved in
/// parallel"). Worth reaching for once an input has more than a handful of
/// paragraphs; for single-paragraph input it transparently falls back to
/// the sequential path.
pub fn bidi_paragraphs_parallel(types: &[BidiClass], base: BaseDirection) -> BidiResult {
    pipeline::resolve_parallel(types, base)
}
