//! # Implicit Level Resolution — I1–I2 (spec §4.9)
//!
//! By this point every run's type is one of `L`, `R`, `EN`, `AN` (W1–W7 and
//! N1–N2 have eliminated everything else). I1/I2 bump each run's level
//! according to its type and the parity of its current level, then the list
//! is re-compacted.

use crate::run::{compact, RunList};
use crate::types::BidiClass;

/// I1/I2: apply the implicit level bump to every run in `content` and
/// re-compact. `content` must carry only resolved levels (no sentinels, no
/// `Level::Removed` entries — those were already peeled off in X9/X10).
pub fn resolve(content: RunList) -> RunList {
    let mut list = content;
    for run in &mut list {
        let n = run
            .level
            .number()
            .expect("implicit resolution requires resolved levels");
        let bump = if n % 2 == 0 {
            // I1: even level.
            match run.bidi_type {
                BidiClass::R => 1,
                BidiClass::AN | BidiClass::EN => 2,
                _ => 0,
            }
        } else {
            // I2: odd level.
            match run.bidi_type {
                BidiClass::L | BidiClass::EN | BidiClass::AN => 1,
                _ => 0,
            }
        };
        if bump != 0 {
            run.level = crate::types::Level::Resolved(n + bump);
        }
    }
    compact(list)
}
