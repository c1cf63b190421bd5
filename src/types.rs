//! # Bidirectional Types
//!
//! The closed enumeration of Unicode bidirectional type codes (UAX#9 §3.1.2)
//! plus the `Level` and `BaseDirection` types used throughout the pipeline.

use std::fmt;

/// A Unicode bidirectional character type, as assigned by the caller.
///
/// This crate never inspects code points itself — mapping a `char` to its
/// `BidiClass` is the caller's responsibility (see spec §1, "external
/// collaborators").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BidiClass {
    /// Left-to-right.
    L,
    /// Right-to-left.
    R,
    /// Arabic letter.
    AL,
    /// European number.
    EN,
    /// European separator.
    ES,
    /// European terminator.
    ET,
    /// Arabic number.
    AN,
    /// Common separator.
    CS,
    /// Nonspacing mark.
    NSM,
    /// Boundary neutral.
    BN,
    /// Paragraph separator.
    B,
    /// Segment separator.
    S,
    /// Whitespace.
    WS,
    /// Other neutral.
    ON,
    /// Left-to-right embedding.
    LRE,
    /// Left-to-right override.
    LRO,
    /// Right-to-left embedding.
    RLE,
    /// Right-to-left override.
    RLO,
    /// Pop directional format.
    PDF,
    /// Left-to-right isolate.
    LRI,
    /// Right-to-left isolate.
    RLI,
    /// First-strong isolate.
    FSI,
    /// Pop directional isolate.
    PDI,
}

impl BidiClass {
    /// `strong := {L, R, AL}` (spec §3).
    pub fn is_strong(self) -> bool {
        matches!(self, BidiClass::L | BidiClass::R | BidiClass::AL)
    }

    /// `neutrals-and-isolates := {B, S, WS, ON, FSI, LRI, RLI, PDI}` (spec §3).
    pub fn is_neutral_or_isolate(self) -> bool {
        matches!(
            self,
            BidiClass::B
                | BidiClass::S
                | BidiClass::WS
                | BidiClass::ON
                | BidiClass::FSI
                | BidiClass::LRI
                | BidiClass::RLI
                | BidiClass::PDI
        )
    }

    /// `embedding initiators := {LRE, RLE, LRO, RLO}` (spec §3).
    pub fn is_embedding_initiator(self) -> bool {
        matches!(
            self,
            BidiClass::LRE | BidiClass::RLE | BidiClass::LRO | BidiClass::RLO
        )
    }

    /// `isolate initiators := {LRI, RLI, FSI}` (spec §3).
    pub fn is_isolate_initiator(self) -> bool {
        matches!(self, BidiClass::LRI | BidiClass::RLI | BidiClass::FSI)
    }

    /// True for the X9-removable classes: `{LRE, LRO, RLE, RLO, PDF, BN}`.
    pub fn is_removed_by_x9(self) -> bool {
        matches!(
            self,
            BidiClass::LRE
                | BidiClass::LRO
                | BidiClass::RLE
                | BidiClass::RLO
                | BidiClass::PDF
                | BidiClass::BN
        )
    }

    /// Parse a mnemonic token (`"L"`, `"AL"`, `"LRI"`, ...) as used by the CLI
    /// and by `BidiTest`/`BidiCharacterTest` fixture files.
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "L" => BidiClass::L,
            "R" => BidiClass::R,
            "AL" => BidiClass::AL,
            "EN" => BidiClass::EN,
            "ES" => BidiClass::ES,
            "ET" => BidiClass::ET,
            "AN" => BidiClass::AN,
            "CS" => BidiClass::CS,
            "NSM" => BidiClass::NSM,
            "BN" => BidiClass::BN,
            "B" => BidiClass::B,
            "S" => BidiClass::S,
            "WS" => BidiClass::WS,
            "ON" => BidiClass::ON,
            "LRE" => BidiClass::LRE,
            "LRO" => BidiClass::LRO,
            "RLE" => BidiClass::RLE,
            "RLO" => BidiClass::RLO,
            "PDF" => BidiClass::PDF,
            "LRI" => BidiClass::LRI,
            "RLI" => BidiClass::RLI,
            "FSI" => BidiClass::FSI,
            "PDI" => BidiClass::PDI,
            _ => return None,
        })
    }
}

impl fmt::Display for BidiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BidiClass::L => "L",
            BidiClass::R => "R",
            BidiClass::AL => "AL",
            BidiClass::EN => "EN",
            BidiClass::ES => "ES",
            BidiClass::ET => "ET",
            BidiClass::AN => "AN",
            BidiClass::CS => "CS",
            BidiClass::NSM => "NSM",
            BidiClass::BN => "BN",
            BidiClass::B => "B",
            BidiClass::S => "S",
            BidiClass::WS => "WS",
            BidiClass::ON => "ON",
            BidiClass::LRE => "LRE",
            BidiClass::LRO => "LRO",
            BidiClass::RLE => "RLE",
            BidiClass::RLO => "RLO",
            BidiClass::PDF => "PDF",
            BidiClass::LRI => "LRI",
            BidiClass::RLI => "RLI",
            BidiClass::FSI => "FSI",
            BidiClass::PDI => "PDI",
        };
        f.write_str(s)
    }
}

/// The base-direction hint passed to [`crate::bidi`] (P2/P3/HL1, spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseDirection {
    /// Auto-detect from the first strong character in the paragraph.
    #[default]
    Auto,
    /// Force left-to-right (level 0).
    Ltr,
    /// Force right-to-left (level 1).
    Rtl,
}

/// Maximum explicit embedding level reachable via X2–X5 (spec §4.5).
pub const MAX_EXPLICIT_DEPTH: u8 = 61;

/// An embedding level, or the sentinel marking an X9-removed position.
///
/// Valid resolved levels lie in `[0, 125]` (61 explicit, +2 from I1). The
/// "removed" state is a tagged variant rather than a magic integer, per the
/// redesign note in spec §9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// A resolved embedding level. Even = LTR, odd = RTL.
    Resolved(u8),
    /// Stripped by X9 (an `{LRE, LRO, RLE, RLO, PDF, BN}` position); excluded
    /// from `order` and reported with this sentinel in `levels`.
    Removed,
}

impl Level {
    /// The paragraph/embedding level implied by parity: even → LTR, odd → RTL.
    pub fn l_or_r_for(n: u8) -> BidiClass {
        if n % 2 == 0 {
            BidiClass::L
        } else {
            BidiClass::R
        }
    }

    /// True for odd (right-to-left) resolved levels; `false` for `Removed`.
    pub fn is_rtl(self) -> bool {
        matches!(self, Level::Resolved(n) if n % 2 == 1)
    }

    /// The raw numeric level, or `None` for `Removed`.
    pub fn number(self) -> Option<u8> {
        match self {
            Level::Resolved(n) => Some(n),
            Level::Removed => None,
        }
    }

    /// Least level strictly greater than `n` that is odd (X2/X4: RLE/RLO).
    pub fn least_greater_odd(n: u8) -> u8 {
        n + 1 + (n % 2)
    }

    /// Least level strictly greater than `n` that is even (X3/X5: LRE/LRO).
    pub fn least_greater_even(n: u8) -> u8 {
        n + 2 - (n % 2)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Resolved(n) => write!(f, "{n}"),
            Level::Removed => f.write_str("x"),
        }
    }
}
