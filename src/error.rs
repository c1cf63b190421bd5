//! Structured error types for the bidi-core crate and its CLI front-end.
//!
//! The core `bidi()` pipeline is infallible over already-typed input (spec
//! §7: "no exceptions escape the public bidi function for valid inputs").
//! The only place user-facing errors arise is at the text boundary: parsing
//! a type-code token or a conformance test file.

use thiserror::Error;

/// Errors surfaced at the text/CLI boundary. Internal invariant violations
/// (range ordering, a removed sentinel leaking into `order`) are bugs, not
/// user errors, and are asserted rather than returned here (spec §7).
#[derive(Debug, Error)]
pub enum BidiError {
    /// A type mnemonic that isn't one of the closed set of bidi classes.
    #[error("unknown bidi type code {token:?}")]
    UnknownTypeCode { token: String },

    /// Malformed `BidiTest`/`BidiCharacterTest` fixture syntax.
    #[error("malformed test file at line {line}: {message}")]
    TestFile { line: usize, message: String },

    /// I/O failure while reading a test fixture file.
    #[error("failed to read test file {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
