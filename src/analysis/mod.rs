//! Structural analysis of decompiled Java source.
//!
//! Best-effort lexical extraction of class and method declarations, used to
//! flag compatibility-relevant removals and signature changes between two
//! versions of a file. This is line-oriented pattern matching, not a parser:
//! a stricter implementation could swap in a real Java grammar without
//! changing the `{classes, methods}` contract the diff engine consumes.

mod findings;
mod structural;

pub use findings::{Finding, FindingKind, Severity, SignatureEvidence};
pub use structural::{DeclarationSet, StructuralAnalyzer};
