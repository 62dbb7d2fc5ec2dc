use std::fmt;

use crate::arena::TypeId;
use crate::constraint::Name;

/// The ways the solver can discover that its input (or its own bookkeeping)
/// violated an invariant, plus the one way a caller's input can simply be
/// wrong: there is no recoverable error inside the solver itself, but a
/// query for a name never seen by the pre-pass is a normal, reportable
/// mistake rather than a broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// `find`/`record_of` was called on an ID that was never registered.
    UnknownId(TypeId),
    /// A query or constraint referenced a name the pre-pass never registered.
    UnknownName(Name),
    /// Two lambda records were unified but their parameter or return
    /// slot counts disagree.
    ArityMismatch {
        expected: usize,
        found: usize,
        kind: ArityKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityKind {
    Params,
    Returns,
}

impl fmt::Display for ArityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityKind::Params => write!(f, "params"),
            ArityKind::Returns => write!(f, "returns"),
        }
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::UnknownId(id) => write!(f, "unknown type id: {id}"),
            SolverError::UnknownName(name) => write!(f, "unknown name: {name}"),
            SolverError::ArityMismatch {
                expected,
                found,
                kind,
            } => write!(
                f,
                "arity mismatch unifying {kind}: expected {expected}, found {found}"
            ),
        }
    }
}

impl std::error::Error for SolverError {}
