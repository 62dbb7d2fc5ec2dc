//! Bookkeeping returned alongside a completed analysis. Pure reporting, not
//! a precision-affecting part of the algorithm.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SolveStats {
    pub constraints_processed: usize,
    pub equivalence_classes: usize,
}
