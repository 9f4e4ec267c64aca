use std::time::Duration;

/// Snapshot of one completed search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Successful playouts, each of which incremented the root visit count.
    pub playouts: u32,
    /// Wall-clock time spent in the loop.
    pub elapsed: Duration,
    /// True when the loop stopped on the wall-clock budget instead of the
    /// iteration budget.
    pub budget_exhausted: bool,
}

/// A recommended move together with the move-probability vector over the
/// full action space. Entries are zero exactly where the root has no child.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveDecision<A> {
    pub action: A,
    pub probabilities: Vec<f64>,
}
