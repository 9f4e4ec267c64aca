//! State evaluation for the search engine.
//!
//! An evaluator maps a game state to prior probabilities over the legal
//! actions and a scalar value in `[-1, 1]` from the current player's
//! perspective. The engine validates the priors against the legal action set
//! and never renormalizes them, so a broken evaluator fails loudly instead of
//! silently skewing the search.

pub mod policy_fn;
pub mod rollout;

pub use policy_fn::FnEvaluator;
pub use rollout::RolloutEvaluator;

use crate::game::GameState;

/// Raised when an evaluator cannot produce a result for a state.
///
/// A single failure only abandons the current playout; the search aborts once
/// failures repeat beyond the configured retry budget.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct EvaluatorError(pub String);

/// Result of evaluating one state.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<A> {
    /// Prior probability per legal action. Must cover the legal action set
    /// exactly and sum to a positive total.
    pub priors: Vec<(A, f64)>,
    /// Expected end-of-game score in `[-1, 1]` for the player to move.
    pub value: f64,
}

/// A position evaluator usable by the search engine.
pub trait Evaluator<S: GameState> {
    fn evaluate(&mut self, state: &S) -> Result<Evaluation<S::Action>, EvaluatorError>;
}
