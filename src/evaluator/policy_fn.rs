//! Adapter for an externally supplied policy/value function.
//!
//! Model inference lives outside this crate. A learned evaluator plugs in as
//! a closure that receives the state and returns priors plus a value, which
//! keeps checkpoint handling and tensor plumbing out of the search engine.

use crate::evaluator::{Evaluation, Evaluator, EvaluatorError};
use crate::game::GameState;

/// Wraps a policy/value closure as an [`Evaluator`].
pub struct FnEvaluator<F> {
    func: F,
}

impl<F> FnEvaluator<F> {
    pub fn new(func: F) -> Self {
        FnEvaluator { func }
    }
}

impl<S, F> Evaluator<S> for FnEvaluator<F>
where
    S: GameState,
    F: FnMut(&S) -> Result<Evaluation<S::Action>, EvaluatorError>,
{
    fn evaluate(&mut self, state: &S) -> Result<Evaluation<S::Action>, EvaluatorError> {
        (self.func)(state)
    }
}

/// Uniform priors with a neutral value, handy as a stand-in model.
pub fn uniform_evaluation<S: GameState>(state: &S) -> Evaluation<S::Action> {
    let legal = state.legal_actions();
    let uniform = 1.0 / legal.len().max(1) as f64;
    Evaluation {
        priors: legal.into_iter().map(|a| (a, uniform)).collect(),
        value: 0.0,
    }
}
