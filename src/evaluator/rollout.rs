//! Pure Monte Carlo rollout evaluation, the model-free reference baseline.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::evaluator::{Evaluation, Evaluator, EvaluatorError};
use crate::game::GameState;

/// Evaluates a state by playing uniformly random legal moves to the end of
/// the game and reporting the ground-truth outcome, with a uniform prior over
/// the legal actions.
///
/// Owns its random generator, so two evaluators never share random state and
/// a seeded evaluator is reproducible.
#[derive(Debug)]
pub struct RolloutEvaluator {
    rng: StdRng,
}

impl RolloutEvaluator {
    pub fn new() -> Self {
        RolloutEvaluator {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RolloutEvaluator {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RolloutEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> Evaluator<S> for RolloutEvaluator {
    fn evaluate(&mut self, state: &S) -> Result<Evaluation<S::Action>, EvaluatorError> {
        let mover = state.current_player();
        let legal = state.legal_actions();

        let uniform = 1.0 / legal.len().max(1) as f64;
        let priors: Vec<(S::Action, f64)> = legal.iter().map(|&a| (a, uniform)).collect();

        let mut rollout = state.clone();
        while !rollout.is_terminal() {
            let actions = rollout.legal_actions();
            if actions.is_empty() {
                return Err(EvaluatorError(
                    "non-terminal state reported no legal actions".to_string(),
                ));
            }
            let pick = actions[self.rng.random_range(0..actions.len())];
            rollout
                .apply_action(pick)
                .map_err(|e| EvaluatorError(format!("rollout move rejected: {}", e)))?;
        }

        let value = match rollout.winner() {
            None => 0.0,
            Some(w) if w == mover => 1.0,
            Some(_) => -1.0,
        };

        Ok(Evaluation { priors, value })
    }
}
