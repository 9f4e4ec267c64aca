//! Core Monte Carlo Tree Search loop.
//!
//! One playout runs selection, evaluation, expansion and backpropagation to
//! completion before the next begins. The wall-clock budget is checked once
//! per completed playout, so cancellation is cooperative and a slow evaluator
//! call can overrun the budget by at most one evaluation. The resulting
//! [`MoveDecision`] snapshot serves both online play and training-data
//! collection.

use std::time::Instant;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::evaluator::{Evaluator, EvaluatorError};
use crate::game::{GameState, InvalidMoveError};
use crate::mcts::hyperparameters::SearchConfig;
use crate::mcts::mcts_result::{MoveDecision, SearchStats};
use crate::mcts::node::SearchArena;
use crate::mcts::selection::{self, SelectionPolicy};

/// Failures that abort a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The evaluator's priors do not line up with the legal action set, or
    /// its value is out of range. Never repaired silently: renormalizing
    /// here would hide evaluator bugs during development.
    #[error("evaluator contract violation: {0}")]
    EvaluatorContract(String),

    /// A single evaluation failed. Inside the search loop this only abandons
    /// the current playout.
    #[error("evaluator failure: {0}")]
    Evaluator(#[from] EvaluatorError),

    /// The evaluator kept failing past the retry budget; its statistics
    /// cannot be trusted.
    #[error("evaluator failed {attempts} consecutive playouts, aborting search")]
    EvaluatorExhausted {
        attempts: u32,
        #[source]
        last: EvaluatorError,
    },

    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),

    #[error("invalid search configuration: {0}")]
    Config(String),
}

/// PUCT search engine over a pluggable game and evaluator.
///
/// The tree, the evaluator and the random generator are all owned per
/// instance, so concurrent or sequential searches never share state and a
/// seeded instance is reproducible.
pub struct SearchTree<S: GameState, E: Evaluator<S>> {
    arena: SearchArena<S::Action>,
    evaluator: E,
    config: SearchConfig,
    rng: StdRng,
}

impl<S: GameState, E: Evaluator<S>> SearchTree<S, E> {
    pub fn new(evaluator: E, config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        SearchTree {
            arena: SearchArena::new(),
            evaluator,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Playouts accumulated at the current root.
    pub fn root_visits(&self) -> u32 {
        self.arena.visit_count(self.arena.root())
    }

    /// Per-child `(action, visits, value)` rows at the root, in exploration
    /// order. Useful for logging and post-search inspection.
    pub fn root_children_stats(&self) -> Vec<(S::Action, u32, f64)> {
        self.arena
            .children(self.arena.root())
            .iter()
            .map(|&(action, child)| {
                (
                    action,
                    self.arena.visit_count(child),
                    self.arena.value_estimate(child),
                )
            })
            .collect()
    }

    /// Run playouts from `root_state` until the iteration budget completes
    /// or the wall-clock budget runs out, whichever comes first.
    ///
    /// Hitting the wall clock is not an error: the loop stops early, logs a
    /// warning and whatever statistics were accumulated remain usable.
    pub fn run_search(&mut self, root_state: &S) -> Result<SearchStats, SearchError> {
        self.config.validate().map_err(SearchError::Config)?;

        let started = Instant::now();
        let budget = self.config.max_runtime();
        let mut playouts: u32 = 0;
        let mut consecutive_failures: u32 = 0;
        let mut budget_exhausted = false;

        while playouts < self.config.max_iterations {
            if started.elapsed() >= budget {
                warn!(
                    "search budget of {:.1}s exhausted after {} of {} playouts",
                    self.config.max_runtime_secs, playouts, self.config.max_iterations
                );
                budget_exhausted = true;
                break;
            }

            let mut scratch = root_state.clone();
            match self.playout(&mut scratch) {
                Ok(()) => {
                    playouts += 1;
                    consecutive_failures = 0;
                }
                Err(SearchError::Evaluator(err)) => {
                    consecutive_failures += 1;
                    warn!(
                        "playout abandoned, evaluator failed ({} consecutive): {}",
                        consecutive_failures, err
                    );
                    if consecutive_failures > self.config.evaluator_retry_budget {
                        return Err(SearchError::EvaluatorExhausted {
                            attempts: consecutive_failures,
                            last: err,
                        });
                    }
                }
                Err(fatal) => return Err(fatal),
            }
        }

        let stats = SearchStats {
            playouts,
            elapsed: started.elapsed(),
            budget_exhausted,
        };
        debug!(
            "search done: {} playouts in {:?} ({})",
            stats.playouts,
            stats.elapsed,
            self.config.to_config_string()
        );
        Ok(stats)
    }

    /// One pass of selection, evaluation, expansion-or-terminal and
    /// backpropagation against a private copy of the root state.
    fn playout(&mut self, state: &mut S) -> Result<(), SearchError> {
        let mut node = self.arena.root();
        while !self.arena.is_leaf(node) {
            let (action, child) = match self.arena.select(node, self.config.c_puct) {
                Some(selected) => selected,
                None => break,
            };
            state.apply_action(action)?;
            node = child;
        }

        let leaf_value = if state.is_terminal() {
            // Ground truth beats the evaluator's estimate at a decided
            // position, scored for the player whose turn it would be.
            match state.winner() {
                None => 0.0,
                Some(winner) if winner == state.current_player() => 1.0,
                Some(_) => -1.0,
            }
        } else {
            let evaluation = self.evaluator.evaluate(state)?;
            validate_evaluation(state, &evaluation.priors, evaluation.value)?;
            self.arena.expand(node, &evaluation.priors);
            evaluation.value
        };

        // The leaf node was reached by the previous mover, so its statistics
        // take the negated to-move value; the sign alternates from there.
        self.arena.update_recursive(node, -leaf_value);
        Ok(())
    }

    /// Derive a move from the root statistics.
    ///
    /// Returns `None` when the root has no expanded children, which is the
    /// "no move available" outcome for a terminal (or never searched)
    /// position. Callers must branch on it rather than expect an error.
    pub fn recommend_move(
        &mut self,
        root_state: &S,
        policy: SelectionPolicy,
    ) -> Option<MoveDecision<S::Action>> {
        let children = self.root_children_stats();
        if children.is_empty() {
            return None;
        }
        let visits: Vec<u32> = children.iter().map(|&(_, n, _)| n).collect();
        let (index, over_children) = selection::choose_child(&visits, &policy, &mut self.rng)?;

        debug!(
            "recommending from root stats {:?} with weights {:?}",
            children, over_children
        );

        let mut probabilities = vec![0.0; root_state.action_space()];
        for (&(action, _, _), p) in children.iter().zip(&over_children) {
            probabilities[root_state.action_index(action)] = *p;
        }
        Some(MoveDecision {
            action: children[index].0,
            probabilities,
        })
    }

    /// The root's children `(action, visits)` pairs together with the
    /// temperature-scaled probabilities over them, for callers that blend
    /// noise or build training targets before sampling themselves.
    pub fn move_probabilities(&self, temperature: f64) -> Option<(Vec<S::Action>, Vec<f64>)> {
        let children = self.root_children_stats();
        if children.is_empty() {
            return None;
        }
        let visits: Vec<u32> = children.iter().map(|&(_, n, _)| n).collect();
        let probabilities = selection::visit_distribution(&visits, temperature);
        Some((children.into_iter().map(|(a, _, _)| a).collect(), probabilities))
    }

    /// Step the tree forward after `played_action` happened on the real
    /// board. The explored subtree under that action becomes the new root
    /// and keeps everything already learned about it; an unexplored action
    /// resets the tree to a fresh, unvisited root.
    pub fn advance_root(&mut self, played_action: S::Action) {
        let root = self.arena.root();
        match self.arena.child_by_action(root, played_action) {
            Some(child) => self.arena.promote(child),
            None => self.arena.reset(),
        }
    }
}

/// Check an evaluation against the engine's contract: priors cover the legal
/// action set exactly, without duplicates, with a positive finite total, and
/// the value sits inside `[-1, 1]`.
fn validate_evaluation<S: GameState>(
    state: &S,
    priors: &[(S::Action, f64)],
    value: f64,
) -> Result<(), SearchError> {
    let legal = state.legal_actions();

    for &action in &legal {
        if !priors.iter().any(|&(a, _)| a == action) {
            return Err(SearchError::EvaluatorContract(format!(
                "no prior for legal action {:?}",
                action
            )));
        }
    }
    for (i, &(action, p)) in priors.iter().enumerate() {
        if !legal.contains(&action) {
            return Err(SearchError::EvaluatorContract(format!(
                "prior for illegal action {:?}",
                action
            )));
        }
        if priors[i + 1..].iter().any(|&(a, _)| a == action) {
            return Err(SearchError::EvaluatorContract(format!(
                "duplicate prior for action {:?}",
                action
            )));
        }
        if !p.is_finite() || p < 0.0 {
            return Err(SearchError::EvaluatorContract(format!(
                "prior for action {:?} is {}",
                action, p
            )));
        }
    }

    let total: f64 = priors.iter().map(|&(_, p)| p).sum();
    if total <= 0.0 {
        return Err(SearchError::EvaluatorContract(format!(
            "priors sum to {}, expected a positive total",
            total
        )));
    }
    if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
        return Err(SearchError::EvaluatorContract(format!(
            "value {} outside [-1, 1]",
            value
        )));
    }
    Ok(())
}
