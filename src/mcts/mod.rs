pub mod algorithm;
pub mod hyperparameters;
pub mod mcts_result;
pub mod node;
pub mod selection;

pub use algorithm::{SearchError, SearchTree};
pub use hyperparameters::SearchConfig;
pub use mcts_result::{MoveDecision, SearchStats};
pub use selection::SelectionPolicy;
