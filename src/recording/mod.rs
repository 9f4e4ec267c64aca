//! Self-play episode recording for training data collection.
//!
//! # Components
//!
//! - `game_record`: data structures for recorded episodes
//! - `csv_writer`: CSV persistence and loading

pub mod csv_writer;
pub mod game_record;

pub use csv_writer::{load_moves_from_csv, CsvWriter, LoadedMoveRecord};
pub use game_record::{EpisodeRecord, MoveRecord};
