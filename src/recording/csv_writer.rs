//! CSV persistence for self-play episodes.
//!
//! One row per move, flattened for supervised training:
//! `episode_id,timestamp,turn,mover,cell_0-8,action,prob_0-8,outcome`.
//! Files rotate daily under a base directory.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::game::Player;
use crate::recording::game_record::EpisodeRecord;
use crate::MctsZeroError;

const CELLS: usize = 9;

/// Appending CSV writer for episode records with daily file rotation.
pub struct CsvWriter {
    base_dir: PathBuf,
}

impl CsvWriter {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> std::io::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(CsvWriter { base_dir })
    }

    fn date_string() -> String {
        Utc::now().format("%Y%m%d").to_string()
    }

    /// Path of the file an episode written right now would land in.
    pub fn current_file_path(&self) -> PathBuf {
        self.base_dir
            .join(format!("episodes_{}.csv", Self::date_string()))
    }

    /// Append every move of an episode, creating the file (and its header)
    /// on first use. Returns the path written to.
    pub fn write_episode(&self, record: &EpisodeRecord) -> Result<PathBuf, MctsZeroError> {
        let path = self.current_file_path();
        let is_new = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::Writer::from_writer(file);

        if is_new {
            writer.write_record(header())?;
        }

        for move_record in &record.moves {
            let mut row: Vec<String> = vec![
                record.episode_id.clone(),
                record.timestamp.to_string(),
                move_record.turn.to_string(),
                move_record.mover.display().to_string(),
            ];
            for &cell in &move_record.cells_before {
                row.push(cell.to_string());
            }
            row.push(move_record.action.to_string());
            for &p in &move_record.probabilities {
                row.push(format!("{:.6}", p));
            }
            row.push(record.outcome.to_string());
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(path)
    }
}

fn header() -> Vec<String> {
    let mut columns = vec![
        "episode_id".to_string(),
        "timestamp".to_string(),
        "turn".to_string(),
        "mover".to_string(),
    ];
    for i in 0..CELLS {
        columns.push(format!("cell_{}", i));
    }
    columns.push("action".to_string());
    for i in 0..CELLS {
        columns.push(format!("prob_{}", i));
    }
    columns.push("outcome".to_string());
    columns
}

/// One move row loaded back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMoveRecord {
    pub episode_id: String,
    pub turn: usize,
    pub mover: Player,
    pub cells_before: Vec<i8>,
    pub action: usize,
    pub probabilities: Vec<f64>,
    pub outcome: i8,
}

/// Load every move row from an episode CSV file.
pub fn load_moves_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<LoadedMoveRecord>, MctsZeroError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        let parse_err = |what: &str| MctsZeroError::Config(format!("bad {} in record file", what));

        let mover = match field(3).as_str() {
            "O" => Player::Nought,
            "X" => Player::Cross,
            _ => return Err(parse_err("mover")),
        };
        let mut cells_before = Vec::with_capacity(CELLS);
        for i in 0..CELLS {
            cells_before.push(field(4 + i).parse::<i8>().map_err(|_| parse_err("cell"))?);
        }
        let mut probabilities = Vec::with_capacity(CELLS);
        for i in 0..CELLS {
            probabilities.push(
                field(5 + CELLS + i)
                    .parse::<f64>()
                    .map_err(|_| parse_err("probability"))?,
            );
        }

        rows.push(LoadedMoveRecord {
            episode_id: field(0),
            turn: field(2).parse().map_err(|_| parse_err("turn"))?,
            mover,
            cells_before,
            action: field(4 + CELLS).parse().map_err(|_| parse_err("action"))?,
            probabilities,
            outcome: field(5 + 2 * CELLS)
                .parse()
                .map_err(|_| parse_err("outcome"))?,
        });
    }

    Ok(rows)
}
