//! CSV export of per-episode training outcomes
//!
//! One row per episode, suitable for plotting learning curves with external
//! tools.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    Error, Result,
    pipeline::EpisodeSummary,
    tictactoe::{EpisodeResult, Mark},
};

/// A single row in the episodes CSV export
#[derive(Debug, Clone)]
pub struct EpisodeRecord<'a> {
    pub episode: usize,
    pub agent_mark: Mark,
    /// `X`, `O` or `-` for a draw
    pub winner: &'static str,
    pub agent_result: EpisodeResult,
    pub end_board: &'a str,
    pub x_player: &'a str,
    pub o_player: &'a str,
}

impl<'a> EpisodeRecord<'a> {
    pub fn new(episode: usize, summary: &'a EpisodeSummary) -> Self {
        Self {
            episode,
            agent_mark: summary.agent_mark,
            winner: summary.winner.symbol(),
            agent_result: summary.agent_result(),
            end_board: &summary.end_board,
            x_player: &summary.x_player_type,
            o_player: &summary.o_player_type,
        }
    }
}

fn result_label(result: EpisodeResult) -> &'static str {
    match result {
        EpisodeResult::Win => "win",
        EpisodeResult::Draw => "draw",
        EpisodeResult::Loss => "loss",
    }
}

fn write_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(
        writer,
        "episode,agent_mark,winner,agent_result,end_board,x_player,o_player"
    )
}

fn write_record<W: Write>(writer: &mut W, record: &EpisodeRecord) -> std::io::Result<()> {
    writeln!(
        writer,
        "{},{},{},{},{},{},{}",
        record.episode,
        record.agent_mark,
        record.winner,
        result_label(record.agent_result),
        record.end_board,
        record.x_player,
        record.o_player,
    )
}

/// Write `episodes` to `path`, replacing any existing file
pub fn write_episodes_csv<P: AsRef<Path>>(path: P, episodes: &[EpisodeSummary]) -> Result<()> {
    let path = path.as_ref();
    let io_err = |e| Error::io(format!("write episodes CSV {}", path.display()), e);

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    write_header(&mut writer).map_err(io_err)?;
    for (episode, summary) in episodes.iter().enumerate() {
        write_record(&mut writer, &EpisodeRecord::new(episode, summary)).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    Ok(())
}
