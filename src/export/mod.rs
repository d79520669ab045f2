//! Export functionality for analysis
//!
//! Currently supports CSV export of per-episode training outcomes.

mod episodes_csv;

pub use episodes_csv::{EpisodeRecord, write_episodes_csv};
