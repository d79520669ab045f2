//! Training and evaluation pipeline
//!
//! This module provides:
//! - Episode driving with per-episode side assignment
//! - Training runs with observer notifications
//! - Frozen, greedy evaluation of a learned policy

pub mod observers;
pub mod training;

// Re-export observer implementations (adapters)
pub use observers::{LogObserver, ProgressObserver};
pub use training::{
    EpisodeSummary, TrainSummary, TrainingConfig, TrainingPipeline, TrainingResult, run_episode,
};

pub use crate::ports::{Learner, Observer};
