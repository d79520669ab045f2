//! CLI infrastructure for the tic-tac-toe TD toolkit
//!
//! This module provides the command-line interface for training TD agents
//! and playing against them at the console.

pub mod commands;
pub mod config;
pub mod output;
