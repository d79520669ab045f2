//! Subcommands of the `ttt-td` binary

pub mod play;
pub mod train;
