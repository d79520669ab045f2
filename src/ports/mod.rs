//! Ports (trait boundaries) between the game/training core and its players,
//! learners and observers.

pub mod learner;
pub mod observer;
pub mod player;

pub use learner::Learner;
pub use observer::Observer;
pub use player::Player;
