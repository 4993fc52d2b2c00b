//! Ports (interfaces) between the game engine and the outside world
//!
//! The turn loop only talks to these traits. Console play, the AI and test
//! doubles live in [`crate::adapters`].

pub mod observer;
pub mod player;

pub use observer::{GameObserver, NullObserver};
pub use player::MoveSource;
