//! Lane Crosser: cross the board, dodge the bugs, grab the gems.
//!
//! The library is the game core and does no I/O. Hosts implement
//! [`platform::Canvas`] and [`platform::ScoreDisplay`] and drive
//! [`entities::GameState`] once per frame.

pub mod compute;
pub mod config;
pub mod entities;
pub mod platform;
