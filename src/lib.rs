//! Lane Siege - per-tick mob movement and targeting for a two-player lane game

pub mod core;
pub mod lane;
