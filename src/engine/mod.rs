//! Core engine — rounds and the session loop that drives them.

pub mod round;
pub mod session;
