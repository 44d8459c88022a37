//! Integration tests: whole sessions driven over scripted input.

mod scripted_source;
mod session_flow;
