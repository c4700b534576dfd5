//! Interactive chat module
//!
//! Provides a readline-based interactive question and answer session.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
