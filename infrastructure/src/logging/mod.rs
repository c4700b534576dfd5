//! Answer transcript written as JSON Lines.

mod answer_log;

pub use answer_log::JsonlAnswerLog;
