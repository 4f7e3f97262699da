//! Bridge between the egui thread and the tokio worker doing network calls.

pub mod commands;
pub mod runtime;
