//! UI layer for the directory window.

pub mod app;

pub use app::DirectoryApp;
