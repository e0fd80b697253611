//! Sort images from a source folder into category subfolders with one click
//! per image, with a single step of undo.

pub mod app;
pub mod engine;
pub mod error;
pub mod infra;
pub mod library;
pub mod logging;
pub mod ui;
