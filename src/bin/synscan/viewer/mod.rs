//! Read-only terminal viewer
//!
//! A styled file pane next to an outline pane. The outline is refreshed on
//! demand, and picking a symbol moves the file cursor to its line.

pub mod app;
pub mod model;
pub mod theme;
pub mod ui;
pub mod viewer_main;

#[cfg(test)]
mod tests;
