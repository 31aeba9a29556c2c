//! Terminal host for the quickjump search overlay.
//!
//! This crate plays the part a browser plays for a web page: it owns the
//! document the overlay is mounted into, paints it with `ratatui`, runs the
//! deferred frame callbacks after each paint and turns terminal key and
//! mouse events into overlay input.

mod app;
pub mod components;
pub mod input;
mod runtime;
pub mod style;

pub use app::{App, HostOptions, PageState, Router, Status, SystemBrowser};
pub use runtime::run;

pub use crate::input::QueryInput;
pub use crate::style::{StyleConfig, Theme, builtin_themes, by_name, default_theme, names};

#[cfg(test)]
mod snapshot_tests;
