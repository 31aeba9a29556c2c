//! The terminal host application.
//!
//! [`App`] owns a small documentation page (navigation bar, page body,
//! status line) modelled as a [`quickjump_core::Document`], mounts the search
//! overlay into it and translates terminal input into overlay key presses.
//! Supporting modules split the implementation into host services, input
//! handling and rendering.

mod actions;
pub mod host;
mod render;
mod state;

pub use host::{PageState, Router, Status, SystemBrowser};
pub use state::{App, HostOptions};
