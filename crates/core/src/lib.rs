//! Headless search overlay for documentation sites.
//!
//! The crate models the parts of a host page the overlay interacts with (a
//! small element tree with focus, a frame scheduler, translation) and builds
//! the overlay on top: result aggregation over static indices, keyboard
//! selection, list rendering and modal focus management, all glued together
//! through observable [`Signal`]s. Hosts paint [`ListView`]s and feed
//! [`KeyInput`]s back in.

pub mod aggregate;
pub mod collab;
pub mod controller;
pub mod dom;
pub mod error;
pub mod focus;
pub mod i18n;
pub mod index;
pub mod keys;
pub mod overlay;
pub mod render;
pub mod results;
pub mod scheduler;
pub mod shortcut;
pub mod signal;

pub use crate::aggregate::{Aggregator, AggregatorLimits};
pub use crate::collab::{ExternalOpener, Navigator, NewContextRequest};
pub use crate::dom::{Document, ElementId, ElementKind};
pub use crate::error::{Error, Result};
pub use crate::i18n::{Catalog, DEFAULT_LOCALE, Localizer, Translator};
pub use crate::index::SiteIndex;
pub use crate::keys::{Disposition, Key, KeyInput, Modifiers};
pub use crate::overlay::{GlobalShortcuts, Overlay, OverlayServices, SearchSession};
pub use crate::render::{EmptyState, ListEntry, ListView, RowView};
pub use crate::results::{ResultItem, ResultKind};
pub use crate::scheduler::FrameScheduler;
pub use crate::shortcut::{ShortcutModifier, ToggleShortcut};
pub use crate::signal::{Signal, Subscription};
