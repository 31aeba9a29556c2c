//! Widgets shared by the page and the palette.

/// The documentation page behind the palette.
pub mod page;
/// The search palette dialog.
pub mod palette;
/// Width-aware string helpers.
pub mod text;

pub use page::{NavItem, PageContext, render_page};
pub use palette::{PaletteAreas, PaletteContext, render_palette};
