//! Command line overlay: turns a [`CommandLineState`] snapshot into a leading
//! glyph, the prompt, the content split at the cursor, and a cursor marker.
//!
//! The view only reads state. Its single piece of local state is the focus
//! latch in [`ViewLocalState`], which flips the first time the overlay is
//! visible and asks the attached [`FocusSurface`] for focus once the output
//! has been drawn.

mod focus;
mod glyph;
mod segments;
mod state;
mod view;
mod widget;

pub use focus::FocusSurface;
pub use segments::Segmentation;
pub use state::CommandLineState;
pub use view::CommandLineView;
pub use widget::{overlay_area, CommandLineWidget};
