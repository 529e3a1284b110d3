//! Force-directed view of the process/flow graph.
//!
//! Renders the filtered graph on an HTML canvas with:
//! - Physics-based positioning behind the [`ForceLayout`] trait
//! - Pie glyphs for flows shared by several processes
//! - Pan, zoom, node dragging and click-to-select
//! - Neighbour highlight on hover
//!
//! # Example
//!
//! ```ignore
//! let coordinator = RwSignal::new(Coordinator::new());
//! provide_context(coordinator);
//!
//! view! {
//!     <ForceGraphView graph=filtered colors=colors viewport=viewport />
//! }
//! ```

mod component;
pub mod layout;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::ForceGraphView;
pub use layout::{ForceConfig, ForceGraphLayout, ForceLayout, TickCallback, TickInfo};
pub use render::pie_slices;
pub use state::{CLICK_THRESHOLD, ForceGraphState, MAX_ZOOM, MIN_ZOOM};
pub use theme::{Color, ProcessColors, Theme};
