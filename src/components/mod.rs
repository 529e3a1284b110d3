//! Leptos components of the explorer.

pub mod controls;
pub mod detail_panel;
pub mod force_graph;
pub mod hover_card;
pub mod swimlane;

pub use controls::{GraphStats, ProcessFilter, SearchBox, Stats, ViewToggle};
pub use detail_panel::DetailPanel;
pub use force_graph::ForceGraphView;
pub use hover_card::{HoverCard, TooltipAnchor, tooltip_anchor};
pub use swimlane::{ExpandState, Lane, Swimlane, swimlanes};
