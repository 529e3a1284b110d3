//! Process/flow graph model and its derivation pipeline.
//!
//! Rows or host props are turned into a canonical [`Graph`] once per input
//! change. Views never see it directly: every change to the search query or
//! process toggles derives a fresh subgraph through [`filter_graph`].

mod builder;
mod fallback;
mod filter;
mod payload;
mod query;
mod types;

pub use builder::{FlowRow, build_from_props_or_fallback, rows_to_graph};
pub use fallback::fallback_rows;
pub use filter::{NameQuery, ProcessToggles, filter_graph, is_process_enabled};
pub use payload::InjectedGraph;
pub use query::{connected_flows, connected_processes};
pub use types::{FlowNode, Graph, Link, Node, NodeId, NodeKind, ProcessNode};
