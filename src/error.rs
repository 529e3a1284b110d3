//! Errors raised while loading host-injected graph data.

use thiserror::Error;

/// Why injected graph data could not be used. The app logs these and falls
/// back to the embedded table.
#[derive(Debug, Error)]
pub enum GraphLoadError {
	#[error("no element with id `{0}` in the document")]
	MissingElement(&'static str),
	#[error("element `{0}` is not a <script> tag")]
	NotAScript(&'static str),
	#[error("element `{0}` has no content")]
	EmptyPayload(&'static str),
	#[error("failed to parse injected graph data: {0}")]
	Parse(#[from] serde_json::Error),
}
