//! Error types for the graph model.

use thiserror::Error;

/// A configuration field outside its allowed range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	/// The named field is below its minimum or above its maximum.
	#[error("{field} must be in [{min}, {max}], got {value}")]
	OutOfRange {
		/// Field name as shown in the configuration panel.
		field: &'static str,
		/// Offending value.
		value: usize,
		/// Inclusive lower bound.
		min: usize,
		/// Inclusive upper bound.
		max: usize,
	},
}

/// Failure to parse a `kind-index` node identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeIdError {
	/// No `-` separating kind and index.
	#[error("node id {0:?} has no kind prefix")]
	MissingSeparator(String),

	/// Prefix is not `avs`, `set` or `operator`.
	#[error("unknown node kind {0:?}")]
	UnknownKind(String),

	/// Index part is not a non-negative integer.
	#[error("invalid node index {0:?}")]
	InvalidIndex(String),
}

/// Failure to parse a `#rrggbb` color.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
	/// Missing `#` or wrong length.
	#[error("expected #rrggbb, got {0:?}")]
	Malformed(String),

	/// A channel is not valid hexadecimal.
	#[error("invalid hex digits in {0:?}")]
	InvalidHex(String),
}

/// Result alias for model operations, defaulting to configuration errors.
pub type ModelResult<T, E = ConfigError> = std::result::Result<T, E>;
