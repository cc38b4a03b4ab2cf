//! Generator configuration and its allowed ranges.

use std::ops::RangeInclusive;

use super::error::{ConfigError, ModelResult};

/// Allowed number of AVS nodes.
pub const AVS_COUNT_RANGE: RangeInclusive<usize> = 1..=10;
/// Allowed number of Sets owned by each AVS.
pub const SETS_PER_AVS_RANGE: RangeInclusive<usize> = 1..=10;
/// Allowed number of Operator nodes.
pub const OPERATORS_COUNT_RANGE: RangeInclusive<usize> = 1..=20;
/// Allowed number of Operator links per Set.
pub const CONNECTIONS_PER_SET_RANGE: RangeInclusive<usize> = 1..=10;

/// Which configuration field a control edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigField {
	/// `avs_count`
	AvsCount,
	/// `sets_per_avs`
	SetsPerAvs,
	/// `operators_count`
	OperatorsCount,
	/// `operator_connections_per_set`
	OperatorConnectionsPerSet,
}

impl ConfigField {
	/// All fields in panel order.
	pub const ALL: [ConfigField; 4] = [
		ConfigField::AvsCount,
		ConfigField::SetsPerAvs,
		ConfigField::OperatorsCount,
		ConfigField::OperatorConnectionsPerSet,
	];

	/// Label shown next to the slider.
	pub fn label(self) -> &'static str {
		match self {
			ConfigField::AvsCount => "AVS Count",
			ConfigField::SetsPerAvs => "Sets Per AVS",
			ConfigField::OperatorsCount => "Operators Count",
			ConfigField::OperatorConnectionsPerSet => "Operator Connections Per Set",
		}
	}

	/// Inclusive bounds for the field.
	pub fn range(self) -> RangeInclusive<usize> {
		match self {
			ConfigField::AvsCount => AVS_COUNT_RANGE,
			ConfigField::SetsPerAvs => SETS_PER_AVS_RANGE,
			ConfigField::OperatorsCount => OPERATORS_COUNT_RANGE,
			ConfigField::OperatorConnectionsPerSet => CONNECTIONS_PER_SET_RANGE,
		}
	}
}

/// The four counts that fully determine a generated graph's shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
	/// Number of AVS nodes.
	pub avs_count: usize,
	/// Sets owned by each AVS.
	pub sets_per_avs: usize,
	/// Number of Operator nodes.
	pub operators_count: usize,
	/// Operator links drawn from each Set.
	pub operator_connections_per_set: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			avs_count: 3,
			sets_per_avs: 2,
			operators_count: 5,
			operator_connections_per_set: 2,
		}
	}
}

impl Config {
	/// Total Set nodes.
	pub fn total_sets(&self) -> usize {
		self.avs_count * self.sets_per_avs
	}

	/// Operator links per Set once capped by the operator count.
	pub fn connections_per_set(&self) -> usize {
		self.operator_connections_per_set.min(self.operators_count)
	}

	/// Expected node count of a generated graph.
	pub fn node_count(&self) -> usize {
		self.avs_count + self.total_sets() + self.operators_count
	}

	/// Expected edge count of a generated graph.
	pub fn edge_count(&self) -> usize {
		self.total_sets() + self.total_sets() * self.connections_per_set()
	}

	/// Current value of a field.
	pub fn get(&self, field: ConfigField) -> usize {
		match field {
			ConfigField::AvsCount => self.avs_count,
			ConfigField::SetsPerAvs => self.sets_per_avs,
			ConfigField::OperatorsCount => self.operators_count,
			ConfigField::OperatorConnectionsPerSet => self.operator_connections_per_set,
		}
	}

	/// Copy with one field replaced, clamped into its range.
	pub fn with(mut self, field: ConfigField, value: usize) -> Self {
		let range = field.range();
		let value = value.clamp(*range.start(), *range.end());
		match field {
			ConfigField::AvsCount => self.avs_count = value,
			ConfigField::SetsPerAvs => self.sets_per_avs = value,
			ConfigField::OperatorsCount => self.operators_count = value,
			ConfigField::OperatorConnectionsPerSet => self.operator_connections_per_set = value,
		}
		self
	}

	/// Copy with every field pinned into its range.
	pub fn clamped(self) -> Self {
		ConfigField::ALL
			.into_iter()
			.fold(self, |cfg, field| cfg.with(field, cfg.get(field)))
	}

	/// Check every field against its range, reporting the first violation.
	pub fn validate(&self) -> ModelResult<()> {
		for field in ConfigField::ALL {
			let (value, range) = (self.get(field), field.range());
			if !range.contains(&value) {
				return Err(ConfigError::OutOfRange {
					field: field.label(),
					value,
					min: *range.start(),
					max: *range.end(),
				});
			}
		}
		Ok(())
	}
}
