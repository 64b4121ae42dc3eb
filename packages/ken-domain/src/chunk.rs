use serde::{Deserialize, Serialize};

use crate::{
	actor::UnitId,
	tier::{ScopeSpec, UnitScope},
};

/// One store read, already bounded: the product of its membership clause
/// widths never exceeds the width the planner was given. `units: None` means
/// no unit filter at all; an empty unit list matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkedQuery {
	pub collection: String,
	pub statuses: Vec<String>,
	pub units: Option<Vec<UnitId>>,
}
impl ChunkedQuery {
	/// Width the store will charge for this query: status clause cardinality
	/// times unit clause cardinality, each treated as 1 when absent.
	pub fn membership_width(&self) -> usize {
		let statuses = self.statuses.len().max(1);
		let units = self.units.as_ref().map_or(1, |units| units.len().max(1));

		statuses * units
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
	#[error(
		"Tier for collection {collection} declares {statuses} statuses; none fit within membership width {width}."
	)]
	TooManyStatuses { collection: String, statuses: usize, width: usize },
}

/// How many units fit alongside `status_count` statuses in one query.
pub fn chunk_width(width: usize, status_count: usize) -> usize {
	width / status_count.max(1)
}

/// Expand one scope spec into store-sized queries.
///
/// Unrestricted scope never chunks: one query, no unit filter. Restricted
/// scope partitions the unit set, sorted and deduplicated, into consecutive
/// groups so the emitted queries cover `statuses x units` exactly once.
/// Statuses are never dropped to make a spec fit; that is a configuration bug
/// and fails the plan.
pub fn plan_queries(spec: &ScopeSpec, width: usize) -> Result<Vec<ChunkedQuery>, PlanError> {
	let per_chunk = chunk_width(width, spec.statuses.len());

	if per_chunk < 1 {
		return Err(PlanError::TooManyStatuses {
			collection: spec.collection.clone(),
			statuses: spec.statuses.len(),
			width,
		});
	}

	let queries = match &spec.units {
		UnitScope::Unrestricted => vec![ChunkedQuery {
			collection: spec.collection.clone(),
			statuses: spec.statuses.clone(),
			units: None,
		}],
		UnitScope::Units(units) => {
			let mut sorted = units.clone();

			sorted.sort();
			sorted.dedup();

			sorted
				.chunks(per_chunk)
				.map(|group| ChunkedQuery {
					collection: spec.collection.clone(),
					statuses: spec.statuses.clone(),
					units: Some(group.to_vec()),
				})
				.collect()
		},
	};

	tracing::debug!(
		collection = %spec.collection,
		statuses = spec.statuses.len(),
		queries = queries.len(),
		"Planned chunked queries.",
	);

	Ok(queries)
}
