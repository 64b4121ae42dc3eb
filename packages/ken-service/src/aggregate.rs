use std::{collections::HashSet, sync::Arc};

use crate::{Error, QueryFailure, RecordStore, Result};
use ken_domain::{ChunkedQuery, OrderPolicy, Record};

/// All planned queries for one tier, tagged with the tier's position in the
/// resolved order. That position is the dedupe precedence.
#[derive(Debug, Clone)]
pub struct TierPlan {
	pub tier: usize,
	pub queries: Vec<ChunkedQuery>,
}

/// Run every chunked read of one collection concurrently, then merge in
/// (tier, chunk) declaration order, dedupe by record identity with the first
/// tier winning, and sort with the caller's ordering policy.
///
/// If any read fails, the whole aggregate fails; a partial list would
/// under-report records the actor is authorized to see, and scope is never
/// widened to recover.
pub async fn aggregate(
	store: Arc<dyn RecordStore>,
	collection: String,
	plans: Vec<TierPlan>,
	policy: OrderPolicy,
) -> Result<Vec<Record>> {
	let mut handles = Vec::new();

	for plan in plans {
		for (chunk, query) in plan.queries.into_iter().enumerate() {
			let store = Arc::clone(&store);
			let handle =
				tokio::spawn(async move { store.find(&query).await.map_err(|err| err.to_string()) });

			handles.push((plan.tier, chunk, handle));
		}
	}

	tracing::debug!(collection = %collection, reads = handles.len(), "Dispatched chunked reads.");

	// Awaiting in spawn order restores deterministic merge order; the reads
	// themselves already ran concurrently.
	let mut batches = Vec::with_capacity(handles.len());
	let mut failed = Vec::new();

	for (tier, chunk, handle) in handles {
		let outcome = match handle.await {
			Ok(outcome) => outcome,
			Err(err) => Err(err.to_string()),
		};

		match outcome {
			Ok(records) => batches.push(records),
			Err(message) => {
				tracing::error!(
					collection = %collection,
					tier,
					chunk,
					error = %message,
					"Chunked read failed.",
				);
				failed.push(QueryFailure { collection: collection.clone(), tier, chunk, message });
			},
		}
	}

	if !failed.is_empty() {
		return Err(Error::Aggregation { collection, failed });
	}

	let mut seen = HashSet::new();
	let mut merged = Vec::new();

	for batch in batches {
		for record in batch {
			// First tier to report a record keeps its payload. Dedupe also
			// guards against overlapping chunks.
			if seen.insert(record.key()) {
				merged.push(record);
			}
		}
	}

	policy.sort(&mut merged);

	Ok(merged)
}
