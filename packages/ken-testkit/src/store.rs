use std::{
	collections::HashSet,
	sync::Mutex,
};

use ken_domain::{ChunkedQuery, Record};
use ken_service::{BoxFuture, RecordStore};

/// In-memory record store for tests: enforces the membership width bound the
/// way the Postgres adapter does, records every query it receives, and can be
/// told to fail reads for chosen collections.
pub struct MemoryStore {
	width: usize,
	records: Vec<Record>,
	fail_collections: HashSet<String>,
	stall_first_call: bool,
	calls: Mutex<Vec<ChunkedQuery>>,
}
impl MemoryStore {
	pub fn new(width: usize) -> Self {
		Self {
			width,
			records: Vec::new(),
			fail_collections: HashSet::new(),
			stall_first_call: false,
			calls: Mutex::new(Vec::new()),
		}
	}

	pub fn with_records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
		self.records.extend(records);

		self
	}

	/// Every `find` against this collection returns a storage error.
	pub fn failing_collection(mut self, collection: impl Into<String>) -> Self {
		self.fail_collections.insert(collection.into());

		self
	}

	/// The first read this store receives resolves after every later one.
	/// Lets tests show that merged output does not depend on completion order.
	pub fn stalling_first_call(mut self) -> Self {
		self.stall_first_call = true;

		self
	}

	/// Queries received so far, in arrival order.
	pub fn calls(&self) -> Vec<ChunkedQuery> {
		self.calls.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn run(&self, query: &ChunkedQuery) -> (usize, ken_storage::Result<Vec<Record>>) {
		let requested = query.membership_width();

		if requested > self.width {
			return (0, Err(ken_storage::Error::WidthExceeded { requested, width: self.width }));
		}

		let call_index = {
			let mut calls = self.calls.lock().unwrap_or_else(|err| err.into_inner());

			calls.push(query.clone());

			calls.len() - 1
		};

		(call_index, self.filter(query))
	}

	fn filter(&self, query: &ChunkedQuery) -> ken_storage::Result<Vec<Record>> {
		if self.fail_collections.contains(&query.collection) {
			return Err(ken_storage::Error::InvalidArgument(format!(
				"Injected failure for collection {}.",
				query.collection,
			)));
		}
		if query.units.as_ref().is_some_and(|units| units.is_empty()) {
			return Ok(Vec::new());
		}

		Ok(self
			.records
			.iter()
			.filter(|record| {
				record.collection == query.collection
					&& query.statuses.contains(&record.status)
					&& query
						.units
						.as_ref()
						.is_none_or(|units| units.contains(&record.unit_id))
			})
			.cloned()
			.collect())
	}
}
impl RecordStore for MemoryStore {
	fn find<'a>(
		&'a self,
		query: &'a ChunkedQuery,
	) -> BoxFuture<'a, ken_storage::Result<Vec<Record>>> {
		let (call_index, outcome) = self.run(query);
		let stall = self.stall_first_call && call_index == 0;

		Box::pin(async move {
			if stall {
				tokio::time::sleep(std::time::Duration::from_millis(50)).await;
			}

			outcome
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ken_domain::UnitId;

	fn query(statuses: &[&str], units: Option<&[&str]>) -> ChunkedQuery {
		ChunkedQuery {
			collection: "claims".to_string(),
			statuses: statuses.iter().map(|status| status.to_string()).collect(),
			units: units.map(|units| units.iter().map(|unit| UnitId::new(*unit)).collect()),
		}
	}

	#[tokio::test]
	async fn over_wide_queries_are_rejected() {
		let store = MemoryStore::new(4);

		match store.find(&query(&["a", "b"], Some(&["u1", "u2", "u3"]))).await {
			Err(ken_storage::Error::WidthExceeded { requested, width }) => {
				assert_eq!(requested, 6);
				assert_eq!(width, 4);
			},
			other => panic!("expected WidthExceeded, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn empty_unit_filter_matches_nothing() {
		let store = MemoryStore::new(30)
			.with_records([crate::record("claims", "c-1", "pending", "u1", 10)]);
		let found = store.find(&query(&["pending"], Some(&[]))).await.unwrap();

		assert!(found.is_empty());

		let unfiltered = store.find(&query(&["pending"], None)).await.unwrap();

		assert_eq!(unfiltered.len(), 1);
	}
}
