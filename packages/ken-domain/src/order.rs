use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Per-collection result ordering, supplied by the caller on every request.
///
/// Most collections read newest-first. The purchase-request processing queue
/// reads by status rank, then oldest-first, so processors drain the queue in
/// workflow order. Both orderings come from the portal screens and are kept
/// as caller policy rather than unified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OrderPolicy {
	NewestFirst,
	StatusRanked { ranks: Vec<String> },
}
impl OrderPolicy {
	pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
		match self {
			Self::NewestFirst => b.created_at.cmp(&a.created_at),
			Self::StatusRanked { ranks } => status_rank(ranks, &a.status)
				.cmp(&status_rank(ranks, &b.status))
				.then_with(|| a.created_at.cmp(&b.created_at)),
		}
	}

	pub fn sort(&self, records: &mut [Record]) {
		// Stable sort: ties keep tier precedence order from the merge.
		records.sort_by(|a, b| self.compare(a, b));
	}
}

/// Unlisted statuses rank after every listed one.
fn status_rank(ranks: &[String], status: &str) -> usize {
	ranks.iter().position(|rank| rank == status).unwrap_or(ranks.len())
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use time::OffsetDateTime;

	use super::*;
	use crate::actor::UnitId;

	fn record(id: &str, status: &str, created_at: i64) -> Record {
		Record {
			id: id.to_string(),
			collection: "purchase_requests".to_string(),
			status: status.to_string(),
			unit_id: UnitId::new("u-1"),
			created_at: OffsetDateTime::from_unix_timestamp(created_at).unwrap(),
			payload: json!({}),
		}
	}

	#[test]
	fn status_ranked_orders_by_rank_then_oldest() {
		let policy = OrderPolicy::StatusRanked {
			ranks: vec!["approved".to_string(), "processing".to_string()],
		};
		let mut records = vec![record("a", "processing", 10), record("b", "approved", 5)];

		policy.sort(&mut records);

		assert_eq!(records[0].id, "b");
		assert_eq!(records[1].id, "a");
	}

	#[test]
	fn unlisted_status_ranks_last() {
		let policy = OrderPolicy::StatusRanked { ranks: vec!["approved".to_string()] };
		let mut records = vec![record("a", "rejected", 1), record("b", "approved", 9)];

		policy.sort(&mut records);

		assert_eq!(records[0].id, "b");
	}

	#[test]
	fn newest_first_orders_by_created_at_descending() {
		let policy = OrderPolicy::NewestFirst;
		let mut records = vec![record("a", "processing", 10), record("b", "approved", 5)];

		policy.sort(&mut records);

		assert_eq!(records[0].id, "a");
		assert_eq!(records[1].id, "b");
	}
}
