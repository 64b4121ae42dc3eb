use std::collections::HashMap;

use serde::Deserialize;

use ken_domain::{CapabilityTier, OrderPolicy};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub store: Store,
	pub tiers: Vec<CapabilityTier>,
	pub ordering: Ordering,
}
impl Config {
	/// Configured default ordering for one collection.
	pub fn order_policy(&self, collection: &str) -> OrderPolicy {
		match self.ordering.status_ranked.get(collection) {
			Some(ranked) => OrderPolicy::StatusRanked { ranks: ranked.ranks.clone() },
			None => OrderPolicy::NewestFirst,
		}
	}

	/// Every collection named by at least one tier, deduplicated, in tier
	/// declaration order.
	pub fn tier_collections(&self) -> Vec<String> {
		let mut collections = Vec::new();

		for tier in &self.tiers {
			if !collections.contains(&tier.collection) {
				collections.push(tier.collection.clone());
			}
		}

		collections
	}
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Store {
	/// Maximum number of values the store accepts across the membership
	/// clauses of one query (W).
	pub membership_width: usize,
}

#[derive(Debug, Deserialize)]
pub struct Ordering {
	/// Ordering applied to collections with no explicit entry. The only
	/// recognized value is "newest_first".
	pub default: String,
	/// Collections that read by status rank, then oldest first.
	#[serde(default)]
	pub status_ranked: HashMap<String, RankedOrdering>,
}

#[derive(Debug, Deserialize)]
pub struct RankedOrdering {
	pub ranks: Vec<String>,
}
