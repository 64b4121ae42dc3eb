use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{Error, KenService, Result, aggregate, aggregate::TierPlan};
use ken_domain::{Actor, OrderPolicy, Record, plan_queries, resolve_scopes};

/// One requested portal section: a collection plus the ordering its screen
/// uses. Ordering is caller policy, never inferred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRequest {
	pub collection: String,
	pub order: OrderPolicy,
}
impl SectionRequest {
	pub fn newest_first(collection: impl Into<String>) -> Self {
		Self { collection: collection.into(), order: OrderPolicy::NewestFirst }
	}

	pub fn status_ranked(collection: impl Into<String>, ranks: Vec<String>) -> Self {
		Self { collection: collection.into(), order: OrderPolicy::StatusRanked { ranks } }
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityResponse {
	pub sections: BTreeMap<String, Vec<Record>>,
}

impl KenService {
	/// Everything the actor may see in the requested sections: resolved,
	/// chunk-planned, read concurrently, deduplicated, ordered.
	pub async fn visible_records(
		&self,
		actor: &Actor,
		sections: &[SectionRequest],
	) -> Result<VisibilityResponse> {
		if sections.is_empty() {
			return Err(Error::InvalidRequest {
				message: "At least one section is required.".to_string(),
			});
		}

		let mut collections = Vec::new();

		for section in sections {
			if section.collection.trim().is_empty() {
				return Err(Error::InvalidRequest {
					message: "Section collection must be non-empty.".to_string(),
				});
			}
			if collections.contains(&section.collection) {
				return Err(Error::InvalidRequest {
					message: format!("Section {} requested twice.", section.collection),
				});
			}

			collections.push(section.collection.clone());
		}

		let specs = resolve_scopes(actor, &self.cfg.tiers, &collections);
		let width = self.cfg.store.membership_width;
		let mut handles = Vec::new();

		for section in sections {
			let mut plans = Vec::new();

			for (tier, spec) in specs.iter().enumerate() {
				if spec.collection != section.collection {
					continue;
				}

				plans.push(TierPlan { tier, queries: plan_queries(spec, width)? });
			}

			let store = Arc::clone(&self.store);
			let collection = section.collection.clone();
			let order = section.order.clone();

			// Sections run concurrently too; each one fans out its own reads.
			handles.push((
				section.collection.clone(),
				tokio::spawn(aggregate::aggregate(store, collection, plans, order)),
			));
		}

		let mut response = VisibilityResponse { sections: BTreeMap::new() };

		for (collection, handle) in handles {
			let records =
				handle.await.map_err(|err| Error::Storage { message: err.to_string() })??;

			response.sections.insert(collection, records);
		}

		Ok(response)
	}

	/// Dashboard counts. Reuses the full pipeline so counts can never drift
	/// from what the inbox lists.
	pub async fn visible_counts(
		&self,
		actor: &Actor,
		collections: &[String],
	) -> Result<BTreeMap<String, usize>> {
		let sections: Vec<SectionRequest> = collections
			.iter()
			.map(|collection| SectionRequest {
				collection: collection.clone(),
				order: self.cfg.order_policy(collection),
			})
			.collect();
		let response = self.visible_records(actor, &sections).await?;

		Ok(response
			.sections
			.into_iter()
			.map(|(collection, records)| (collection, records.len()))
			.collect())
	}
}
