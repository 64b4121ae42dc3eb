use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::actor::UnitId;

/// Record identity across collections. Two tiers reporting the same key
/// collapse to one entry during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
	pub collection: String,
	pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
	pub id: String,
	pub collection: String,
	pub status: String,
	pub unit_id: UnitId,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	pub payload: Value,
}
impl Record {
	pub fn key(&self) -> RecordKey {
		RecordKey { collection: self.collection.clone(), id: self.id.clone() }
	}
}
