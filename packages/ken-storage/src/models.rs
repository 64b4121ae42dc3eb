use serde_json::Value;
use time::OffsetDateTime;

use crate::Result;
use ken_domain::{Actor, Record, Role, UnitId};

#[derive(Debug, sqlx::FromRow)]
pub struct RecordRow {
	pub collection: String,
	pub record_id: String,
	pub status: String,
	pub unit_id: String,
	pub created_at: OffsetDateTime,
	pub payload: Value,
}
impl RecordRow {
	pub fn into_record(self) -> Record {
		Record {
			id: self.record_id,
			collection: self.collection,
			status: self.status,
			unit_id: UnitId::new(self.unit_id),
			created_at: self.created_at,
			payload: self.payload,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct ActorProfileRow {
	pub actor_id: String,
	pub roles: Value,
	pub managed_units: Value,
}
impl ActorProfileRow {
	pub fn into_actor(self) -> Result<Actor> {
		let roles: Vec<Role> = serde_json::from_value(self.roles)?;
		let managed_units: Vec<UnitId> = serde_json::from_value(self.managed_units)?;

		Ok(Actor::new(self.actor_id).with_roles(roles).with_managed_units(managed_units))
	}
}
