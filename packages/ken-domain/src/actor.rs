use std::{
	collections::{BTreeSet, HashSet},
	fmt,
};

use serde::{Deserialize, Serialize};

/// Closed set of portal roles. An actor holds a set of these, not a single
/// value; `Director` bypasses unit restriction everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	IndividualContributor,
	UnitManager,
	RegionalDirector,
	Finance,
	Purchaser,
	Director,
	HrGeneralist,
	HrHead,
	Admin,
	It,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub String);
impl UnitId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl fmt::Display for UnitId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
impl From<&str> for UnitId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

/// Point-in-time snapshot of who is asking. Roles and managed units come from
/// the actor's profile record; the caller re-fetches before each resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
	pub id: String,
	pub roles: HashSet<Role>,
	pub managed_units: BTreeSet<UnitId>,
}
impl Actor {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into(), roles: HashSet::new(), managed_units: BTreeSet::new() }
	}

	pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
		self.roles.extend(roles);

		self
	}

	pub fn with_managed_units(mut self, units: impl IntoIterator<Item = UnitId>) -> Self {
		self.managed_units.extend(units);

		self
	}

	pub fn has_role(&self, role: Role) -> bool {
		self.roles.contains(&role)
	}

	/// `Director` sees every unit regardless of what any tier declares.
	pub fn has_universal_scope(&self) -> bool {
		self.roles.contains(&Role::Director)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn role_labels_round_trip_as_snake_case() {
		let raw = serde_json::to_string(&Role::HrGeneralist).unwrap();

		assert_eq!(raw, "\"hr_generalist\"");
		assert_eq!(serde_json::from_str::<Role>(&raw).unwrap(), Role::HrGeneralist);
	}

	#[test]
	fn universal_scope_is_director_only() {
		let manager = Actor::new("u-1").with_roles([Role::UnitManager, Role::Finance]);
		let director = Actor::new("u-2").with_roles([Role::Director]);

		assert!(!manager.has_universal_scope());
		assert!(director.has_universal_scope());
	}
}
