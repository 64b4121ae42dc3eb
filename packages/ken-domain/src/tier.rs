use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Role, UnitId};

/// What a tier declares about unit filtering. `ManagedUnits` substitutes the
/// actor's managed-unit set at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
	AllUnits,
	ManagedUnits,
}

/// One declarative visibility rule: a role subset pulling a status set from
/// one collection under a scope kind. Declared in configuration; declaration
/// order is the dedupe precedence during aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityTier {
	pub collection: String,
	pub roles: Vec<Role>,
	pub statuses: Vec<String>,
	pub scope: ScopeKind,
}
impl CapabilityTier {
	pub fn applies_to(&self, actor: &Actor) -> bool {
		self.roles.iter().any(|role| actor.roles.contains(role))
	}
}

/// Resolved unit filter for one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitScope {
	Unrestricted,
	Units(Vec<UnitId>),
}

/// Resolved query intent for one tier. Lives only for the duration of one
/// resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSpec {
	pub collection: String,
	pub statuses: Vec<String>,
	pub units: UnitScope,
}

/// Resolve the tiers an actor satisfies into scope specs, preserving tier
/// declaration order.
///
/// A `ManagedUnits` tier for an actor with no managed units emits nothing: an
/// empty membership filter must never reach the store, and the scope is never
/// widened to compensate.
pub fn resolve_scopes(
	actor: &Actor,
	tiers: &[CapabilityTier],
	collections: &[String],
) -> Vec<ScopeSpec> {
	let mut specs = Vec::new();

	for tier in tiers {
		if !collections.iter().any(|collection| collection == &tier.collection) {
			continue;
		}
		if !tier.applies_to(actor) {
			continue;
		}

		let units = if actor.has_universal_scope() {
			UnitScope::Unrestricted
		} else {
			match tier.scope {
				ScopeKind::AllUnits => UnitScope::Unrestricted,
				ScopeKind::ManagedUnits => {
					if actor.managed_units.is_empty() {
						tracing::debug!(
							collection = %tier.collection,
							actor = %actor.id,
							"Skipped managed-units tier; actor manages no units.",
						);

						continue;
					}

					UnitScope::Units(actor.managed_units.iter().cloned().collect())
				},
			}
		};

		specs.push(ScopeSpec {
			collection: tier.collection.clone(),
			statuses: tier.statuses.clone(),
			units,
		});
	}

	specs
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tier(collection: &str, roles: &[Role], statuses: &[&str], scope: ScopeKind) -> CapabilityTier {
		CapabilityTier {
			collection: collection.to_string(),
			roles: roles.to_vec(),
			statuses: statuses.iter().map(|status| status.to_string()).collect(),
			scope,
		}
	}

	#[test]
	fn tier_matches_on_role_intersection() {
		let tier = tier(
			"claims",
			&[Role::Finance, Role::HrHead],
			&["pending"],
			ScopeKind::AllUnits,
		);

		assert!(tier.applies_to(&Actor::new("a").with_roles([Role::Finance, Role::It])));
		assert!(!tier.applies_to(&Actor::new("b").with_roles([Role::UnitManager])));
	}

	#[test]
	fn unmatched_collections_are_ignored() {
		let tiers = [tier("claims", &[Role::Finance], &["pending"], ScopeKind::AllUnits)];
		let actor = Actor::new("a").with_roles([Role::Finance]);
		let specs = resolve_scopes(&actor, &tiers, &["leave_requests".to_string()]);

		assert!(specs.is_empty());
	}
}
