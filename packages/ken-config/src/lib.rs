mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Ordering, Postgres, RankedOrdering, Service, Storage, Store};

use std::{collections::HashSet, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.store.membership_width == 0 {
		return Err(Error::Validation {
			message: "store.membership_width must be greater than zero.".to_string(),
		});
	}
	if cfg.tiers.is_empty() {
		return Err(Error::Validation { message: "tiers must be non-empty.".to_string() });
	}

	for (index, tier) in cfg.tiers.iter().enumerate() {
		if tier.collection.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("tiers[{index}].collection must be non-empty."),
			});
		}
		if tier.roles.is_empty() {
			return Err(Error::Validation {
				message: format!("tiers[{index}].roles must be non-empty."),
			});
		}
		if tier.statuses.is_empty() {
			return Err(Error::Validation {
				message: format!("tiers[{index}].statuses must be non-empty."),
			});
		}

		let mut seen = HashSet::new();

		for status in &tier.statuses {
			if status.trim().is_empty() {
				return Err(Error::Validation {
					message: format!("tiers[{index}].statuses must not contain empty values."),
				});
			}
			if !seen.insert(status.as_str()) {
				return Err(Error::Validation {
					message: format!("tiers[{index}].statuses contains duplicate {status:?}."),
				});
			}
		}
	}

	// Width vs. status-count interaction is deliberately left to the planner,
	// which reports the offending tier as PlanError::TooManyStatuses.
	if cfg.ordering.default != "newest_first" {
		return Err(Error::Validation {
			message: "ordering.default must be \"newest_first\".".to_string(),
		});
	}

	for (collection, ranked) in &cfg.ordering.status_ranked {
		if ranked.ranks.is_empty() {
			return Err(Error::Validation {
				message: format!("ordering.status_ranked.{collection}.ranks must be non-empty."),
			});
		}
	}

	Ok(())
}
