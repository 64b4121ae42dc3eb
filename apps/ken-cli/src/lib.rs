use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ken_service::{KenService, PgStore, SectionRequest};
use ken_storage::{db::Db, queries};

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: std::path::PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Validate the config file and print the tier table summary.
	CheckConfig,
	/// Print every record the actor may see, per collection.
	Inbox {
		#[arg(long)]
		actor_id: String,
		/// Collections to read; defaults to every collection with a tier.
		#[arg(long)]
		collection: Vec<String>,
	},
	/// Print per-collection visible-record counts for the dashboard.
	Counts {
		#[arg(long)]
		actor_id: String,
	},
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let cfg = ken_config::load(&args.config)?;
	let filter = EnvFilter::new(cfg.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();
	tracing::debug!(config = %args.config.display(), "Configuration loaded.");

	if let Command::CheckConfig = args.command {
		println!(
			"ok: {} tiers over {} collections, membership width {}",
			cfg.tiers.len(),
			cfg.tier_collections().len(),
			cfg.store.membership_width,
		);

		return Ok(());
	}

	let db = Db::connect(&cfg.storage.postgres).await?;

	db.ensure_schema().await?;

	match args.command {
		Command::CheckConfig => unreachable!(),
		Command::Inbox { actor_id, collection } => {
			let actor = queries::load_actor_profile(&db, &actor_id).await?;
			let collections =
				if collection.is_empty() { cfg.tier_collections() } else { collection };
			let sections: Vec<SectionRequest> = collections
				.iter()
				.map(|collection| SectionRequest {
					collection: collection.clone(),
					order: cfg.order_policy(collection),
				})
				.collect();
			let width = cfg.store.membership_width;
			let service = KenService::new(cfg, Arc::new(PgStore::new(db, width)));
			let response = service.visible_records(&actor, &sections).await?;

			println!("{}", serde_json::to_string_pretty(&response)?);
		},
		Command::Counts { actor_id } => {
			let actor = queries::load_actor_profile(&db, &actor_id).await?;
			let collections = cfg.tier_collections();
			let width = cfg.store.membership_width;
			let service = KenService::new(cfg, Arc::new(PgStore::new(db, width)));
			let counts = service.visible_counts(&actor, &collections).await?;

			println!("{}", serde_json::to_string_pretty(&counts)?);
		},
	}

	Ok(())
}
