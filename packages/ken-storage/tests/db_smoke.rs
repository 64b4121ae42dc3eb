use serde_json::json;
use time::OffsetDateTime;

use ken_config::Postgres;
use ken_domain::{Actor, ChunkedQuery, Record, Role, UnitId};
use ken_storage::{Error, db::Db, queries};
use ken_testkit::TestDatabase;

fn record(id: &str, status: &str, unit: &str, created_at: i64) -> Record {
	Record {
		id: id.to_string(),
		collection: "leave_requests".to_string(),
		status: status.to_string(),
		unit_id: UnitId::new(unit),
		created_at: OffsetDateTime::from_unix_timestamp(created_at).unwrap(),
		payload: json!({ "requested_days": 2 }),
	}
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KEN_PG_DSN to run."]
async fn schema_bootstraps_and_queries_filter_by_status_and_unit() {
	let Some(base_dsn) = ken_testkit::env_dsn() else {
		eprintln!("Skipping; set KEN_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 2 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");
	// Bootstrapping twice must be harmless.
	db.ensure_schema().await.expect("Failed to re-ensure schema.");

	for rec in [
		record("r-1", "pending", "north", 100),
		record("r-2", "pending", "south", 200),
		record("r-3", "approved", "north", 300),
	] {
		queries::upsert_record(&db, &rec).await.expect("Failed to upsert record.");
	}

	let query = ChunkedQuery {
		collection: "leave_requests".to_string(),
		statuses: vec!["pending".to_string()],
		units: Some(vec![UnitId::new("north")]),
	};
	let found = queries::find_records(&db, &query, 30).await.expect("Failed to find records.");

	assert_eq!(found.len(), 1);
	assert_eq!(found[0].id, "r-1");

	let unfiltered = ChunkedQuery {
		collection: "leave_requests".to_string(),
		statuses: vec!["pending".to_string(), "approved".to_string()],
		units: None,
	};
	let found =
		queries::find_records(&db, &unfiltered, 30).await.expect("Failed to find records.");

	assert_eq!(found.len(), 3);

	test_db.cleanup().await.expect("Failed to clean up test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KEN_PG_DSN to run."]
async fn over_wide_queries_are_rejected_by_the_adapter() {
	let Some(base_dsn) = ken_testkit::env_dsn() else {
		eprintln!("Skipping; set KEN_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let query = ChunkedQuery {
		collection: "leave_requests".to_string(),
		statuses: vec!["pending".to_string(), "approved".to_string()],
		units: Some((0..16).map(|n| UnitId::new(format!("u-{n}"))).collect()),
	};

	match queries::find_records(&db, &query, 30).await {
		Err(Error::WidthExceeded { requested, width }) => {
			assert_eq!(requested, 32);
			assert_eq!(width, 30);
		},
		other => panic!("expected WidthExceeded, got {other:?}"),
	}

	test_db.cleanup().await.expect("Failed to clean up test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KEN_PG_DSN to run."]
async fn actor_profiles_round_trip() {
	let Some(base_dsn) = ken_testkit::env_dsn() else {
		eprintln!("Skipping; set KEN_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let actor = Actor::new("mgr-7")
		.with_roles([Role::UnitManager, Role::Purchaser])
		.with_managed_units([UnitId::new("north"), UnitId::new("east")]);

	queries::upsert_actor_profile(&db, &actor).await.expect("Failed to upsert profile.");

	let loaded =
		queries::load_actor_profile(&db, "mgr-7").await.expect("Failed to load profile.");

	assert_eq!(loaded.roles, actor.roles);
	assert_eq!(loaded.managed_units, actor.managed_units);

	match queries::load_actor_profile(&db, "missing").await {
		Err(Error::NotFound(_)) => {},
		other => panic!("expected NotFound, got {other:?}"),
	}

	test_db.cleanup().await.expect("Failed to clean up test database.");
}
