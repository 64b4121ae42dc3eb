use sqlx::QueryBuilder;

use crate::{
	Error, Result,
	db::Db,
	models::{ActorProfileRow, RecordRow},
};
use ken_domain::{Actor, ChunkedQuery, Record};

/// Execute one planned query. The store enforces the membership width bound
/// on its own, independently of the planner, so a planning regression can
/// never over-ask Postgres. An empty unit list matches nothing.
pub async fn find_records(db: &Db, query: &ChunkedQuery, width: usize) -> Result<Vec<Record>> {
	let requested = query.membership_width();

	if requested > width {
		return Err(Error::WidthExceeded { requested, width });
	}
	if query.statuses.is_empty() {
		return Err(Error::InvalidArgument("Query statuses must be non-empty.".to_string()));
	}
	if query.units.as_ref().is_some_and(|units| units.is_empty()) {
		return Ok(Vec::new());
	}

	let mut builder = QueryBuilder::new(
		"SELECT collection, record_id, status, unit_id, created_at, payload \
		 FROM records WHERE collection = ",
	);

	builder.push_bind(&query.collection);
	builder.push(" AND status = ANY(");
	builder.push_bind(&query.statuses);
	builder.push(")");

	if let Some(units) = &query.units {
		let units: Vec<String> = units.iter().map(|unit| unit.as_str().to_string()).collect();

		builder.push(" AND unit_id = ANY(");
		builder.push_bind(units);
		builder.push(")");
	}

	let rows: Vec<RecordRow> = builder.build_query_as().fetch_all(&db.pool).await?;

	tracing::debug!(
		collection = %query.collection,
		width = requested,
		rows = rows.len(),
		"Executed chunked read.",
	);

	Ok(rows.into_iter().map(RecordRow::into_record).collect())
}

/// Point-in-time snapshot of an actor's roles and managed units. Callers
/// fetch this before every visibility request; nothing is cached here.
pub async fn load_actor_profile(db: &Db, actor_id: &str) -> Result<Actor> {
	let row: Option<ActorProfileRow> = sqlx::query_as(
		"SELECT actor_id, roles, managed_units FROM actor_profiles WHERE actor_id = $1",
	)
	.bind(actor_id)
	.fetch_optional(&db.pool)
	.await?;

	match row {
		Some(row) => row.into_actor(),
		None => Err(Error::NotFound(format!("Actor profile {actor_id} does not exist."))),
	}
}

pub async fn upsert_actor_profile(db: &Db, actor: &Actor) -> Result<()> {
	let roles = serde_json::to_value(actor.roles.iter().collect::<Vec<_>>())?;
	let managed_units = serde_json::to_value(actor.managed_units.iter().collect::<Vec<_>>())?;

	sqlx::query(
		"\
INSERT INTO actor_profiles (actor_id, roles, managed_units, updated_at)
VALUES ($1, $2, $3, now())
ON CONFLICT (actor_id)
DO UPDATE
SET roles = EXCLUDED.roles,
	managed_units = EXCLUDED.managed_units,
	updated_at = EXCLUDED.updated_at",
	)
	.bind(&actor.id)
	.bind(roles)
	.bind(managed_units)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn upsert_record(db: &Db, record: &Record) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO records (collection, record_id, status, unit_id, created_at, payload)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (collection, record_id)
DO UPDATE
SET status = EXCLUDED.status,
	unit_id = EXCLUDED.unit_id,
	created_at = EXCLUDED.created_at,
	payload = EXCLUDED.payload",
	)
	.bind(&record.collection)
	.bind(&record.id)
	.bind(&record.status)
	.bind(record.unit_id.as_str())
	.bind(record.created_at)
	.bind(&record.payload)
	.execute(&db.pool)
	.await?;

	Ok(())
}
