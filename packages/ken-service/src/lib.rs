pub mod aggregate;
pub mod visibility;

mod error;

pub use error::{Error, QueryFailure, Result};
pub use visibility::{SectionRequest, VisibilityResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use ken_config::Config;
use ken_domain::{ChunkedQuery, Record};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The record store the aggregator reads from. One implementation wraps
/// Postgres; the testkit ships an in-memory one. Reads are side-effect-free,
/// and the implementation enforces the membership width bound itself.
pub trait RecordStore
where
	Self: Send + Sync,
{
	fn find<'a>(
		&'a self,
		query: &'a ChunkedQuery,
	) -> BoxFuture<'a, ken_storage::Result<Vec<Record>>>;
}

/// Postgres-backed store adapter.
pub struct PgStore {
	db: ken_storage::db::Db,
	width: usize,
}
impl PgStore {
	pub fn new(db: ken_storage::db::Db, width: usize) -> Self {
		Self { db, width }
	}
}
impl RecordStore for PgStore {
	fn find<'a>(
		&'a self,
		query: &'a ChunkedQuery,
	) -> BoxFuture<'a, ken_storage::Result<Vec<Record>>> {
		Box::pin(ken_storage::queries::find_records(&self.db, query, self.width))
	}
}

/// The visibility query facade. Stateless between calls: every request
/// resolves, plans, and reads from scratch, so it is safe to re-invoke after
/// any mutation and to call concurrently for different actors.
pub struct KenService {
	pub cfg: Config,
	pub store: Arc<dyn RecordStore>,
}
impl KenService {
	pub fn new(cfg: Config, store: Arc<dyn RecordStore>) -> Self {
		Self { cfg, store }
	}
}
