pub type Result<T, E = Error> = std::result::Result<T, E>;

/// One failed chunked read, with enough detail for the caller to decide
/// whether to retry the whole request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QueryFailure {
	pub collection: String,
	pub tier: usize,
	pub chunk: usize,
	pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Planning(#[from] ken_domain::PlanError),
	#[error("Aggregation failed for {collection}: {} chunked reads failed.", failed.len())]
	Aggregation { collection: String, failed: Vec<QueryFailure> },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
