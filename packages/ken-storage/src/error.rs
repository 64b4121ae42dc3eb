#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Membership width {width} exceeded: query asks for {requested} values.")]
	WidthExceeded { requested: usize, width: usize },
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Not found: {0}")]
	NotFound(String),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
}
