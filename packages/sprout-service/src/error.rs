pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Forbidden: {message}")]
	Forbidden { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Invalid input: {message}")]
	InvalidInput { message: String },
	#[error("Scoring oracle unavailable: {message}")]
	OracleUnavailable { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}

impl From<sprout_storage::Error> for Error {
	fn from(err: sprout_storage::Error) -> Self {
		match err {
			sprout_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			sprout_storage::Error::InvalidArgument(message) => Self::InvalidInput { message },
			sprout_storage::Error::NotFound(message) => Self::NotFound { message },
			sprout_storage::Error::Conflict(message) => Self::Conflict { message },
		}
	}
}
