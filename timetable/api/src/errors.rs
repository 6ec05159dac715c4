use std::sync::Arc;

use timetable_common::database::PrivilegeType;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// The error arm of every public return type. Callers branch on `kind()`
/// only; no other error type crosses a component boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
	/// The resource is absent, soft deleted, or the caller may not read it.
	/// Which of the three it was is deliberately not revealed.
	#[error("{0} not found")]
	NotFound(&'static str),
	/// The input was logically invalid.
	#[error("{0}")]
	BadRequest(&'static str),
	/// The caller can read the resource but lacks the required level.
	#[error("{required} privilege required")]
	Forbidden {
		/// The level the operation needs
		required: PrivilegeType,
	},
	/// A unique constraint rejected an insert.
	#[error("{0} already exists")]
	Conflict(&'static str),
	/// The database failed. The original error is kept so operators can read
	/// the backend error code; callers only see the kind.
	#[error("database error: {0}")]
	Database(Arc<sqlx::Error>),
	/// Something that should not happen happened.
	#[error("internal error: {0}")]
	Internal(&'static str),
}

impl ApiError {
	/// Maps a failed query on `friendly_name` rows. Unique violations become
	/// conflicts, anything else is logged here and reported opaquely.
	pub fn from_query(friendly_name: &'static str, err: sqlx::Error) -> Self {
		if let sqlx::Error::Database(db_err) = &err {
			if db_err.is_unique_violation() {
				return Self::Conflict(friendly_name);
			}
		}

		tracing::error!(err = %err, "failed to query {}", friendly_name);

		Self::Database(Arc::new(err))
	}

	pub fn kind(&self) -> &'static str {
		match self {
			ApiError::NotFound(_) => "NotFound",
			ApiError::BadRequest(_) => "BadRequest",
			ApiError::Forbidden { .. } => "Forbidden",
			ApiError::Conflict(_) => "Conflict",
			ApiError::Database(_) | ApiError::Internal(_) => "InternalError",
		}
	}

	/// The HTTP status the excluded request layer should answer with.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::NotFound(_) => 404,
			ApiError::BadRequest(_) => 400,
			ApiError::Forbidden { .. } => 403,
			ApiError::Conflict(_) => 409,
			ApiError::Database(_) | ApiError::Internal(_) => 500,
		}
	}

	/// The backend error code, when the database reported one.
	pub fn error_code(&self) -> Option<String> {
		match self {
			ApiError::Database(err) => err
				.as_database_error()
				.and_then(|db_err| db_err.code())
				.map(|code| code.to_string()),
			_ => None,
		}
	}

	pub fn message(&self) -> String {
		match self {
			// Do not leak backend details to callers.
			ApiError::Database(_) | ApiError::Internal(_) => "internal server error".to_string(),
			_ => self.to_string(),
		}
	}
}
