use std::sync::Arc;

use timetable_common::database::PrivilegeType;

use crate::errors::ApiError;

#[test]
fn test_error_kinds_and_status_codes() {
	let cases = [
		(ApiError::NotFound("work"), "NotFound", 404),
		(ApiError::BadRequest("invite key is already disabled"), "BadRequest", 400),
		(
			ApiError::Forbidden {
				required: PrivilegeType::Admin,
			},
			"Forbidden",
			403,
		),
		(ApiError::Conflict("work group privilege"), "Conflict", 409),
		(ApiError::Internal("insert returned no rows"), "InternalError", 500),
		(ApiError::Database(Arc::new(sqlx::Error::PoolClosed)), "InternalError", 500),
	];

	for (error, kind, status_code) in cases {
		assert_eq!(error.kind(), kind);
		assert_eq!(error.status_code(), status_code);
	}
}

#[test]
fn test_error_messages() {
	assert_eq!(ApiError::NotFound("timetable row").message(), "timetable row not found");

	assert_eq!(
		ApiError::Forbidden {
			required: PrivilegeType::Write,
		}
		.message(),
		"write privilege required"
	);

	assert_eq!(ApiError::Conflict("color").message(), "color already exists");

	// Backend details never reach the caller.
	assert_eq!(ApiError::Database(Arc::new(sqlx::Error::PoolClosed)).message(), "internal server error");
	assert_eq!(ApiError::Internal("whatever went wrong").message(), "internal server error");
}

#[test]
fn test_error_code_only_set_for_database_errors() {
	assert_eq!(ApiError::NotFound("work").error_code(), None);
	assert_eq!(ApiError::Database(Arc::new(sqlx::Error::PoolClosed)).error_code(), None);
}
