//! The generic store: every entity table goes through these functions, with
//! the table described by [`DatabaseTable`] rather than hand written per
//! entity queries.

use std::sync::Arc;

use chrono::Utc;
use timetable_common::database::{DatabaseTable, PrivilegeType, TablePatch, Ulid};

use crate::config::AppConfig;
use crate::errors::{ApiError, Result};
use crate::global::ApiGlobal;

pub mod queries;

/// Loads one live row by id.
pub async fn select_one<T: DatabaseTable, G: ApiGlobal>(global: &Arc<G>, id: Ulid) -> Result<T> {
	queries::select_one::<T>(id, false)
		.build_query_as()
		.fetch_optional(global.db().as_ref())
		.await
		.map_err(|err| ApiError::from_query(T::FRIENDLY_NAME, err))?
		.ok_or(ApiError::NotFound(T::FRIENDLY_NAME))
}

/// Loads one page of the live rows under `parent_id`, newest first.
pub async fn select_page<T: DatabaseTable, G: ApiGlobal>(
	global: &Arc<G>,
	parent_id: &T::ParentId,
	page: i64,
	per_page: i64,
	top_id: Option<Ulid>,
) -> Result<Vec<T>> {
	queries::select_page::<T>(parent_id, page, per_page, top_id)
		.build_query_as()
		.fetch_all(global.db().as_ref())
		.await
		.map_err(|err| ApiError::from_query(T::FRIENDLY_NAME, err))
}

/// Inserts a batch of rows under one parent and returns them in insertion
/// order. `ids` carries one caller generated id per insert payload; an empty
/// batch succeeds without touching the database.
pub async fn insert_many<T: DatabaseTable, G: ApiGlobal>(
	global: &Arc<G>,
	parent_id: &T::ParentId,
	owner_user_id: &str,
	ids: &[Ulid],
	inserts: &[T::Insert],
) -> Result<Vec<T>> {
	if ids.len() != inserts.len() {
		return Err(ApiError::BadRequest("id list and row list lengths differ"));
	}

	if ids.is_empty() {
		return Ok(Vec::new());
	}

	queries::insert_many::<T>(parent_id, owner_user_id, ids, inserts)
		.build_query_as()
		.fetch_all(global.db().as_ref())
		.await
		.map_err(|err| ApiError::from_query(T::FRIENDLY_NAME, err))
}

/// Applies a partial update to one live row and returns the updated row. An
/// empty patch reads the row back instead of issuing an update, so it still
/// reports a missing row as not found.
pub async fn update<T: DatabaseTable, G: ApiGlobal>(global: &Arc<G>, id: Ulid, patch: &T::Patch) -> Result<T> {
	if patch.is_empty() {
		return select_one::<T, G>(global, id).await;
	}

	queries::update::<T>(id, patch)
		.build_query_as()
		.fetch_optional(global.db().as_ref())
		.await
		.map_err(|err| ApiError::from_query(T::FRIENDLY_NAME, err))?
		.ok_or(ApiError::NotFound(T::FRIENDLY_NAME))
}

/// Soft deletes one live row. Deleting an already deleted row reports not
/// found, the same as a row that never existed.
pub async fn delete_one<T: DatabaseTable, G: ApiGlobal>(global: &Arc<G>, id: Ulid) -> Result<()> {
	let result = queries::delete_one::<T>(id, Utc::now())
		.build()
		.execute(global.db().as_ref())
		.await
		.map_err(|err| ApiError::from_query(T::FRIENDLY_NAME, err))?;

	if result.rows_affected() == 0 {
		return Err(ApiError::NotFound(T::FRIENDLY_NAME));
	}

	Ok(())
}

/// Soft deletes every live row of this table under one work group and
/// returns how many rows were marked. Zero is not an error; teardown of an
/// empty work group is a no-op here.
pub async fn delete_by_work_groups_id<T: DatabaseTable, G: ApiGlobal>(global: &Arc<G>, work_groups_id: Ulid) -> Result<u64> {
	let result = queries::delete_by_work_groups_id::<T>(work_groups_id, Utc::now())
		.build()
		.execute(global.db().as_ref())
		.await
		.map_err(|err| ApiError::from_query(T::FRIENDLY_NAME, err))?;

	Ok(result.rows_affected())
}

/// The effective privilege `user_id` holds on the work group owning
/// `resource_id`, resolved through this table's ancestor chain.
pub async fn select_privilege_type<T: DatabaseTable, G: ApiGlobal>(
	global: &Arc<G>,
	resource_id: Ulid,
	user_id: &str,
	include_anonymous: bool,
) -> Result<PrivilegeType> {
	let mut conn = global
		.db()
		.acquire()
		.await
		.map_err(|err| ApiError::from_query(T::FRIENDLY_NAME, err))?;

	let access = &global.config::<AppConfig>().access;

	crate::access::resolve_privilege::<T>(&mut conn, access, resource_id, user_id, include_anonymous, false).await
}
