//! Work group lifecycle: creation with its initial admin grant, and teardown
//! across every table scoped under a work group.

use std::sync::Arc;

use timetable_common::database::{
	Color, DatabaseTable, InviteKey, PrivilegeType, Station, StationTrack, TimetableRow, Train, Ulid, Work, WorkGroup,
	WorkGroupPrivilege,
};

use crate::access::require_admin;
use crate::config::AppConfig;
use crate::errors::{ApiError, Result};
use crate::global::ApiGlobal;
use crate::store;

/// How many rows each table of a teardown marked as deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownCounts {
	pub works: u64,
	pub trains: u64,
	pub timetable_rows: u64,
	pub stations: u64,
	pub station_tracks: u64,
	pub colors: u64,
	pub invite_keys: u64,
}

/// Creates a work group owned by `creator_user_id` and grants them admin on
/// it, atomically. A work group without an admin would be unreachable, so
/// the two inserts share one transaction.
pub async fn create<G: ApiGlobal>(global: &Arc<G>, name: String, creator_user_id: &str) -> Result<WorkGroup> {
	let access = &global.config::<AppConfig>().access;

	if creator_user_id == access.anonymous_user_id {
		return Err(ApiError::BadRequest("the anonymous user cannot create work groups"));
	}

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err(|err| ApiError::from_query(WorkGroup::FRIENDLY_NAME, err))?;

	let work_group: WorkGroup =
		sqlx::query_as("INSERT INTO work_groups (id, owner_user_id, name) VALUES ($1, $2, $3) RETURNING *")
			.bind(Ulid::new())
			.bind(creator_user_id)
			.bind(name)
			.fetch_one(&mut *tx)
			.await
			.map_err(|err| ApiError::from_query(WorkGroup::FRIENDLY_NAME, err))?;

	sqlx::query("INSERT INTO work_groups_privileges (work_groups_id, uid, privilege_type) VALUES ($1, $2, $3)")
		.bind(work_group.id)
		.bind(creator_user_id)
		.bind(PrivilegeType::Admin)
		.execute(&mut *tx)
		.await
		.map_err(|err| ApiError::from_query(WorkGroupPrivilege::FRIENDLY_NAME, err))?;

	tx.commit()
		.await
		.map_err(|err| ApiError::from_query(WorkGroup::FRIENDLY_NAME, err))?;

	Ok(work_group)
}

/// Soft deletes everything under a work group and then the group itself, one
/// statement per table. Requires admin.
///
/// The sequence is not atomic, and the root row goes last. A teardown cut
/// short leaves the work group resolvable, so rerunning it converges: the
/// cascades skip rows that are already deleted but still reach rows whose
/// ancestors are.
pub async fn delete<G: ApiGlobal>(global: &Arc<G>, work_groups_id: Ulid, user_id: &str) -> Result<TeardownCounts> {
	require_admin::<WorkGroup, G>(global, work_groups_id, user_id).await?;

	let counts = TeardownCounts {
		works: store::delete_by_work_groups_id::<Work, G>(global, work_groups_id).await?,
		trains: store::delete_by_work_groups_id::<Train, G>(global, work_groups_id).await?,
		timetable_rows: store::delete_by_work_groups_id::<TimetableRow, G>(global, work_groups_id).await?,
		stations: store::delete_by_work_groups_id::<Station, G>(global, work_groups_id).await?,
		station_tracks: store::delete_by_work_groups_id::<StationTrack, G>(global, work_groups_id).await?,
		colors: store::delete_by_work_groups_id::<Color, G>(global, work_groups_id).await?,
		invite_keys: store::delete_by_work_groups_id::<InviteKey, G>(global, work_groups_id).await?,
	};

	store::delete_one::<WorkGroup, G>(global, work_groups_id).await?;

	Ok(counts)
}
