//! Privilege resolution and the gates in front of every operation.
//!
//! A caller's effective privilege on a resource is the strongest grant its
//! owning work group holds for either the caller or the anonymous sentinel.
//! Callers without read access are told the resource does not exist, so the
//! gates collapse missing access into not found before they ever report
//! forbidden.

use std::sync::Arc;

use timetable_common::config::AccessConfig;
use timetable_common::database::{DatabaseTable, PrivilegeType, Ulid, WorkGroupPrivilege};

use crate::config::AppConfig;
use crate::errors::{ApiError, Result};
use crate::global::ApiGlobal;
use crate::store::queries;

pub mod invite;

/// Resolves the privilege `user_id` holds on `resource_id` by walking the
/// resource's ancestor chain to its work group and taking the strongest
/// matching grant. A broken chain, deleted or absent at any hop, is reported
/// as the resource not being found; a live chain with no grants resolves to
/// [`PrivilegeType::None`].
///
/// Runs on a caller supplied connection so that gates inside a transaction
/// can lock the work group row (`for_update`) against concurrent grant
/// writes.
pub async fn resolve_privilege<T: DatabaseTable>(
	conn: &mut sqlx::PgConnection,
	access: &AccessConfig,
	resource_id: Ulid,
	user_id: &str,
	include_anonymous: bool,
	for_update: bool,
) -> Result<PrivilegeType> {
	let work_groups_id: Ulid = queries::resolve_work_groups_id::<T>(resource_id, for_update)
		.build_query_scalar()
		.fetch_optional(&mut *conn)
		.await
		.map_err(|err| ApiError::from_query(T::FRIENDLY_NAME, err))?
		.ok_or(ApiError::NotFound(T::FRIENDLY_NAME))?;

	let mut uids = vec![user_id.to_string()];

	if include_anonymous && user_id != access.anonymous_user_id {
		uids.push(access.anonymous_user_id.clone());
	}

	let levels: Vec<PrivilegeType> = queries::select_privileges(work_groups_id, uids, for_update)
		.build_query_scalar()
		.fetch_all(&mut *conn)
		.await
		.map_err(|err| ApiError::from_query(WorkGroupPrivilege::FRIENDLY_NAME, err))?;

	Ok(levels.into_iter().max().unwrap_or(PrivilegeType::None))
}

/// Turns a resolved level into the gate outcome: below read is not found,
/// below `required` is forbidden. The order matters, a caller who cannot
/// read must not learn that the resource exists.
pub fn check_privilege<T: DatabaseTable>(level: PrivilegeType, required: PrivilegeType) -> Result<PrivilegeType> {
	if !level.can_read() {
		return Err(ApiError::NotFound(T::FRIENDLY_NAME));
	}

	if level < required {
		return Err(ApiError::Forbidden { required });
	}

	Ok(level)
}

/// Resolves and checks in one step, on a fresh connection without locks.
pub async fn require_privilege<T: DatabaseTable, G: ApiGlobal>(
	global: &Arc<G>,
	resource_id: Ulid,
	user_id: &str,
	required: PrivilegeType,
) -> Result<PrivilegeType> {
	let mut conn = global
		.db()
		.acquire()
		.await
		.map_err(|err| ApiError::from_query(T::FRIENDLY_NAME, err))?;

	let access = &global.config::<AppConfig>().access;

	let level = resolve_privilege::<T>(&mut conn, access, resource_id, user_id, true, false).await?;

	check_privilege::<T>(level, required)
}

pub async fn require_read<T: DatabaseTable, G: ApiGlobal>(
	global: &Arc<G>,
	resource_id: Ulid,
	user_id: &str,
) -> Result<PrivilegeType> {
	require_privilege::<T, G>(global, resource_id, user_id, PrivilegeType::Read).await
}

pub async fn require_write<T: DatabaseTable, G: ApiGlobal>(
	global: &Arc<G>,
	resource_id: Ulid,
	user_id: &str,
) -> Result<PrivilegeType> {
	require_privilege::<T, G>(global, resource_id, user_id, PrivilegeType::Write).await
}

pub async fn require_admin<T: DatabaseTable, G: ApiGlobal>(
	global: &Arc<G>,
	resource_id: Ulid,
	user_id: &str,
) -> Result<PrivilegeType> {
	require_privilege::<T, G>(global, resource_id, user_id, PrivilegeType::Admin).await
}
