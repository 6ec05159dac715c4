//! The invite key ledger: issuing, redeeming and disabling keys.

use std::sync::Arc;

use chrono::Utc;
use timetable_common::database::{
	DatabaseTable, InviteKey, InviteKeyInsert, InviteKeyState, PrivilegeType, Ulid, WorkGroup, WorkGroupPrivilege,
};

use super::{check_privilege, require_admin, resolve_privilege};
use crate::config::AppConfig;
use crate::errors::{ApiError, Result};
use crate::global::ApiGlobal;
use crate::store::{self, queries};

/// What a successful redemption did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
	/// A grant was inserted or upgraded to this level.
	Granted(PrivilegeType),

	/// The caller already held this level or better. Nothing changed and no
	/// use of the key was consumed.
	AlreadySufficient(PrivilegeType),
}

impl RedeemOutcome {
	/// The level the caller holds after the redemption.
	pub fn level(self) -> PrivilegeType {
		match self {
			Self::Granted(level) => level,
			Self::AlreadySufficient(level) => level,
		}
	}
}

/// Issues a new invite key on a work group. The issuer must hold admin on
/// the work group, and the key must grant at least read.
pub async fn issue<G: ApiGlobal>(
	global: &Arc<G>,
	work_groups_id: Ulid,
	owner_user_id: &str,
	insert: InviteKeyInsert,
) -> Result<InviteKey> {
	if insert.privilege_type == PrivilegeType::None {
		return Err(ApiError::BadRequest("an invite key must grant at least read"));
	}

	require_admin::<WorkGroup, G>(global, work_groups_id, owner_user_id).await?;

	let ids = [Ulid::new()];
	let inserts = [insert];

	let keys = store::insert_many::<InviteKey, G>(global, &work_groups_id, owner_user_id, &ids, &inserts).await?;

	keys.into_iter()
		.next()
		.ok_or(ApiError::Internal("invite key insert returned no rows"))
}

/// Redeems an invite key for `user_id`, inserting or upgrading their grant
/// on the key's work group to the key's level. Runs in one transaction with
/// the key row and the grant row locked, so two concurrent redemptions of
/// the last use of a limited key cannot both pass the limit check.
///
/// Holding the key's level or better already is a no-op success and does not
/// consume a use. Grants are never downgraded.
pub async fn redeem<G: ApiGlobal>(global: &Arc<G>, invite_key_id: Ulid, user_id: &str) -> Result<RedeemOutcome> {
	let access = &global.config::<AppConfig>().access;

	if user_id == access.anonymous_user_id {
		return Err(ApiError::BadRequest("the anonymous user cannot redeem invite keys"));
	}

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err(|err| ApiError::from_query(InviteKey::FRIENDLY_NAME, err))?;

	let key: InviteKey = queries::select_one::<InviteKey>(invite_key_id, true)
		.build_query_as()
		.fetch_optional(&mut *tx)
		.await
		.map_err(|err| ApiError::from_query(InviteKey::FRIENDLY_NAME, err))?
		.ok_or(ApiError::NotFound(InviteKey::FRIENDLY_NAME))?;

	if let Some(message) = state_rejection(key.state(Utc::now())) {
		return Err(ApiError::BadRequest(message));
	}

	let current: Option<WorkGroupPrivilege> =
		sqlx::query_as("SELECT * FROM work_groups_privileges WHERE work_groups_id = $1 AND uid = $2 FOR UPDATE")
			.bind(key.work_groups_id)
			.bind(user_id)
			.fetch_optional(&mut *tx)
			.await
			.map_err(|err| ApiError::from_query(WorkGroupPrivilege::FRIENDLY_NAME, err))?;

	if let Some(current) = &current {
		// Holding the level already beats the use limit check: a repeated
		// redemption stays a no-op even once the key is used up.
		if current.privilege_type >= key.privilege_type {
			return Ok(RedeemOutcome::AlreadySufficient(current.privilege_type));
		}
	}

	if let Some(use_limit) = key.use_limit {
		let uses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM work_groups_privileges WHERE invite_keys_id = $1")
			.bind(invite_key_id)
			.fetch_one(&mut *tx)
			.await
			.map_err(|err| ApiError::from_query(WorkGroupPrivilege::FRIENDLY_NAME, err))?;

		if uses >= i64::from(use_limit) {
			return Err(ApiError::BadRequest("invite key usage limit reached"));
		}
	}

	if current.is_some() {
		sqlx::query(
			"UPDATE work_groups_privileges SET privilege_type = $1, invite_keys_id = $2 WHERE work_groups_id = $3 AND uid = $4",
		)
		.bind(key.privilege_type)
		.bind(key.id)
		.bind(key.work_groups_id)
		.bind(user_id)
		.execute(&mut *tx)
		.await
		.map_err(|err| ApiError::from_query(WorkGroupPrivilege::FRIENDLY_NAME, err))?;
	} else {
		sqlx::query(
			"INSERT INTO work_groups_privileges (work_groups_id, uid, privilege_type, invite_keys_id) VALUES ($1, $2, $3, $4)",
		)
		.bind(key.work_groups_id)
		.bind(user_id)
		.bind(key.privilege_type)
		.bind(key.id)
		.execute(&mut *tx)
		.await
		.map_err(|err| ApiError::from_query(WorkGroupPrivilege::FRIENDLY_NAME, err))?;
	}

	tx.commit()
		.await
		.map_err(|err| ApiError::from_query(InviteKey::FRIENDLY_NAME, err))?;

	Ok(RedeemOutcome::Granted(key.privilege_type))
}

/// Disables an invite key so it can no longer be redeemed. Requires admin on
/// the owning work group; the admin check and the write run in one
/// transaction with the work group row locked, so a concurrent revocation
/// cannot land between them.
pub async fn disable<G: ApiGlobal>(global: &Arc<G>, invite_key_id: Ulid, user_id: &str) -> Result<InviteKey> {
	let access = &global.config::<AppConfig>().access;

	let mut tx = global
		.db()
		.begin()
		.await
		.map_err(|err| ApiError::from_query(InviteKey::FRIENDLY_NAME, err))?;

	let key: InviteKey = queries::select_one::<InviteKey>(invite_key_id, true)
		.build_query_as()
		.fetch_optional(&mut *tx)
		.await
		.map_err(|err| ApiError::from_query(InviteKey::FRIENDLY_NAME, err))?
		.ok_or(ApiError::NotFound(InviteKey::FRIENDLY_NAME))?;

	let level = resolve_privilege::<InviteKey>(&mut tx, access, invite_key_id, user_id, true, true).await?;

	check_privilege::<InviteKey>(level, PrivilegeType::Admin)?;

	if let Some(message) = state_rejection(key.state(Utc::now())) {
		return Err(ApiError::BadRequest(message));
	}

	let key: InviteKey = sqlx::query_as("UPDATE invite_keys SET disabled_at = $1 WHERE id = $2 RETURNING *")
		.bind(Utc::now())
		.bind(invite_key_id)
		.fetch_one(&mut *tx)
		.await
		.map_err(|err| ApiError::from_query(InviteKey::FRIENDLY_NAME, err))?;

	tx.commit()
		.await
		.map_err(|err| ApiError::from_query(InviteKey::FRIENDLY_NAME, err))?;

	Ok(key)
}

/// Loads one invite key. Requires admin on the owning work group, resolved
/// through the key itself so callers without read access see not found.
pub async fn get<G: ApiGlobal>(global: &Arc<G>, invite_key_id: Ulid, user_id: &str) -> Result<InviteKey> {
	require_admin::<InviteKey, G>(global, invite_key_id, user_id).await?;

	store::select_one::<InviteKey, G>(global, invite_key_id).await
}

/// Loads one page of a work group's invite keys, newest first. Requires
/// admin on the work group.
pub async fn list<G: ApiGlobal>(
	global: &Arc<G>,
	work_groups_id: Ulid,
	user_id: &str,
	page: i64,
	per_page: i64,
	top_id: Option<Ulid>,
) -> Result<Vec<InviteKey>> {
	require_admin::<WorkGroup, G>(global, work_groups_id, user_id).await?;

	store::select_page::<InviteKey, G>(global, &work_groups_id, page, per_page, top_id).await
}

/// The rejection for acting on a key in `state`. Redeem and disable share
/// it, both only proceed on an active key.
fn state_rejection(state: InviteKeyState) -> Option<&'static str> {
	match state {
		InviteKeyState::Disabled => Some("invite key is already disabled"),
		InviteKeyState::Pending => Some("invite key is not yet valid"),
		InviteKeyState::Expired => Some("invite key is already expired"),
		InviteKeyState::Active => None,
	}
}
