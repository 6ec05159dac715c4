//! Query builders for the generic store. These are pure functions from a
//! table descriptor and parameters to SQL, so every statement can be
//! inspected in tests without a database.

use chrono::{DateTime, Utc};
use timetable_common::database::{DatabaseTable, TablePatch, Ulid, WorkGroupPrivilege};

/// `SELECT * FROM {table} WHERE id = $1 AND deleted_at IS NULL`
pub fn select_one<T: DatabaseTable>(id: Ulid, for_update: bool) -> sqlx::QueryBuilder<'static, sqlx::Postgres> {
	let mut qb = sqlx::query_builder::QueryBuilder::default();

	qb.push("SELECT * FROM ").push(T::NAME).push(" WHERE ");

	let mut seperated = qb.separated(" AND ");

	seperated.push("id = ").push_bind_unseparated(id);
	seperated.push("deleted_at IS NULL");

	if for_update {
		qb.push(" FOR UPDATE");
	}

	qb
}

/// One page of the live rows under `parent_id`, newest first. `page` starts
/// at 1. A `top_id` anchor keeps rows from shifting between pages while a
/// caller walks them, since rows inserted later always sort above it.
pub fn select_page<T: DatabaseTable>(
	parent_id: &T::ParentId,
	page: i64,
	per_page: i64,
	top_id: Option<Ulid>,
) -> sqlx::QueryBuilder<'static, sqlx::Postgres> {
	let mut qb = sqlx::query_builder::QueryBuilder::default();

	qb.push("SELECT * FROM ").push(T::NAME).push(" WHERE ");

	let mut seperated = qb.separated(" AND ");

	seperated.push(T::PARENT_COLUMN).push_unseparated(" = ").push_bind_unseparated(parent_id.clone());
	seperated.push("deleted_at IS NULL");

	if let Some(top_id) = top_id {
		seperated.push("id <= ").push_bind_unseparated(top_id);
	}

	qb.push(" ORDER BY id DESC OFFSET ").push_bind((page - 1) * per_page);
	qb.push(" LIMIT ").push_bind(per_page);

	qb
}

/// All live rows under any of `parent_ids`, oldest first so assembly
/// preserves creation order.
pub fn select_by_parent_ids<T: DatabaseTable>(parent_ids: Vec<T::ParentId>) -> sqlx::QueryBuilder<'static, sqlx::Postgres> {
	let mut qb = sqlx::query_builder::QueryBuilder::default();

	qb.push("SELECT * FROM ").push(T::NAME).push(" WHERE ");

	let mut seperated = qb.separated(" AND ");

	seperated
		.push(T::PARENT_COLUMN)
		.push_unseparated(" = ANY(")
		.push_bind_unseparated(parent_ids)
		.push_unseparated(")");
	seperated.push("deleted_at IS NULL");

	qb.push(" ORDER BY id ASC");

	qb
}

/// A multi row insert returning the created rows. The caller pairs each
/// insert payload with the id it generated for it.
pub fn insert_many<'args, T: DatabaseTable>(
	parent_id: &'args T::ParentId,
	owner_user_id: &'args str,
	ids: &'args [Ulid],
	inserts: &'args [T::Insert],
) -> sqlx::QueryBuilder<'args, sqlx::Postgres> {
	let mut qb = sqlx::query_builder::QueryBuilder::default();

	qb.push("INSERT INTO ").push(T::NAME).push(" (");

	let mut seperated = qb.separated(",");

	seperated.push("id");
	seperated.push(T::PARENT_COLUMN);

	if let Some(owner_column) = T::OWNER_COLUMN {
		seperated.push(owner_column);
	}

	for column in T::DATA_COLUMNS {
		seperated.push(*column);
	}

	qb.push(") ");

	qb.push_values(ids.iter().zip(inserts.iter()), |mut row, (id, insert)| {
		row.push_bind(*id);
		row.push_bind(parent_id.clone());

		if T::OWNER_COLUMN.is_some() {
			row.push_bind(owner_user_id);
		}

		T::bind_insert(insert, &mut row);
	});

	qb.push(" RETURNING *");

	qb
}

/// `UPDATE {table} SET {clauses} WHERE id = $n AND deleted_at IS NULL
/// RETURNING *`. Callers must not pass an empty patch.
pub fn update<'args, T: DatabaseTable>(id: Ulid, patch: &'args T::Patch) -> sqlx::QueryBuilder<'args, sqlx::Postgres> {
	let mut qb = sqlx::query_builder::QueryBuilder::default();

	qb.push("UPDATE ").push(T::NAME).push(" SET ");

	let mut seperated = qb.separated(",");

	patch.push_set_clauses(&mut seperated);

	qb.push(" WHERE id = ").push_bind(id);
	qb.push(" AND deleted_at IS NULL RETURNING *");

	qb
}

/// `UPDATE {table} SET deleted_at = $1 WHERE id = $2 AND deleted_at IS NULL`
pub fn delete_one<T: DatabaseTable>(id: Ulid, deleted_at: DateTime<Utc>) -> sqlx::QueryBuilder<'static, sqlx::Postgres> {
	let mut qb = sqlx::query_builder::QueryBuilder::default();

	qb.push("UPDATE ").push(T::NAME).push(" SET deleted_at = ").push_bind(deleted_at);
	qb.push(" WHERE ");

	let mut seperated = qb.separated(" AND ");

	seperated.push("id = ").push_bind_unseparated(id);
	seperated.push("deleted_at IS NULL");

	qb
}

/// Soft deletes every live row of this table under one work group, joining
/// the tables between them so only descendants match. Ancestor liveness is
/// deliberately not checked here: a teardown that was cut short leaves rows
/// under already deleted parents, and rerunning it must still reach them.
pub fn delete_by_work_groups_id<T: DatabaseTable>(
	work_groups_id: Ulid,
	deleted_at: DateTime<Utc>,
) -> sqlx::QueryBuilder<'static, sqlx::Postgres> {
	let mut qb = sqlx::query_builder::QueryBuilder::default();

	qb.push("UPDATE ").push(T::NAME).push(" AS t0 SET deleted_at = ").push_bind(deleted_at);

	let intermediates = T::ANCESTORS.len().saturating_sub(1);

	if intermediates > 0 {
		qb.push(" FROM ");

		let mut seperated = qb.separated(",");

		for (index, ancestor) in T::ANCESTORS[..intermediates].iter().enumerate() {
			seperated.push(ancestor.table).push_unseparated(format!(" t{}", index + 1));
		}
	}

	qb.push(" WHERE ");

	let mut seperated = qb.separated(" AND ");

	if T::ANCESTORS.is_empty() {
		seperated.push("t0.id = ").push_bind_unseparated(work_groups_id);
	}

	for (index, ancestor) in T::ANCESTORS.iter().enumerate() {
		if index < intermediates {
			seperated.push(format!("t{index}.{} = t{}.id", ancestor.column, index + 1));
		} else {
			seperated
				.push(format!("t{index}.{} = ", ancestor.column))
				.push_bind_unseparated(work_groups_id);
		}
	}

	seperated.push("t0.deleted_at IS NULL");

	qb
}

/// Walks a row's ancestor chain up to its owning work group and returns that
/// work group's id. Every hop must be live, so a row under a soft deleted
/// ancestor resolves to nothing, exactly like a row that never existed.
///
/// With `for_update` the work group row is locked until the surrounding
/// transaction ends, which pins the whole chain for grant writes.
pub fn resolve_work_groups_id<T: DatabaseTable>(id: Ulid, for_update: bool) -> sqlx::QueryBuilder<'static, sqlx::Postgres> {
	let mut qb = sqlx::query_builder::QueryBuilder::default();

	let root = T::ANCESTORS.len();

	qb.push(format!("SELECT t{root}.id FROM ")).push(T::NAME).push(" t0");

	for (index, ancestor) in T::ANCESTORS.iter().enumerate() {
		qb.push(format!(
			" INNER JOIN {} t{next} ON t{index}.{} = t{next}.id",
			ancestor.table,
			ancestor.column,
			next = index + 1
		));
	}

	qb.push(" WHERE t0.id = ").push_bind(id);

	for index in 0..=root {
		qb.push(format!(" AND t{index}.deleted_at IS NULL"));
	}

	if for_update {
		// No join aliases to name when the chain is empty.
		if root == 0 {
			qb.push(" FOR UPDATE");
		} else {
			qb.push(format!(" FOR UPDATE OF t{root}"));
		}
	}

	qb
}

/// The privilege levels granted on a work group to any of `uids`.
pub fn select_privileges(
	work_groups_id: Ulid,
	uids: Vec<String>,
	for_update: bool,
) -> sqlx::QueryBuilder<'static, sqlx::Postgres> {
	let mut qb = sqlx::query_builder::QueryBuilder::default();

	qb.push("SELECT privilege_type FROM ").push(WorkGroupPrivilege::NAME).push(" WHERE ");

	let mut seperated = qb.separated(" AND ");

	seperated.push("work_groups_id = ").push_bind_unseparated(work_groups_id);
	seperated.push("uid = ANY(").push_bind_unseparated(uids).push_unseparated(")");

	if for_update {
		qb.push(" FOR UPDATE");
	}

	qb
}
