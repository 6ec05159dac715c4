use std::sync::Arc;

use timetable_common::database::{
	PrivilegeType, TimetableRow, TimetableRowInsert, Train, TrainInsert, Ulid, Work, WorkGroup, WorkInsert,
};
use timetable_common::global::GlobalDb;

use super::global::{mock_global_state, GlobalState};
use crate::config::AppConfig;
use crate::store;

pub async fn setup() -> Arc<GlobalState> {
	mock_global_state(AppConfig::default()).await
}

/// A user id that cannot collide across tests sharing one database.
pub fn unique_user(prefix: &str) -> String {
	format!("{prefix}-{}", Ulid::new())
}

pub async fn create_work_group(global: &Arc<GlobalState>, owner: &str) -> WorkGroup {
	crate::work_groups::create(global, "test work group".to_string(), owner)
		.await
		.expect("failed to create work group")
}

pub async fn create_work(global: &Arc<GlobalState>, work_groups_id: Ulid, owner: &str, name: &str) -> Work {
	let ids = [Ulid::new()];
	let inserts = [WorkInsert {
		name: name.to_string(),
		color: None,
		note: None,
	}];

	store::insert_many::<Work, GlobalState>(global, &work_groups_id, owner, &ids, &inserts)
		.await
		.expect("failed to insert work")
		.into_iter()
		.next()
		.expect("no work returned")
}

pub async fn create_train(global: &Arc<GlobalState>, works_id: Ulid, owner: &str, train_number: &str, direction: i32) -> Train {
	let ids = [Ulid::new()];
	let inserts = [TrainInsert {
		train_number: train_number.to_string(),
		direction,
		note: None,
	}];

	store::insert_many::<Train, GlobalState>(global, &works_id, owner, &ids, &inserts)
		.await
		.expect("failed to insert train")
		.into_iter()
		.next()
		.expect("no train returned")
}

pub async fn create_timetable_row(global: &Arc<GlobalState>, trains_id: Ulid, owner: &str, station_name: &str) -> TimetableRow {
	let ids = [Ulid::new()];
	let inserts = [TimetableRowInsert {
		station_name: station_name.to_string(),
		arrival: None,
		departure: None,
		track: None,
		note: None,
	}];

	store::insert_many::<TimetableRow, GlobalState>(global, &trains_id, owner, &ids, &inserts)
		.await
		.expect("failed to insert timetable row")
		.into_iter()
		.next()
		.expect("no timetable row returned")
}

/// Writes a grant directly, bypassing the invite key ledger.
pub async fn grant(global: &Arc<GlobalState>, work_groups_id: Ulid, uid: &str, privilege_type: PrivilegeType) {
	sqlx::query(
		"INSERT INTO work_groups_privileges (work_groups_id, uid, privilege_type) VALUES ($1, $2, $3) ON CONFLICT (work_groups_id, uid) DO UPDATE SET privilege_type = $3",
	)
	.bind(work_groups_id)
	.bind(uid)
	.bind(privilege_type)
	.execute(global.db().as_ref())
	.await
	.expect("failed to write grant");
}
