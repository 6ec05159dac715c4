use timetable_common::database::{
	InviteKeyPatch, StationTrack, TablePatch, TimetableRow, Train, TrainPatch, Ulid, Work, WorkGroup, WorkInsert,
	WorkPatch,
};

use crate::store::queries;

#[test]
fn test_select_one_qb() {
	assert_eq!(
		queries::select_one::<Work>(Ulid::new(), false).into_sql(),
		"SELECT * FROM works WHERE id = $1 AND deleted_at IS NULL"
	);

	assert_eq!(
		queries::select_one::<Work>(Ulid::new(), true).into_sql(),
		"SELECT * FROM works WHERE id = $1 AND deleted_at IS NULL FOR UPDATE"
	);
}

#[test]
fn test_select_page_qb() {
	assert_eq!(
		queries::select_page::<Work>(&Ulid::new(), 1, 20, None).into_sql(),
		"SELECT * FROM works WHERE work_groups_id = $1 AND deleted_at IS NULL ORDER BY id DESC OFFSET $2 LIMIT $3"
	);

	assert_eq!(
		queries::select_page::<Work>(&Ulid::new(), 3, 50, Some(Ulid::new())).into_sql(),
		"SELECT * FROM works WHERE work_groups_id = $1 AND deleted_at IS NULL AND id <= $2 ORDER BY id DESC OFFSET $3 LIMIT $4"
	);

	// Work groups page by their owning user instead of a parent row.
	assert_eq!(
		queries::select_page::<WorkGroup>(&"user".to_string(), 1, 20, None).into_sql(),
		"SELECT * FROM work_groups WHERE owner_user_id = $1 AND deleted_at IS NULL ORDER BY id DESC OFFSET $2 LIMIT $3"
	);
}

#[test]
fn test_select_by_parent_ids_qb() {
	assert_eq!(
		queries::select_by_parent_ids::<Train>(vec![Ulid::new(), Ulid::new()]).into_sql(),
		"SELECT * FROM trains WHERE works_id = ANY($1) AND deleted_at IS NULL ORDER BY id ASC"
	);
}

#[test]
fn test_insert_many_qb() {
	let parent_id = Ulid::new();
	let ids = [Ulid::new(), Ulid::new()];
	let inserts = [
		WorkInsert {
			name: "first".to_string(),
			color: None,
			note: None,
		},
		WorkInsert {
			name: "second".to_string(),
			color: Some("#ff0000".to_string()),
			note: Some("note".to_string()),
		},
	];

	assert_eq!(
		queries::insert_many::<Work>(&parent_id, "owner", &ids, &inserts).into_sql(),
		"INSERT INTO works (id,work_groups_id,owner_user_id,name,color,note) VALUES ($1, $2, $3, $4, $5, $6), ($7, $8, $9, $10, $11, $12) RETURNING *"
	);
}

#[test]
fn test_update_qb() {
	let patch = WorkPatch {
		name: Some("renamed".to_string()),
		color: Some(None),
		note: None,
	};

	assert_eq!(
		queries::update::<Work>(Ulid::new(), &patch).into_sql(),
		"UPDATE works SET name = $1,color = NULL WHERE id = $2 AND deleted_at IS NULL RETURNING *"
	);

	let patch = InviteKeyPatch {
		description: Some("rotated".to_string()),
	};

	assert_eq!(
		queries::update::<timetable_common::database::InviteKey>(Ulid::new(), &patch).into_sql(),
		"UPDATE invite_keys SET description = $1 WHERE id = $2 AND deleted_at IS NULL RETURNING *"
	);
}

#[test]
fn test_empty_patches_report_empty() {
	assert!(WorkPatch::default().is_empty());
	assert!(TrainPatch::default().is_empty());

	assert!(
		!WorkPatch {
			color: Some(None),
			..Default::default()
		}
		.is_empty()
	);
}

#[test]
fn test_delete_one_qb() {
	assert_eq!(
		queries::delete_one::<Work>(Ulid::new(), chrono::Utc::now()).into_sql(),
		"UPDATE works SET deleted_at = $1 WHERE id = $2 AND deleted_at IS NULL"
	);
}

#[test]
fn test_delete_by_work_groups_id_qb() {
	assert_eq!(
		queries::delete_by_work_groups_id::<Work>(Ulid::new(), chrono::Utc::now()).into_sql(),
		"UPDATE works AS t0 SET deleted_at = $1 WHERE t0.work_groups_id = $2 AND t0.deleted_at IS NULL"
	);

	assert_eq!(
		queries::delete_by_work_groups_id::<StationTrack>(Ulid::new(), chrono::Utc::now()).into_sql(),
		"UPDATE station_tracks AS t0 SET deleted_at = $1 FROM stations t1 WHERE t0.stations_id = t1.id AND t1.work_groups_id = $2 AND t0.deleted_at IS NULL"
	);

	assert_eq!(
		queries::delete_by_work_groups_id::<TimetableRow>(Ulid::new(), chrono::Utc::now()).into_sql(),
		"UPDATE timetable_rows AS t0 SET deleted_at = $1 FROM trains t1,works t2 WHERE t0.trains_id = t1.id AND t1.works_id = t2.id AND t2.work_groups_id = $2 AND t0.deleted_at IS NULL"
	);

	assert_eq!(
		queries::delete_by_work_groups_id::<WorkGroup>(Ulid::new(), chrono::Utc::now()).into_sql(),
		"UPDATE work_groups AS t0 SET deleted_at = $1 WHERE t0.id = $2 AND t0.deleted_at IS NULL"
	);
}

#[test]
fn test_resolve_work_groups_id_qb() {
	assert_eq!(
		queries::resolve_work_groups_id::<WorkGroup>(Ulid::new(), false).into_sql(),
		"SELECT t0.id FROM work_groups t0 WHERE t0.id = $1 AND t0.deleted_at IS NULL"
	);

	assert_eq!(
		queries::resolve_work_groups_id::<WorkGroup>(Ulid::new(), true).into_sql(),
		"SELECT t0.id FROM work_groups t0 WHERE t0.id = $1 AND t0.deleted_at IS NULL FOR UPDATE"
	);

	assert_eq!(
		queries::resolve_work_groups_id::<Work>(Ulid::new(), false).into_sql(),
		"SELECT t1.id FROM works t0 INNER JOIN work_groups t1 ON t0.work_groups_id = t1.id WHERE t0.id = $1 AND t0.deleted_at IS NULL AND t1.deleted_at IS NULL"
	);

	assert_eq!(
		queries::resolve_work_groups_id::<TimetableRow>(Ulid::new(), true).into_sql(),
		"SELECT t3.id FROM timetable_rows t0 INNER JOIN trains t1 ON t0.trains_id = t1.id INNER JOIN works t2 ON t1.works_id = t2.id INNER JOIN work_groups t3 ON t2.work_groups_id = t3.id WHERE t0.id = $1 AND t0.deleted_at IS NULL AND t1.deleted_at IS NULL AND t2.deleted_at IS NULL AND t3.deleted_at IS NULL FOR UPDATE OF t3"
	);
}

#[test]
fn test_select_privileges_qb() {
	assert_eq!(
		queries::select_privileges(Ulid::new(), vec!["user".to_string(), "anonymous".to_string()], false).into_sql(),
		"SELECT privilege_type FROM work_groups_privileges WHERE work_groups_id = $1 AND uid = ANY($2)"
	);

	assert_eq!(
		queries::select_privileges(Ulid::new(), vec!["user".to_string()], true).into_sql(),
		"SELECT privilege_type FROM work_groups_privileges WHERE work_groups_id = $1 AND uid = ANY($2) FOR UPDATE"
	);
}
