use std::time::Duration;

use timetable_common::database::{PrivilegeType, TimetableRow, Train, Ulid, Work, WorkGroup};

use super::utils::{create_timetable_row, create_train, create_work, create_work_group, grant, setup, unique_user};
use crate::dump::{assemble, dump};
use crate::errors::ApiError;
use crate::store;
use crate::tests::global::GlobalState;

fn work_group(owner: &str) -> WorkGroup {
	WorkGroup {
		id: Ulid::new(),
		owner_user_id: owner.to_string(),
		name: "export me".to_string(),
		..Default::default()
	}
}

fn work(work_groups_id: Ulid, name: &str) -> Work {
	Work {
		id: Ulid::new(),
		work_groups_id,
		name: name.to_string(),
		..Default::default()
	}
}

fn train(works_id: Ulid, train_number: &str, direction: i32) -> Train {
	Train {
		id: Ulid::new(),
		works_id,
		train_number: train_number.to_string(),
		direction,
		..Default::default()
	}
}

fn row(trains_id: Ulid, station_name: &str) -> TimetableRow {
	TimetableRow {
		id: Ulid::new(),
		trains_id,
		station_name: station_name.to_string(),
		..Default::default()
	}
}

#[test]
fn test_assemble_nests_and_reverses() {
	let group = work_group("owner");
	let first = work(group.id, "first work");
	let second = work(group.id, "second work");

	let outbound = train(first.id, "101", 1);
	let inbound = train(first.id, "102", -1);
	let childless = train(second.id, "201", 1);

	let rows = vec![
		row(outbound.id, "alpha"),
		row(outbound.id, "beta"),
		row(outbound.id, "gamma"),
		row(inbound.id, "alpha"),
		row(inbound.id, "beta"),
		row(inbound.id, "gamma"),
	];

	let tree = assemble(
		group.clone(),
		vec![first.clone(), second.clone()],
		vec![outbound.clone(), inbound.clone(), childless.clone()],
		rows,
	);

	assert_eq!(tree.id, group.id);
	assert_eq!(tree.works.len(), 2);
	assert_eq!(tree.works[0].id, first.id);
	assert_eq!(tree.works[1].id, second.id);

	let trains = &tree.works[0].trains;
	assert_eq!(trains.len(), 2);

	// Outbound trains keep storage order, inbound trains reverse it.
	let stations: Vec<_> = trains[0].timetable_rows.iter().map(|row| row.station_name.as_str()).collect();
	assert_eq!(stations, ["alpha", "beta", "gamma"]);

	let stations: Vec<_> = trains[1].timetable_rows.iter().map(|row| row.station_name.as_str()).collect();
	assert_eq!(stations, ["gamma", "beta", "alpha"]);

	// Zero children always come out as empty lists.
	assert!(tree.works[1].trains[0].timetable_rows.is_empty());
}

#[test]
fn test_dump_serializes_empty_children_as_lists() {
	let group = work_group("owner");
	let only = work(group.id, "empty work");

	let tree = assemble(group, vec![only], Vec::new(), Vec::new());

	let value = serde_json::to_value(&tree).unwrap();

	assert_eq!(value["works"][0]["trains"], serde_json::json!([]));
	assert!(value["works"][0]["trains"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_dump_collects_the_whole_tree() {
	let global = setup().await;

	let owner = unique_user("owner");
	let reader = unique_user("reader");
	let stranger = unique_user("stranger");

	let group = create_work_group(&global, &owner).await;
	grant(&global, group.id, &reader, PrivilegeType::Read).await;

	let first = create_work(&global, group.id, &owner, "first work").await;
	tokio::time::sleep(Duration::from_millis(2)).await;
	let second = create_work(&global, group.id, &owner, "second work").await;

	let outbound = create_train(&global, first.id, &owner, "101", 1).await;
	tokio::time::sleep(Duration::from_millis(2)).await;
	let inbound = create_train(&global, first.id, &owner, "102", -1).await;

	for station in ["alpha", "beta", "gamma"] {
		create_timetable_row(&global, outbound.id, &owner, station).await;
		tokio::time::sleep(Duration::from_millis(2)).await;
	}
	for station in ["alpha", "beta", "gamma"] {
		create_timetable_row(&global, inbound.id, &owner, station).await;
		tokio::time::sleep(Duration::from_millis(2)).await;
	}

	let tree = dump(&global, group.id, &reader).await.unwrap();

	assert_eq!(tree.works.iter().map(|work| work.id).collect::<Vec<_>>(), [first.id, second.id]);
	assert!(tree.works[1].trains.is_empty());

	let trains = &tree.works[0].trains;
	assert_eq!(trains.iter().map(|train| train.id).collect::<Vec<_>>(), [outbound.id, inbound.id]);

	let stations: Vec<_> = trains[0].timetable_rows.iter().map(|row| row.station_name.as_str()).collect();
	assert_eq!(stations, ["alpha", "beta", "gamma"]);

	let stations: Vec<_> = trains[1].timetable_rows.iter().map(|row| row.station_name.as_str()).collect();
	assert_eq!(stations, ["gamma", "beta", "alpha"]);

	assert!(matches!(
		dump(&global, group.id, &stranger).await,
		Err(ApiError::NotFound("work group"))
	));

	// Deleted subtrees drop out of the export.
	store::delete_one::<Train, GlobalState>(&global, inbound.id).await.unwrap();

	let tree = dump(&global, group.id, &owner).await.unwrap();
	assert_eq!(tree.works[0].trains.iter().map(|train| train.id).collect::<Vec<_>>(), [outbound.id]);
}
