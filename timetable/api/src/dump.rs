//! The export assembler: one work group's whole tree, collected with three
//! flat bulk reads and reassembled in memory.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use timetable_common::database::{DatabaseTable, TimetableRow, Train, Ulid, Work, WorkGroup};

use crate::access::require_read;
use crate::errors::{ApiError, Result};
use crate::global::ApiGlobal;
use crate::store::{self, queries};

/// A full work group export. Children are lists at every level, empty when a
/// level has none, never absent.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WorkGroupDump {
	pub id: Ulid,
	pub owner_user_id: String,
	pub name: String,
	pub created_at: DateTime<Utc>,
	pub works: Vec<WorkDump>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WorkDump {
	pub id: Ulid,
	pub name: String,
	pub color: Option<String>,
	pub note: Option<String>,
	pub created_at: DateTime<Utc>,
	pub trains: Vec<TrainDump>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TrainDump {
	pub id: Ulid,
	pub train_number: String,
	pub direction: i32,
	pub note: Option<String>,
	pub created_at: DateTime<Utc>,
	pub timetable_rows: Vec<TimetableRowDump>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TimetableRowDump {
	pub id: Ulid,
	pub station_name: String,
	pub arrival: Option<i32>,
	pub departure: Option<i32>,
	pub track: Option<String>,
	pub note: Option<String>,
	pub created_at: DateTime<Utc>,
}

impl From<TimetableRow> for TimetableRowDump {
	fn from(row: TimetableRow) -> Self {
		Self {
			id: row.id,
			station_name: row.station_name,
			arrival: row.arrival,
			departure: row.departure,
			track: row.track,
			note: row.note,
			created_at: row.created_at,
		}
	}
}

/// Exports a work group's works, trains and timetable rows as one nested
/// tree. Requires read privilege on the work group.
///
/// Each level is collected with a single bulk query across the whole parent
/// id set, three queries total no matter how large the tree is. The reads
/// are not locked; a dump racing an insert may miss or include the
/// borderline row.
pub async fn dump<G: ApiGlobal>(global: &Arc<G>, work_groups_id: Ulid, sender_user_id: &str) -> Result<WorkGroupDump> {
	require_read::<WorkGroup, G>(global, work_groups_id, sender_user_id).await?;

	let work_group = store::select_one::<WorkGroup, G>(global, work_groups_id).await?;

	let works: Vec<Work> = queries::select_by_parent_ids::<Work>(vec![work_groups_id])
		.build_query_as()
		.fetch_all(global.db().as_ref())
		.await
		.map_err(|err| ApiError::from_query(Work::FRIENDLY_NAME, err))?;

	let trains: Vec<Train> = if works.is_empty() {
		Vec::new()
	} else {
		queries::select_by_parent_ids::<Train>(works.iter().map(|work| work.id).collect())
			.build_query_as()
			.fetch_all(global.db().as_ref())
			.await
			.map_err(|err| ApiError::from_query(Train::FRIENDLY_NAME, err))?
	};

	let timetable_rows: Vec<TimetableRow> = if trains.is_empty() {
		Vec::new()
	} else {
		queries::select_by_parent_ids::<TimetableRow>(trains.iter().map(|train| train.id).collect())
			.build_query_as()
			.fetch_all(global.db().as_ref())
			.await
			.map_err(|err| ApiError::from_query(TimetableRow::FRIENDLY_NAME, err))?
	};

	Ok(assemble(work_group, works, trains, timetable_rows))
}

/// Reassembles the flat per level row sets into the nested tree. Rows arrive
/// ordered by ascending id and grouping keeps that order within each parent.
pub(crate) fn assemble(
	work_group: WorkGroup,
	works: Vec<Work>,
	trains: Vec<Train>,
	timetable_rows: Vec<TimetableRow>,
) -> WorkGroupDump {
	let mut rows_by_train = timetable_rows.into_iter().into_group_map_by(|row| row.trains_id);
	let mut trains_by_work = trains.into_iter().into_group_map_by(|train| train.works_id);

	WorkGroupDump {
		id: work_group.id,
		owner_user_id: work_group.owner_user_id,
		name: work_group.name,
		created_at: work_group.created_at,
		works: works
			.into_iter()
			.map(|work| {
				let trains = trains_by_work.remove(&work.id).unwrap_or_default();

				WorkDump {
					id: work.id,
					name: work.name,
					color: work.color,
					note: work.note,
					created_at: work.created_at,
					trains: trains
						.into_iter()
						.map(|train| {
							let mut timetable_rows = rows_by_train.remove(&train.id).unwrap_or_default();

							// Inbound trains export their rows in traversal
							// order, the reverse of storage order.
							if train.direction < 0 {
								timetable_rows.reverse();
							}

							TrainDump {
								id: train.id,
								train_number: train.train_number,
								direction: train.direction,
								note: train.note,
								created_at: train.created_at,
								timetable_rows: timetable_rows.into_iter().map(TimetableRowDump::from).collect(),
							}
						})
						.collect(),
				}
			})
			.collect(),
	}
}
