use chrono::Utc;

use super::{Ancestor, DatabaseTable, TablePatch, Ulid};

/// One stop of a train. Arrival and departure are seconds from midnight so
/// rows compare and serialize without timezone handling.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct TimetableRow {
	/// A unique id for the timetable row (primary key)
	pub id: Ulid,

	/// The train this row belongs to
	pub trains_id: Ulid,

	/// The user who created this row
	pub owner_user_id: String,

	/// The name of the station this row stops at
	pub station_name: String,

	/// The arrival time in seconds from midnight, if the train stops here
	pub arrival: Option<i32>,

	/// The departure time in seconds from midnight, if the train continues
	pub departure: Option<i32>,

	/// The station track the train uses
	pub track: Option<String>,

	/// A free form note
	pub note: Option<String>,

	/// The date and time the row was created
	pub created_at: chrono::DateTime<Utc>,

	/// The date and time the row was soft deleted
	pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl DatabaseTable for TimetableRow {
	const ANCESTORS: &'static [Ancestor] = &[
		Ancestor {
			table: "trains",
			column: "trains_id",
		},
		Ancestor {
			table: "works",
			column: "works_id",
		},
		Ancestor {
			table: "work_groups",
			column: "work_groups_id",
		},
	];
	const DATA_COLUMNS: &'static [&'static str] = &["station_name", "arrival", "departure", "track", "note"];
	const FRIENDLY_NAME: &'static str = "timetable row";
	const NAME: &'static str = "timetable_rows";
	const OWNER_COLUMN: Option<&'static str> = Some("owner_user_id");
	const PARENT_COLUMN: &'static str = "trains_id";

	type Insert = TimetableRowInsert;
	type ParentId = Ulid;
	type Patch = TimetableRowPatch;

	fn bind_insert<'args>(
		insert: &'args Self::Insert,
		sep: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		sep.push_bind(&insert.station_name);
		sep.push_bind(insert.arrival);
		sep.push_bind(insert.departure);
		sep.push_bind(&insert.track);
		sep.push_bind(&insert.note);
	}
}

#[derive(Debug, Clone, Default)]
pub struct TimetableRowInsert {
	/// The name of the station this row stops at
	pub station_name: String,
	/// The arrival time in seconds from midnight
	pub arrival: Option<i32>,
	/// The departure time in seconds from midnight
	pub departure: Option<i32>,
	/// The station track the train uses
	pub track: Option<String>,
	/// A free form note
	pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TimetableRowPatch {
	/// A new station name
	pub station_name: Option<String>,
	/// A new arrival time
	pub arrival: Option<Option<i32>>,
	/// A new departure time
	pub departure: Option<Option<i32>>,
	/// A new station track
	pub track: Option<Option<String>>,
	/// A new note
	pub note: Option<Option<String>>,
}

impl TablePatch for TimetableRowPatch {
	fn is_empty(&self) -> bool {
		self.station_name.is_none()
			&& self.arrival.is_none()
			&& self.departure.is_none()
			&& self.track.is_none()
			&& self.note.is_none()
	}

	fn push_set_clauses<'args>(
		&'args self,
		seperated: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		if let Some(station_name) = &self.station_name {
			seperated.push("station_name = ").push_bind_unseparated(station_name);
		}

		match self.arrival {
			Some(Some(arrival)) => {
				seperated.push("arrival = ").push_bind_unseparated(arrival);
			}
			Some(None) => {
				seperated.push("arrival = NULL");
			}
			None => {}
		}

		match self.departure {
			Some(Some(departure)) => {
				seperated.push("departure = ").push_bind_unseparated(departure);
			}
			Some(None) => {
				seperated.push("departure = NULL");
			}
			None => {}
		}

		match &self.track {
			Some(Some(track)) => {
				seperated.push("track = ").push_bind_unseparated(track);
			}
			Some(None) => {
				seperated.push("track = NULL");
			}
			None => {}
		}

		match &self.note {
			Some(Some(note)) => {
				seperated.push("note = ").push_bind_unseparated(note);
			}
			Some(None) => {
				seperated.push("note = NULL");
			}
			None => {}
		}
	}
}
