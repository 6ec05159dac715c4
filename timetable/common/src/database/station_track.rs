use chrono::Utc;

use super::{Ancestor, DatabaseTable, TablePatch, Ulid};

/// A platform or siding of a station that timetable rows can refer to.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct StationTrack {
	/// A unique id for the station track (primary key)
	pub id: Ulid,

	/// The station this track belongs to
	pub stations_id: Ulid,

	/// The user who created this track
	pub owner_user_id: String,

	/// The display name of the track, for example "1" or "D"
	pub name: String,

	/// The date and time the track was created
	pub created_at: chrono::DateTime<Utc>,

	/// The date and time the track was soft deleted
	pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl DatabaseTable for StationTrack {
	const ANCESTORS: &'static [Ancestor] = &[
		Ancestor {
			table: "stations",
			column: "stations_id",
		},
		Ancestor {
			table: "work_groups",
			column: "work_groups_id",
		},
	];
	const DATA_COLUMNS: &'static [&'static str] = &["name"];
	const FRIENDLY_NAME: &'static str = "station track";
	const NAME: &'static str = "station_tracks";
	const OWNER_COLUMN: Option<&'static str> = Some("owner_user_id");
	const PARENT_COLUMN: &'static str = "stations_id";

	type Insert = StationTrackInsert;
	type ParentId = Ulid;
	type Patch = StationTrackPatch;

	fn bind_insert<'args>(
		insert: &'args Self::Insert,
		sep: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		sep.push_bind(&insert.name);
	}
}

#[derive(Debug, Clone, Default)]
pub struct StationTrackInsert {
	/// The display name of the track
	pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct StationTrackPatch {
	/// A new display name
	pub name: Option<String>,
}

impl TablePatch for StationTrackPatch {
	fn is_empty(&self) -> bool {
		self.name.is_none()
	}

	fn push_set_clauses<'args>(
		&'args self,
		seperated: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		if let Some(name) = &self.name {
			seperated.push("name = ").push_bind_unseparated(name);
		}
	}
}
