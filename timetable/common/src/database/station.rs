use chrono::Utc;

use super::{Ancestor, DatabaseTable, TablePatch, Ulid};

/// A station shared by every work in a work group. `position` orders
/// stations along the line.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Station {
	/// A unique id for the station (primary key)
	pub id: Ulid,

	/// The work group this station belongs to
	pub work_groups_id: Ulid,

	/// The user who created this station
	pub owner_user_id: String,

	/// The display name of the station
	pub name: String,

	/// The ordering of the station along the line
	pub position: i32,

	/// The date and time the station was created
	pub created_at: chrono::DateTime<Utc>,

	/// The date and time the station was soft deleted
	pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl DatabaseTable for Station {
	const ANCESTORS: &'static [Ancestor] = &[Ancestor {
		table: "work_groups",
		column: "work_groups_id",
	}];
	const DATA_COLUMNS: &'static [&'static str] = &["name", "position"];
	const FRIENDLY_NAME: &'static str = "station";
	const NAME: &'static str = "stations";
	const OWNER_COLUMN: Option<&'static str> = Some("owner_user_id");
	const PARENT_COLUMN: &'static str = "work_groups_id";

	type Insert = StationInsert;
	type ParentId = Ulid;
	type Patch = StationPatch;

	fn bind_insert<'args>(
		insert: &'args Self::Insert,
		sep: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		sep.push_bind(&insert.name);
		sep.push_bind(insert.position);
	}
}

#[derive(Debug, Clone, Default)]
pub struct StationInsert {
	/// The display name of the station
	pub name: String,
	/// The ordering of the station along the line
	pub position: i32,
}

#[derive(Debug, Clone, Default)]
pub struct StationPatch {
	/// A new display name
	pub name: Option<String>,
	/// A new ordering position
	pub position: Option<i32>,
}

impl TablePatch for StationPatch {
	fn is_empty(&self) -> bool {
		self.name.is_none() && self.position.is_none()
	}

	fn push_set_clauses<'args>(
		&'args self,
		seperated: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		if let Some(name) = &self.name {
			seperated.push("name = ").push_bind_unseparated(name);
		}

		if let Some(position) = self.position {
			seperated.push("position = ").push_bind_unseparated(position);
		}
	}
}
