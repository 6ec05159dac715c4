use chrono::Utc;

use super::{Ancestor, DatabaseTable, TablePatch, Ulid};

/// One train service inside a work. `direction` is signed: positive trains
/// run outbound and their timetable rows are exported in storage order,
/// negative trains run inbound and are exported reversed.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Train {
	/// A unique id for the train (primary key)
	pub id: Ulid,

	/// The work this train belongs to
	pub works_id: Ulid,

	/// The user who created this train
	pub owner_user_id: String,

	/// The public train number, for example "1024M"
	pub train_number: String,

	/// The running direction, positive outbound and negative inbound
	pub direction: i32,

	/// A free form note
	pub note: Option<String>,

	/// The date and time the train was created
	pub created_at: chrono::DateTime<Utc>,

	/// The date and time the train was soft deleted
	pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl DatabaseTable for Train {
	const ANCESTORS: &'static [Ancestor] = &[
		Ancestor {
			table: "works",
			column: "works_id",
		},
		Ancestor {
			table: "work_groups",
			column: "work_groups_id",
		},
	];
	const DATA_COLUMNS: &'static [&'static str] = &["train_number", "direction", "note"];
	const FRIENDLY_NAME: &'static str = "train";
	const NAME: &'static str = "trains";
	const OWNER_COLUMN: Option<&'static str> = Some("owner_user_id");
	const PARENT_COLUMN: &'static str = "works_id";

	type Insert = TrainInsert;
	type ParentId = Ulid;
	type Patch = TrainPatch;

	fn bind_insert<'args>(
		insert: &'args Self::Insert,
		sep: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		sep.push_bind(&insert.train_number);
		sep.push_bind(insert.direction);
		sep.push_bind(&insert.note);
	}
}

#[derive(Debug, Clone, Default)]
pub struct TrainInsert {
	/// The public train number
	pub train_number: String,
	/// The running direction, positive outbound and negative inbound
	pub direction: i32,
	/// A free form note
	pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TrainPatch {
	/// A new train number
	pub train_number: Option<String>,
	/// A new running direction
	pub direction: Option<i32>,
	/// A new note
	pub note: Option<Option<String>>,
}

impl TablePatch for TrainPatch {
	fn is_empty(&self) -> bool {
		self.train_number.is_none() && self.direction.is_none() && self.note.is_none()
	}

	fn push_set_clauses<'args>(
		&'args self,
		seperated: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		if let Some(train_number) = &self.train_number {
			seperated.push("train_number = ").push_bind_unseparated(train_number);
		}

		if let Some(direction) = self.direction {
			seperated.push("direction = ").push_bind_unseparated(direction);
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
