use chrono::Utc;

use super::{Ancestor, DatabaseTable, TablePatch, Ulid};

/// A timetable document inside a work group, for example one diagram
/// revision or one seasonal schedule.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Work {
	/// A unique id for the work (primary key)
	pub id: Ulid,

	/// The work group this work belongs to
	pub work_groups_id: Ulid,

	/// The user who created this work
	pub owner_user_id: String,

	/// The display name of the work
	pub name: String,

	/// The display color of the work
	pub color: Option<String>,

	/// A free form note
	pub note: Option<String>,

	/// The date and time the work was created
	pub created_at: chrono::DateTime<Utc>,

	/// The date and time the work was soft deleted
	pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl DatabaseTable for Work {
	const ANCESTORS: &'static [Ancestor] = &[Ancestor {
		table: "work_groups",
		column: "work_groups_id",
	}];
	const DATA_COLUMNS: &'static [&'static str] = &["name", "color", "note"];
	const FRIENDLY_NAME: &'static str = "work";
	const NAME: &'static str = "works";
	const OWNER_COLUMN: Option<&'static str> = Some("owner_user_id");
	const PARENT_COLUMN: &'static str = "work_groups_id";

	type Insert = WorkInsert;
	type ParentId = Ulid;
	type Patch = WorkPatch;

	fn bind_insert<'args>(
		insert: &'args Self::Insert,
		sep: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		sep.push_bind(&insert.name);
		sep.push_bind(&insert.color);
		sep.push_bind(&insert.note);
	}
}

#[derive(Debug, Clone, Default)]
pub struct WorkInsert {
	/// The display name of the work
	pub name: String,
	/// The display color of the work
	pub color: Option<String>,
	/// A free form note
	pub note: Option<String>,
}

/// Fields are applied only when set. The inner option of a nullable column
/// distinguishes writing NULL from leaving the column alone.
#[derive(Debug, Clone, Default)]
pub struct WorkPatch {
	/// A new display name
	pub name: Option<String>,
	/// A new display color
	pub color: Option<Option<String>>,
	/// A new note
	pub note: Option<Option<String>>,
}

impl TablePatch for WorkPatch {
	fn is_empty(&self) -> bool {
		self.name.is_none() && self.color.is_none() && self.note.is_none()
	}

	fn push_set_clauses<'args>(
		&'args self,
		seperated: &mut sqlx::query_builder::Separated<'_, 'args, sqlx::Postgres, &'static str>,
	) {
		if let Some(name) = &self.name {
			seperated.push("name = ").push_bind_unseparated(name);
		}

		match &self.color {
			Some(Some(color)) => {
				seperated.push("color = ").push_bind_unseparated(color);
			}
			Some(None) => {
				seperated.push("color = NULL");
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
